//! Article generators: reformat press-release or feed text into a draft
//! article (title, slug, excerpt, HTML body).
//!
//! Both generators are pure string templating. They never call out to a
//! language model or any other service.

pub mod feed_item;
pub mod press_release;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub use feed_item::generate_feed_article;
pub use press_release::generate_press_article;

lazy_static! {
    /// First announcement verb in a subject line; the text before it is the artist.
    static ref ANNOUNCEMENT_VERB: Regex =
        Regex::new(r"(?i)\s+(?:announce|release|drop|share)").unwrap();
}

/// Press-release input for `generate-article`
#[derive(Debug, Clone, Deserialize)]
pub struct PressReleaseInput {
    pub subject: String,
    pub body: String,
    #[serde(default)]
    pub artist_names: Option<Vec<String>>,
    #[serde(default)]
    pub sender: Option<String>,
}

/// Feed item input for `generate-feed-article`
#[derive(Debug, Clone, Deserialize)]
pub struct FeedItemInput {
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    pub source: String,
    pub url: String,
    #[serde(default)]
    pub artist_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GeneratedArticle {
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,
}

/// The first supplied artist name, else the subject text before the first
/// announcement verb.
pub(crate) fn lead_artist(artist_names: Option<&[String]>, subject: &str) -> Option<String> {
    if let Some(first) = artist_names
        .and_then(|names| names.first())
        .filter(|n| !n.trim().is_empty())
    {
        return Some(first.trim().to_string());
    }

    let before_verb = ANNOUNCEMENT_VERB
        .split(subject)
        .next()
        .unwrap_or_default()
        .trim();
    if before_verb.is_empty() {
        None
    } else {
        Some(before_verb.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lead_artist_prefers_supplied_names() {
        let names = vec!["Wet Leg".to_string()];
        assert_eq!(
            lead_artist(Some(names.as_slice()), "Someone else announces tour").as_deref(),
            Some("Wet Leg")
        );
    }

    #[test]
    fn test_lead_artist_from_subject() {
        assert_eq!(
            lead_artist(None, "Fontaines D.C. announce new album 'Romance'").as_deref(),
            Some("Fontaines D.C.")
        );
        assert_eq!(
            lead_artist(Some(&[][..]), "IDLES Share Video").as_deref(),
            Some("IDLES")
        );
    }

    #[test]
    fn test_lead_artist_without_verb_is_whole_subject() {
        assert_eq!(
            lead_artist(None, "  Glastonbury lineup  ").as_deref(),
            Some("Glastonbury lineup")
        );
        assert_eq!(lead_artist(None, "   "), None);
    }
}
