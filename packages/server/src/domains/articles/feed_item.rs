//! Feed item → article template.
//!
//! Feed summaries arrive as HTML from the aggregator and are inserted as-is.

use lazy_static::lazy_static;
use regex::Regex;

use super::{lead_artist, FeedItemInput, GeneratedArticle};
use crate::common::utils::{clean_title, collapse_whitespace, excerpt, slugify};

lazy_static! {
    static ref HYPE_WORDS: Regex = Regex::new(
        r"(?i)\b(?:hotly-?tipped|much-?anticipated|fast-?rising|award-?winning)\b"
    )
    .unwrap();
    static ref TITLE_ANNOUNCEMENT: Regex = Regex::new(
        r"(?i)^[^a-zA-Z]*([A-Z][a-zA-Z\s&]+?)\s+(announce|release|drop|share|debut|unveil|return)(?:s|es|ed)?\s*(.+)"
    )
    .unwrap();
}

const EXCERPT_CHARS: usize = 150;

pub fn generate_feed_article(input: &FeedItemInput) -> GeneratedArticle {
    let title = clean_title(&input.title);
    let slug = slugify(&title);
    let summary = input
        .summary
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let excerpt = match summary {
        Some(summary) => excerpt(summary, EXCERPT_CHARS),
        None => format!("{} - latest news from {}.", title, input.source),
    };

    let mut content = match summary {
        Some(summary) => format!("<p>{}</p>\n\n", strip_hype(summary)),
        None => format!("<p>{}.</p>\n\n", title),
    };

    if let Some(artist) = lead_artist(input.artist_names.as_deref(), &title) {
        content.push_str(&format!(
            "<p><strong>{}</strong> {}.</p>\n\n",
            artist,
            announcement(&title)
        ));
    }

    content.push_str(&format!(
        "<p>Via <a href=\"{}\" target=\"_blank\" rel=\"noopener\">{}</a>.</p>",
        input.url, input.source
    ));

    GeneratedArticle {
        title,
        slug,
        excerpt,
        content,
        artist: None,
    }
}

/// Remove promotional adjectives and tidy the spacing they leave behind.
fn strip_hype(summary: &str) -> String {
    collapse_whitespace(&HYPE_WORDS.replace_all(summary, ""))
}

/// `"{verb}s {rest}"` from a headline such as "Wolf Alice announce UK tour".
fn announcement(title: &str) -> String {
    match TITLE_ANNOUNCEMENT.captures(title) {
        Some(caps) => format!("{}s {}", caps[2].to_lowercase(), &caps[3]),
        None => "has announced new music".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(title: &str, summary: Option<&str>) -> FeedItemInput {
        FeedItemInput {
            title: title.to_string(),
            summary: summary.map(String::from),
            source: "NME".to_string(),
            url: "https://www.nme.com/news/music/wolf-alice-tour".to_string(),
            artist_names: None,
        }
    }

    #[test]
    fn test_feed_article_with_summary() {
        let article = generate_feed_article(&input(
            "Wolf Alice announce UK tour.",
            Some("The  hotly-tipped   band return with a much-anticipated run of dates."),
        ));

        assert_eq!(article.title, "Wolf Alice announce UK tour");
        assert_eq!(article.slug, "wolf-alice-announce-uk-tour");
        assert_eq!(
            article.content,
            "<p>The band return with a run of dates.</p>\n\n\
<p><strong>Wolf Alice</strong> announces UK tour.</p>\n\n\
<p>Via <a href=\"https://www.nme.com/news/music/wolf-alice-tour\" target=\"_blank\" rel=\"noopener\">NME</a>.</p>"
        );
        assert_eq!(article.artist, None);
    }

    #[test]
    fn test_feed_article_without_summary() {
        let article = generate_feed_article(&input("Glastonbury 2026 lineup revealed", None));
        assert_eq!(
            article.excerpt,
            "Glastonbury 2026 lineup revealed - latest news from NME."
        );
        assert!(article
            .content
            .starts_with("<p>Glastonbury 2026 lineup revealed.</p>\n\n"));
        assert!(article.content.contains(
            "<p><strong>Glastonbury 2026 lineup revealed</strong> has announced new music.</p>"
        ));
    }

    #[test]
    fn test_feed_excerpt_truncated() {
        let summary = "x".repeat(200);
        let article = generate_feed_article(&input("Band share song", Some(&summary)));
        assert_eq!(article.excerpt, format!("{}...", "x".repeat(150)));
    }

    #[test]
    fn test_supplied_artist_name_used() {
        let mut feed = input("New single from the Sheffield band shared today", None);
        feed.artist_names = Some(vec!["Arctic Monkeys".to_string()]);
        let article = generate_feed_article(&feed);
        assert!(article.content.contains("<strong>Arctic Monkeys</strong>"));
    }

    #[test]
    fn test_announcement_verb_forms() {
        assert_eq!(
            announcement("Charli XCX releases new remix album"),
            "releases new remix album"
        );
        assert_eq!(announcement("IDLES Unveiled their next era"), "unveils their next era");
        assert_eq!(announcement("No verb here"), "has announced new music");
    }
}
