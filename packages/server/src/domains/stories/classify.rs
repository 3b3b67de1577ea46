//! Keyword classification of incoming feed items.

use lazy_static::lazy_static;
use regex::Regex;

/// Artists whose coverage is always flagged for the editors.
pub const PRIORITY_ARTISTS: &[&str] = &[
    "wolf alice",
    "the 1975",
    "wet leg",
    "charli xcx",
    "beabadoobee",
    "fontaines dc",
    "idles",
    "slowthai",
    "yungblud",
    "sam fender",
    "lorde",
    "billie eilish",
    "olivia rodrigo",
    "arctic monkeys",
    "foals",
    "bombay bicycle club",
    "the strokes",
    "yeah yeah yeahs",
];

const FESTIVAL_KEYWORDS: &[&str] = &["festival", "lineup", "stage", "weekend"];
const UPSET_KEYWORDS: &[&str] = &["rock", "punk", "metal", "hardcore", "emo", "post-hardcore"];
const HYPE_KEYWORDS: &[&str] = &["debut", "new artist", "emerging", "breakthrough"];

const MAX_ARTIST_NAMES: usize = 3;

lazy_static! {
    static ref ARTIST_PATTERNS: [Regex; 2] = [
        Regex::new(
            r"^([A-Z][a-zA-Z\s]+?)(?:\s+(?:announce|release|drop|share|debut|unveil|return|sign|join|team|-|:|–))"
        )
        .unwrap(),
        Regex::new(
            r"([A-Z][a-zA-Z\s]+?)(?:\s+(?:and|&|\+)\s+([A-Z][a-zA-Z\s]+?))?(?:\s+(?:announce|release|drop|share))"
        )
        .unwrap(),
    ];
}

/// Magazine section a story is filed under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Festivals,
    Upset,
    Hype,
}

impl Section {
    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Festivals => "Festivals",
            Section::Upset => "Upset",
            Section::Hype => "Hype",
        }
    }
}

/// Everything inferred about a feed item before it becomes a story
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub section: Option<Section>,
    pub is_festival: bool,
    pub priority: bool,
    pub artist_names: Vec<String>,
}

pub fn classify(title: &str, summary: Option<&str>, source: &str) -> Classification {
    let summary = summary.unwrap_or_default();
    let section = detect_section(title, summary, source);

    Classification {
        section,
        is_festival: section == Some(Section::Festivals),
        priority: mentions_priority_artist(title, summary),
        artist_names: extract_artist_names(title, summary),
    }
}

/// Festival keywords win over rock keywords, which win over new-artist keywords.
pub fn detect_section(title: &str, summary: &str, source: &str) -> Option<Section> {
    let text = format!("{} {} {}", title, summary, source).to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|kw| text.contains(kw));

    if mentions(FESTIVAL_KEYWORDS) {
        Some(Section::Festivals)
    } else if mentions(UPSET_KEYWORDS) {
        Some(Section::Upset)
    } else if mentions(HYPE_KEYWORDS) {
        Some(Section::Hype)
    } else {
        None
    }
}

pub fn mentions_priority_artist(title: &str, summary: &str) -> bool {
    let text = format!("{} {}", title, summary).to_lowercase();
    PRIORITY_ARTISTS.iter().any(|artist| text.contains(artist))
}

/// Up to three distinct capitalised names that precede an announcement verb.
pub fn extract_artist_names(title: &str, summary: &str) -> Vec<String> {
    let text = format!("{} {}", title, summary);
    let mut names: Vec<String> = Vec::new();

    for pattern in ARTIST_PATTERNS.iter() {
        let Some(name) = pattern
            .captures(&text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().trim().to_string())
        else {
            continue;
        };
        if name.chars().count() > 2 && !names.contains(&name) {
            names.push(name);
        }
    }

    names.truncate(MAX_ARTIST_NAMES);
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_festival_beats_other_sections() {
        let c = classify(
            "Reading Festival adds punk acts to lineup",
            Some("Debut sets from emerging bands"),
            "NME",
        );
        assert_eq!(c.section, Some(Section::Festivals));
        assert!(c.is_festival);
    }

    #[test]
    fn test_upset_and_hype_sections() {
        assert_eq!(
            detect_section("Turnstile share hardcore anthem", "", "Kerrang"),
            Some(Section::Upset)
        );
        assert_eq!(
            detect_section("Meet the breakthrough songwriter", "", "DIY"),
            Some(Section::Hype)
        );
        assert_eq!(detect_section("Album review", "", "The Line of Best Fit"), None);
    }

    #[test]
    fn test_source_counts_towards_section() {
        assert_eq!(
            detect_section("New single", "", "Metal Hammer"),
            Some(Section::Upset)
        );
    }

    #[test]
    fn test_priority_artist_case_insensitive() {
        assert!(mentions_priority_artist("WOLF ALICE return", ""));
        assert!(mentions_priority_artist("Tour news", "with support from The Strokes"));
        assert!(!mentions_priority_artist("Unknown band", "nothing here"));
    }

    #[test]
    fn test_extract_artist_names() {
        assert_eq!(
            extract_artist_names("Sam Fender announces arena tour", ""),
            vec!["Sam Fender".to_string()]
        );
    }

    #[test]
    fn test_extract_artist_names_from_summary_pattern() {
        let names = extract_artist_names(
            "Big news today",
            "After months of teasing, Bombay Bicycle Club and Lorde share a collaboration",
        );
        assert_eq!(names, vec!["Bombay Bicycle Club".to_string()]);
    }

    #[test]
    fn test_short_names_dropped() {
        assert!(extract_artist_names("MJ announce", "").is_empty());
    }

    #[test]
    fn test_classify_without_summary() {
        let c = classify("Yungblud - new single out now", None, "Dork");
        assert!(c.priority);
        assert_eq!(c.artist_names, vec!["Yungblud".to_string()]);
        assert_eq!(c.section, None);
    }
}
