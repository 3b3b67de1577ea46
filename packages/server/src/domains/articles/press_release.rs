//! Press release → article template.

use lazy_static::lazy_static;
use regex::Regex;

use super::{lead_artist, GeneratedArticle, PressReleaseInput};
use crate::common::utils::{clean_title, escape_html, slugify, truncate_chars};

lazy_static! {
    static ref MONTH_ABBREVIATION: Regex =
        Regex::new(r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\b").unwrap();
    static ref DAY_NUMBER: Regex = Regex::new(r"\d{1,2}").unwrap();
    static ref LEADING_NON_LETTERS: Regex = Regex::new(r"^[^a-zA-Z]*").unwrap();
    static ref RELEASE_DATE: Regex = Regex::new(
        r"(?i)(?:out|released?|available)\s+(?:now|on|this)?\s*([A-Z][a-z]+ \d{1,2}(?:st|nd|rd|th)?)"
    )
    .unwrap();
}

/// At most this many tour-date lines are listed.
const MAX_LIVE_DATES: usize = 5;

pub fn generate_press_article(input: &PressReleaseInput) -> GeneratedArticle {
    let artist = lead_artist(input.artist_names.as_deref(), &input.subject)
        .unwrap_or_else(|| "Artist".to_string());
    let title = clean_title(&input.subject);
    let slug = slugify(&title);

    GeneratedArticle {
        excerpt: press_excerpt(&input.body),
        content: article_body(&artist, &input.body),
        title,
        slug,
        artist: Some(artist),
    }
}

/// First sentence of the body; long sentences are cut at 150 chars.
fn press_excerpt(body: &str) -> String {
    let first_sentence = body
        .split(|c| matches!(c, '.' | '!' | '?'))
        .next()
        .unwrap_or_default()
        .trim();

    if first_sentence.chars().count() > 100 {
        format!("{}...", truncate_chars(first_sentence, 150))
    } else {
        format!("{}.", first_sentence)
    }
}

fn article_body(artist: &str, body: &str) -> String {
    let lines: Vec<&str> = body.lines().filter(|l| !l.trim().is_empty()).collect();
    let mut article = String::new();

    article.push_str(&format!(
        "<p><strong>{}</strong> {}</p>\n\n",
        escape_html(artist),
        escape_html(&announcement(body))
    ));

    if let Some(context) = context_paragraph(body) {
        article.push_str(&format!("<p>{}</p>\n\n", escape_html(context)));
    }

    if let Some(quote) = lines
        .iter()
        .find(|l| l.contains('"') && l.chars().count() > 20)
        .map(|l| quoted_text(l))
    {
        article.push_str(&format!(
            "<blockquote>\n<p>'{}'</p>\n</blockquote>\n\n",
            escape_html(quote)
        ));
    }

    let live_dates: Vec<String> = lines
        .iter()
        .filter(|l| MONTH_ABBREVIATION.is_match(l) && DAY_NUMBER.is_match(l))
        .take(MAX_LIVE_DATES)
        .map(|l| escape_html(l.trim()))
        .collect();
    if !live_dates.is_empty() {
        article.push_str("<p><strong>Live dates</strong></p>\n");
        article.push_str(&format!("<p>{}</p>\n\n", live_dates.join("<br/>")));
    }

    if let Some(date) = RELEASE_DATE.captures(body).and_then(|c| c.get(1)) {
        article.push_str(&format!(
            "<p>The release is out {}.</p>",
            escape_html(date.as_str())
        ));
    }

    article
}

/// First paragraph with any leading non-letters removed.
fn announcement(body: &str) -> String {
    let first_para = body.split("\n\n").next().unwrap_or(body);
    LEADING_NON_LETTERS
        .replace(first_para, "")
        .trim()
        .to_string()
}

/// Second paragraph, when it is substantial and not a quote.
fn context_paragraph(body: &str) -> Option<&str> {
    let context = body.split("\n\n").nth(1)?.trim();
    (context.chars().count() > 50 && !context.contains('"')).then_some(context)
}

/// Text between the first and last double quote of a line.
fn quoted_text(line: &str) -> &str {
    let Some(open) = line.find('"') else {
        return line.trim();
    };
    let inner = &line[open + 1..];
    match inner.rfind('"') {
        Some(close) => inner[..close].trim(),
        None => inner.trim(),
    }
}
