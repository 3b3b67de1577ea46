//! Pure text helpers shared by the article generators and workflow actions
//!
//! These functions contain NO side effects - they take inputs and return outputs.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
    static ref HTML_TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
}

/// Maximum slug length in characters
pub const SLUG_MAX_LEN: usize = 60;

/// Replace every whitespace run with a single space and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Headline form of a subject line: whitespace collapsed, one trailing period removed.
pub fn clean_title(subject: &str) -> String {
    let collapsed = collapse_whitespace(subject);
    match collapsed.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => collapsed,
    }
}

/// URL slug: lower-cased, non-alphanumeric runs become `-`, capped at 60 chars.
pub fn slugify(title: &str) -> String {
    let lower = title.to_lowercase();
    let dashed = NON_SLUG_CHARS.replace_all(&lower, "-");
    truncate_chars(dashed.trim_matches('-'), SLUG_MAX_LEN).to_string()
}

/// The first `max_chars` characters of `text` (never splits a code point).
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// First `max_chars` characters plus `...` when the text is longer.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let cut = truncate_chars(text, max_chars);
    if cut.len() < text.len() {
        format!("{}...", cut)
    } else {
        cut.to_string()
    }
}

pub fn strip_tags(html: &str) -> String {
    HTML_TAG.replace_all(html, "").into_owned()
}

/// Escape text for insertion between HTML tags.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}
