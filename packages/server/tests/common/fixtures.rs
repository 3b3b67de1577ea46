//! Row fixtures in the shape the hosted database returns them.

use serde_json::{json, Value};

pub fn story_row(id: &str, status: &str, published_at: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Story {}", id),
        "url": format!("https://news.example.com/{}", id),
        "source": "NME",
        "status": status,
        "priority": false,
        "is_festival": false,
        "published_at": published_at,
    })
}

pub fn draft_row(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "title": format!("Draft {}", id),
        "slug": format!("draft-{}", id),
        "excerpt": "Excerpt.",
        "content": "**Big** news\nmore",
        "status": status,
        "created_by": "dan",
        "updated_at": "2026-05-01T10:00:00Z",
    })
}

pub fn press_release_row(id: &str, status: &str) -> Value {
    json!({
        "id": id,
        "email_id": format!("gmail-{}", id),
        "sender_email": "press@label.example",
        "sender_name": "Label PR",
        "subject": "Wolf Alice announce new album",
        "body_text": "Wolf Alice return with a new album.\n\nIt arrives this autumn.",
        "attachments": [
            {"filename": "cover.jpg", "cloudinary_url": "https://res.cloudinary.com/dork/cover.jpg", "mime_type": "image/jpeg"}
        ],
        "external_links": {"dropbox": ["https://dropbox.example/assets"]},
        "artist_names": ["Wolf Alice"],
        "status": status,
        "created_at": "2026-05-02T08:00:00Z",
    })
}

pub fn wordpress_article_row(id: &str, wp_post_id: u64, barry_imported: bool) -> Value {
    json!({
        "id": id,
        "wp_post_id": wp_post_id,
        "title": format!("Article {}", wp_post_id),
        "url": format!("https://dorkmag.example/?p={}", wp_post_id),
        "excerpt": "Excerpt",
        "published_at": "2026-05-03T12:00:00Z",
        "barry_imported": barry_imported,
    })
}
