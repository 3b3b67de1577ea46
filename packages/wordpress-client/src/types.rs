use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::retry::HasStatus;

/// Raw upstream response, kept untyped so gateway handlers can pass it through.
#[derive(Debug, Clone)]
pub struct WpResponse {
    pub status: u16,
    pub text: String,
    pub headers: HashMap<String, String>,
}

impl WpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parse the body as JSON, falling back to `{"raw": <text>}`.
    pub fn json_or_raw(&self) -> Value {
        serde_json::from_str(&self.text)
            .unwrap_or_else(|_| serde_json::json!({ "raw": self.text }))
    }
}

impl HasStatus for WpResponse {
    fn status_code(&self) -> u16 {
        self.status
    }
}

/// Request body variants the gateway sends upstream.
#[derive(Debug, Clone)]
pub enum WpBody {
    Json(Value),
    Multipart {
        bytes: Vec<u8>,
        filename: String,
        mime_type: String,
    },
}

/// `{ "rendered": "..." }` wrapper used for title/content/excerpt.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Rendered {
    #[serde(default)]
    pub rendered: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct FeaturedMedia {
    pub source_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Embedded {
    #[serde(rename = "wp:featuredmedia", default)]
    pub featured_media: Vec<FeaturedMedia>,
}

/// A post as returned by `/wp-json/wp/v2/posts`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WpPost {
    pub id: u64,
    #[serde(default)]
    pub title: Rendered,
    #[serde(default)]
    pub content: Rendered,
    #[serde(default)]
    pub excerpt: Rendered,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub featured_media: u64,
    pub link: Option<String>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<Embedded>,
}

impl WpPost {
    pub fn featured_image_url(&self) -> Option<&str> {
        self.embedded
            .as_ref()?
            .featured_media
            .first()?
            .source_url
            .as_deref()
    }
}

/// Post creation payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub excerpt: String,
    pub slug: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<u64>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<u64>,
    /// Term ids in the site's `sections` taxonomy
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured_media: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_or_raw_falls_back() {
        let ok = WpResponse {
            status: 201,
            text: r#"{"id": 7}"#.into(),
            headers: HashMap::new(),
        };
        assert_eq!(ok.json_or_raw()["id"], 7);
        assert!(ok.is_success());

        let html = WpResponse {
            status: 502,
            text: "<html>Bad gateway</html>".into(),
            headers: HashMap::new(),
        };
        assert_eq!(html.json_or_raw()["raw"], "<html>Bad gateway</html>");
        assert!(!html.is_success());
    }

    #[test]
    fn test_post_featured_image_from_embed() {
        let post: WpPost = serde_json::from_value(serde_json::json!({
            "id": 12,
            "title": {"rendered": "Wet Leg announce tour"},
            "slug": "wet-leg-announce-tour",
            "status": "publish",
            "date": "2026-01-01T10:00:00",
            "_embedded": {"wp:featuredmedia": [{"source_url": "https://cdn.example/img.jpg"}]}
        }))
        .unwrap();

        assert_eq!(post.featured_image_url(), Some("https://cdn.example/img.jpg"));
        assert_eq!(post.excerpt.rendered, "");
    }

    #[test]
    fn test_new_post_skips_empty_fields() {
        let post = NewPost {
            title: "T".into(),
            content: "C".into(),
            excerpt: "E".into(),
            slug: "t".into(),
            status: "draft".into(),
            author: None,
            categories: vec![],
            sections: vec![],
            featured_media: None,
        };
        let value = serde_json::to_value(&post).unwrap();
        assert!(value.get("categories").is_none());
        assert!(value.get("sections").is_none());
        assert!(value.get("author").is_none());
        assert_eq!(value["status"], "draft");
    }
}
