use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use supabase_client::Query;

use crate::common::records::{decode_rows, single_row};
use crate::kernel::BaseRecordStore;

pub const WORDPRESS_ARTICLES_TABLE: &str = "wordpress_articles";

/// Local mirror of a post on the magazine site
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordPressArticle {
    pub id: String,
    pub wp_post_id: u64,
    pub title: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub barry_imported: bool,
    #[serde(default)]
    pub barry_imported_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewWordPressArticle {
    pub wp_post_id: u64,
    pub title: String,
    pub url: Option<String>,
    pub excerpt: String,
    pub featured_image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub barry_imported: bool,
}

impl WordPressArticle {
    pub async fn find_by_id(id: &str, store: &dyn BaseRecordStore) -> Result<WordPressArticle> {
        let rows = store
            .select(WORDPRESS_ARTICLES_TABLE, &Query::new().eq("id", id).limit(1))
            .await?;
        single_row(rows, "wordpress article", id)
    }

    /// WordPress ids already mirrored
    pub async fn mirrored_post_ids(store: &dyn BaseRecordStore) -> Result<Vec<u64>> {
        let rows = store
            .select(WORDPRESS_ARTICLES_TABLE, &Query::new().select("wp_post_id"))
            .await?;
        Ok(rows
            .iter()
            .filter_map(|row| row["wp_post_id"].as_u64())
            .collect())
    }

    /// Articles not yet imported into Barry, newest first
    pub async fn find_awaiting_barry(store: &dyn BaseRecordStore) -> Result<Vec<WordPressArticle>> {
        let rows = store
            .select(
                WORDPRESS_ARTICLES_TABLE,
                &Query::new()
                    .eq("barry_imported", false)
                    .order("published_at", false),
            )
            .await?;
        decode_rows(rows, WORDPRESS_ARTICLES_TABLE)
    }

    pub async fn count_awaiting_barry(store: &dyn BaseRecordStore) -> Result<usize> {
        let rows = store
            .select(
                WORDPRESS_ARTICLES_TABLE,
                &Query::new().select("id").eq("barry_imported", false),
            )
            .await?;
        Ok(rows.len())
    }

    pub async fn insert(
        article: &NewWordPressArticle,
        store: &dyn BaseRecordStore,
    ) -> Result<WordPressArticle> {
        let rows = store
            .insert(WORDPRESS_ARTICLES_TABLE, serde_json::to_value(article)?)
            .await?;
        single_row(rows, "wordpress article", &article.wp_post_id.to_string())
    }

    pub async fn mark_barry_imported(
        id: &str,
        store: &dyn BaseRecordStore,
    ) -> Result<WordPressArticle> {
        let rows = store
            .update(
                WORDPRESS_ARTICLES_TABLE,
                &Query::new().eq("id", id),
                json!({ "barry_imported": true, "barry_imported_at": Utc::now() }),
            )
            .await?;
        single_row(rows, "wordpress article", id)
    }
}
