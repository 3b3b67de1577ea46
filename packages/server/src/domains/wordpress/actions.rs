//! WordPress mirror and the Barry import queue.

use anyhow::Result;
use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, info};
use wordpress_client::WpPost;

use super::models::{NewWordPressArticle, WordPressArticle};
use crate::common::records::is_unique_violation;
use crate::common::utils::{collapse_whitespace, escape_html, strip_tags};
use crate::domains::notifications::{notify, Priority};
use crate::kernel::ServerDeps;

pub const DEFAULT_PER_PAGE: u32 = 20;
/// Posts fetched per mirror sync
pub const SYNC_BATCH_SIZE: u32 = 50;

pub async fn list_wp_posts(
    status: Option<&str>,
    per_page: Option<u32>,
    deps: &ServerDeps,
) -> Result<Vec<WpPost>> {
    let per_page = per_page.unwrap_or(DEFAULT_PER_PAGE).clamp(1, 100);
    deps.wordpress.list_posts(status, per_page).await
}

/// WordPress reports `date` in site-local time without an offset.
fn post_date(post: &WpPost) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(&post.date)
        .map(|d| d.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(&post.date, "%Y-%m-%dT%H:%M:%S").map(|d| d.and_utc())
        })
        .unwrap_or_else(|_| Utc::now())
}

/// Mirror published posts that are not yet tracked. Returns the number added;
/// posts another sync mirrored in the meantime are not counted.
pub async fn sync_posts(deps: &ServerDeps) -> Result<usize> {
    let store = deps.store.as_ref();
    let posts = deps
        .wordpress
        .list_posts(Some("publish"), SYNC_BATCH_SIZE)
        .await?;
    let mirrored = WordPressArticle::mirrored_post_ids(store).await?;

    let mut added = 0;
    for post in posts.iter().filter(|p| !mirrored.contains(&p.id)) {
        let inserted = WordPressArticle::insert(
            &NewWordPressArticle {
                wp_post_id: post.id,
                title: strip_tags(&post.title.rendered),
                url: post.link.clone(),
                excerpt: collapse_whitespace(&strip_tags(&post.excerpt.rendered)),
                featured_image: post.featured_image_url().map(String::from),
                published_at: post_date(post),
                barry_imported: false,
            },
            store,
        )
        .await;

        match inserted {
            Ok(_) => {
                debug!(wp_post_id = post.id, "Mirrored WordPress post");
                added += 1;
            }
            // mirrored by a concurrent sync since the id lookup
            Err(e) if is_unique_violation(&e) => {
                debug!(wp_post_id = post.id, "WordPress post already mirrored")
            }
            Err(e) => return Err(e),
        }
    }

    info!(fetched = posts.len(), added, "WordPress mirror synced");
    Ok(added)
}

pub async fn list_awaiting_barry(deps: &ServerDeps) -> Result<Vec<WordPressArticle>> {
    WordPressArticle::find_awaiting_barry(deps.store.as_ref()).await
}

/// Flag an article as imported into Barry. Repeating the import only
/// refreshes the timestamp.
pub async fn import_to_barry(id: &str, deps: &ServerDeps) -> Result<WordPressArticle> {
    let store = deps.store.as_ref();
    WordPressArticle::find_by_id(id, store).await?;
    let article = WordPressArticle::mark_barry_imported(id, store).await?;
    info!(article_id = %id, wp_post_id = article.wp_post_id, "Imported to Barry");

    notify(
        deps,
        "Imported to Barry",
        &format!("\"{}\" is now in Barry", escape_html(&article.title)),
        Priority::Low,
    )
    .await;

    Ok(article)
}
