//! Dashboard helpers: sidebar counters and image uploads.

use anyhow::Result;
use cloudinary_client::{optimized_url, TransformOptions};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::common::utils::decode_base64_file;
use crate::domains::drafts::{Draft, DraftStatus};
use crate::domains::press_releases::{PressRelease, PressReleaseStatus};
use crate::domains::stories::{Story, StoryStatus};
use crate::domains::wordpress::WordPressArticle;
use crate::kernel::ServerDeps;

/// Badge counts shown next to each dashboard section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Counters {
    pub pending_stories: usize,
    pub drafts_in_review: usize,
    pub pending_press_releases: usize,
    pub awaiting_barry: usize,
}

pub async fn load_counters(deps: &ServerDeps) -> Result<Counters> {
    let store = deps.store.as_ref();
    let (pending_stories, drafts_in_review, pending_press_releases, awaiting_barry) = tokio::try_join!(
        Story::count_by_status(StoryStatus::Pending, store),
        Draft::count_by_status(DraftStatus::InReview, store),
        PressRelease::count_by_status(PressReleaseStatus::Pending, store),
        WordPressArticle::count_awaiting_barry(store),
    )?;

    Ok(Counters {
        pending_stories,
        drafts_in_review,
        pending_press_releases,
        awaiting_barry,
    })
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetUpload {
    /// Base64 image bytes
    pub file: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadedAsset {
    pub url: String,
    pub optimized_url: String,
}

pub async fn upload_asset(upload: AssetUpload, deps: &ServerDeps) -> Result<UploadedAsset> {
    let bytes = decode_base64_file(&upload.file)?;
    let filename = upload.filename.as_deref().unwrap_or("upload");
    let size = bytes.len();

    let url = deps.assets.upload_image(bytes, filename).await?;
    info!(filename, size, "Asset uploaded");

    let optimized_url = optimized_url(
        &url,
        &TransformOptions {
            width: upload.width,
            height: upload.height,
            ..Default::default()
        },
    );
    Ok(UploadedAsset { url, optimized_url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::WorkflowError;
    use crate::domains::drafts::DRAFTS_TABLE;
    use crate::domains::press_releases::PRESS_RELEASES_TABLE;
    use crate::domains::stories::STORIES_TABLE;
    use crate::domains::wordpress::WORDPRESS_ARTICLES_TABLE;
    use crate::kernel::test_dependencies::MockRecordStore;
    use crate::kernel::TestDependencies;
    use serde_json::json;

    #[tokio::test]
    async fn test_counters() {
        let store = MockRecordStore::new()
            .with_rows(
                STORIES_TABLE,
                vec![
                    json!({"id": "s1", "status": "pending"}),
                    json!({"id": "s2", "status": "pending"}),
                    json!({"id": "s3", "status": "approved"}),
                ],
            )
            .with_rows(
                DRAFTS_TABLE,
                vec![
                    json!({"id": "d1", "status": "in_review"}),
                    json!({"id": "d2", "status": "draft"}),
                ],
            )
            .with_rows(PRESS_RELEASES_TABLE, vec![json!({"id": "p1", "status": "imported"})])
            .with_rows(
                WORDPRESS_ARTICLES_TABLE,
                vec![json!({"id": "w1", "barry_imported": false})],
            );
        let deps = TestDependencies::new().mock_store(store).into_server_deps();

        assert_eq!(
            load_counters(&deps).await.unwrap(),
            Counters {
                pending_stories: 2,
                drafts_in_review: 1,
                pending_press_releases: 0,
                awaiting_barry: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_upload_asset_returns_optimized_url() {
        let test_deps = TestDependencies::new();
        let uploaded = upload_asset(
            AssetUpload {
                file: "aGVsbG8=".into(),
                filename: Some("cover.jpg".into()),
                width: Some(800),
                height: None,
            },
            &test_deps.into_server_deps(),
        )
        .await
        .unwrap();

        assert_eq!(
            uploaded.url,
            "https://res.cloudinary.com/dork/image/upload/v1/cover.jpg"
        );
        assert_eq!(
            uploaded.optimized_url,
            "https://res.cloudinary.com/dork/image/upload/q_auto,f_auto,w_800,c_fill/v1/cover.jpg"
        );
        assert_eq!(test_deps.assets.uploads(), vec![("cover.jpg".to_string(), 5)]);
    }

    #[tokio::test]
    async fn test_upload_rejects_bad_base64() {
        let deps = TestDependencies::new().into_server_deps();
        let err = upload_asset(
            AssetUpload {
                file: "%%%".into(),
                filename: None,
                width: None,
                height: None,
            },
            &deps,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WorkflowError>(),
            Some(WorkflowError::Invalid(_))
        ));
    }
}
