//! Cloudinary unsigned uploads and delivery URL transforms.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

const API_BASE: &str = "https://api.cloudinary.com/v1_1";

pub type Result<T> = std::result::Result<T, CloudinaryError>;

#[derive(Debug, Error)]
pub enum CloudinaryError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to upload image to Cloudinary ({status}): {message}")]
    Upload { status: u16, message: String },
}

#[derive(Debug, Deserialize)]
struct UploadReply {
    secure_url: String,
}

/// Delivery transformation applied by [`optimized_url`].
#[derive(Debug, Clone)]
pub struct TransformOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub crop: Option<String>,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            crop: Some("fill".to_string()),
        }
    }
}

/// Insert `q_auto,f_auto` plus size/crop transforms into a Cloudinary
/// delivery URL. Non-Cloudinary URLs are returned unchanged.
pub fn optimized_url(url: &str, options: &TransformOptions) -> String {
    if !url.contains("cloudinary.com") {
        return url.to_string();
    }

    let mut transformations = String::from("q_auto,f_auto");
    if let Some(w) = options.width {
        transformations.push_str(&format!(",w_{}", w));
    }
    if let Some(h) = options.height {
        transformations.push_str(&format!(",h_{}", h));
    }
    if let Some(crop) = options.crop.as_deref().filter(|c| !c.is_empty()) {
        transformations.push_str(&format!(",c_{}", crop));
    }

    url.replacen("/upload/", &format!("/upload/{}/", transformations), 1)
}

#[derive(Debug, Clone)]
pub struct CloudinaryClient {
    client: reqwest::Client,
    api_base: String,
    cloud_name: String,
    upload_preset: String,
}

impl CloudinaryClient {
    pub fn new(cloud_name: &str, upload_preset: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base: API_BASE.to_string(),
            cloud_name: cloud_name.to_string(),
            upload_preset: upload_preset.to_string(),
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    /// Unsigned upload; returns the `secure_url` of the stored image.
    pub async fn upload_image(&self, bytes: Vec<u8>, filename: &str) -> Result<String> {
        let url = format!("{}/{}/image/upload", self.api_base, self.cloud_name);
        let form = Form::new()
            .part("file", Part::bytes(bytes).file_name(filename.to_string()))
            .text("upload_preset", self.upload_preset.clone());

        let response = self.client.post(&url).multipart(form).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CloudinaryError::Upload {
                status: status.as_u16(),
                message,
            });
        }

        let reply: UploadReply = response.json().await?;
        tracing::info!(url = %reply.secure_url, "Uploaded image to Cloudinary");
        Ok(reply.secure_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const URL: &str = "https://res.cloudinary.com/dork/image/upload/v1/press/cover.jpg";

    #[test]
    fn test_optimized_url_default_crop() {
        assert_eq!(
            optimized_url(URL, &TransformOptions::default()),
            "https://res.cloudinary.com/dork/image/upload/q_auto,f_auto,c_fill/v1/press/cover.jpg"
        );
    }

    #[test]
    fn test_optimized_url_with_size() {
        let options = TransformOptions {
            width: Some(800),
            height: Some(450),
            crop: Some("thumb".into()),
        };
        assert_eq!(
            optimized_url(URL, &options),
            "https://res.cloudinary.com/dork/image/upload/q_auto,f_auto,w_800,h_450,c_thumb/v1/press/cover.jpg"
        );
    }

    #[test]
    fn test_optimized_url_without_crop() {
        let options = TransformOptions {
            width: None,
            height: None,
            crop: None,
        };
        assert_eq!(
            optimized_url(URL, &options),
            "https://res.cloudinary.com/dork/image/upload/q_auto,f_auto/v1/press/cover.jpg"
        );
    }

    #[test]
    fn test_non_cloudinary_url_untouched() {
        let url = "https://cdn.example.com/upload/a.jpg";
        assert_eq!(optimized_url(url, &TransformOptions::default()), url);
    }

    #[tokio::test]
    async fn test_upload_returns_secure_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/dork/image/upload"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "secure_url": "https://res.cloudinary.com/dork/image/upload/v1/x.jpg"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = CloudinaryClient::new("dork", "unsigned").with_api_base(&server.uri());
        let url = client.upload_image(vec![1, 2, 3], "x.jpg").await.unwrap();
        assert_eq!(url, "https://res.cloudinary.com/dork/image/upload/v1/x.jpg");
    }

    #[tokio::test]
    async fn test_upload_failure() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("Upload preset not found"))
            .mount(&server)
            .await;

        let client = CloudinaryClient::new("dork", "missing").with_api_base(&server.uri());
        let err = client.upload_image(vec![0], "x.jpg").await.unwrap_err();
        assert!(matches!(err, CloudinaryError::Upload { status: 400, .. }));
    }
}
