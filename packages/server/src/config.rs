use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;

/// Default Feedly stream: every feed the editorial account follows.
pub const DEFAULT_FEEDLY_STREAM: &str =
    "user/1592ec67-110b-42bc-bde5-b67a23c086f5/category/global.all";

#[derive(Debug, Clone)]
pub struct WordPressConfig {
    pub base_url: String,
    pub user: String,
    pub app_password: String,
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub service_key: String,
}

#[derive(Debug, Clone)]
pub struct FeedlyConfig {
    pub token: String,
    pub stream_id: String,
    /// Six-field cron expression; periodic sync is off when unset.
    pub sync_cron: Option<String>,
}

#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

#[derive(Debug, Clone)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

/// Application configuration loaded from environment variables.
///
/// Every integration is optional: handlers that need a missing one answer
/// with a "Missing env vars" error instead of the process refusing to start.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub request_timeout_secs: u64,
    pub gateway_secret: Option<String>,
    pub dashboard_url: String,
    pub wordpress: Option<WordPressConfig>,
    pub supabase: Option<SupabaseConfig>,
    pub feedly: Option<FeedlyConfig>,
    pub telegram: Option<TelegramConfig>,
    pub cloudinary: Option<CloudinaryConfig>,
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let wordpress = match (var("WP_BASE"), var("WP_USER"), var("WP_APP_PASSWORD")) {
            (Some(base_url), Some(user), Some(app_password)) => Some(WordPressConfig {
                base_url,
                user,
                app_password,
            }),
            _ => None,
        };

        let supabase = match (var("SUPABASE_URL"), var("SUPABASE_SERVICE_KEY")) {
            (Some(url), Some(service_key)) => Some(SupabaseConfig { url, service_key }),
            _ => None,
        };

        let feedly = var("FEEDLY_TOKEN").map(|token| FeedlyConfig {
            token,
            stream_id: var("FEEDLY_STREAM_ID")
                .unwrap_or_else(|| DEFAULT_FEEDLY_STREAM.to_string()),
            sync_cron: var("FEEDLY_SYNC_CRON"),
        });

        let telegram = match (var("TELEGRAM_BOT_TOKEN"), var("TELEGRAM_CHAT_ID")) {
            (Some(bot_token), Some(chat_id)) => Some(TelegramConfig { bot_token, chat_id }),
            _ => None,
        };

        let cloudinary = match (var("CLOUDINARY_CLOUD_NAME"), var("CLOUDINARY_UPLOAD_PRESET")) {
            (Some(cloud_name), Some(upload_preset)) => Some(CloudinaryConfig {
                cloud_name,
                upload_preset,
            }),
            _ => None,
        };

        Ok(Self {
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            request_timeout_secs: var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|| "30".to_string())
                .parse()
                .context("REQUEST_TIMEOUT_SECS must be a valid number")?,
            gateway_secret: var("GATEWAY_SECRET"),
            dashboard_url: var("DASHBOARD_URL")
                .unwrap_or_else(|| "http://localhost:5173".to_string()),
            wordpress,
            supabase,
            feedly,
            telegram,
            cloudinary,
        })
    }

    /// Names of integrations that are configured, for the health endpoint.
    pub fn configured_integrations(&self) -> Vec<&'static str> {
        let mut names = Vec::new();
        if self.gateway_secret.is_some() {
            names.push("gateway");
        }
        if self.wordpress.is_some() {
            names.push("wordpress");
        }
        if self.supabase.is_some() {
            names.push("supabase");
        }
        if self.feedly.is_some() {
            names.push("feedly");
        }
        if self.telegram.is_some() {
            names.push("telegram");
        }
        if self.cloudinary.is_some() {
            names.push("cloudinary");
        }
        names
    }
}
