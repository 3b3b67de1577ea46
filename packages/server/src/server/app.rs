//! Application setup and server configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{header::CONTENT_TYPE, HeaderName, Method},
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::common::auth::{SIGNATURE_HEADER, TIMESTAMP_HEADER};
use crate::config::Config;
use crate::kernel::ServerDeps;
use crate::server::middleware::{EDITOR_HEADER, MAX_SIGNED_BODY_BYTES};
use crate::server::routes::*;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: ServerDeps,
    /// HMAC secret for the gateway functions; unset rejects every signed call
    pub gateway_secret: Option<Arc<str>>,
    /// Configured integrations, reported by /health
    pub integrations: Vec<&'static str>,
}

impl AppState {
    pub fn from_config(config: &Config) -> Self {
        Self {
            deps: ServerDeps::from_config(config),
            gateway_secret: config.gateway_secret.as_deref().map(Arc::from),
            integrations: config.configured_integrations(),
        }
    }
}

/// Build the Axum application router
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    // WordPress gateway functions take a `SignedBody` (HMAC over the raw body)
    let functions = Router::new()
        .route("/functions/wp-post", post(wp_post_handler))
        .route("/functions/wp-media", post(wp_media_handler))
        .route("/functions/wp-query", post(wp_query_handler))
        .route("/functions/wp-taxonomy", get(wp_taxonomy_handler))
        .route("/functions/generate-article", post(generate_article_handler))
        .route(
            "/functions/generate-feed-article",
            post(generate_feed_article_handler),
        )
        .route("/functions/sync-feedly", post(sync_feedly_handler))
        .route(
            "/functions/supabase/*path",
            get(supabase_proxy_handler)
                .post(supabase_proxy_handler)
                .put(supabase_proxy_handler)
                .patch(supabase_proxy_handler)
                .delete(supabase_proxy_handler),
        );

    let api = Router::new()
        .route("/api/stories", get(list_stories_handler))
        .route("/api/stories/:id/approve", post(approve_story_handler))
        .route("/api/stories/:id/reject", post(reject_story_handler))
        .route(
            "/api/drafts",
            get(list_drafts_handler).post(save_draft_handler),
        )
        .route("/api/drafts/:id", axum::routing::delete(delete_draft_handler))
        .route("/api/drafts/:id/approve", post(approve_draft_handler))
        .route("/api/drafts/:id/publish", post(publish_draft_handler))
        .route("/api/press-releases", get(list_press_releases_handler))
        .route(
            "/api/press-releases/:id/approve",
            post(approve_press_release_handler),
        )
        .route(
            "/api/press-releases/:id/reject",
            post(reject_press_release_handler),
        )
        .route("/api/wordpress/posts", get(list_wp_posts_handler))
        .route("/api/wordpress/sync", post(sync_wp_posts_handler))
        .route("/api/barry", get(list_barry_handler))
        .route("/api/barry/:id/import", post(import_barry_handler))
        .route("/api/notifications/attention", post(attention_handler))
        .route("/api/counters", get(counters_handler))
        .route("/api/assets", post(upload_asset_handler));

    // CORS configuration - the dashboard is served from another origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            CONTENT_TYPE,
            HeaderName::from_static(TIMESTAMP_HEADER),
            HeaderName::from_static(SIGNATURE_HEADER),
            HeaderName::from_static(EDITOR_HEADER),
        ]);

    Router::new()
        .route("/health", get(health_handler))
        .merge(functions)
        .merge(api)
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(DefaultBodyLimit::max(MAX_SIGNED_BODY_BYTES))
        .layer(Extension(state))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
