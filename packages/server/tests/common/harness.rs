//! Test harness that drives the real router against mock dependencies.
//!
//! Requests go through `tower::ServiceExt::oneshot`, so every layer
//! (signature middleware, extractors, error mapping) runs exactly as in the
//! server, without a socket.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use editorial_core::common::auth::{sign, SIGNATURE_HEADER, TIMESTAMP_HEADER};
use editorial_core::kernel::{ServerDeps, TestDependencies};
use editorial_core::server::{build_app, AppState};
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "test-gateway-secret";

/// Status and decoded JSON body (`Value::Null` when empty or not JSON)
#[derive(Debug)]
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

pub struct TestHarness {
    /// Mocks shared with the router, for arranging and asserting
    pub deps: TestDependencies,
    app: Router,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_deps(TestDependencies::new())
    }

    pub fn with_deps(deps: TestDependencies) -> Self {
        let server_deps = deps.into_server_deps();
        Self::build(deps, server_deps, Some(TEST_SECRET))
    }

    /// Harness whose router uses `server_deps` instead of the mocks
    pub fn with_server_deps(server_deps: ServerDeps) -> Self {
        Self::build(TestDependencies::new(), server_deps, Some(TEST_SECRET))
    }

    /// Harness with no gateway secret configured
    pub fn without_secret() -> Self {
        let deps = TestDependencies::new();
        let server_deps = deps.into_server_deps();
        Self::build(deps, server_deps, None)
    }

    fn build(deps: TestDependencies, server_deps: ServerDeps, secret: Option<&str>) -> Self {
        let state = AppState {
            deps: server_deps,
            gateway_secret: secret.map(Arc::from),
            integrations: vec!["gateway", "wordpress", "supabase"],
        };
        Self {
            deps,
            app: build_app(state, Duration::from_secs(5)),
        }
    }

    pub async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("readable body");
        TestResponse {
            status,
            body: serde_json::from_slice(&bytes).unwrap_or(Value::Null),
        }
    }

    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> TestResponse {
        self.json_request(Method::POST, uri, body, None).await
    }

    pub async fn post_as(&self, editor: &str, uri: &str, body: Value) -> TestResponse {
        self.json_request(Method::POST, uri, body, Some(editor)).await
    }

    pub async fn delete(&self, uri: &str) -> TestResponse {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    async fn json_request(
        &self,
        method: Method,
        uri: &str,
        body: Value,
        editor: Option<&str>,
    ) -> TestResponse {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json");
        if let Some(editor) = editor {
            builder = builder.header("x-editor", editor);
        }
        self.send(builder.body(Body::from(body.to_string())).unwrap())
            .await
    }

    /// POST `body` signed with the test secret at the current time
    pub async fn post_signed(&self, uri: &str, body: &str) -> TestResponse {
        let timestamp = chrono::Utc::now().timestamp().to_string();
        self.post_signed_at(uri, body, &timestamp).await
    }

    pub async fn post_signed_at(&self, uri: &str, body: &str, timestamp: &str) -> TestResponse {
        let signature = sign(TEST_SECRET, timestamp, body.as_bytes());
        self.send(
            Request::post(uri)
                .header("content-type", "application/json")
                .header(TIMESTAMP_HEADER, timestamp)
                .header(SIGNATURE_HEADER, signature)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
