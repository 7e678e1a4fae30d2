//! In-memory test harness for the HTTP API.
//!
//! Every test gets its own stores and mock scraper; requests go straight
//! into the router via `tower::ServiceExt::oneshot`, no socket involved.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use leads_core::common::LeadListId;
use leads_core::domains::leads::{JobStatus, StatusKind};
use leads_core::kernel::{MockFollowerScraper, ServerDeps, TestDependencies};
use leads_core::server::build_app;
use serde_json::Value;
use test_context::AsyncTestContext;
use tower::ServiceExt;

const BODY_LIMIT: usize = 1024 * 1024;

pub struct TestHarness {
    pub deps: TestDependencies,
    pub router: Router,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::with_scraper(MockFollowerScraper::new())
    }

    async fn teardown(self) {}
}

impl TestHarness {
    pub fn with_scraper(scraper: MockFollowerScraper) -> Self {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();

        let deps = TestDependencies::with_scraper(scraper);
        let router = build_app(deps.server_deps());
        Self { deps, router }
    }

    pub fn server_deps(&self) -> ServerDeps {
        self.deps.server_deps()
    }

    pub async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .router
            .clone()
            .oneshot(builder.body(body).expect("valid request"))
            .await
            .expect("router is infallible");

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), BODY_LIMIT)
            .await
            .expect("readable body");
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None).await
    }

    /// Wait until the job's status is terminal and return it.
    pub async fn wait_for_terminal(&self, id: LeadListId) -> JobStatus {
        wait_for_terminal(&self.server_deps(), id).await
    }
}

/// Poll the status store until `id` leaves `in_progress`.
pub async fn wait_for_terminal(deps: &ServerDeps, id: LeadListId) -> JobStatus {
    tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            if let Some(status) = JobStatus::find(id, deps.kv.as_ref()).await.unwrap() {
                if status.status != StatusKind::InProgress {
                    return status;
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("job did not finish in time")
}

/// A valid create body for `handle`.
pub fn create_body(user_id: &str, handle: &str, count: i64) -> Value {
    serde_json::json!({
        "profileUrl": handle,
        "count": count,
        "cookies": [{"name": "auth_token", "value": "abc"}],
        "userId": user_id,
    })
}
