mod common;

use axum::http::StatusCode;
use common::{create_body, TestHarness};
use leads_core::common::LeadListId;
use leads_core::domains::leads::{JobStatus, LeadCursor};
use leads_core::kernel::{raw_followers, MockFollowerScraper};
use serde_json::json;
use test_context::test_context;

fn job_id(body: &serde_json::Value) -> LeadListId {
    LeadListId::parse(body["jobId"].as_str().expect("jobId in response")).unwrap()
}

// =============================================================================
// POST /api/leads
// =============================================================================

#[tokio::test]
async fn create_returns_in_progress_immediately() {
    let harness = TestHarness::with_scraper(
        MockFollowerScraper::held().with_outcome(raw_followers(80, 60), Some("next")),
    );

    let (status, body) = harness
        .post("/api/leads", create_body("user-1", "https://x.com/rustlang", 50))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "in_progress");
    let id = job_id(&body);

    let (status, polled) = harness.get(&format!("/api/leads/{}/status", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(polled["status"], "in_progress");
    assert_eq!(polled["totalLeads"], 0);

    harness.deps.scraper.release(1);
    let terminal = harness.wait_for_terminal(id).await;
    assert_eq!(terminal, JobStatus::completed(60));

    let (_, polled) = harness.get(&format!("/api/leads/{}/status", id)).await;
    assert_eq!(polled["status"], "completed");
    assert_eq!(polled["totalLeads"], 60);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn create_rejects_missing_input(ctx: &TestHarness) {
    for body in [
        json!({"profileUrl": "rustlang", "count": 5, "cookies": "c"}),
        json!({"userId": "user-1", "count": 5, "cookies": "c"}),
        json!({"userId": "user-1", "profileUrl": "rustlang", "cookies": "c"}),
        json!({"userId": "user-1", "profileUrl": "rustlang", "count": 5}),
        json!({"userId": "user-1", "profileUrl": "rustlang", "count": 20000, "cookies": "c"}),
    ] {
        let (status, response) = ctx.post("/api/leads", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(response["error"].is_string());
    }

    assert!(ctx.deps.lead_lists.is_empty());
}

// =============================================================================
// GET /api/leads and details
// =============================================================================

#[tokio::test]
async fn list_merges_status_and_defaults_to_completed() {
    let harness = TestHarness::with_scraper(
        MockFollowerScraper::new().with_error("Failed to authorize with twitter: session expired"),
    );

    let (_, body) = harness.post("/api/leads", create_body("user-1", "@rustlang", 10)).await;
    let failed = job_id(&body);
    harness.wait_for_terminal(failed).await;

    // A list with no transient status at all, e.g. after a clear.
    let deps = harness.server_deps();
    let quiet = deps.lead_lists.create("user-1", "imported earlier").await.unwrap();

    let (status, body) = harness.get("/api/leads?userId=user-1").await;
    assert_eq!(status, StatusCode::OK);
    let leads = body["leads"].as_array().unwrap();
    assert_eq!(leads.len(), 2);

    assert_eq!(leads[0]["id"], quiet.id.to_string());
    assert_eq!(leads[0]["status"], "completed");
    assert!(leads[0].get("errorType").is_none());

    assert_eq!(leads[1]["id"], failed.to_string());
    assert_eq!(leads[1]["status"], "error");
    assert_eq!(leads[1]["errorType"], "auth_error");
    assert!(leads[1]["leadName"].as_str().unwrap().starts_with("rustlang_"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn list_without_user_is_empty(ctx: &TestHarness) {
    ctx.server_deps()
        .lead_lists
        .create("user-1", "list")
        .await
        .unwrap();

    let (status, body) = ctx.get("/api/leads").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"leads": []}));
}

#[tokio::test]
async fn details_return_imported_followers() {
    let harness = TestHarness::with_scraper(
        MockFollowerScraper::new().with_outcome(raw_followers(5, 3), None),
    );

    let (_, body) = harness.post("/api/leads", create_body("user-1", "rustlang", 5)).await;
    let id = job_id(&body);
    harness.wait_for_terminal(id).await;

    let (status, details) = harness.get(&format!("/api/leads/details?id={}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(details["id"], id.to_string());
    let followers = details["followers"].as_array().unwrap();
    assert_eq!(followers.len(), 3);
    assert!(followers.iter().all(|f| f["canDM"] == true));
    assert!(followers.iter().all(|f| f["status"] == "pending"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn details_validate_the_id(ctx: &TestHarness) {
    let (status, _) = ctx.get("/api/leads/details").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = ctx.get("/api/leads/details?id=not-a-uuid").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = ctx
        .get(&format!("/api/leads/details?id={}", LeadListId::new()))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Lead list not found");
}

// =============================================================================
// Clear error, retry, delete
// =============================================================================

#[tokio::test]
async fn clear_error_then_retry_resumes_from_scratch() {
    let harness = TestHarness::with_scraper(
        MockFollowerScraper::new()
            .with_outcome(raw_followers(4, 4), Some("cursor-C"))
            .with_error("Unauthorized: cookie expired")
            .with_outcome(raw_followers(2, 2), None),
    );
    let retry_body = json!({"profileUrl": "rustlang", "count": 5, "cookies": "c"});

    let (_, body) = harness.post("/api/leads", create_body("user-1", "rustlang", 5)).await;
    let id = job_id(&body);
    harness.wait_for_terminal(id).await;

    let (status, _) = harness
        .post(&format!("/api/leads/{}/retry", id), retry_body.clone())
        .await;
    assert_eq!(status, StatusCode::OK);
    let terminal = harness.wait_for_terminal(id).await;
    assert_eq!(terminal.error_type, Some(leads_core::domains::leads::ErrorType::AuthError));

    let (status, body) = harness
        .post("/api/leads/clear-error", json!({"leadId": id.to_string()}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
    assert!(!harness.deps.kv.contains(&JobStatus::key(id)));
    assert!(!harness.deps.kv.contains(&LeadCursor::key(id)));

    let (_, polled) = harness.get(&format!("/api/leads/{}/status", id)).await;
    assert_eq!(polled["status"], "completed");

    harness
        .post(&format!("/api/leads/{}/retry", id), retry_body)
        .await;
    harness.wait_for_terminal(id).await;

    assert_eq!(
        harness.deps.scraper.forwarded_cursors(),
        vec![None, Some("cursor-C".to_string()), None]
    );
}

#[test_context(TestHarness)]
#[tokio::test]
async fn clear_error_requires_lead_id(ctx: &TestHarness) {
    let (status, _) = ctx.post("/api/leads/clear-error", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn retry_unknown_job_is_404(ctx: &TestHarness) {
    let (status, _) = ctx
        .post(
            &format!("/api/leads/{}/retry", LeadListId::new()),
            json!({"profileUrl": "rustlang", "count": 5, "cookies": "c"}),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn retry_while_running_is_409() {
    let harness = TestHarness::with_scraper(MockFollowerScraper::held());

    let (_, body) = harness.post("/api/leads", create_body("user-1", "rustlang", 5)).await;
    let id = job_id(&body);

    let (status, body) = harness
        .post(
            &format!("/api/leads/{}/retry", id),
            json!({"profileUrl": "rustlang", "count": 5, "cookies": "c"}),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["details"], id.to_string());

    harness.deps.scraper.release(1);
    harness.wait_for_terminal(id).await;
    assert_eq!(harness.deps.scraper.calls().len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_removes_record_only(ctx: &TestHarness) {
    let deps = ctx.server_deps();
    let list = deps.lead_lists.create("user-1", "list").await.unwrap();
    JobStatus::in_progress()
        .save(list.id, deps.kv.as_ref())
        .await
        .unwrap();

    let (status, body) = ctx.delete(&format!("/api/leads/delete?id={}", list.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (status, _) = ctx.get(&format!("/api/leads/{}/status", list.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(ctx.deps.kv.contains(&JobStatus::key(list.id)));

    let (status, _) = ctx.delete(&format!("/api/leads/delete?id={}", list.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Health
// =============================================================================

#[test_context(TestHarness)]
#[tokio::test]
async fn health_reports_both_stores(ctx: &TestHarness) {
    let (status, body) = ctx.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["database"]["status"], "ok");
    assert_eq!(body["status_store"]["status"], "ok");
}
