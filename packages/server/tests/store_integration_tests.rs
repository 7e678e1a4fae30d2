//! Postgres and Redis store tests against real containers.

mod common;

use common::SharedTestInfra;
use leads_core::common::LeadListId;
use leads_core::domains::leads::{
    Follower, JobStatus, LeadCursor, LeadListStore, PostgresLeadListStore,
};
use leads_core::kernel::{raw_followers, BaseKeyValueStore, RedisKeyValueStore};

async fn lead_list_store() -> PostgresLeadListStore {
    PostgresLeadListStore::new(SharedTestInfra::get().await.pool().await)
}

async fn redis_store(ttl_secs: Option<u64>) -> RedisKeyValueStore {
    RedisKeyValueStore::connect(&SharedTestInfra::get().await.redis_url, ttl_secs)
        .await
        .expect("Failed to connect to Redis")
}

fn followers(count: usize) -> Vec<Follower> {
    raw_followers(count, count)
        .into_iter()
        .map(Follower::from_raw)
        .collect()
}

// =============================================================================
// PostgresLeadListStore
// =============================================================================

#[tokio::test]
async fn postgres_create_starts_empty() {
    let store = lead_list_store().await;
    let owner = format!("owner-{}", LeadListId::new());

    let list = store.create(&owner, "rustlang_202601011200").await.unwrap();

    let found = store.find_by_id(list.id).await.unwrap().unwrap();
    assert_eq!(found.name, "rustlang_202601011200");
    assert_eq!(found.owner_id, owner);
    assert!(found.followers.is_empty());
    assert_eq!(found.total_leads, 0);
}

#[tokio::test]
async fn postgres_update_sets_followers_and_total_together() {
    let store = lead_list_store().await;
    let list = store.create("owner-update", "list").await.unwrap();

    assert!(store.update_followers(list.id, &followers(3)).await.unwrap());

    let found = store.find_by_id(list.id).await.unwrap().unwrap();
    assert_eq!(found.total_leads, 3);
    assert_eq!(found.followers, followers(3));

    assert!(!store.update_followers(LeadListId::new(), &followers(1)).await.unwrap());
}

#[tokio::test]
async fn postgres_lists_newest_first() {
    let store = lead_list_store().await;
    let owner = format!("owner-{}", LeadListId::new());

    let older = store.create(&owner, "older").await.unwrap();
    let newer = store.create(&owner, "newer").await.unwrap();
    store.create("someone-else", "other").await.unwrap();

    let ids: Vec<_> = store
        .find_by_owner(&owner)
        .await
        .unwrap()
        .into_iter()
        .map(|l| l.id)
        .collect();
    assert_eq!(ids, vec![newer.id, older.id]);
}

#[tokio::test]
async fn postgres_delete_reports_missing_rows() {
    let store = lead_list_store().await;
    let list = store.create("owner-delete", "list").await.unwrap();

    assert!(store.delete(list.id).await.unwrap());
    assert!(!store.delete(list.id).await.unwrap());
    assert!(store.find_by_id(list.id).await.unwrap().is_none());
    store.ping().await.unwrap();
}

// =============================================================================
// RedisKeyValueStore
// =============================================================================

#[tokio::test]
async fn redis_status_and_cursor_are_independent() {
    let kv = redis_store(None).await;
    let id = LeadListId::new();

    JobStatus::completed(4).save(id, &kv).await.unwrap();
    LeadCursor::Token("abc".into()).save(id, &kv).await.unwrap();

    JobStatus::delete(id, &kv).await.unwrap();

    assert_eq!(JobStatus::find(id, &kv).await.unwrap(), None);
    assert_eq!(
        LeadCursor::find(id, &kv).await.unwrap(),
        LeadCursor::Token("abc".into())
    );

    LeadCursor::Exhausted.save(id, &kv).await.unwrap();
    assert_eq!(LeadCursor::find(id, &kv).await.unwrap(), LeadCursor::Exhausted);
    kv.ping().await.unwrap();
}

#[tokio::test]
async fn redis_ttl_is_applied() {
    let kv = redis_store(Some(60)).await;
    let id = LeadListId::new();
    JobStatus::in_progress().save(id, &kv).await.unwrap();

    let client = redis::Client::open(SharedTestInfra::get().await.redis_url.as_str()).unwrap();
    let mut conn = client.get_multiplexed_async_connection().await.unwrap();
    let ttl: i64 = redis::cmd("TTL")
        .arg(JobStatus::key(id))
        .query_async(&mut conn)
        .await
        .unwrap();

    assert!(ttl > 0 && ttl <= 60);
}
