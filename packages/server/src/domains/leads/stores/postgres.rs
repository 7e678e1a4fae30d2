//! PostgreSQL lead list storage (`lead_lists` table).

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;

use super::LeadListStore;
use crate::common::LeadListId;
use crate::domains::leads::models::{followers_total, Follower, LeadList};

#[derive(Clone)]
pub struct PostgresLeadListStore {
    pool: PgPool,
}

impl PostgresLeadListStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[derive(sqlx::FromRow)]
struct LeadListRow {
    id: LeadListId,
    name: String,
    owner_id: String,
    followers: Json<Vec<Follower>>,
    total_leads: i32,
    created_at: DateTime<Utc>,
}

impl From<LeadListRow> for LeadList {
    fn from(row: LeadListRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            owner_id: row.owner_id,
            followers: row.followers.0,
            total_leads: row.total_leads,
            created_at: row.created_at,
        }
    }
}

const COLUMNS: &str = "id, name, owner_id, followers, total_leads, created_at";

#[async_trait]
impl LeadListStore for PostgresLeadListStore {
    async fn create(&self, owner_id: &str, name: &str) -> Result<LeadList> {
        let list = LeadList::new(owner_id, name);
        let q = format!(
            "INSERT INTO lead_lists ({COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6) RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, LeadListRow>(&q)
            .bind(list.id)
            .bind(&list.name)
            .bind(&list.owner_id)
            .bind(Json(&list.followers))
            .bind(list.total_leads)
            .bind(list.created_at)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.into())
    }

    async fn update_followers(&self, id: LeadListId, followers: &[Follower]) -> Result<bool> {
        // Single statement: followers and total_leads change together.
        let result = sqlx::query(
            "UPDATE lead_lists SET followers = $1, total_leads = $2 WHERE id = $3",
        )
        .bind(Json(followers))
        .bind(followers_total(followers))
        .bind(id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn find_by_id(&self, id: LeadListId) -> Result<Option<LeadList>> {
        let q = format!("SELECT {COLUMNS} FROM lead_lists WHERE id = $1");
        let row = sqlx::query_as::<_, LeadListRow>(&q)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Into::into))
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<LeadList>> {
        let q = format!(
            "SELECT {COLUMNS} FROM lead_lists WHERE owner_id = $1 ORDER BY created_at DESC, id DESC"
        );
        let rows = sqlx::query_as::<_, LeadListRow>(&q)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete(&self, id: LeadListId) -> Result<bool> {
        let result = sqlx::query("DELETE FROM lead_lists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
