//! Redis-backed key-value store for transient job state.

use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use super::BaseKeyValueStore;

/// Key-value store on top of a Redis connection manager.
///
/// The manager multiplexes one connection across tasks and reconnects on
/// failure, so the store is cheap to share behind an `Arc`.
#[derive(Clone)]
pub struct RedisKeyValueStore {
    connection: ConnectionManager,
    ttl_secs: Option<u64>,
}

impl RedisKeyValueStore {
    pub async fn connect(url: &str, ttl_secs: Option<u64>) -> Result<Self> {
        let client = redis::Client::open(url)
            .with_context(|| format!("invalid redis url: {}", url))?;
        let connection = ConnectionManager::new(client)
            .await
            .context("Failed to connect to Redis")?;
        Ok(Self {
            connection,
            ttl_secs,
        })
    }
}

#[async_trait]
impl BaseKeyValueStore for RedisKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn
            .get(key)
            .await
            .with_context(|| format!("redis GET {}", key))?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        match self.ttl_secs {
            Some(ttl) => {
                let _: () = conn
                    .set_ex(key, value, ttl)
                    .await
                    .with_context(|| format!("redis SETEX {}", key))?;
            }
            None => {
                let _: () = conn
                    .set(key, value)
                    .await
                    .with_context(|| format!("redis SET {}", key))?;
            }
        }
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: i64 = conn
            .del(key)
            .await
            .with_context(|| format!("redis DEL {}", key))?;
        Ok(())
    }

    async fn ping(&self) -> Result<()> {
        let mut conn = self.connection.clone();
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .context("redis PING")?;
        Ok(())
    }
}
