use redis::AsyncCommands;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

use crate::config::StoreConfig;
use crate::models::Tally;

/// Fixed store key under which the single tally value lives.
pub const VOTE_KEY: &str = "triangle_game_votes";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store connection failed: {0}")]
    Connectivity(#[from] redis::RedisError),
    #[error("stored tally is not valid JSON: {0}")]
    Codec(#[from] serde_json::Error),
    #[error("fallback store lock poisoned")]
    LockPoisoned,
}

/// Client for the configured Redis-compatible store. Construction performs no
/// network I/O; a connection is opened per operation, so an unreachable store
/// surfaces as [`StoreError::Connectivity`] on first use.
pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = redis::Client::open(config.connection_url())?;
        Ok(Self { client })
    }

    pub async fn get(&self, key: &str) -> Result<Option<Tally>, StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let raw: Option<String> = conn.get(key).await?;
        match raw {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    pub async fn set(&self, key: &str, tally: &Tally) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let json = serde_json::to_string(tally)?;
        let _: () = conn.set(key, json).await?;
        Ok(())
    }

    pub async fn ping(&self) -> Result<(), StoreError> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}

/// Process-local fallback with the same get/set surface as [`RedisStore`].
/// Contents survive across requests but not across restarts, and are never
/// resynchronized with the real store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Tally>>,
}

impl MemoryStore {
    pub fn get(&self, key: &str) -> Result<Option<Tally>, StoreError> {
        let values = self.values.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(values.get(key).copied())
    }

    pub fn set(&self, key: &str, tally: Tally) -> Result<(), StoreError> {
        let mut values = self.values.lock().map_err(|_| StoreError::LockPoisoned)?;
        values.insert(key.to_string(), tally);
        Ok(())
    }
}
