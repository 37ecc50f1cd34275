use super::{Entity, Repository};
use crate::error::{storage_error, AppResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client as RedisClient};
use std::marker::PhantomData;
use tracing::{debug, info};

/// Redis keys
mod keys {
    pub const PREFIX: &str = "freelance_planner:";
    pub const IDS_SUFFIX: &str = ":ids";
}

/// Redis-backed repository.
///
/// Each record is stored as JSON under `freelance_planner:<collection>:<id>`, and the
/// list `freelance_planner:<collection>:ids` keeps the insertion order.
pub struct RedisRepository<T> {
    client: RedisClient,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Entity> RedisRepository<T> {
    /// Create a repository for the given Redis URL
    pub fn new(redis_url: &str) -> AppResult<Self> {
        let client = RedisClient::open(redis_url)
            .map_err(|e| storage_error(&format!("Failed to create Redis client: {}", e)))?;
        Ok(Self::with_client(client))
    }

    /// Create a repository sharing an existing client
    pub fn with_client(client: RedisClient) -> Self {
        Self {
            client,
            _marker: PhantomData,
        }
    }

    /// Check that the server answers
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.get_connection().await?;
        let _: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(|e| storage_error(&format!("Redis PING error: {}", e)))?;
        info!("Redis repository for {} is reachable", T::COLLECTION);
        Ok(())
    }

    /// Get a Redis connection from the client
    async fn get_connection(&self) -> AppResult<redis::aio::MultiplexedConnection> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| storage_error(&format!("Failed to connect to Redis: {}", e)))
    }

    fn record_key(id: &str) -> String {
        format!("{}{}:{}", keys::PREFIX, T::COLLECTION, id)
    }

    fn ids_key() -> String {
        format!("{}{}{}", keys::PREFIX, T::COLLECTION, keys::IDS_SUFFIX)
    }
}

#[async_trait]
impl<T: Entity> Repository<T> for RedisRepository<T> {
    async fn create(&self, item: T) -> AppResult<T> {
        let mut conn = self.get_connection().await?;
        let json = serde_json::to_string(&item)?;
        let key = Self::record_key(item.id());

        let exists: bool = conn
            .exists(&key)
            .await
            .map_err(|e| storage_error(&format!("Redis EXISTS error: {}", e)))?;
        if exists {
            return Err(storage_error(&format!(
                "{} record {} already exists",
                T::COLLECTION,
                item.id()
            )));
        }

        // Record and id list change together or not at all
        redis::pipe()
            .atomic()
            .set(&key, &json)
            .ignore()
            .rpush(Self::ids_key(), item.id())
            .ignore()
            .query_async::<()>(&mut conn)
            .await
            .map_err(|e| storage_error(&format!("Redis MULTI error: {}", e)))?;

        debug!("Stored {} record {}", T::COLLECTION, item.id());
        Ok(item)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>> {
        let mut conn = self.get_connection().await?;

        let data: Option<String> = conn
            .get(Self::record_key(id))
            .await
            .map_err(|e| storage_error(&format!("Redis GET error: {}", e)))?;

        match data {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> AppResult<Vec<T>> {
        let mut conn = self.get_connection().await?;

        let ids: Vec<String> = conn
            .lrange(Self::ids_key(), 0, -1)
            .await
            .map_err(|e| storage_error(&format!("Redis LRANGE error: {}", e)))?;

        let mut items = Vec::with_capacity(ids.len());
        for id in &ids {
            let data: Option<String> = conn
                .get(Self::record_key(id))
                .await
                .map_err(|e| storage_error(&format!("Redis GET error: {}", e)))?;

            // The id list may briefly outlive a deleted record
            if let Some(json) = data {
                items.push(serde_json::from_str(&json)?);
            }
        }

        Ok(items)
    }

    async fn update(&self, item: T) -> AppResult<Option<T>> {
        let mut conn = self.get_connection().await?;
        let key = Self::record_key(item.id());

        let exists: bool = conn
            .exists(&key)
            .await
            .map_err(|e| storage_error(&format!("Redis EXISTS error: {}", e)))?;
        if !exists {
            return Ok(None);
        }

        let json = serde_json::to_string(&item)?;
        conn.set::<_, _, ()>(&key, &json)
            .await
            .map_err(|e| storage_error(&format!("Redis SET error: {}", e)))?;

        Ok(Some(item))
    }

    async fn delete(&self, id: &str) -> AppResult<bool> {
        let mut conn = self.get_connection().await?;

        let (removed, _): (i64, i64) = redis::pipe()
            .atomic()
            .del(Self::record_key(id))
            .lrem(Self::ids_key(), 0, id)
            .query_async(&mut conn)
            .await
            .map_err(|e| storage_error(&format!("Redis MULTI error: {}", e)))?;

        if removed > 0 {
            info!("Deleted {} record {}", T::COLLECTION, id);
        }
        Ok(removed > 0)
    }
}
