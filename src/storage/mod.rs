//! Record storage shared by every component.
//!
//! Each component keeps its records behind a [`Repository`], so the same service code
//! runs against the in-memory store (tests, local runs) and Redis.

mod memory;
mod redis_store;

pub use self::memory::InMemoryRepository;
pub use self::redis_store::RedisRepository;

use crate::error::AppResult;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record that can be kept in a repository
pub trait Entity: Clone + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Collection name, used as the storage key namespace
    const COLLECTION: &'static str;

    /// Identifier of the record
    fn id(&self) -> &str;

    /// Identifier of the owning record, if any (schedule, project, ...)
    fn foreign_key(&self) -> Option<&str> {
        None
    }
}

/// Storage capability for one kind of record
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync + 'static {
    /// Store a new record
    async fn create(&self, item: T) -> AppResult<T>;

    /// Get a record by ID
    async fn find_by_id(&self, id: &str) -> AppResult<Option<T>>;

    /// All records in insertion order
    async fn find_all(&self) -> AppResult<Vec<T>>;

    /// Records owned by the given foreign key, in insertion order
    async fn find_by_foreign_key(&self, key: &str) -> AppResult<Vec<T>> {
        let items = self.find_all().await?;
        Ok(items
            .into_iter()
            .filter(|item| item.foreign_key() == Some(key))
            .collect())
    }

    /// Replace an existing record; `None` when the ID is unknown
    async fn update(&self, item: T) -> AppResult<Option<T>>;

    /// Delete a record; `false` when the ID is unknown
    async fn delete(&self, id: &str) -> AppResult<bool>;
}
