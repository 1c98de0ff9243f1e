use async_trait::async_trait;

use crate::core::Result;

/// Base repository trait for ledger CRUD operations
/// Every ledger entity repository implements this trait for consistency
#[async_trait]
pub trait Repository<T, ID>: Send + Sync {
    /// Insert a new entity, returning it with its generated ID
    async fn create(&self, entity: &T) -> Result<T>;

    /// Find entity by ID
    async fn find_by_id(&self, id: ID) -> Result<Option<T>>;

    /// Overwrite an existing entity; NotFound when the ID is unknown
    async fn update(&self, id: ID, entity: &T) -> Result<T>;

    /// Delete an entity by ID; NotFound when the ID is unknown
    async fn delete(&self, id: ID) -> Result<()>;

    /// List all entities in the repository's natural order
    async fn list(&self) -> Result<Vec<T>>;
}
