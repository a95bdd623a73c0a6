use async_trait::async_trait;

use crate::domain::errors::RepositoryResult;

/// Generic persistence contract shared by every entity repository
///
/// Defines the basic lifecycle operations; entity repositories extend it
/// with their own queries.
#[async_trait]
pub trait CrudRepository<T, ID>: Send + Sync
where
    T: Send + 'static,
    ID: Send + 'static,
{
    /// Save an entity (insert when it has no id yet, update otherwise)
    ///
    /// Returns the entity as stored, with its id and timestamps filled in.
    async fn save(&self, entity: T) -> RepositoryResult<T>;

    /// Find an entity by its ID
    async fn find_by_id(&self, id: ID) -> RepositoryResult<Option<T>>;

    /// Find all entities
    async fn find_all(&self) -> RepositoryResult<Vec<T>>;

    /// Delete an entity by ID, failing with `NotFound` if it does not exist
    async fn delete(&self, id: ID) -> RepositoryResult<()>;

    /// Delete every entity, returning the number of removed rows
    async fn delete_all(&self) -> RepositoryResult<u64>;

    /// Count all entities
    async fn count(&self) -> RepositoryResult<i64>;
}
