use async_trait::async_trait;

use crate::application::dtos::cleanup_dto::{CleanupResultDto, OrphanedFilesDto};
use crate::common::errors::Result;
use crate::domain::entities::storage_object::StorageObject;

/// Port for the object-store bucket that holds document contents
#[async_trait]
pub trait ObjectStoragePort: Send + Sync + 'static {
    /// List every object in the bucket
    async fn list_objects(&self) -> Result<Vec<StorageObject>>;

    /// Delete one object. Deleting a missing object succeeds.
    async fn delete_object(&self, path: &str) -> Result<()>;
}

/// Port for storage reconciliation use cases
#[async_trait]
pub trait StorageCleanupUseCase: Send + Sync {
    /// Objects that no document references
    async fn list_orphaned_files(&self) -> Result<OrphanedFilesDto>;

    /// Delete orphans last modified more than `older_than_days` ago
    async fn cleanup_orphaned_files(&self, older_than_days: u32) -> Result<CleanupResultDto>;
}
