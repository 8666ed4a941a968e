use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::entities::trash_entry::{TrashEntry, TrashItemType};
use crate::common::errors::Result;

/// Each mutating method touches both the trash table and the original
/// record's table, and must apply both changes or neither.
#[async_trait]
pub trait TrashRepository: Send + Sync {
    /// Inserts the entry and flags the original record as trashed
    /// (`in_trash`, inactive, deletion metadata).
    async fn add_to_trash(&self, entry: &TrashEntry) -> Result<()>;

    async fn get_trash_item(&self, id: &Uuid) -> Result<Option<TrashEntry>>;

    /// Newest first; `None` lists every type.
    async fn get_trash_items(&self, item_type: Option<TrashItemType>) -> Result<Vec<TrashEntry>>;

    /// Clears the trash flags on the original record and removes the entry.
    /// Fails with `NotFound` if the original record is gone.
    async fn restore_from_trash(&self, entry: &TrashEntry, restored_at: DateTime<Utc>) -> Result<()>;

    /// Removes the original record (if still present) and the entry.
    async fn delete_permanently(&self, entry: &TrashEntry) -> Result<()>;
}
