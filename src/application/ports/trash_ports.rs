use async_trait::async_trait;

use crate::application::dtos::trash_dto::{RestoreResultDto, SoftDeleteOutcome, TrashEntryDto};
use crate::common::errors::{DomainError, ErrorKind};
use crate::domain::entities::trash_entry::TrashItemType;

/// Failures of the trash lifecycle, each reported distinctly to the caller
#[derive(Debug, thiserror::Error)]
pub enum TrashError {
    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("{entity} not found: {id}")]
    RecordNotFound { entity: &'static str, id: String },

    #[error("Trash item not found: {0}")]
    TrashItemNotFound(String),

    #[error("Trash item {id} is not a valid {expected} entry")]
    InvalidTrashItemType { id: String, expected: TrashItemType },

    #[error("Original {item_type} not found: {id}")]
    OriginalNotFound { item_type: TrashItemType, id: String },

    /// Database rows were removed but the identity account may survive
    #[error("Identity provider deletion failed for user {user_id}: {message}")]
    IdentityDeleteFailed { user_id: String, message: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl TrashError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TrashError::InvalidId(_) | TrashError::InvalidTrashItemType { .. } => ErrorKind::InvalidInput,
            TrashError::RecordNotFound { .. }
            | TrashError::TrashItemNotFound(_)
            | TrashError::OriginalNotFound { .. } => ErrorKind::NotFound,
            TrashError::IdentityDeleteFailed { .. } => ErrorKind::UpstreamFailure,
            TrashError::Domain(e) => e.kind,
        }
    }
}

/// Port for trash-related use cases
#[async_trait]
pub trait TrashUseCase: Send + Sync {
    /// List trash entries, optionally only one type
    async fn get_trash_items(&self, item_type: Option<TrashItemType>) -> Result<Vec<TrashEntryDto>, TrashError>;

    /// Move a user to the trash and disable their identity account
    async fn soft_delete_user(&self, user_id: &str, deleted_by: &str) -> Result<SoftDeleteOutcome, TrashError>;

    /// Move a document to the trash
    async fn soft_delete_document(&self, document_id: &str, deleted_by: &str) -> Result<SoftDeleteOutcome, TrashError>;

    /// Restore a user from a trash entry and re-enable their identity account
    async fn restore_user(&self, trash_id: &str) -> Result<RestoreResultDto, TrashError>;

    /// Restore a document from a trash entry
    async fn restore_document(&self, trash_id: &str) -> Result<RestoreResultDto, TrashError>;

    /// Remove a trashed user from the database and the identity provider
    async fn delete_user_permanently(&self, trash_id: &str) -> Result<(), TrashError>;

    /// Remove a trashed document; its stored files are left to storage cleanup
    async fn delete_document_permanently(&self, trash_id: &str) -> Result<(), TrashError>;
}
