use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::trash_entry::{TrashEntry, TrashSnapshot};

/// DTO representing an entry in the trash
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashEntryDto {
    pub id: String,
    #[serde(rename = "type")]
    pub item_type: String, // "user" o "document"
    pub doc_id: String,
    pub original_collection: String,
    pub data: TrashSnapshot,
    pub deleted_at: DateTime<Utc>,
    pub deleted_by: String,
}

impl From<TrashEntry> for TrashEntryDto {
    fn from(entry: TrashEntry) -> Self {
        Self {
            id: entry.id.to_string(),
            item_type: entry.item_type.to_string(),
            doc_id: entry.doc_id,
            original_collection: entry.original_collection,
            data: entry.data,
            deleted_at: entry.deleted_at,
            deleted_by: entry.deleted_by,
        }
    }
}

/// Resultado de una restauración
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreResultDto {
    /// ID del registro original restaurado
    pub id: String,
    pub restored_at: DateTime<Utc>,
}

/// Resultado de mover un registro a la papelera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoftDeleteOutcome {
    MovedToTrash,
    /// El registro ya estaba en la papelera; no se creó otra entrada
    AlreadyInTrash,
}

/// Filtro del listado de papelera
#[derive(Debug, Default, Deserialize)]
pub struct TrashListQuery {
    #[serde(rename = "type")]
    pub item_type: Option<String>,
}
