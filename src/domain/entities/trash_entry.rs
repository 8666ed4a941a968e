use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::entities::document::Document;
use crate::domain::entities::user::User;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrashItemType {
    User,
    Document,
}

impl TrashItemType {
    /// Tabla principal de la que procede el elemento
    pub fn collection(&self) -> &'static str {
        match self {
            TrashItemType::User => "users",
            TrashItemType::Document => "documents",
        }
    }

    /// Columna que refleja si el registro está activo
    pub fn active_column(&self) -> &'static str {
        match self {
            TrashItemType::User => "status",
            TrashItemType::Document => "is_active",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "user" => Some(TrashItemType::User),
            "document" => Some(TrashItemType::Document),
            _ => None,
        }
    }
}

impl fmt::Display for TrashItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrashItemType::User => write!(f, "user"),
            TrashItemType::Document => write!(f, "document"),
        }
    }
}

/// Datos mínimos del registro original para listar la papelera y para
/// poder localizarlo al restaurar o borrar definitivamente
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrashSnapshot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TrashEntry {
    pub id: Uuid,
    pub item_type: TrashItemType,
    /// Identificador del registro original
    pub doc_id: String,
    pub original_collection: String,
    pub data: TrashSnapshot,
    pub deleted_at: DateTime<Utc>,
    pub deleted_by: String,
}

impl TrashEntry {
    pub fn for_user(user: &User, deleted_by: &str, deleted_at: DateTime<Utc>) -> Self {
        Self::new(
            TrashItemType::User,
            user.id(),
            TrashSnapshot {
                name: user.name().to_string(),
                email: Some(user.email().to_string()),
                role: Some(user.role().to_string()),
                ..Default::default()
            },
            deleted_by,
            deleted_at,
        )
    }

    pub fn for_document(document: &Document, deleted_by: &str, deleted_at: DateTime<Utc>) -> Self {
        Self::new(
            TrashItemType::Document,
            document.id(),
            TrashSnapshot {
                name: document.name().to_string(),
                folder_id: document.folder_id().map(str::to_string),
                storage_path: document.storage_path().map(str::to_string),
                thumbnail_path: document.thumbnail_path().map(str::to_string),
                ..Default::default()
            },
            deleted_by,
            deleted_at,
        )
    }

    fn new(
        item_type: TrashItemType,
        doc_id: &str,
        data: TrashSnapshot,
        deleted_by: &str,
        deleted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            item_type,
            doc_id: doc_id.to_string(),
            original_collection: item_type.collection().to_string(),
            data,
            deleted_at,
            deleted_by: deleted_by.to_string(),
        }
    }
}
