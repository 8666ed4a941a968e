use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::storage_object::StorageObject;

/// Archivo del bucket sin referencia en ningún documento
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedFileDto {
    pub path: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}

impl From<StorageObject> for OrphanedFileDto {
    fn from(object: StorageObject) -> Self {
        Self {
            path: object.path,
            size: object.size,
            last_modified: object.last_modified,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrphanedFilesDto {
    pub files: Vec<OrphanedFileDto>,
    pub count: usize,
    pub total_size: u64,
}

impl OrphanedFilesDto {
    pub fn new(files: Vec<OrphanedFileDto>) -> Self {
        let total_size = files.iter().map(|f| f.size).sum();
        Self {
            count: files.len(),
            total_size,
            files,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FailedFileDto {
    pub path: String,
    pub error: String,
}

/// Resultado de una limpieza de huérfanos
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResultDto {
    /// Archivos seleccionados para borrar
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub failed_files: Vec<FailedFileDto>,
    /// Bytes liberados, solo de los borrados confirmados
    pub size_freed: u64,
}

/// Cuerpo de POST /admin/cleanup-storage
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupRequestDto {
    pub older_than_days: Option<u32>,
}
