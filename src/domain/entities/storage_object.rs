use chrono::{DateTime, Utc};

/// Objeto del bucket; solo existe en el almacenamiento, no en la base de datos
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageObject {
    pub path: String,
    pub size: u64,
    pub last_modified: DateTime<Utc>,
}
