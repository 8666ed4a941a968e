use serde::{Serialize, Deserialize};
use chrono::{DateTime, Utc};

/// Documento subido por un usuario. El contenido vive en el almacenamiento
/// de objetos; el registro guarda las rutas que lo referencian.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Document {
    id: String,
    name: String,
    folder_id: Option<String>,
    /// Ruta del objeto principal dentro del bucket
    storage_path: Option<String>,
    /// Ruta de la miniatura dentro del bucket
    thumbnail_path: Option<String>,
    url: Option<String>,
    version: i32,
    is_active: bool,
    in_trash: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    deleted_at: Option<DateTime<Utc>>,
    deleted_by: Option<String>,
}

impl Document {
    #[allow(clippy::too_many_arguments)]
    pub fn from_data(
        id: String,
        name: String,
        folder_id: Option<String>,
        storage_path: Option<String>,
        thumbnail_path: Option<String>,
        url: Option<String>,
        version: i32,
        is_active: bool,
        in_trash: bool,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
        deleted_by: Option<String>,
    ) -> Self {
        Self {
            id,
            name,
            folder_id,
            storage_path,
            thumbnail_path,
            url,
            version,
            is_active,
            in_trash,
            created_at,
            updated_at,
            deleted_at,
            deleted_by,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn folder_id(&self) -> Option<&str> {
        self.folder_id.as_deref()
    }

    pub fn storage_path(&self) -> Option<&str> {
        self.storage_path.as_deref()
    }

    pub fn thumbnail_path(&self) -> Option<&str> {
        self.thumbnail_path.as_deref()
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn version(&self) -> i32 {
        self.version
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn in_trash(&self) -> bool {
        self.in_trash
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn deleted_at(&self) -> Option<DateTime<Utc>> {
        self.deleted_at
    }

    pub fn deleted_by(&self) -> Option<&str> {
        self.deleted_by.as_deref()
    }

    /// Claves del bucket referenciadas por este documento, normalizadas
    /// sin barra inicial
    pub fn referenced_paths(&self) -> impl Iterator<Item = String> + '_ {
        [self.storage_path.as_deref(), self.thumbnail_path.as_deref()]
            .into_iter()
            .flatten()
            .map(normalize_storage_path)
            .filter(|path| !path.is_empty())
    }

    /// Cambios de estado al mover a la papelera. `TrashPgRepository` aplica
    /// las mismas columnas en SQL; los repositorios en memoria usan este método.
    pub fn move_to_trash(&mut self, deleted_by: &str, at: DateTime<Utc>) {
        self.in_trash = true;
        self.is_active = false;
        self.deleted_at = Some(at);
        self.deleted_by = Some(deleted_by.to_string());
        self.updated_at = at;
    }

    /// Inverso de `move_to_trash`; mismas columnas que el UPDATE de restauración
    pub fn restore(&mut self, at: DateTime<Utc>) {
        self.in_trash = false;
        self.is_active = true;
        self.deleted_at = None;
        self.deleted_by = None;
        self.updated_at = at;
    }
}

/// Quita la barra inicial para comparar con las claves del bucket
pub fn normalize_storage_path(path: &str) -> String {
    path.trim_start_matches('/').to_string()
}
