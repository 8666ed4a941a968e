use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::sync::Arc;

use crate::common::errors::Result;
use crate::domain::entities::document::Document;
use crate::domain::repositories::document_repository::DocumentRepository;

use super::map_sqlx_error;

const DOCUMENT_COLUMNS: &str = "id, name, folder_id, storage_path, thumbnail_path, url, version, \
     is_active, in_trash, created_at, updated_at, deleted_at, deleted_by";

pub struct DocumentPgRepository {
    pool: Arc<PgPool>,
}

impl DocumentPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_document(row: &PgRow) -> std::result::Result<Document, sqlx::Error> {
        Ok(Document::from_data(
            row.try_get("id")?,
            row.try_get("name")?,
            row.try_get("folder_id")?,
            row.try_get("storage_path")?,
            row.try_get("thumbnail_path")?,
            row.try_get("url")?,
            row.try_get("version")?,
            row.try_get("is_active")?,
            row.try_get("in_trash")?,
            row.try_get("created_at")?,
            row.try_get("updated_at")?,
            row.try_get("deleted_at")?,
            row.try_get("deleted_by")?,
        ))
    }
}

#[async_trait]
impl DocumentRepository for DocumentPgRepository {
    async fn get_document_by_id(&self, id: &str) -> Result<Option<Document>> {
        let sql = format!("SELECT {} FROM documents WHERE id = $1", DOCUMENT_COLUMNS);

        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Document"))?;

        row.as_ref()
            .map(Self::row_to_document)
            .transpose()
            .map_err(|e| map_sqlx_error(e, "Document"))
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        let sql = format!("SELECT {} FROM documents", DOCUMENT_COLUMNS);

        let rows = sqlx::query(&sql)
            .fetch_all(&*self.pool)
            .await
            .map_err(|e| map_sqlx_error(e, "Document"))?;

        rows.iter()
            .map(Self::row_to_document)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| map_sqlx_error(e, "Document"))
    }
}
