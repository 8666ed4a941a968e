use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{postgres::PgRow, PgPool, Row};
use std::sync::Arc;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::common::errors::{DomainError, Result};
use crate::domain::entities::trash_entry::{TrashEntry, TrashItemType, TrashSnapshot};
use crate::domain::repositories::trash_repository::TrashRepository;

use super::map_sqlx_error;

/// Papelera en PostgreSQL. Cada operación que toca la tabla `trash` y la
/// tabla original va dentro de una única transacción.
pub struct TrashPgRepository {
    pool: Arc<PgPool>,
}

impl TrashPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    fn row_to_entry(row: &PgRow) -> Result<TrashEntry> {
        let item_type: String = row.try_get("item_type").map_err(|e| map_sqlx_error(e, "Trash"))?;
        let item_type = TrashItemType::parse(&item_type).ok_or_else(|| {
            DomainError::internal_error("Trash", format!("Tipo de elemento desconocido: {}", item_type))
        })?;

        let data: serde_json::Value = row.try_get("data").map_err(|e| map_sqlx_error(e, "Trash"))?;
        let data: TrashSnapshot = serde_json::from_value(data)?;

        let get = |column: &str| -> Result<String> {
            row.try_get(column).map_err(|e| map_sqlx_error(e, "Trash"))
        };

        Ok(TrashEntry {
            id: row.try_get("id").map_err(|e| map_sqlx_error(e, "Trash"))?,
            item_type,
            doc_id: get("doc_id")?,
            original_collection: get("original_collection")?,
            data,
            deleted_at: row.try_get("deleted_at").map_err(|e| map_sqlx_error(e, "Trash"))?,
            deleted_by: get("deleted_by")?,
        })
    }
}

#[async_trait]
impl TrashRepository for TrashPgRepository {
    #[instrument(skip(self, entry), fields(trash_id = %entry.id, doc_id = %entry.doc_id))]
    async fn add_to_trash(&self, entry: &TrashEntry) -> Result<()> {
        let data = serde_json::to_value(&entry.data)?;
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error(e, "Trash"))?;

        sqlx::query(
            r#"
            INSERT INTO trash (id, item_type, doc_id, original_collection, data, deleted_at, deleted_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#
        )
        .bind(entry.id)
        .bind(entry.item_type.to_string())
        .bind(&entry.doc_id)
        .bind(&entry.original_collection)
        .bind(data)
        .bind(entry.deleted_at)
        .bind(&entry.deleted_by)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error(e, "Trash"))?;

        // Mismas columnas que User::move_to_trash / Document::move_to_trash
        let sql = format!(
            "UPDATE {} SET in_trash = TRUE, {} = FALSE, deleted_at = $1, deleted_by = $2, updated_at = $1 WHERE id = $3",
            entry.item_type.collection(),
            entry.item_type.active_column(),
        );
        let updated = sqlx::query(&sql)
            .bind(entry.deleted_at)
            .bind(&entry.deleted_by)
            .bind(&entry.doc_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Trash"))?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(|e| map_sqlx_error(e, "Trash"))?;
            return Err(DomainError::not_found(entity_name(entry.item_type), entry.doc_id.clone()));
        }

        tx.commit().await.map_err(|e| map_sqlx_error(e, "Trash"))?;
        debug!("Entrada de papelera registrada");
        Ok(())
    }

    async fn get_trash_item(&self, id: &Uuid) -> Result<Option<TrashEntry>> {
        let row = sqlx::query(
            r#"
            SELECT id, item_type, doc_id, original_collection, data, deleted_at, deleted_by
            FROM trash
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Trash"))?;

        row.as_ref().map(Self::row_to_entry).transpose()
    }

    async fn get_trash_items(&self, item_type: Option<TrashItemType>) -> Result<Vec<TrashEntry>> {
        let rows = sqlx::query(
            r#"
            SELECT id, item_type, doc_id, original_collection, data, deleted_at, deleted_by
            FROM trash
            WHERE ($1::VARCHAR IS NULL OR item_type = $1)
            ORDER BY deleted_at DESC
            "#
        )
        .bind(item_type.map(|t| t.to_string()))
        .fetch_all(&*self.pool)
        .await
        .map_err(|e| map_sqlx_error(e, "Trash"))?;

        rows.iter().map(Self::row_to_entry).collect()
    }

    #[instrument(skip(self, entry), fields(trash_id = %entry.id, doc_id = %entry.doc_id))]
    async fn restore_from_trash(&self, entry: &TrashEntry, restored_at: DateTime<Utc>) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error(e, "Trash"))?;

        // Mismas columnas que User::restore / Document::restore
        let sql = format!(
            "UPDATE {} SET in_trash = FALSE, {} = TRUE, deleted_at = NULL, deleted_by = NULL, updated_at = $1 WHERE id = $2",
            entry.item_type.collection(),
            entry.item_type.active_column(),
        );
        let updated = sqlx::query(&sql)
            .bind(restored_at)
            .bind(&entry.doc_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Trash"))?;

        if updated.rows_affected() == 0 {
            tx.rollback().await.map_err(|e| map_sqlx_error(e, "Trash"))?;
            return Err(DomainError::not_found(entity_name(entry.item_type), entry.doc_id.clone()));
        }

        sqlx::query("DELETE FROM trash WHERE id = $1")
            .bind(entry.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Trash"))?;

        tx.commit().await.map_err(|e| map_sqlx_error(e, "Trash"))?;
        debug!("Registro restaurado");
        Ok(())
    }

    #[instrument(skip(self, entry), fields(trash_id = %entry.id, doc_id = %entry.doc_id))]
    async fn delete_permanently(&self, entry: &TrashEntry) -> Result<()> {
        let mut tx = self.pool.begin().await.map_err(|e| map_sqlx_error(e, "Trash"))?;

        let sql = format!("DELETE FROM {} WHERE id = $1", entry.item_type.collection());
        let deleted = sqlx::query(&sql)
            .bind(&entry.doc_id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Trash"))?;

        sqlx::query("DELETE FROM trash WHERE id = $1")
            .bind(entry.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error(e, "Trash"))?;

        tx.commit().await.map_err(|e| map_sqlx_error(e, "Trash"))?;
        debug!("Eliminado permanentemente ({} filas del original)", deleted.rows_affected());
        Ok(())
    }
}

fn entity_name(item_type: TrashItemType) -> &'static str {
    match item_type {
        TrashItemType::User => "User",
        TrashItemType::Document => "Document",
    }
}
