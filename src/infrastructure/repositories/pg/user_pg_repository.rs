use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use std::sync::Arc;

use crate::domain::entities::user::{User, UserRole};
use crate::domain::repositories::user_repository::{UserRepository, UserRepositoryError, UserRepositoryResult};
use crate::common::errors::ErrorKind;

use super::classify_sqlx_error;

pub struct UserPgRepository {
    pool: Arc<PgPool>,
}

impl UserPgRepository {
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    // Método auxiliar para mapear errores SQL a errores de dominio
    fn map_sqlx_error(err: sqlx::Error, id: &str) -> UserRepositoryError {
        let message = format!("Error de base de datos: {}", err);
        match classify_sqlx_error(&err) {
            ErrorKind::NotFound => UserRepositoryError::NotFound(id.to_string()),
            ErrorKind::Timeout => UserRepositoryError::Timeout(message),
            ErrorKind::Unavailable => UserRepositoryError::Unavailable(message),
            ErrorKind::AccessDenied => UserRepositoryError::OperationNotAllowed(message),
            ErrorKind::RateLimited => UserRepositoryError::RateLimited(message),
            _ => UserRepositoryError::DatabaseError(message),
        }
    }

    fn row_to_user(row: &PgRow) -> Result<User, sqlx::Error> {
        let role: String = row.try_get("role")?;

        Ok(User::from_data(
            row.try_get("id")?,
            row.try_get("email")?,
            row.try_get("name")?,
            UserRole::from_str_lossy(&role),
            row.try_get("mobile")?,
            row.try_get("status")?,
            row.try_get("in_trash")?,
            row.try_get("firebase_uid")?,
            row.try_get("created_at")?,
            row.try_get("updated_at")?,
            row.try_get("deleted_at")?,
            row.try_get("deleted_by")?,
        ))
    }
}

#[async_trait]
impl UserRepository for UserPgRepository {
    /// Obtiene un usuario por ID
    async fn get_user_by_id(&self, id: &str) -> UserRepositoryResult<User> {
        let row = sqlx::query(
            r#"
            SELECT
                id, email, name, role, mobile, status, in_trash, firebase_uid,
                created_at, updated_at, deleted_at, deleted_by
            FROM users
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_one(&*self.pool)
        .await
        .map_err(|e| Self::map_sqlx_error(e, id))?;

        Self::row_to_user(&row).map_err(|e| Self::map_sqlx_error(e, id))
    }
}
