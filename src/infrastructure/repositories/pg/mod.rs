mod document_pg_repository;
mod trash_pg_repository;
mod user_pg_repository;

pub use document_pg_repository::DocumentPgRepository;
pub use trash_pg_repository::TrashPgRepository;
pub use user_pg_repository::UserPgRepository;

use crate::common::errors::{DomainError, ErrorKind};

/// Clasifica un error de sqlx según lo que puede hacer el cliente con él
pub(crate) fn classify_sqlx_error(err: &sqlx::Error) -> ErrorKind {
    match err {
        sqlx::Error::RowNotFound => ErrorKind::NotFound,
        sqlx::Error::PoolTimedOut => ErrorKind::Timeout,
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed => ErrorKind::Unavailable,
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            // unique_violation
            Some("23505") => ErrorKind::AlreadyExists,
            // insufficient_privilege
            Some("42501") => ErrorKind::AccessDenied,
            // too_many_connections
            Some("53300") => ErrorKind::RateLimited,
            // query_canceled (statement_timeout)
            Some("57014") => ErrorKind::Timeout,
            _ => ErrorKind::InternalError,
        },
        _ => ErrorKind::InternalError,
    }
}

pub(crate) fn map_sqlx_error(err: sqlx::Error, entity_type: &'static str) -> DomainError {
    let kind = classify_sqlx_error(&err);
    DomainError::new(kind, entity_type, format!("Error de base de datos: {}", err))
        .with_source(err)
}
