use async_trait::async_trait;
use crate::domain::entities::user::User;
use crate::common::errors::{DomainError, ErrorKind};

#[derive(Debug, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("Usuario no encontrado: {0}")]
    NotFound(String),

    #[error("Error de base de datos: {0}")]
    DatabaseError(String),

    #[error("Error de tiempo de espera: {0}")]
    Timeout(String),

    #[error("Base de datos no disponible: {0}")]
    Unavailable(String),

    #[error("Operación no permitida: {0}")]
    OperationNotAllowed(String),

    #[error("Límite de conexiones alcanzado: {0}")]
    RateLimited(String),
}

pub type UserRepositoryResult<T> = Result<T, UserRepositoryError>;

// Conversión de UserRepositoryError a DomainError
impl From<UserRepositoryError> for DomainError {
    fn from(err: UserRepositoryError) -> Self {
        match err {
            UserRepositoryError::NotFound(id) => {
                DomainError::not_found("User", id)
            },
            UserRepositoryError::DatabaseError(msg) => {
                DomainError::internal_error("Database", msg)
            },
            UserRepositoryError::Timeout(msg) => {
                DomainError::timeout("Database", msg)
            },
            UserRepositoryError::Unavailable(msg) => {
                DomainError::new(ErrorKind::Unavailable, "Database", msg)
            },
            UserRepositoryError::OperationNotAllowed(msg) => {
                DomainError::access_denied("User", msg)
            },
            UserRepositoryError::RateLimited(msg) => {
                DomainError::new(ErrorKind::RateLimited, "Database", msg)
            },
        }
    }
}

#[async_trait]
pub trait UserRepository: Send + Sync + 'static {
    /// Obtiene un usuario por ID, esté o no en la papelera
    async fn get_user_by_id(&self, id: &str) -> UserRepositoryResult<User>;
}
