use async_trait::async_trait;

use crate::common::errors::{DomainError, ErrorKind};

/// Account as seen by the identity provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    pub uid: String,
    pub email: Option<String>,
    pub disabled: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Identity not found: {0}")]
    NotFound(String),

    #[error("Identity provider denied access: {0}")]
    AccessDenied(String),

    #[error("Identity provider rate limit reached: {0}")]
    RateLimited(String),

    #[error("Identity provider timed out: {0}")]
    Timeout(String),

    #[error("Identity provider unavailable: {0}")]
    Unavailable(String),

    #[error("Identity provider error: {0}")]
    Upstream(String),
}

impl IdentityError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, IdentityError::NotFound(_))
    }
}

impl From<IdentityError> for DomainError {
    fn from(err: IdentityError) -> Self {
        let kind = match &err {
            IdentityError::NotFound(_) => ErrorKind::NotFound,
            IdentityError::AccessDenied(_) => ErrorKind::AccessDenied,
            IdentityError::RateLimited(_) => ErrorKind::RateLimited,
            IdentityError::Timeout(_) => ErrorKind::Timeout,
            IdentityError::Unavailable(_) => ErrorKind::Unavailable,
            IdentityError::Upstream(_) => ErrorKind::UpstreamFailure,
        };
        DomainError::new(kind, "Identity", err.to_string()).with_source(err)
    }
}

/// Admin operations on the external identity provider
#[async_trait]
pub trait IdentityProviderPort: Send + Sync + 'static {
    /// Looks up an account by email
    async fn get_user_by_email(&self, email: &str) -> Result<IdentityRecord, IdentityError>;

    /// Enables or disables sign-in for an account
    async fn set_user_disabled(&self, uid: &str, disabled: bool) -> Result<(), IdentityError>;

    /// Removes an account
    async fn delete_user(&self, uid: &str) -> Result<(), IdentityError>;
}
