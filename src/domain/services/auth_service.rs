use jsonwebtoken::{decode, Validation, DecodingKey, Algorithm};
use serde::{Serialize, Deserialize};

/**
 * JWT claims structure for authentication tokens.
 *
 * Tokens identify the caller of the admin API. The `sub` claim is recorded
 * as `deleted_by` when the caller moves something to the trash.
 */
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject identifier - contains the user ID
    pub sub: String,

    /// Expiration timestamp (seconds since Unix epoch)
    pub exp: i64,

    /// Issued at timestamp (seconds since Unix epoch)
    pub iat: i64,

    /// JWT unique ID for token tracking
    pub jti: String,

    /// User email for identification
    pub email: String,

    /// User role for authorization checks
    pub role: String,
}

/**
 * Authentication-specific error types.
 */
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No bearer token in the request
    #[error("Token no proporcionado")]
    TokenNotProvided,

    /// Returned when a JWT token has passed its expiration time
    #[error("Token expirado")]
    TokenExpired,

    /// Returned when a JWT token is malformed or has invalid signature
    #[error("Token inválido: {0}")]
    InvalidToken(String),

    /// Returned when a user attempts to access a resource they don't have permission for
    #[error("Acceso denegado: {0}")]
    AccessDenied(String),

    /// Returned for unexpected errors in the authentication system
    #[error("Error interno: {0}")]
    InternalError(String),
}

/**
 * Authentication service: validates the HS256 access tokens issued by the
 * identity front end.
 */
pub struct AuthService {
    /// Secret key used to verify JWT signatures
    jwt_secret: String,
}

impl AuthService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    pub fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation
        )
        .map_err(|e| {
            match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken(format!("Error al validar token: {}", e)),
            }
        })?;

        Ok(token_data.claims)
    }
}

/// Firma tokens como lo hace el emisor real, para los tests de la API
#[cfg(test)]
pub(crate) fn sign_test_token(
    secret: &str,
    user_id: &str,
    role: crate::domain::entities::user::UserRole,
    expires_in_secs: i64,
) -> String {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use uuid::Uuid;

    let now = chrono::Utc::now().timestamp();
    let claims = TokenClaims {
        sub: user_id.to_string(),
        exp: now + expires_in_secs,
        iat: now,
        jti: Uuid::new_v4().to_string(),
        email: format!("{}@example.com", user_id.to_lowercase()),
        role: role.to_string(),
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes())).unwrap()
}
