use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::{debug, warn};

use crate::common::di::AppState;
use crate::domain::entities::user::UserRole;
use crate::domain::services::auth_service::AuthError;

// Extensión para almacenar datos del usuario autenticado
#[derive(Clone, Debug)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

// Estructura para usar en extractores de Axum
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub role: UserRole,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::TokenNotProvided
            | AuthError::TokenExpired
            | AuthError::InvalidToken(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            AuthError::AccessDenied(_) => (StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
            AuthError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = axum::Json(serde_json::json!({
            "success": false,
            "error": self.to_string(),
            "code": code,
        }));

        (status, body).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions
            .get::<CurrentUser>()
            .map(|user| AuthUser {
                id: user.id.clone(),
                email: user.email.clone(),
                role: user.role,
            })
            .ok_or(AuthError::TokenNotProvided)
    }
}

/// Valida el token Bearer y deja el usuario en las extensiones de la petición
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = request.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::to_string)
        .ok_or(AuthError::TokenNotProvided)?;

    let claims = state.auth_service.validate_token(&token)?;
    debug!("Token válido para usuario {}", claims.sub);

    let current_user = CurrentUser {
        id: claims.sub,
        email: claims.email,
        role: UserRole::from_str_lossy(&claims.role),
    };

    request.extensions_mut().insert(current_user);
    Ok(next.run(request).await)
}

/// Requiere rol de administrador; va detrás de `auth_middleware`
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AuthError> {
    let caller = request.extensions()
        .get::<CurrentUser>()
        .map(|user| (user.id.clone(), user.role));

    match caller {
        Some((_, UserRole::Admin)) => Ok(next.run(request).await),
        Some((user_id, _)) => {
            warn!("Usuario {} sin rol de administrador intentó acceder a {}", user_id, request.uri().path());
            Err(AuthError::AccessDenied("Se requiere rol de administrador".to_string()))
        },
        None => Err(AuthError::TokenNotProvided),
    }
}
