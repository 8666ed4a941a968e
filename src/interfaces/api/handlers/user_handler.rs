use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::{info, instrument};

use crate::application::dtos::trash_dto::SoftDeleteOutcome;
use crate::common::di::AppState;
use crate::common::errors::AppError;
use crate::interfaces::api::handlers::trash_error_response;
use crate::interfaces::middleware::auth::AuthUser;

/// Mueve un usuario a la papelera (solo administradores)
#[instrument(skip(state, auth_user), fields(caller = %auth_user.id))]
pub async fn delete_user(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let outcome = state.applications.trash_service
        .soft_delete_user(&user_id, &auth_user.id)
        .await
        .map_err(|e| trash_error_response(e, "DELETE_FAILED"))?;

    let message = match outcome {
        SoftDeleteOutcome::MovedToTrash => "User moved to trash successfully",
        SoftDeleteOutcome::AlreadyInTrash => "User is already in trash",
    };
    info!("Usuario {}: {}", user_id, message);

    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "message": message
    }))))
}
