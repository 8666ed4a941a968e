use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::{info, instrument};

use crate::application::dtos::cleanup_dto::CleanupRequestDto;
use crate::common::di::AppState;
use crate::common::errors::AppError;

/// Lista los archivos del bucket que ningún documento referencia
#[instrument(skip(state))]
pub async fn list_orphaned_files(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let orphans = state.applications.storage_cleanup_service
        .list_orphaned_files()
        .await
        .map_err(|e| AppError::from_domain(&e, "CLEANUP_FAILED"))?;

    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "data": orphans
    }))))
}

/// Borra los huérfanos más antiguos que `olderThanDays`.
/// Sin cuerpo (o sin el campo) se usa el valor de configuración.
#[instrument(skip(state, body))]
pub async fn cleanup_orphaned_files(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let request: CleanupRequestDto = if body.iter().all(u8::is_ascii_whitespace) {
        CleanupRequestDto::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::bad_request("INVALID_INPUT", format!("Invalid request body: {}", e)))?
    };

    let older_than_days = request.older_than_days
        .unwrap_or(state.config.cleanup.default_older_than_days);
    info!("Limpieza de almacenamiento solicitada (olderThanDays={})", older_than_days);

    let result = state.applications.storage_cleanup_service
        .cleanup_orphaned_files(older_than_days)
        .await
        .map_err(|e| AppError::from_domain(&e, "CLEANUP_FAILED"))?;

    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "data": result
    }))))
}
