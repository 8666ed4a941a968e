use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;
use tracing::{debug, info, instrument};

use crate::application::dtos::trash_dto::TrashListQuery;
use crate::common::di::AppState;
use crate::common::errors::AppError;
use crate::domain::entities::trash_entry::TrashItemType;
use crate::interfaces::api::handlers::trash_error_response;

/// Lista los elementos de la papelera, opcionalmente filtrados por tipo
#[instrument(skip(state))]
pub async fn get_trash_items(
    State(state): State<AppState>,
    Query(query): Query<TrashListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let item_type = match query.item_type.as_deref() {
        None | Some("") => None,
        Some(value) => Some(TrashItemType::parse(value).ok_or_else(|| {
            AppError::bad_request(
                "INVALID_TRASH_ITEM_TYPE",
                format!("Unknown trash item type: {}", value),
            )
        })?),
    };

    let items = state.applications.trash_service
        .get_trash_items(item_type)
        .await
        .map_err(|e| trash_error_response(e, "TRASH_LIST_FAILED"))?;

    debug!("Encontrados {} elementos en la papelera", items.len());
    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "data": items
    }))))
}

/// Restaura un usuario desde la papelera
#[instrument(skip(state))]
pub async fn restore_user(
    State(state): State<AppState>,
    Path(trash_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.applications.trash_service
        .restore_user(&trash_id)
        .await
        .map_err(|e| trash_error_response(e, "RESTORE_FAILED"))?;

    info!("Usuario {} restaurado desde la entrada {}", result.id, trash_id);
    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "data": {
            "userId": result.id,
            "restoredAt": result.restored_at
        }
    }))))
}

/// Restaura un documento desde la papelera
#[instrument(skip(state))]
pub async fn restore_document(
    State(state): State<AppState>,
    Path(trash_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let result = state.applications.trash_service
        .restore_document(&trash_id)
        .await
        .map_err(|e| trash_error_response(e, "RESTORE_FAILED"))?;

    info!("Documento {} restaurado desde la entrada {}", result.id, trash_id);
    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "data": {
            "documentId": result.id,
            "restoredAt": result.restored_at
        }
    }))))
}

/// Elimina un usuario permanentemente, también del proveedor de identidad
#[instrument(skip(state))]
pub async fn delete_user_permanently(
    State(state): State<AppState>,
    Path(trash_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.applications.trash_service
        .delete_user_permanently(&trash_id)
        .await
        .map_err(|e| trash_error_response(e, "DELETE_FAILED"))?;

    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "message": "User permanently deleted"
    }))))
}

/// Elimina un documento permanentemente
#[instrument(skip(state))]
pub async fn delete_document_permanently(
    State(state): State<AppState>,
    Path(trash_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.applications.trash_service
        .delete_document_permanently(&trash_id)
        .await
        .map_err(|e| trash_error_response(e, "DELETE_FAILED"))?;

    Ok((StatusCode::OK, Json(json!({
        "success": true,
        "message": "Document permanently deleted"
    }))))
}
