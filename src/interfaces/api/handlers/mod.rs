pub mod cleanup_handler;
pub mod document_handler;
pub mod trash_handler;
pub mod user_handler;

#[cfg(test)]
mod handlers_test;

use axum::http::StatusCode;

use crate::application::ports::trash_ports::TrashError;
use crate::common::errors::AppError;
use crate::domain::entities::trash_entry::TrashItemType;

/// Traduce un error de la papelera a respuesta HTTP. `fallback_code` se usa
/// para los fallos sin clase propia (DELETE_FAILED, RESTORE_FAILED, ...).
pub(crate) fn trash_error_response(err: TrashError, fallback_code: &'static str) -> AppError {
    let message = err.to_string();
    let response = match err {
        TrashError::InvalidId(_) => AppError::bad_request("INVALID_ID", message),
        TrashError::RecordNotFound { .. } => AppError::not_found("RECORD_NOT_FOUND", message),
        TrashError::TrashItemNotFound(_) => AppError::not_found("TRASH_ITEM_NOT_FOUND", message),
        TrashError::InvalidTrashItemType { .. } => AppError::bad_request("INVALID_TRASH_ITEM_TYPE", message),
        TrashError::OriginalNotFound { item_type: TrashItemType::User, .. } => {
            AppError::not_found("ORIGINAL_USER_NOT_FOUND", message)
        },
        TrashError::OriginalNotFound { item_type: TrashItemType::Document, .. } => {
            AppError::not_found("ORIGINAL_DOCUMENT_NOT_FOUND", message)
        },
        TrashError::IdentityDeleteFailed { .. } => {
            AppError::new(StatusCode::BAD_GATEWAY, "IDENTITY_DELETE_FAILED", message)
        },
        TrashError::Domain(e) => AppError::from_domain(&e, fallback_code),
    };

    if response.status.is_server_error() {
        tracing::error!("{}", response);
    } else {
        tracing::debug!("{}", response);
    }
    response
}
