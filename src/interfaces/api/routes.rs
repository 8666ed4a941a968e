use axum::{
    middleware::{from_fn, from_fn_with_state},
    routing::{delete, get, post},
    Router,
};

use crate::common::di::AppState;
use crate::interfaces::api::handlers::{cleanup_handler, document_handler, trash_handler, user_handler};
use crate::interfaces::middleware::auth::{auth_middleware, require_admin};

/// Creates API routes for the application
pub fn create_api_routes(state: AppState) -> Router {
    // route_layer se aplica de dentro hacia fuera: auth corre antes que require_admin
    let admin_router = Router::new()
        .route("/trash", get(trash_handler::get_trash_items))
        .route("/trash/users/{id}/restore", post(trash_handler::restore_user))
        .route("/trash/users/{id}", delete(trash_handler::delete_user_permanently))
        .route("/trash/documents/{id}/restore", post(trash_handler::restore_document))
        .route("/trash/documents/{id}", delete(trash_handler::delete_document_permanently))
        .route(
            "/cleanup-storage",
            get(cleanup_handler::list_orphaned_files).post(cleanup_handler::cleanup_orphaned_files),
        )
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let users_router = Router::new()
        .route("/{id}", delete(user_handler::delete_user))
        .route_layer(from_fn(require_admin))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    let documents_router = Router::new()
        .route("/{id}", delete(document_handler::delete_document))
        .route_layer(from_fn_with_state(state.clone(), auth_middleware));

    Router::new()
        .nest("/admin", admin_router)
        .nest("/users", users_router)
        .nest("/documents", documents_router)
        .with_state(state)
}
