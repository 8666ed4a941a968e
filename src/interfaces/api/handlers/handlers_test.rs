use std::sync::{Arc, Mutex};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::Value;
use tower::ServiceExt;

use crate::application::dtos::cleanup_dto::{CleanupResultDto, OrphanedFileDto, OrphanedFilesDto};
use crate::application::dtos::trash_dto::{RestoreResultDto, SoftDeleteOutcome, TrashEntryDto};
use crate::application::ports::storage_ports::StorageCleanupUseCase;
use crate::application::ports::trash_ports::{TrashError, TrashUseCase};
use crate::common::config::AppConfig;
use crate::common::di::{AppState, ApplicationServices};
use crate::common::errors::{DomainError, ErrorKind, Result};
use crate::domain::entities::trash_entry::{TrashItemType, TrashSnapshot};
use crate::domain::entities::user::UserRole;
use crate::domain::services::auth_service::{sign_test_token, AuthService};
use crate::interfaces::api::create_api_routes;

const TEST_SECRET: &str = "test-secret";

// El id recibido decide el resultado del caso de uso
fn outcome_for(id: &str, item_type: TrashItemType) -> std::result::Result<(), TrashError> {
    match id {
        "bad-id" => Err(TrashError::InvalidId(id.to_string())),
        "missing-record" => Err(TrashError::RecordNotFound { entity: "User", id: id.to_string() }),
        "missing-entry" => Err(TrashError::TrashItemNotFound(id.to_string())),
        "wrong-type" => Err(TrashError::InvalidTrashItemType { id: id.to_string(), expected: item_type }),
        "original-gone" => Err(TrashError::OriginalNotFound { item_type, id: id.to_string() }),
        "identity-down" => Err(TrashError::IdentityDeleteFailed {
            user_id: "U1".to_string(),
            message: "Identity provider unavailable".to_string(),
        }),
        "denied" => Err(DomainError::new(ErrorKind::AccessDenied, "Database", "permission denied").into()),
        "offline" => Err(DomainError::new(ErrorKind::Unavailable, "Database", "connection refused").into()),
        "slow" => Err(DomainError::timeout("Database", "pool timed out").into()),
        "quota" => Err(DomainError::new(ErrorKind::RateLimited, "Database", "too many connections").into()),
        "boom" => Err(DomainError::internal_error("Database", "unexpected").into()),
        _ => Ok(()),
    }
}

#[derive(Default)]
struct MockTrashUseCase {
    calls: Mutex<Vec<String>>,
}

impl MockTrashUseCase {
    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TrashUseCase for MockTrashUseCase {
    async fn get_trash_items(&self, item_type: Option<TrashItemType>) -> std::result::Result<Vec<TrashEntryDto>, TrashError> {
        self.record(format!("list:{:?}", item_type));
        Ok(vec![TrashEntryDto {
            id: "0b8f7c1e-2d4a-4f7e-9a51-5c3b7f0e1d2a".to_string(),
            item_type: "document".to_string(),
            doc_id: "D1".to_string(),
            original_collection: "documents".to_string(),
            data: TrashSnapshot { name: "report.pdf".to_string(), ..Default::default() },
            deleted_at: Utc::now(),
            deleted_by: "ADMIN".to_string(),
        }])
    }

    async fn soft_delete_user(&self, user_id: &str, deleted_by: &str) -> std::result::Result<SoftDeleteOutcome, TrashError> {
        self.record(format!("soft_delete_user:{}:{}", user_id, deleted_by));
        outcome_for(user_id, TrashItemType::User)?;
        Ok(if user_id == "already" { SoftDeleteOutcome::AlreadyInTrash } else { SoftDeleteOutcome::MovedToTrash })
    }

    async fn soft_delete_document(&self, document_id: &str, deleted_by: &str) -> std::result::Result<SoftDeleteOutcome, TrashError> {
        self.record(format!("soft_delete_document:{}:{}", document_id, deleted_by));
        outcome_for(document_id, TrashItemType::Document)?;
        Ok(SoftDeleteOutcome::MovedToTrash)
    }

    async fn restore_user(&self, trash_id: &str) -> std::result::Result<RestoreResultDto, TrashError> {
        outcome_for(trash_id, TrashItemType::User)?;
        Ok(RestoreResultDto { id: "U1".to_string(), restored_at: Utc::now() })
    }

    async fn restore_document(&self, trash_id: &str) -> std::result::Result<RestoreResultDto, TrashError> {
        outcome_for(trash_id, TrashItemType::Document)?;
        Ok(RestoreResultDto { id: "D1".to_string(), restored_at: Utc::now() })
    }

    async fn delete_user_permanently(&self, trash_id: &str) -> std::result::Result<(), TrashError> {
        outcome_for(trash_id, TrashItemType::User)
    }

    async fn delete_document_permanently(&self, trash_id: &str) -> std::result::Result<(), TrashError> {
        outcome_for(trash_id, TrashItemType::Document)
    }
}

#[derive(Default)]
struct MockStorageCleanup {
    requested_days: Mutex<Vec<u32>>,
}

#[async_trait]
impl StorageCleanupUseCase for MockStorageCleanup {
    async fn list_orphaned_files(&self) -> Result<OrphanedFilesDto> {
        Ok(OrphanedFilesDto::new(vec![OrphanedFileDto {
            path: "c/3.tmp".to_string(),
            size: 300,
            last_modified: Utc::now(),
        }]))
    }

    async fn cleanup_orphaned_files(&self, older_than_days: u32) -> Result<CleanupResultDto> {
        self.requested_days.lock().unwrap().push(older_than_days);
        Ok(CleanupResultDto {
            total: 1,
            successful: 1,
            size_freed: 300,
            ..Default::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestApp {
        router: Router,
        trash: Arc<MockTrashUseCase>,
        cleanup: Arc<MockStorageCleanup>,
    }

    impl TestApp {
        fn new() -> Self {
            let config = AppConfig::default();
            let auth = Arc::new(AuthService::new(TEST_SECRET.to_string()));
            let trash = Arc::new(MockTrashUseCase::default());
            let cleanup = Arc::new(MockStorageCleanup::default());

            let state = AppState::new(config, auth, ApplicationServices {
                trash_service: trash.clone(),
                storage_cleanup_service: cleanup.clone(),
            });

            Self {
                router: create_api_routes(state),
                trash,
                cleanup,
            }
        }

        fn token(&self, role: UserRole) -> String {
            let id = match role {
                UserRole::Admin => "ADMIN",
                UserRole::User => "U9",
            };
            sign_test_token(TEST_SECRET, id, role, 3600)
        }

        async fn send(&self, method: Method, uri: &str, role: Option<UserRole>, body: Option<&str>) -> (StatusCode, Value) {
            let mut builder = Request::builder().method(method).uri(uri);
            if let Some(role) = role {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", self.token(role)));
            }
            let body = match body {
                Some(json) => {
                    builder = builder.header(header::CONTENT_TYPE, "application/json");
                    Body::from(json.to_string())
                },
                None => Body::empty(),
            };

            let response = self.router.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
            let status = response.status();
            let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            (status, json)
        }
    }

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/admin/trash", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_invalid_token_is_unauthorized() {
        let app = TestApp::new();
        let request = Request::builder()
            .method(Method::DELETE)
            .uri("/documents/D1")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();

        let response = app.router.clone().oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(app.trash.calls().is_empty());
    }

    #[tokio::test]
    async fn test_non_admin_is_forbidden_on_admin_routes() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/admin/trash", Some(UserRole::User), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["code"], "PERMISSION_DENIED");

        let (status, _) = app.send(Method::DELETE, "/users/U1", Some(UserRole::User), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(app.trash.calls().is_empty());
    }

    #[tokio::test]
    async fn test_soft_delete_user_records_caller() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::DELETE, "/users/U1", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(app.trash.calls(), vec!["soft_delete_user:U1:ADMIN".to_string()]);
    }

    #[tokio::test]
    async fn test_soft_delete_already_trashed_user_succeeds() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::DELETE, "/users/already", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "User is already in trash");
    }

    #[tokio::test]
    async fn test_soft_delete_document_allowed_for_users() {
        let app = TestApp::new();

        let (status, _) = app.send(Method::DELETE, "/documents/D1", Some(UserRole::User), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(app.trash.calls(), vec!["soft_delete_document:D1:U9".to_string()]);
    }

    #[tokio::test]
    async fn test_soft_delete_errors() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::DELETE, "/documents/missing-record", Some(UserRole::Admin), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "RECORD_NOT_FOUND");

        let (status, body) = app.send(Method::DELETE, "/users/boom", Some(UserRole::Admin), None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["code"], "DELETE_FAILED");
    }

    #[tokio::test]
    async fn test_list_trash_with_type_filter() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/admin/trash?type=document", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"][0]["type"], "document");
        assert_eq!(body["data"][0]["docId"], "D1");
        assert_eq!(app.trash.calls(), vec!["list:Some(Document)".to_string()]);

        let (status, body) = app.send(Method::GET, "/admin/trash?type=folder", Some(UserRole::Admin), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_TRASH_ITEM_TYPE");
    }

    #[tokio::test]
    async fn test_restore_user_returns_user_id() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::POST, "/admin/trash/users/t-1/restore", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["userId"], "U1");
        assert!(body["data"]["restoredAt"].is_string());
    }

    #[tokio::test]
    async fn test_restore_document_returns_document_id() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::POST, "/admin/trash/documents/t-2/restore", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["documentId"], "D1");
    }

    #[tokio::test]
    async fn test_restore_error_classification() {
        let app = TestApp::new();
        let cases = [
            ("/admin/trash/users/bad-id/restore", StatusCode::BAD_REQUEST, "INVALID_ID"),
            ("/admin/trash/users/missing-entry/restore", StatusCode::NOT_FOUND, "TRASH_ITEM_NOT_FOUND"),
            ("/admin/trash/users/wrong-type/restore", StatusCode::BAD_REQUEST, "INVALID_TRASH_ITEM_TYPE"),
            ("/admin/trash/users/original-gone/restore", StatusCode::NOT_FOUND, "ORIGINAL_USER_NOT_FOUND"),
            ("/admin/trash/documents/original-gone/restore", StatusCode::NOT_FOUND, "ORIGINAL_DOCUMENT_NOT_FOUND"),
            ("/admin/trash/documents/denied/restore", StatusCode::FORBIDDEN, "PERMISSION_DENIED"),
            ("/admin/trash/documents/offline/restore", StatusCode::SERVICE_UNAVAILABLE, "SERVICE_UNAVAILABLE"),
            ("/admin/trash/documents/slow/restore", StatusCode::REQUEST_TIMEOUT, "TIMEOUT"),
            ("/admin/trash/documents/quota/restore", StatusCode::TOO_MANY_REQUESTS, "QUOTA_EXCEEDED"),
            ("/admin/trash/documents/boom/restore", StatusCode::INTERNAL_SERVER_ERROR, "RESTORE_FAILED"),
        ];

        for (uri, expected_status, expected_code) in cases {
            let (status, body) = app.send(Method::POST, uri, Some(UserRole::Admin), None).await;
            assert_eq!(status, expected_status, "status for {}", uri);
            assert_eq!(body["code"], expected_code, "code for {}", uri);
            assert_eq!(body["success"], false);
        }
    }

    #[tokio::test]
    async fn test_permanent_delete_identity_failure_is_bad_gateway() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::DELETE, "/admin/trash/users/identity-down", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "IDENTITY_DELETE_FAILED");
    }

    #[tokio::test]
    async fn test_permanent_delete_document() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::DELETE, "/admin/trash/documents/t-3", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Document permanently deleted");
    }

    #[tokio::test]
    async fn test_list_orphaned_files() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::GET, "/admin/cleanup-storage", Some(UserRole::Admin), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["count"], 1);
        assert_eq!(body["data"]["totalSize"], 300);
        assert_eq!(body["data"]["files"][0]["path"], "c/3.tmp");
    }

    #[tokio::test]
    async fn test_cleanup_uses_default_or_requested_threshold() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::POST, "/admin/cleanup-storage", Some(UserRole::Admin), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["sizeFreed"], 300);
        assert_eq!(body["data"]["failedFiles"], serde_json::json!([]));

        app.send(Method::POST, "/admin/cleanup-storage", Some(UserRole::Admin), Some("{}")).await;
        app.send(Method::POST, "/admin/cleanup-storage", Some(UserRole::Admin), Some(r#"{"olderThanDays":30}"#)).await;

        assert_eq!(*app.cleanup.requested_days.lock().unwrap(), vec![7, 7, 30]);
    }

    #[tokio::test]
    async fn test_cleanup_rejects_malformed_body() {
        let app = TestApp::new();

        let (status, body) = app.send(Method::POST, "/admin/cleanup-storage", Some(UserRole::Admin), Some("{olderThanDays")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "INVALID_INPUT");
        assert!(app.cleanup.requested_days.lock().unwrap().is_empty());
    }
}
