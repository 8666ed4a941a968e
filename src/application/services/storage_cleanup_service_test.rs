use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use chrono::{DateTime, Duration, TimeZone, Utc};
use async_trait::async_trait;

use crate::application::ports::storage_ports::{ObjectStoragePort, StorageCleanupUseCase};
use crate::application::services::storage_cleanup_service::StorageCleanupService;
use crate::common::errors::{DomainError, ErrorKind, Result};
use crate::domain::entities::document::Document;
use crate::domain::entities::storage_object::StorageObject;
use crate::domain::repositories::document_repository::DocumentRepository;

struct MockDocumentRepository {
    documents: Vec<Document>,
}

impl MockDocumentRepository {
    fn with_paths(paths: &[(Option<&str>, Option<&str>, bool)]) -> Self {
        let now = Utc::now();
        let documents = paths.iter().enumerate()
            .map(|(i, (storage, thumbnail, in_trash))| Document::from_data(
                format!("D{}", i),
                format!("doc-{}", i),
                None,
                storage.map(str::to_string),
                thumbnail.map(str::to_string),
                None,
                1,
                !in_trash,
                *in_trash,
                now,
                now,
                None,
                None,
            ))
            .collect();
        Self { documents }
    }
}

#[async_trait]
impl DocumentRepository for MockDocumentRepository {
    async fn get_document_by_id(&self, id: &str) -> Result<Option<Document>> {
        Ok(self.documents.iter().find(|d| d.id() == id).cloned())
    }

    async fn list_documents(&self) -> Result<Vec<Document>> {
        Ok(self.documents.clone())
    }
}

struct MockObjectStorage {
    objects: Mutex<Vec<StorageObject>>,
    failing: HashSet<String>,
    deleted: Mutex<Vec<String>>,
}

impl MockObjectStorage {
    fn new(objects: Vec<StorageObject>) -> Self {
        Self {
            objects: Mutex::new(objects),
            failing: HashSet::new(),
            deleted: Mutex::new(Vec::new()),
        }
    }

    fn failing_on(mut self, path: &str) -> Self {
        self.failing.insert(path.to_string());
        self
    }

    fn deleted(&self) -> Vec<String> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl ObjectStoragePort for MockObjectStorage {
    async fn list_objects(&self) -> Result<Vec<StorageObject>> {
        Ok(self.objects.lock().unwrap().clone())
    }

    async fn delete_object(&self, path: &str) -> Result<()> {
        if self.failing.contains(path) {
            return Err(DomainError::new(ErrorKind::AccessDenied, "Storage", "403 Forbidden"));
        }
        self.objects.lock().unwrap().retain(|o| o.path != path);
        self.deleted.lock().unwrap().push(path.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 20, 12, 0, 0).unwrap()
    }

    fn object(path: &str, size: u64, age: Duration) -> StorageObject {
        StorageObject {
            path: path.to_string(),
            size,
            last_modified: now() - age,
        }
    }

    fn service(docs: MockDocumentRepository, storage: Arc<MockObjectStorage>) -> StorageCleanupService {
        StorageCleanupService::new(Arc::new(docs), storage)
    }

    #[tokio::test]
    async fn test_list_orphaned_files_ignores_referenced_paths() {
        let docs = MockDocumentRepository::with_paths(&[
            (Some("/a/1.png"), None, false),
            (Some("b/2.pdf"), Some("/thumbs/2.png"), true),
        ]);
        let storage = Arc::new(MockObjectStorage::new(vec![
            object("a/1.png", 10, Duration::days(30)),
            object("b/2.pdf", 20, Duration::days(30)),
            object("thumbs/2.png", 5, Duration::days(30)),
            object("c/3.tmp", 300, Duration::days(10)),
            object("d/4.tmp", 700, Duration::hours(1)),
        ]));

        let result = service(docs, storage).list_orphaned_files().await.unwrap();

        let paths: HashSet<String> = result.files.iter().map(|f| f.path.clone()).collect();
        assert_eq!(paths, HashSet::from(["c/3.tmp".to_string(), "d/4.tmp".to_string()]));
        assert_eq!(result.count, 2);
        assert_eq!(result.total_size, 1000);
    }

    #[tokio::test]
    async fn test_cleanup_deletes_only_old_orphans() {
        let docs = MockDocumentRepository::with_paths(&[
            (Some("a/1.png"), None, false),
            (Some("b/2.pdf"), None, false),
        ]);
        let storage = Arc::new(MockObjectStorage::new(vec![
            object("a/1.png", 10, Duration::days(30)),
            object("b/2.pdf", 20, Duration::days(30)),
            object("c/3.tmp", 300, Duration::days(10)),
            object("d/4.tmp", 700, Duration::days(2)),
        ]));

        let result = service(docs, storage.clone())
            .cleanup_orphaned_files_as_of(7, now())
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.successful, 1);
        assert_eq!(result.failed, 0);
        assert_eq!(result.size_freed, 300);
        assert_eq!(storage.deleted(), vec!["c/3.tmp".to_string()]);
    }

    #[tokio::test]
    async fn test_cleanup_cutoff_is_strict() {
        let docs = MockDocumentRepository::with_paths(&[]);
        let storage = Arc::new(MockObjectStorage::new(vec![
            object("exact.tmp", 1, Duration::days(7)),
            object("older.tmp", 2, Duration::days(7) + Duration::seconds(1)),
        ]));

        let result = service(docs, storage.clone())
            .cleanup_orphaned_files_as_of(7, now())
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(storage.deleted(), vec!["older.tmp".to_string()]);
    }

    #[tokio::test]
    async fn test_cleanup_with_zero_days_keeps_files_modified_now() {
        let docs = MockDocumentRepository::with_paths(&[]);
        let storage = Arc::new(MockObjectStorage::new(vec![
            object("fresh.tmp", 4, Duration::zero()),
            object("second-old.tmp", 8, Duration::seconds(1)),
        ]));

        let result = service(docs, storage.clone())
            .cleanup_orphaned_files_as_of(0, now())
            .await
            .unwrap();

        assert_eq!(result.total, 1);
        assert_eq!(result.size_freed, 8);
        assert_eq!(storage.deleted(), vec!["second-old.tmp".to_string()]);
    }

    #[tokio::test]
    async fn test_cleanup_with_out_of_range_age_deletes_nothing() {
        let docs = MockDocumentRepository::with_paths(&[]);
        let storage = Arc::new(MockObjectStorage::new(vec![
            object("ancient.tmp", 16, Duration::days(36_500)),
        ]));

        let result = service(docs, storage.clone())
            .cleanup_orphaned_files_as_of(u32::MAX, now())
            .await
            .unwrap();

        assert_eq!(result.total, 0);
        assert_eq!(result.successful, 0);
        assert_eq!(result.size_freed, 0);
        assert!(storage.deleted().is_empty());
        assert_eq!(storage.list_objects().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cleanup_isolates_per_file_failures() {
        let docs = MockDocumentRepository::with_paths(&[]);
        let storage = Arc::new(
            MockObjectStorage::new(vec![
                object("x.tmp", 100, Duration::days(10)),
                object("locked.tmp", 50, Duration::days(10)),
                object("y.tmp", 25, Duration::days(10)),
            ])
            .failing_on("locked.tmp"),
        );

        let result = service(docs, storage.clone())
            .cleanup_orphaned_files_as_of(7, now())
            .await
            .unwrap();

        assert_eq!(result.total, 3);
        assert_eq!(result.successful, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.size_freed, 125, "Only successful deletions count");
        assert_eq!(result.failed_files.len(), 1);
        assert_eq!(result.failed_files[0].path, "locked.tmp");
        assert!(result.failed_files[0].error.contains("403 Forbidden"));
    }

    #[tokio::test]
    async fn test_cleanup_with_no_orphans_is_empty() {
        let docs = MockDocumentRepository::with_paths(&[(Some("a/1.png"), None, false)]);
        let storage = Arc::new(MockObjectStorage::new(vec![object("a/1.png", 10, Duration::days(90))]));

        let result = service(docs, storage.clone())
            .cleanup_orphaned_files_as_of(0, now())
            .await
            .unwrap();

        assert_eq!(result.total, 0);
        assert_eq!(result.size_freed, 0);
        assert!(storage.deleted().is_empty());
    }
}
