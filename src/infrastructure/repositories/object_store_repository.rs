use std::sync::Arc;

use async_trait::async_trait;
use futures::TryStreamExt;
use object_store::{path::Path as ObjectPath, ObjectMeta, ObjectStore};
use tracing::debug;

use crate::application::ports::storage_ports::ObjectStoragePort;
use crate::common::errors::{DomainError, ErrorKind, Result};
use crate::domain::entities::storage_object::StorageObject;

/// Adaptador del bucket de documentos sobre `object_store`
pub struct ObjectStoreRepository {
    store: Arc<dyn ObjectStore>,
}

impl ObjectStoreRepository {
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    fn map_error(err: object_store::Error, path: &str) -> DomainError {
        let kind = match &err {
            object_store::Error::NotFound { .. } => ErrorKind::NotFound,
            object_store::Error::PermissionDenied { .. }
            | object_store::Error::Unauthenticated { .. } => ErrorKind::AccessDenied,
            _ => ErrorKind::InternalError,
        };
        DomainError::new(kind, "Storage", err.to_string())
            .with_id(path)
            .with_source(err)
    }
}

impl From<ObjectMeta> for StorageObject {
    fn from(meta: ObjectMeta) -> Self {
        Self {
            path: meta.location.to_string(),
            size: meta.size,
            last_modified: meta.last_modified,
        }
    }
}

#[async_trait]
impl ObjectStoragePort for ObjectStoreRepository {
    async fn list_objects(&self) -> Result<Vec<StorageObject>> {
        let objects: Vec<ObjectMeta> = self.store
            .list(None)
            .try_collect()
            .await
            .map_err(|e| Self::map_error(e, "/"))?;

        debug!("Listados {} objetos del bucket", objects.len());
        Ok(objects.into_iter().map(StorageObject::from).collect())
    }

    async fn delete_object(&self, path: &str) -> Result<()> {
        match self.store.delete(&ObjectPath::from(path)).await {
            Ok(()) => Ok(()),
            // Ya no existe: nada que borrar
            Err(object_store::Error::NotFound { .. }) => Ok(()),
            Err(e) => Err(Self::map_error(e, path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use object_store::{local::LocalFileSystem, memory::InMemory, PutPayload};

    async fn put(store: &Arc<dyn ObjectStore>, path: &str, content: &'static [u8]) {
        store.put(&ObjectPath::from(path), PutPayload::from_static(content)).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_objects_reports_paths_and_sizes() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        put(&store, "a/1.png", b"png-bytes").await;
        put(&store, "c/3.tmp", b"tmp").await;

        let repo = ObjectStoreRepository::new(store);
        let mut objects = repo.list_objects().await.unwrap();
        objects.sort_by(|a, b| a.path.cmp(&b.path));

        assert_eq!(objects.len(), 2);
        assert_eq!(objects[0].path, "a/1.png");
        assert_eq!(objects[0].size, 9);
        assert_eq!(objects[1].path, "c/3.tmp");
        assert_eq!(objects[1].size, 3);
    }

    #[tokio::test]
    async fn test_delete_object_removes_it() {
        let store: Arc<dyn ObjectStore> = Arc::new(InMemory::new());
        put(&store, "c/3.tmp", b"tmp").await;

        let repo = ObjectStoreRepository::new(store.clone());
        repo.delete_object("c/3.tmp").await.unwrap();

        assert!(repo.list_objects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_object_on_local_filesystem_succeeds() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let store: Arc<dyn ObjectStore> = Arc::new(LocalFileSystem::new_with_prefix(temp_dir.path()).unwrap());
        put(&store, "docs/keep.pdf", b"pdf").await;

        let repo = ObjectStoreRepository::new(store);
        repo.delete_object("docs/missing.pdf").await.unwrap();

        let objects = repo.list_objects().await.unwrap();
        assert_eq!(objects.len(), 1);
        assert_eq!(objects[0].path, "docs/keep.pdf");
    }
}
