use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, instrument, warn};

use crate::application::dtos::cleanup_dto::{CleanupResultDto, FailedFileDto, OrphanedFileDto, OrphanedFilesDto};
use crate::application::ports::storage_ports::{ObjectStoragePort, StorageCleanupUseCase};
use crate::common::errors::Result;
use crate::domain::entities::storage_object::StorageObject;
use crate::domain::repositories::document_repository::DocumentRepository;

/// Reconciliación entre el bucket y las rutas registradas en documentos
pub struct StorageCleanupService {
    document_repository: Arc<dyn DocumentRepository>,
    object_storage: Arc<dyn ObjectStoragePort>,
}

impl StorageCleanupService {
    pub fn new(
        document_repository: Arc<dyn DocumentRepository>,
        object_storage: Arc<dyn ObjectStoragePort>,
    ) -> Self {
        Self {
            document_repository,
            object_storage,
        }
    }

    /// Rutas referenciadas por algún documento, incluidos los de la papelera
    async fn referenced_paths(&self) -> Result<HashSet<String>> {
        let documents = self.document_repository.list_documents().await?;

        let paths: HashSet<String> = documents.iter()
            .flat_map(|document| document.referenced_paths())
            .collect();

        debug!("{} documentos referencian {} rutas", documents.len(), paths.len());
        Ok(paths)
    }

    async fn find_orphans(&self) -> Result<Vec<StorageObject>> {
        let referenced = self.referenced_paths().await?;
        let objects = self.object_storage.list_objects().await?;
        let listed = objects.len();

        let orphans: Vec<StorageObject> = objects.into_iter()
            .filter(|object| !referenced.contains(&object.path))
            .collect();

        debug!("{} objetos en el bucket, {} sin referencia", listed, orphans.len());
        Ok(orphans)
    }

    /// Igual que `cleanup_orphaned_files` pero con un reloj explícito
    #[instrument(skip(self))]
    pub async fn cleanup_orphaned_files_as_of(
        &self,
        older_than_days: u32,
        now: DateTime<Utc>,
    ) -> Result<CleanupResultDto> {
        // Un umbral fuera del rango de fechas no deja ningún archivo tan antiguo
        let Some(cutoff) = Duration::try_days(i64::from(older_than_days))
            .and_then(|age| now.checked_sub_signed(age))
        else {
            info!("Umbral de {} días fuera de rango: ningún archivo huérfano es tan antiguo", older_than_days);
            return Ok(CleanupResultDto::default());
        };
        info!("Limpiando archivos huérfanos modificados antes de {}", cutoff);

        let candidates: Vec<StorageObject> = self.find_orphans().await?
            .into_iter()
            .filter(|object| object.last_modified < cutoff)
            .collect();

        let mut result = CleanupResultDto {
            total: candidates.len(),
            ..Default::default()
        };

        // Secuencial: un fallo no detiene el resto
        for object in candidates {
            match self.object_storage.delete_object(&object.path).await {
                Ok(()) => {
                    debug!("Archivo huérfano eliminado: {} ({} bytes)", object.path, object.size);
                    result.successful += 1;
                    result.size_freed += object.size;
                },
                Err(e) => {
                    warn!("No se pudo eliminar el archivo huérfano {}: {}", object.path, e);
                    result.failed += 1;
                    result.failed_files.push(FailedFileDto {
                        path: object.path,
                        error: e.to_string(),
                    });
                }
            }
        }

        info!("Limpieza completada: {} de {} eliminados, {} fallidos, {} bytes liberados",
              result.successful, result.total, result.failed, result.size_freed);
        Ok(result)
    }
}

#[async_trait]
impl StorageCleanupUseCase for StorageCleanupService {
    #[instrument(skip(self))]
    async fn list_orphaned_files(&self) -> Result<OrphanedFilesDto> {
        let orphans = self.find_orphans().await?;
        Ok(OrphanedFilesDto::new(orphans.into_iter().map(OrphanedFileDto::from).collect()))
    }

    async fn cleanup_orphaned_files(&self, older_than_days: u32) -> Result<CleanupResultDto> {
        self.cleanup_orphaned_files_as_of(older_than_days, Utc::now()).await
    }
}
