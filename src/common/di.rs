use std::sync::Arc;
use object_store::ObjectStore;
use sqlx::PgPool;

use crate::application::ports::identity_ports::IdentityProviderPort;
use crate::application::ports::storage_ports::{ObjectStoragePort, StorageCleanupUseCase};
use crate::application::ports::trash_ports::TrashUseCase;
use crate::application::services::{StorageCleanupService, TrashService};
use crate::common::config::AppConfig;
use crate::common::errors::DomainError;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::repositories::trash_repository::TrashRepository;
use crate::domain::repositories::user_repository::UserRepository;
use crate::domain::services::auth_service::AuthService;
use crate::infrastructure::repositories::{DocumentPgRepository, ObjectStoreRepository, TrashPgRepository, UserPgRepository};
use crate::infrastructure::services::IdentityToolkitClient;

/// Fábrica para los diferentes componentes de la aplicación
pub struct AppServiceFactory {
    config: AppConfig,
}

impl AppServiceFactory {
    pub fn with_config(config: AppConfig) -> Self {
        Self { config }
    }

    /// Repositorios PostgreSQL y el adaptador del bucket
    pub fn create_repository_services(
        &self,
        db_pool: Arc<PgPool>,
        object_store: Arc<dyn ObjectStore>,
    ) -> RepositoryServices {
        RepositoryServices {
            user_repository: Arc::new(UserPgRepository::new(db_pool.clone())),
            document_repository: Arc::new(DocumentPgRepository::new(db_pool.clone())),
            trash_repository: Arc::new(TrashPgRepository::new(db_pool)),
            object_storage: Arc::new(ObjectStoreRepository::new(object_store)),
        }
    }

    pub fn create_identity_provider(&self) -> Result<Arc<dyn IdentityProviderPort>, DomainError> {
        let client = IdentityToolkitClient::new(&self.config.identity)?;
        Ok(Arc::new(client))
    }

    pub fn create_application_services(
        &self,
        repos: &RepositoryServices,
        identity_provider: Arc<dyn IdentityProviderPort>,
    ) -> ApplicationServices {
        let trash_service = Arc::new(TrashService::new(
            repos.trash_repository.clone(),
            repos.user_repository.clone(),
            repos.document_repository.clone(),
            identity_provider,
        ));

        let storage_cleanup_service = Arc::new(StorageCleanupService::new(
            repos.document_repository.clone(),
            repos.object_storage.clone(),
        ));

        ApplicationServices {
            trash_service,
            storage_cleanup_service,
        }
    }

    pub fn create_auth_service(&self) -> Arc<AuthService> {
        Arc::new(AuthService::new(self.config.auth.jwt_secret.clone()))
    }
}

/// Contenedor para servicios de repositorio
pub struct RepositoryServices {
    pub user_repository: Arc<dyn UserRepository>,
    pub document_repository: Arc<dyn DocumentRepository>,
    pub trash_repository: Arc<dyn TrashRepository>,
    pub object_storage: Arc<dyn ObjectStoragePort>,
}

/// Contenedor para servicios de aplicación
#[derive(Clone)]
pub struct ApplicationServices {
    pub trash_service: Arc<dyn TrashUseCase>,
    pub storage_cleanup_service: Arc<dyn StorageCleanupUseCase>,
}

/// Estado global de la aplicación para dependency injection
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub auth_service: Arc<AuthService>,
    pub applications: ApplicationServices,
}

impl AppState {
    pub fn new(config: AppConfig, auth_service: Arc<AuthService>, applications: ApplicationServices) -> Self {
        Self {
            config,
            auth_service,
            applications,
        }
    }
}
