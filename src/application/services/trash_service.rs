use std::sync::Arc;
use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;
use tracing::{debug, info, instrument, warn};

use crate::application::dtos::trash_dto::{RestoreResultDto, SoftDeleteOutcome, TrashEntryDto};
use crate::application::ports::identity_ports::IdentityProviderPort;
use crate::application::ports::trash_ports::{TrashError, TrashUseCase};
use crate::common::errors::{DomainError, ErrorKind};
use crate::domain::entities::trash_entry::{TrashEntry, TrashItemType};
use crate::domain::entities::user::User;
use crate::domain::repositories::document_repository::DocumentRepository;
use crate::domain::repositories::trash_repository::TrashRepository;
use crate::domain::repositories::user_repository::{UserRepository, UserRepositoryError};

/// Servicio de aplicación para el ciclo de vida de la papelera.
///
/// La entrada de papelera y la marca del registro original se escriben en
/// una sola operación del repositorio. La sincronización con el proveedor de
/// identidad al mover o restaurar usuarios es best-effort: un fallo se
/// registra y no cambia el resultado.
pub struct TrashService {
    trash_repository: Arc<dyn TrashRepository>,
    user_repository: Arc<dyn UserRepository>,
    document_repository: Arc<dyn DocumentRepository>,
    identity_provider: Arc<dyn IdentityProviderPort>,
}

impl TrashService {
    pub fn new(
        trash_repository: Arc<dyn TrashRepository>,
        user_repository: Arc<dyn UserRepository>,
        document_repository: Arc<dyn DocumentRepository>,
        identity_provider: Arc<dyn IdentityProviderPort>,
    ) -> Self {
        Self {
            trash_repository,
            user_repository,
            document_repository,
            identity_provider,
        }
    }

    async fn find_user(&self, user_id: &str) -> Result<Option<User>, TrashError> {
        match self.user_repository.get_user_by_id(user_id).await {
            Ok(user) => Ok(Some(user)),
            Err(UserRepositoryError::NotFound(_)) => Ok(None),
            Err(e) => Err(DomainError::from(e).into()),
        }
    }

    /// Obtiene la entrada y comprueba que sea del tipo que espera el endpoint
    async fn load_entry(&self, trash_id: &str, expected: TrashItemType) -> Result<TrashEntry, TrashError> {
        let trash_uuid = Uuid::parse_str(trash_id)
            .map_err(|e| TrashError::InvalidId(format!("Invalid trash ID {}: {}", trash_id, e)))?;

        let entry = self.trash_repository.get_trash_item(&trash_uuid).await?
            .ok_or_else(|| TrashError::TrashItemNotFound(trash_id.to_string()))?;

        if entry.item_type != expected || entry.doc_id.trim().is_empty() {
            warn!("Entrada de papelera {} no es de tipo {} (tipo={}, doc_id='{}')",
                  trash_id, expected, entry.item_type, entry.doc_id);
            return Err(TrashError::InvalidTrashItemType {
                id: trash_id.to_string(),
                expected,
            });
        }

        Ok(entry)
    }

    /// Cambia el estado de la cuenta externa sin propagar errores
    async fn sync_identity_disabled(&self, user: &User, disabled: bool) {
        let Some(uid) = user.firebase_uid() else {
            return;
        };

        match self.identity_provider.set_user_disabled(uid, disabled).await {
            Ok(()) => debug!("Cuenta de identidad {} actualizada: disabled={}", uid, disabled),
            Err(e) => warn!(
                "No se pudo actualizar la cuenta de identidad {} del usuario {} (disabled={}): {}",
                uid, user.id(), disabled, e
            ),
        }
    }

    /// Borra la cuenta externa: primero por uid y, si no hay uid o falla,
    /// buscándola por email. "No encontrado" cuenta como éxito. Devuelve el
    /// mensaje del fallo que quede sin resolver.
    async fn delete_identity(&self, uid: Option<&str>, email: Option<&str>) -> Option<String> {
        let mut failure = None;

        if let Some(uid) = uid {
            match self.identity_provider.delete_user(uid).await {
                Ok(()) => {
                    debug!("Cuenta de identidad {} eliminada", uid);
                    return None;
                },
                Err(e) if e.is_not_found() => {
                    debug!("La cuenta de identidad {} ya no existe", uid);
                    return None;
                },
                Err(e) => {
                    warn!("Error eliminando la cuenta de identidad {}: {}; probando por email", uid, e);
                    failure = Some(e.to_string());
                }
            }
        }

        let Some(email) = email else {
            return failure;
        };

        match self.identity_provider.get_user_by_email(email).await {
            Ok(record) => match self.identity_provider.delete_user(&record.uid).await {
                Ok(()) => {
                    debug!("Cuenta de identidad {} eliminada tras buscar por email", record.uid);
                    None
                },
                Err(e) if e.is_not_found() => None,
                Err(e) => Some(e.to_string()),
            },
            Err(e) if e.is_not_found() => failure,
            Err(e) => Some(e.to_string()),
        }
    }
}

/// Un `NotFound` del repositorio al restaurar significa que el registro
/// original desapareció entre la comprobación y la escritura
fn original_missing(err: DomainError, entry: &TrashEntry) -> TrashError {
    if err.kind == ErrorKind::NotFound {
        TrashError::OriginalNotFound {
            item_type: entry.item_type,
            id: entry.doc_id.clone(),
        }
    } else {
        TrashError::Domain(err)
    }
}

#[async_trait]
impl TrashUseCase for TrashService {
    #[instrument(skip(self))]
    async fn get_trash_items(&self, item_type: Option<TrashItemType>) -> Result<Vec<TrashEntryDto>, TrashError> {
        let items = self.trash_repository.get_trash_items(item_type).await?;
        debug!("Encontrados {} elementos en la papelera", items.len());

        Ok(items.into_iter().map(TrashEntryDto::from).collect())
    }

    #[instrument(skip(self))]
    async fn soft_delete_user(&self, user_id: &str, deleted_by: &str) -> Result<SoftDeleteOutcome, TrashError> {
        info!("Moviendo usuario {} a la papelera", user_id);

        if user_id.trim().is_empty() {
            return Err(TrashError::InvalidId("User ID is empty".to_string()));
        }

        let user = self.find_user(user_id).await?
            .ok_or_else(|| TrashError::RecordNotFound { entity: "User", id: user_id.to_string() })?;

        if user.in_trash() {
            debug!("El usuario {} ya estaba en la papelera", user_id);
            return Ok(SoftDeleteOutcome::AlreadyInTrash);
        }

        let entry = TrashEntry::for_user(&user, deleted_by, Utc::now());
        match self.trash_repository.add_to_trash(&entry).await {
            Ok(()) => {},
            // Otra petición concurrente creó la entrada antes (índice único)
            Err(e) if e.kind == ErrorKind::AlreadyExists => {
                debug!("El usuario {} ya fue movido a la papelera por otra petición", user_id);
                return Ok(SoftDeleteOutcome::AlreadyInTrash);
            },
            Err(e) if e.kind == ErrorKind::NotFound => {
                return Err(TrashError::RecordNotFound { entity: "User", id: user_id.to_string() });
            },
            Err(e) => return Err(TrashError::Domain(e)),
        }

        self.sync_identity_disabled(&user, true).await;

        debug!("Usuario {} movido a papelera con entrada {}", user_id, entry.id);
        Ok(SoftDeleteOutcome::MovedToTrash)
    }

    #[instrument(skip(self))]
    async fn soft_delete_document(&self, document_id: &str, deleted_by: &str) -> Result<SoftDeleteOutcome, TrashError> {
        info!("Moviendo documento {} a la papelera", document_id);

        if document_id.trim().is_empty() {
            return Err(TrashError::InvalidId("Document ID is empty".to_string()));
        }

        let document = self.document_repository.get_document_by_id(document_id).await?
            .ok_or_else(|| TrashError::RecordNotFound { entity: "Document", id: document_id.to_string() })?;

        if document.in_trash() {
            debug!("El documento {} ya estaba en la papelera", document_id);
            return Ok(SoftDeleteOutcome::AlreadyInTrash);
        }

        let entry = TrashEntry::for_document(&document, deleted_by, Utc::now());
        match self.trash_repository.add_to_trash(&entry).await {
            Ok(()) => {},
            // Otra petición concurrente creó la entrada antes (índice único)
            Err(e) if e.kind == ErrorKind::AlreadyExists => {
                debug!("El documento {} ya fue movido a la papelera por otra petición", document_id);
                return Ok(SoftDeleteOutcome::AlreadyInTrash);
            },
            Err(e) if e.kind == ErrorKind::NotFound => {
                return Err(TrashError::RecordNotFound { entity: "Document", id: document_id.to_string() });
            },
            Err(e) => return Err(TrashError::Domain(e)),
        }

        debug!("Documento {} movido a papelera con entrada {}", document_id, entry.id);
        Ok(SoftDeleteOutcome::MovedToTrash)
    }

    #[instrument(skip(self))]
    async fn restore_user(&self, trash_id: &str) -> Result<RestoreResultDto, TrashError> {
        info!("Restaurando usuario desde la entrada {}", trash_id);

        let entry = self.load_entry(trash_id, TrashItemType::User).await?;

        // La entrada se conserva si el original ya no existe
        let user = self.find_user(&entry.doc_id).await?
            .ok_or_else(|| TrashError::OriginalNotFound {
                item_type: TrashItemType::User,
                id: entry.doc_id.clone(),
            })?;

        let restored_at = Utc::now();
        self.trash_repository.restore_from_trash(&entry, restored_at).await
            .map_err(|e| original_missing(e, &entry))?;

        self.sync_identity_disabled(&user, false).await;

        debug!("Usuario {} restaurado", entry.doc_id);
        Ok(RestoreResultDto {
            id: entry.doc_id,
            restored_at,
        })
    }

    #[instrument(skip(self))]
    async fn restore_document(&self, trash_id: &str) -> Result<RestoreResultDto, TrashError> {
        info!("Restaurando documento desde la entrada {}", trash_id);

        let entry = self.load_entry(trash_id, TrashItemType::Document).await?;

        if self.document_repository.get_document_by_id(&entry.doc_id).await?.is_none() {
            return Err(TrashError::OriginalNotFound {
                item_type: TrashItemType::Document,
                id: entry.doc_id.clone(),
            });
        }

        let restored_at = Utc::now();
        self.trash_repository.restore_from_trash(&entry, restored_at).await
            .map_err(|e| original_missing(e, &entry))?;

        debug!("Documento {} restaurado", entry.doc_id);
        Ok(RestoreResultDto {
            id: entry.doc_id,
            restored_at,
        })
    }

    #[instrument(skip(self))]
    async fn delete_user_permanently(&self, trash_id: &str) -> Result<(), TrashError> {
        info!("Eliminando permanentemente usuario de la entrada {}", trash_id);

        let entry = self.load_entry(trash_id, TrashItemType::User).await?;
        let user = self.find_user(&entry.doc_id).await?;

        let uid = user.as_ref().and_then(|u| u.firebase_uid()).map(str::to_string);
        let email = user.as_ref()
            .map(|u| u.email().to_string())
            .or_else(|| entry.data.email.clone())
            .filter(|email| !email.is_empty());

        let identity_failure = self.delete_identity(uid.as_deref(), email.as_deref()).await;

        // Las filas se eliminan siempre para no dejar entradas huérfanas
        self.trash_repository.delete_permanently(&entry).await?;

        if let Some(message) = identity_failure {
            warn!("Usuario {} eliminado de la base de datos, pero no del proveedor de identidad: {}",
                  entry.doc_id, message);
            return Err(TrashError::IdentityDeleteFailed {
                user_id: entry.doc_id,
                message,
            });
        }

        debug!("Usuario {} eliminado permanentemente", entry.doc_id);
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete_document_permanently(&self, trash_id: &str) -> Result<(), TrashError> {
        info!("Eliminando permanentemente documento de la entrada {}", trash_id);

        let entry = self.load_entry(trash_id, TrashItemType::Document).await?;

        // Los archivos del bucket quedan huérfanos y los recoge la limpieza
        self.trash_repository.delete_permanently(&entry).await?;

        debug!("Documento {} eliminado permanentemente", entry.doc_id);
        Ok(())
    }
}
