pub mod storage_cleanup_service;
pub mod trash_service;

#[cfg(test)]
mod storage_cleanup_service_test;

// Re-exportar para facilitar acceso
pub use storage_cleanup_service::StorageCleanupService;
pub use trash_service::TrashService;
