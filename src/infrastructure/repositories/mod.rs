pub mod object_store_repository;

// Repositorios PostgreSQL
pub mod pg;

// Re-exportar para facilitar acceso
pub use object_store_repository::ObjectStoreRepository;
pub use pg::{DocumentPgRepository, TrashPgRepository, UserPgRepository};
