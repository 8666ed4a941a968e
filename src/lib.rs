// Exportar los módulos principales del proyecto
pub mod common;
pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod interfaces;

// Re-exportaciones públicas comunes
pub use application::services::{StorageCleanupService, TrashService};
pub use common::config::AppConfig;
pub use common::di::{AppServiceFactory, AppState};
pub use interfaces::api::create_api_routes;
