pub mod document_repository;
pub mod trash_repository;
pub mod user_repository;
