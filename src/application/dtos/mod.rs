pub mod cleanup_dto;
pub mod trash_dto;
