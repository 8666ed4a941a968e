pub mod document;
pub mod storage_object;
pub mod trash_entry;
pub mod user;
