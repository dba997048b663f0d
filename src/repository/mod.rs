pub mod database;
pub mod file_store;
