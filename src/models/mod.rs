pub mod backup_file;
pub mod config;
pub mod error;
pub mod generation;
pub mod run_mode;
