pub mod backup_service;

pub use backup_service::{validate_backup_name, BackupService};
