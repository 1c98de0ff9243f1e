pub mod controllers;
pub mod models;
pub mod services;

pub use models::BackupInfo;
pub use services::BackupService;
