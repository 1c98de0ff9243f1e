pub mod backup_controller;

pub use backup_controller::configure;
