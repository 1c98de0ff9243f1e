pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{AppSettings, UpdateSettingsRequest};
pub use services::SettingsService;
