pub mod controllers;
pub mod models;
pub mod services;

pub use models::SptReport;
pub use services::{SptAggregator, SptService};
