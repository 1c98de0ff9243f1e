pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Pph21Result, PpnSummary, RateTable, TaxRecord};
pub use repositories::TaxRecordRepository;
pub use services::{Pph21Calculator, PpnCalculator, TaxService};
