pub mod pph21_calculator;
pub mod ppn_calculator;
pub mod tax_service;

pub use pph21_calculator::Pph21Calculator;
pub use ppn_calculator::{PpnCalculator, DEFAULT_PPN_RATE};
pub use tax_service::TaxService;
