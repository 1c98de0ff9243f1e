pub mod error;
pub mod money;
pub mod period;
pub mod traits;

pub use error::{AppError, Result};
pub use period::TaxPeriod;
