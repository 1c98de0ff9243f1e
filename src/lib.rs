//! Pajak: tax bookkeeping for small Indonesian businesses
//!
//! Employee PPh 21 withholding, PPN on sales and purchases, annual SPT
//! summaries and filing deadlines, served as a JSON API over a SQLite ledger.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

pub use modules::employees;
pub use modules::reports;
pub use modules::taxes;
pub use modules::transactions;
pub use modules::AppState;
