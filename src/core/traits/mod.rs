pub mod ledger;
pub mod repository;

pub use ledger::{Ledger, LedgerCounts};
pub use repository::Repository;
