pub mod spt_aggregator;
pub mod spt_service;

pub use spt_aggregator::{SptAggregator, DEFAULT_CORPORATE_TAX_RATE};
pub use spt_service::SptService;
