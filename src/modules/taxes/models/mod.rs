pub mod filing_status;
pub mod pph21;
pub mod ppn;
pub mod rate_table;
pub mod tax_record;

pub use filing_status::{CalculationMethod, FilingStatus, TaxProfile};
pub use pph21::{BracketSlice, MethodDetail, Pph21Request, Pph21Result};
pub use ppn::{CreditEligibility, PpnAmountRequest, PpnBreakdown, PpnSummary};
pub use rate_table::{
    ProgressiveBracket, PtkpSchedule, RateTable, RateTableVersion, TerBand, TerCategory,
    TerTable, MAX_DEPENDENTS,
};
pub use tax_record::{TaxKind, TaxRecord, TaxRecordRequest};
