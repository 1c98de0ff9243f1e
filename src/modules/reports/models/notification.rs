use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::traits::LedgerCounts;
use crate::modules::reports::models::{DeadlineReminder, Priority};
use crate::modules::taxes::models::RateTableVersion;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryKind {
    /// PPh 21 owed across all employees for the year
    Pph21Withheld,
    /// Output VAT exceeds input VAT
    PpnPayable,
    /// Input VAT exceeds output VAT; the excess carries forward
    PpnOverpaid,
}

/// A year-to-date tax position shown alongside the deadline reminders
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSummaryNotice {
    pub kind: SummaryKind,
    pub year: i32,
    pub description: String,
    /// Never negative; `kind` says which way a PPN balance runs
    pub amount: Decimal,
    pub priority: Priority,
}

/// Reminder feed: upcoming deadlines, then the tax summaries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notifications {
    pub deadlines: Vec<DeadlineReminder>,
    pub summaries: Vec<TaxSummaryNotice>,
}

/// Ledger size and the settings the engines currently run with
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSummary {
    pub counts: LedgerCounts,
    pub company_name: String,
    pub ppn_rate: Decimal,
    pub corporate_tax_rate: Decimal,
    pub rate_table_version: RateTableVersion,
    pub reminder_days: u32,
}
