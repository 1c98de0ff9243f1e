use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of recurring tax obligation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationKind {
    /// Monthly PPh 21 payment, due the 20th
    Pph21,
    /// Monthly PPN report, due the 15th
    Ppn,
    /// Annual return, due March 31 of the following year
    AnnualSpt,
}

impl fmt::Display for ObligationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObligationKind::Pph21 => write!(f, "PPh 21"),
            ObligationKind::Ppn => write!(f, "PPN"),
            ObligationKind::AnnualSpt => write!(f, "SPT Tahunan"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentScheduleEntry {
    /// `YYYY-MM` for monthly obligations, `YYYY` for the annual return
    pub period: String,
    pub kind: ObligationKind,
    pub due_date: NaiveDate,
    pub note: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Ledger-wide tax positions, no deadline attached
    Info,
    Medium,
    High,
}

/// An upcoming deadline inside the reminder window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeadlineReminder {
    pub kind: ObligationKind,
    pub description: String,
    pub deadline: NaiveDate,
    pub days_until: i64,
    pub priority: Priority,
}
