use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::money::validate_amount;
use crate::core::period::parse_date;
use crate::core::{AppError, Result};

/// Direction of a business transaction for VAT purposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Output VAT is collected
    #[serde(alias = "penjualan")]
    Sale,
    /// Input VAT is paid
    #[serde(alias = "belanja", alias = "pembelian")]
    Purchase,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionKind::Sale => write!(f, "sale"),
            TransactionKind::Purchase => write!(f, "purchase"),
        }
    }
}

impl std::str::FromStr for TransactionKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sale" | "penjualan" => Ok(TransactionKind::Sale),
            "purchase" | "belanja" | "pembelian" => Ok(TransactionKind::Purchase),
            _ => Err(AppError::validation(format!(
                "Invalid transaction kind: {}",
                s
            ))),
        }
    }
}

/// A recorded sale or purchase.
///
/// `amount` is always the pre-VAT base; `ppn_amount` is fixed at the rate
/// in effect when the transaction was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    pub ppn_amount: Decimal,
    /// `YYYY-MM-DD`
    pub transaction_date: String,
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Transaction {
    pub fn validate(&self) -> Result<()> {
        if self.description.trim().is_empty() {
            return Err(AppError::validation(
                "Transaction description cannot be empty",
            ));
        }
        validate_amount("amount", self.amount)?;
        validate_amount("ppn_amount", self.ppn_amount)?;
        parse_date(&self.transaction_date)?;
        Ok(())
    }

    /// Whether a tax invoice (faktur pajak) number is on file
    pub fn has_invoice_number(&self) -> bool {
        self.invoice_number
            .as_deref()
            .is_some_and(|n| !n.trim().is_empty())
    }
}

/// Request body for recording a transaction.
///
/// VAT is never supplied by the caller; it is derived from `amount` at the
/// configured rate. With `amount_includes_vat` the amount is treated as a
/// VAT-inclusive total and split back into base and VAT.
#[derive(Debug, Clone, Deserialize)]
pub struct TransactionRequest {
    pub kind: TransactionKind,
    pub description: String,
    pub amount: Decimal,
    #[serde(default)]
    pub amount_includes_vat: bool,
    /// Defaults to today
    #[serde(default)]
    pub transaction_date: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
}

impl TransactionRequest {
    /// Resolve the transaction date, falling back to today
    pub fn date_or_today(&self) -> Result<String> {
        match self.transaction_date.as_deref().map(str::trim) {
            Some(date) if !date.is_empty() => {
                let parsed = parse_date(date)?;
                Ok(parsed.format(crate::core::period::DATE_FORMAT).to_string())
            }
            _ => Ok(Utc::now()
                .date_naive()
                .format(crate::core::period::DATE_FORMAT)
                .to_string()),
        }
    }

    /// Invoice number with surrounding whitespace removed; blank is absent
    pub fn normalized_invoice_number(&self) -> Option<String> {
        self.invoice_number
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
    }
}
