//! Tax records are audit snapshots of accepted computations.
//!
//! A record is written once when a user accepts a computation and is never
//! recomputed afterwards; later rate or salary changes leave it untouched.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::pph21::Pph21Result;
use crate::core::money::validate_amount;
use crate::core::{AppError, Result, TaxPeriod};

/// Which tax a record refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaxKind {
    Pph21,
    Ppn,
}

impl fmt::Display for TaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxKind::Pph21 => write!(f, "pph21"),
            TaxKind::Ppn => write!(f, "ppn"),
        }
    }
}

impl std::str::FromStr for TaxKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pph21" => Ok(TaxKind::Pph21),
            "ppn" => Ok(TaxKind::Ppn),
            _ => Err(AppError::validation(format!("Invalid tax kind: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub employee_id: Option<i64>,
    pub period: TaxPeriod,
    pub gross_income: Decimal,
    pub taxable_income: Decimal,
    pub tax_amount: Decimal,
    pub tax_kind: TaxKind,
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TaxRecord {
    /// Snapshot of an accepted PPh 21 computation.
    ///
    /// The stored tax amount is the final (post-discount) tax.
    pub fn from_pph21(employee_id: i64, period: TaxPeriod, result: &Pph21Result) -> Self {
        Self {
            id: None,
            employee_id: Some(employee_id),
            period,
            gross_income: result.gross_income,
            taxable_income: result.taxable_income,
            tax_amount: result.final_tax,
            tax_kind: TaxKind::Pph21,
            description: format!("PPh 21 {} {}", result.status_label(), period.year()),
            created_at: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_amount("gross_income", self.gross_income)?;
        validate_amount("taxable_income", self.taxable_income)?;
        validate_amount("tax_amount", self.tax_amount)?;
        Ok(())
    }
}

/// Request body for creating or editing a tax record
#[derive(Debug, Clone, Deserialize)]
pub struct TaxRecordRequest {
    #[serde(default)]
    pub employee_id: Option<i64>,
    pub period: TaxPeriod,
    #[serde(default)]
    pub gross_income: Decimal,
    #[serde(default)]
    pub taxable_income: Decimal,
    pub tax_amount: Decimal,
    pub tax_kind: TaxKind,
    #[serde(default)]
    pub description: String,
}

impl TaxRecordRequest {
    pub fn into_record(self) -> Result<TaxRecord> {
        let record = TaxRecord {
            id: None,
            employee_id: self.employee_id,
            period: self.period,
            gross_income: self.gross_income,
            taxable_income: self.taxable_income,
            tax_amount: self.tax_amount,
            tax_kind: self.tax_kind,
            description: self.description.trim().to_string(),
            created_at: None,
        };
        record.validate()?;
        Ok(record)
    }
}
