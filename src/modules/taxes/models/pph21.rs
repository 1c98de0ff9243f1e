use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::filing_status::{CalculationMethod, FilingStatus, TaxProfile};

/// Tax levied on one progressive slice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketSlice {
    /// Slice width from the rate table; `None` for the unbounded top slice
    pub limit: Option<Decimal>,
    pub rate: Decimal,
    /// Portion of taxable income that fell in this slice
    pub taxable_amount: Decimal,
    pub tax: Decimal,
}

/// Method-specific part of a PPh 21 result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum MethodDetail {
    Progressive { breakdown: Vec<BracketSlice> },
    Ter { effective_rate: Decimal },
}

/// Annual PPh 21 computation for one employee
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pph21Result {
    pub filing_status: FilingStatus,
    pub dependents: u32,
    pub gross_income: Decimal,
    pub occupational_cost: Decimal,
    pub net_income: Decimal,
    pub ptkp: Decimal,
    pub taxable_income: Decimal,
    /// Annual tax before the NPWP discount
    pub tax_amount: Decimal,
    pub monthly_tax: Decimal,
    pub discount: Decimal,
    pub final_tax: Decimal,
    pub monthly_final_tax: Decimal,
    #[serde(flatten)]
    pub detail: MethodDetail,
}

impl Pph21Result {
    pub fn method(&self) -> CalculationMethod {
        match self.detail {
            MethodDetail::Progressive { .. } => CalculationMethod::Progressive,
            MethodDetail::Ter { .. } => CalculationMethod::Ter,
        }
    }

    /// Per-slice breakdown; empty for TER results
    pub fn breakdown(&self) -> &[BracketSlice] {
        match &self.detail {
            MethodDetail::Progressive { breakdown } => breakdown,
            MethodDetail::Ter { .. } => &[],
        }
    }

    pub fn effective_rate(&self) -> Option<Decimal> {
        match self.detail {
            MethodDetail::Ter { effective_rate } => Some(effective_rate),
            MethodDetail::Progressive { .. } => None,
        }
    }

    /// Status label such as `TK/0`
    pub fn status_label(&self) -> String {
        format!("{}/{}", self.filing_status, self.dependents)
    }
}

/// Request body for calculating an employee's PPh 21
#[derive(Debug, Clone, Deserialize)]
pub struct Pph21Request {
    #[serde(default)]
    pub married: bool,
    #[serde(default)]
    pub joint_filing: bool,
    #[serde(default)]
    pub dependents: u32,
    #[serde(default)]
    pub method: CalculationMethod,
    #[serde(default = "default_true")]
    pub apply_npwp_discount: bool,
    /// Persist the result as a tax record
    #[serde(default)]
    pub save: bool,
    /// Period for the saved record; defaults to the current year
    #[serde(default)]
    pub period: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Pph21Request {
    pub fn profile(&self) -> crate::core::Result<TaxProfile> {
        let status = FilingStatus::from_flags(self.married, self.joint_filing)?;
        Ok(TaxProfile::new(
            status,
            self.dependents,
            self.method,
            self.apply_npwp_discount,
        ))
    }
}
