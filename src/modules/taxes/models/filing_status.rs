use serde::{Deserialize, Serialize};
use std::fmt;

use super::rate_table::{TerCategory, MAX_DEPENDENTS};
use crate::core::{AppError, Result};

/// Marital filing status for PPh 21
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    /// Tidak kawin (TK)
    Single,
    /// Kawin (K)
    Married,
    /// Kawin, spouse income combined (K/I)
    MarriedJoint,
}

impl FilingStatus {
    /// Derive the status from the married and joint-filing flags.
    ///
    /// Joint filing is only meaningful for married taxpayers; the
    /// combination `joint && !married` is rejected.
    pub fn from_flags(married: bool, joint_filing: bool) -> Result<Self> {
        match (married, joint_filing) {
            (false, false) => Ok(FilingStatus::Single),
            (true, false) => Ok(FilingStatus::Married),
            (true, true) => Ok(FilingStatus::MarriedJoint),
            (false, true) => Err(AppError::validation(
                "Joint filing requires the married flag",
            )),
        }
    }

    /// Spouse PTKP addend applies to both married statuses
    pub fn has_spouse(&self) -> bool {
        matches!(self, FilingStatus::Married | FilingStatus::MarriedJoint)
    }

    pub fn ter_category(&self) -> TerCategory {
        match self {
            FilingStatus::Single => TerCategory::A,
            FilingStatus::Married => TerCategory::B,
            FilingStatus::MarriedJoint => TerCategory::C,
        }
    }

    /// Short code used on withholding slips
    pub fn code(&self) -> &'static str {
        match self {
            FilingStatus::Single => "TK",
            FilingStatus::Married => "K",
            FilingStatus::MarriedJoint => "K/I",
        }
    }
}

impl fmt::Display for FilingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Computation method for PPh 21
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMethod {
    #[default]
    Progressive,
    Ter,
}

impl fmt::Display for CalculationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculationMethod::Progressive => write!(f, "progressive"),
            CalculationMethod::Ter => write!(f, "ter"),
        }
    }
}

/// Everything about a taxpayer's situation that is not on the employee record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxProfile {
    pub filing_status: FilingStatus,
    /// Always within `0..=MAX_DEPENDENTS`
    dependents: u32,
    pub method: CalculationMethod,
    pub apply_npwp_discount: bool,
}

impl TaxProfile {
    pub fn new(
        filing_status: FilingStatus,
        dependents: u32,
        method: CalculationMethod,
        apply_npwp_discount: bool,
    ) -> Self {
        Self {
            filing_status,
            dependents: dependents.min(MAX_DEPENDENTS),
            method,
            apply_npwp_discount,
        }
    }

    /// Unmarried, no dependents, progressive, discount on
    pub fn single() -> Self {
        Self::new(
            FilingStatus::Single,
            0,
            CalculationMethod::Progressive,
            true,
        )
    }

    pub fn dependents(&self) -> u32 {
        self.dependents
    }

    /// Status label such as `K/2`
    pub fn label(&self) -> String {
        format!("{}/{}", self.filing_status, self.dependents)
    }
}
