use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::money::validate_amount;
use crate::core::{AppError, Result};

/// Employment status. Informational only: PPh 21 treats both alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    /// Pegawai tetap
    #[default]
    #[serde(alias = "tetap")]
    Permanent,
    /// Pegawai tidak tetap
    #[serde(alias = "tidak_tetap")]
    NonPermanent,
}

impl fmt::Display for EmploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmploymentStatus::Permanent => write!(f, "permanent"),
            EmploymentStatus::NonPermanent => write!(f, "non_permanent"),
        }
    }
}

impl std::str::FromStr for EmploymentStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "permanent" | "tetap" => Ok(EmploymentStatus::Permanent),
            "non_permanent" | "tidak_tetap" => Ok(EmploymentStatus::NonPermanent),
            _ => Err(AppError::validation(format!(
                "Invalid employment status: {}",
                s
            ))),
        }
    }
}

/// An employee on the payroll
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub status: EmploymentStatus,
    pub monthly_salary: Decimal,
    /// Fixed monthly allowances on top of the base salary
    pub allowances: Decimal,
    /// Taxpayer identification number, if registered
    pub npwp: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Create a new employee with validation
    pub fn new(
        name: impl Into<String>,
        status: EmploymentStatus,
        monthly_salary: Decimal,
        allowances: Decimal,
        npwp: Option<String>,
    ) -> Result<Self> {
        let employee = Self {
            id: None,
            name: name.into().trim().to_string(),
            status,
            monthly_salary,
            allowances,
            npwp: normalize_npwp(npwp),
            created_at: None,
        };
        employee.validate()?;
        Ok(employee)
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("Employee name cannot be empty"));
        }
        validate_amount("monthly_salary", self.monthly_salary)?;
        validate_amount("allowances", self.allowances)?;
        Ok(())
    }

    /// Whether a taxpayer ID is on file
    pub fn has_npwp(&self) -> bool {
        self.npwp.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Base salary plus allowances for one month
    pub fn monthly_income(&self) -> Decimal {
        self.monthly_salary + self.allowances
    }
}

/// Blank NPWP strings count as absent
fn normalize_npwp(npwp: Option<String>) -> Option<String> {
    npwp.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())
}

/// Request body for creating or replacing an employee
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeRequest {
    pub name: String,
    #[serde(default)]
    pub status: EmploymentStatus,
    pub monthly_salary: Decimal,
    #[serde(default)]
    pub allowances: Decimal,
    #[serde(default)]
    pub npwp: Option<String>,
}

impl EmployeeRequest {
    pub fn into_employee(self) -> Result<Employee> {
        Employee::new(
            self.name,
            self.status,
            self.monthly_salary,
            self.allowances,
            self.npwp,
        )
    }
}
