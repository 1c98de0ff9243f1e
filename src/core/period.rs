//! Tax periods and ledger date strings.
//!
//! Periods are either a whole year (`2026`) or a single month (`2026-03`).
//! Transaction dates are stored as `YYYY-MM-DD`, so a period's string form
//! doubles as a date prefix filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::{AppError, Result};

/// Ledger date format for transactions
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A reporting period for tax records and summaries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TaxPeriod {
    Year(i32),
    Month { year: i32, month: u32 },
}

impl TaxPeriod {
    pub fn year(&self) -> i32 {
        match self {
            TaxPeriod::Year(year) => *year,
            TaxPeriod::Month { year, .. } => *year,
        }
    }

    /// True when a `YYYY-MM-DD` date string falls inside this period
    pub fn contains_date(&self, date: &str) -> bool {
        date.starts_with(&self.to_string())
    }
}

impl fmt::Display for TaxPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaxPeriod::Year(year) => write!(f, "{:04}", year),
            TaxPeriod::Month { year, month } => write!(f, "{:04}-{:02}", year, month),
        }
    }
}

impl std::str::FromStr for TaxPeriod {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || {
            AppError::validation(format!(
                "Invalid period '{}'. Expected YYYY or YYYY-MM",
                s
            ))
        };

        let (year_part, month_part) = match s.split_once('-') {
            Some((year, month)) => (year, Some(month)),
            None => (s, None),
        };

        if year_part.len() != 4 {
            return Err(invalid());
        }
        let year: i32 = year_part.parse().map_err(|_| invalid())?;

        match month_part {
            None => Ok(TaxPeriod::Year(year)),
            Some(month) if month.len() == 2 => {
                let month: u32 = month.parse().map_err(|_| invalid())?;
                if !(1..=12).contains(&month) {
                    return Err(invalid());
                }
                Ok(TaxPeriod::Month { year, month })
            }
            Some(_) => Err(invalid()),
        }
    }
}

impl TryFrom<String> for TaxPeriod {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<TaxPeriod> for String {
    fn from(period: TaxPeriod) -> Self {
        period.to_string()
    }
}

/// Earliest and latest years accepted for reports and schedules
pub const MIN_YEAR: i32 = 2000;
pub const MAX_YEAR: i32 = 2100;

pub fn validate_year(year: i32) -> Result<i32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return Err(AppError::validation(format!(
            "Year {} is outside {}..={}",
            year, MIN_YEAR, MAX_YEAR
        )));
    }
    Ok(year)
}

/// Parse and normalise a ledger date string
pub fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        AppError::validation(format!(
            "Invalid date format: '{}'. Expected YYYY-MM-DD",
            date
        ))
    })
}
