use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::TaxConfig;
use crate::core::money::validate_rate;
use crate::core::{AppError, Result};
use crate::modules::reports::services::SptAggregator;
use crate::modules::taxes::models::{RateTable, RateTableVersion};
use crate::modules::taxes::services::{Pph21Calculator, PpnCalculator};

pub const DEFAULT_COMPANY_NAME: &str = "Perusahaan Saya";

/// Longest reminder window accepted, in days
pub const MAX_REMINDER_DAYS: u32 = 365;

/// Runtime-editable business settings.
///
/// Engines are built from a snapshot of these on every request, so an edit
/// takes effect on the next computation without a restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub company_name: String,
    pub company_npwp: String,
    pub company_address: String,
    pub ppn_rate: Decimal,
    pub corporate_tax_rate: Decimal,
    pub rate_table_version: RateTableVersion,
    /// Deadlines this close are flagged high priority
    pub reminder_days: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl AppSettings {
    pub fn from_config(tax: &TaxConfig) -> Self {
        Self {
            company_name: DEFAULT_COMPANY_NAME.to_string(),
            company_npwp: String::new(),
            company_address: String::new(),
            ppn_rate: tax.ppn_rate,
            corporate_tax_rate: tax.corporate_tax_rate,
            rate_table_version: tax.rate_table_version,
            reminder_days: tax.reminder_days,
            updated_at: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.company_name.trim().is_empty() {
            return Err(AppError::validation("Company name cannot be empty"));
        }
        validate_rate("ppn_rate", self.ppn_rate)?;
        validate_rate("corporate_tax_rate", self.corporate_tax_rate)?;
        if self.reminder_days > MAX_REMINDER_DAYS {
            return Err(AppError::validation(format!(
                "reminder_days cannot exceed {}",
                MAX_REMINDER_DAYS
            )));
        }
        Ok(())
    }

    pub fn rate_table(&self) -> RateTable {
        RateTable::for_version(self.rate_table_version)
    }

    pub fn pph21_calculator(&self) -> Pph21Calculator {
        Pph21Calculator::new(self.rate_table())
    }

    pub fn ppn_calculator(&self) -> Result<PpnCalculator> {
        PpnCalculator::new(self.ppn_rate)
    }

    pub fn spt_aggregator(&self) -> Result<SptAggregator> {
        SptAggregator::new(
            self.pph21_calculator(),
            self.ppn_calculator()?,
            self.corporate_tax_rate,
        )
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        Self::from_config(&TaxConfig::default())
    }
}

/// Partial update; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateSettingsRequest {
    pub company_name: Option<String>,
    pub company_npwp: Option<String>,
    pub company_address: Option<String>,
    pub ppn_rate: Option<Decimal>,
    pub corporate_tax_rate: Option<Decimal>,
    pub rate_table_version: Option<RateTableVersion>,
    pub reminder_days: Option<u32>,
}

impl UpdateSettingsRequest {
    /// Merge onto `current` and validate the result
    pub fn apply(self, current: AppSettings) -> Result<AppSettings> {
        let merged = AppSettings {
            company_name: self
                .company_name
                .map(|s| s.trim().to_string())
                .unwrap_or(current.company_name),
            company_npwp: self
                .company_npwp
                .map(|s| s.trim().to_string())
                .unwrap_or(current.company_npwp),
            company_address: self
                .company_address
                .map(|s| s.trim().to_string())
                .unwrap_or(current.company_address),
            ppn_rate: self.ppn_rate.unwrap_or(current.ppn_rate),
            corporate_tax_rate: self.corporate_tax_rate.unwrap_or(current.corporate_tax_rate),
            rate_table_version: self.rate_table_version.unwrap_or(current.rate_table_version),
            reminder_days: self.reminder_days.unwrap_or(current.reminder_days),
            updated_at: current.updated_at,
        };
        merged.validate()?;
        Ok(merged)
    }
}
