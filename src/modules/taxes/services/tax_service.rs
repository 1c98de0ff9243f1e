use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::info;

use crate::core::traits::{Ledger, Repository};
use crate::core::{AppError, Result, TaxPeriod};
use crate::modules::settings::SettingsService;
use crate::modules::taxes::models::{PpnBreakdown, PpnSummary, TaxRecord, TaxRecordRequest};
use crate::modules::taxes::repositories::TaxRecordRepository;

/// VAT calculations and tax record bookkeeping
pub struct TaxService {
    records: TaxRecordRepository,
    ledger: Arc<dyn Ledger>,
    settings: Arc<SettingsService>,
}

impl TaxService {
    pub fn new(
        records: TaxRecordRepository,
        ledger: Arc<dyn Ledger>,
        settings: Arc<SettingsService>,
    ) -> Self {
        Self {
            records,
            ledger,
            settings,
        }
    }

    pub async fn ppn_from_base(&self, amount: Decimal) -> Result<PpnBreakdown> {
        let calculator = self.settings.current().await?.ppn_calculator()?;
        calculator.tax_from_base(amount)
    }

    pub async fn ppn_from_total(&self, total: Decimal) -> Result<PpnBreakdown> {
        let calculator = self.settings.current().await?.ppn_calculator()?;
        calculator.base_from_total(total)
    }

    /// Output/input VAT netting over the ledger, optionally for one period
    pub async fn ppn_summary(&self, period: Option<TaxPeriod>) -> Result<PpnSummary> {
        let calculator = self.settings.current().await?.ppn_calculator()?;
        let transactions = self.ledger.list_transactions().await?;
        let prefix = period.map(|p| p.to_string());

        Ok(calculator.period_summary(&transactions, prefix.as_deref()))
    }

    pub async fn create_record(&self, request: TaxRecordRequest) -> Result<TaxRecord> {
        let record = request.into_record()?;
        self.ensure_employee(record.employee_id).await?;

        let created = self.records.create(&record).await?;
        info!(
            tax_record_id = ?created.id,
            tax_kind = %created.tax_kind,
            period = %created.period,
            "Tax record created"
        );
        Ok(created)
    }

    pub async fn get_record(&self, id: i64) -> Result<TaxRecord> {
        self.records
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tax record {}", id)))
    }

    pub async fn list_records(&self, period: Option<TaxPeriod>) -> Result<Vec<TaxRecord>> {
        match period {
            Some(period) => self.records.list_by_period(period).await,
            None => self.records.list().await,
        }
    }

    /// Explicit edit of a stored snapshot
    pub async fn update_record(&self, id: i64, request: TaxRecordRequest) -> Result<TaxRecord> {
        let record = request.into_record()?;
        self.ensure_employee(record.employee_id).await?;

        let updated = self.records.update(id, &record).await?;
        info!(tax_record_id = id, "Tax record updated");
        Ok(updated)
    }

    pub async fn delete_record(&self, id: i64) -> Result<()> {
        self.records.delete(id).await?;
        info!(tax_record_id = id, "Tax record deleted");
        Ok(())
    }

    async fn ensure_employee(&self, employee_id: Option<i64>) -> Result<()> {
        if let Some(id) = employee_id {
            if self.ledger.get_employee(id).await?.is_none() {
                return Err(AppError::validation(format!(
                    "Employee {} does not exist",
                    id
                )));
            }
        }
        Ok(())
    }
}
