use std::sync::Arc;

use chrono::{Datelike, NaiveDate, Utc};
use tracing::info;

use crate::core::traits::Ledger;
use crate::core::Result;
use crate::modules::reports::models::{
    DeadlineReminder, Notifications, PaymentScheduleEntry, SptReport, SystemSummary,
};
use crate::modules::reports::services::SptAggregator;
use crate::modules::settings::SettingsService;

/// Feeds ledger snapshots through the SPT aggregator
pub struct SptService {
    ledger: Arc<dyn Ledger>,
    settings: Arc<SettingsService>,
}

impl SptService {
    pub fn new(ledger: Arc<dyn Ledger>, settings: Arc<SettingsService>) -> Self {
        Self { ledger, settings }
    }

    pub async fn annual_report(&self, year: i32) -> Result<SptReport> {
        let aggregator = self.settings.current().await?.spt_aggregator()?;
        let employees = self.ledger.list_employees().await?;
        let transactions = self.ledger.list_transactions().await?;

        info!(
            year,
            employees = employees.len(),
            transactions = transactions.len(),
            "Generating SPT report"
        );

        aggregator.generate(&employees, &transactions, year)
    }

    pub fn payment_schedule(&self, year: i32) -> Result<Vec<PaymentScheduleEntry>> {
        SptAggregator::payment_schedule(year)
    }

    pub async fn upcoming_deadlines(&self, days_ahead: u32) -> Result<Vec<DeadlineReminder>> {
        self.upcoming_deadlines_from(Utc::now().date_naive(), days_ahead)
            .await
    }

    pub async fn upcoming_deadlines_from(
        &self,
        today: NaiveDate,
        days_ahead: u32,
    ) -> Result<Vec<DeadlineReminder>> {
        let reminder_days = self.settings.current().await?.reminder_days;
        Ok(SptAggregator::upcoming_deadlines(
            today,
            days_ahead,
            reminder_days,
        ))
    }

    pub async fn notifications(&self, days_ahead: u32) -> Result<Notifications> {
        self.notifications_from(Utc::now().date_naive(), days_ahead)
            .await
    }

    /// Deadline reminders plus the PPh 21 and PPN position for `today`'s year
    pub async fn notifications_from(
        &self,
        today: NaiveDate,
        days_ahead: u32,
    ) -> Result<Notifications> {
        let settings = self.settings.current().await?;
        let aggregator = settings.spt_aggregator()?;
        let employees = self.ledger.list_employees().await?;
        let transactions = self.ledger.list_transactions().await?;

        Ok(Notifications {
            deadlines: SptAggregator::upcoming_deadlines(
                today,
                days_ahead,
                settings.reminder_days,
            ),
            summaries: aggregator.tax_summary_notices(&employees, &transactions, today.year())?,
        })
    }

    pub async fn system_summary(&self) -> Result<SystemSummary> {
        let settings = self.settings.current().await?;
        let counts = self.ledger.record_counts().await?;

        Ok(SystemSummary {
            counts,
            company_name: settings.company_name,
            ppn_rate: settings.ppn_rate,
            corporate_tax_rate: settings.corporate_tax_rate,
            rate_table_version: settings.rate_table_version,
            reminder_days: settings.reminder_days,
        })
    }
}
