use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::core::money::decimal_from_db;
use crate::core::{AppError, Result};
use crate::modules::settings::models::AppSettings;

#[derive(Debug, sqlx::FromRow)]
struct SettingsRow {
    company_name: String,
    company_npwp: String,
    company_address: String,
    ppn_rate: String,
    corporate_tax_rate: String,
    rate_table_version: String,
    reminder_days: i64,
    updated_at: DateTime<Utc>,
}

impl SettingsRow {
    fn into_settings(self) -> Result<AppSettings> {
        let reminder_days = u32::try_from(self.reminder_days).map_err(|_| {
            AppError::internal(format!("Invalid reminder_days: {}", self.reminder_days))
        })?;

        Ok(AppSettings {
            company_name: self.company_name,
            company_npwp: self.company_npwp,
            company_address: self.company_address,
            ppn_rate: decimal_from_db("ppn_rate", &self.ppn_rate)?,
            corporate_tax_rate: decimal_from_db("corporate_tax_rate", &self.corporate_tax_rate)?,
            rate_table_version: self.rate_table_version.parse()?,
            reminder_days,
            updated_at: Some(self.updated_at),
        })
    }
}

/// Repository for the single settings row
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Stored settings, or `None` before the first save
    pub async fn get(&self) -> Result<Option<AppSettings>> {
        let row = sqlx::query_as::<_, SettingsRow>(
            r#"
            SELECT company_name, company_npwp, company_address, ppn_rate,
                   corporate_tax_rate, rate_table_version, reminder_days, updated_at
            FROM app_settings
            WHERE id = 1
            "#,
        )
        .fetch_optional(&self.pool)
        .await?;

        row.map(SettingsRow::into_settings).transpose()
    }

    /// Insert or overwrite the settings row
    pub async fn upsert(&self, settings: &AppSettings) -> Result<AppSettings> {
        sqlx::query(
            r#"
            INSERT INTO app_settings (
                id, company_name, company_npwp, company_address, ppn_rate,
                corporate_tax_rate, rate_table_version, reminder_days, updated_at
            )
            VALUES (1, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT (id) DO UPDATE SET
                company_name = excluded.company_name,
                company_npwp = excluded.company_npwp,
                company_address = excluded.company_address,
                ppn_rate = excluded.ppn_rate,
                corporate_tax_rate = excluded.corporate_tax_rate,
                rate_table_version = excluded.rate_table_version,
                reminder_days = excluded.reminder_days,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&settings.company_name)
        .bind(&settings.company_npwp)
        .bind(&settings.company_address)
        .bind(settings.ppn_rate.to_string())
        .bind(settings.corporate_tax_rate.to_string())
        .bind(settings.rate_table_version.to_string())
        .bind(i64::from(settings.reminder_days))
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        self.get()
            .await?
            .ok_or_else(|| AppError::internal("Settings were saved but not found"))
    }
}
