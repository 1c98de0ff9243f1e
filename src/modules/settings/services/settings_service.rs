use sqlx::SqlitePool;
use tracing::info;

use crate::config::TaxConfig;
use crate::core::Result;
use crate::modules::settings::models::{AppSettings, UpdateSettingsRequest};
use crate::modules::settings::repositories::SettingsRepository;

/// Service for reading and editing business settings
pub struct SettingsService {
    repo: SettingsRepository,
    defaults: TaxConfig,
}

impl SettingsService {
    pub fn new(pool: SqlitePool, defaults: TaxConfig) -> Self {
        Self {
            repo: SettingsRepository::new(pool),
            defaults,
        }
    }

    fn default_settings(&self) -> AppSettings {
        AppSettings::from_config(&self.defaults)
    }

    /// Stored settings, falling back to the configured defaults
    pub async fn current(&self) -> Result<AppSettings> {
        Ok(self
            .repo
            .get()
            .await?
            .unwrap_or_else(|| self.default_settings()))
    }

    /// Write the defaults if nothing is stored yet
    pub async fn seed(&self) -> Result<AppSettings> {
        match self.repo.get().await? {
            Some(existing) => Ok(existing),
            None => {
                info!("Seeding default settings");
                self.repo.upsert(&self.default_settings()).await
            }
        }
    }

    pub async fn update(&self, request: UpdateSettingsRequest) -> Result<AppSettings> {
        let current = self.current().await?;
        let updated = request.apply(current)?;
        let saved = self.repo.upsert(&updated).await?;

        info!(
            ppn_rate = %saved.ppn_rate,
            corporate_tax_rate = %saved.corporate_tax_rate,
            rate_table_version = %saved.rate_table_version,
            "Settings updated"
        );
        Ok(saved)
    }

    pub async fn reset(&self) -> Result<AppSettings> {
        let saved = self.repo.upsert(&self.default_settings()).await?;
        info!("Settings reset to defaults");
        Ok(saved)
    }
}
