use crate::core::money::validate_rate;
use crate::core::{AppError, Result};
use crate::modules::taxes::models::RateTableVersion;
use rust_decimal::Decimal;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub mod database;
pub mod server;

pub use database::DatabaseConfig;
pub use server::ServerConfig;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub tax: TaxConfig,
    pub backup: BackupConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: String,
    pub log_level: String,
}

/// Defaults for the runtime-editable tax settings.
///
/// Only used to seed the settings row and for reset; once stored, edits
/// made through the settings API take precedence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxConfig {
    pub ppn_rate: Decimal,
    pub corporate_tax_rate: Decimal,
    pub rate_table_version: RateTableVersion,
    pub reminder_days: u32,
}

impl Default for TaxConfig {
    fn default() -> Self {
        Self {
            ppn_rate: Decimal::new(11, 2),
            corporate_tax_rate: Decimal::new(25, 2),
            rate_table_version: RateTableVersion::Current,
            reminder_days: 7,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BackupConfig {
    pub dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let defaults = TaxConfig::default();

        let config = Config {
            app: AppConfig {
                env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
                log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            },
            database: DatabaseConfig::from_env()?,
            server: ServerConfig::from_env()?,
            tax: TaxConfig {
                ppn_rate: env_or("PPN_RATE", defaults.ppn_rate)?,
                corporate_tax_rate: env_or("CORPORATE_TAX_RATE", defaults.corporate_tax_rate)?,
                rate_table_version: env_or("RATE_TABLE_VERSION", defaults.rate_table_version)?,
                reminder_days: env_or("REMINDER_DAYS", defaults.reminder_days)?,
            },
            backup: BackupConfig {
                dir: PathBuf::from(env::var("BACKUP_DIR").unwrap_or_else(|_| "backups".to_string())),
            },
        };

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.database.max_connections == 0 {
            return Err(AppError::configuration(
                "DATABASE_MAX_CONNECTIONS must be greater than 0",
            ));
        }

        validate_rate("PPN_RATE", self.tax.ppn_rate)
            .map_err(|e| AppError::configuration(e.to_string()))?;
        validate_rate("CORPORATE_TAX_RATE", self.tax.corporate_tax_rate)
            .map_err(|e| AppError::configuration(e.to_string()))?;

        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.app.env == "production"
    }
}

/// Read and parse an environment variable, falling back to `default` when unset
pub(crate) fn env_or<T: FromStr>(key: &str, default: T) -> Result<T> {
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::configuration(format!("Invalid {}: '{}'", key, raw))),
        Err(_) => Ok(default),
    }
}
