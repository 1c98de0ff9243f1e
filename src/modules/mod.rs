use std::path::PathBuf;
use std::sync::Arc;

use actix_web::web;
use sqlx::SqlitePool;

use crate::config::Config;
use crate::core::traits::Ledger;
use crate::middleware::error_handler;

pub mod backups;
pub mod employees;
pub mod health;
pub mod ledger;
pub mod reports;
pub mod settings;
pub mod taxes;
pub mod transactions;

use backups::BackupService;
use employees::{EmployeeRepository, EmployeeService};
use ledger::SqliteLedger;
use reports::SptService;
use settings::SettingsService;
use taxes::{TaxRecordRepository, TaxService};
use transactions::{TransactionRepository, TransactionService};

/// Services shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    pub settings: Arc<SettingsService>,
    pub employees: Arc<EmployeeService>,
    pub transactions: Arc<TransactionService>,
    pub taxes: Arc<TaxService>,
    pub reports: Arc<SptService>,
    pub backups: Arc<BackupService>,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Self {
        Self::with_backup_dir(pool, config, config.backup.dir.clone())
    }

    pub fn with_backup_dir(pool: SqlitePool, config: &Config, backup_dir: PathBuf) -> Self {
        let settings = Arc::new(SettingsService::new(pool.clone(), config.tax.clone()));
        let ledger: Arc<dyn Ledger> = Arc::new(SqliteLedger::new(pool.clone()));

        Self {
            employees: Arc::new(EmployeeService::new(
                EmployeeRepository::new(pool.clone()),
                ledger.clone(),
                settings.clone(),
            )),
            transactions: Arc::new(TransactionService::new(
                TransactionRepository::new(pool.clone()),
                settings.clone(),
            )),
            taxes: Arc::new(TaxService::new(
                TaxRecordRepository::new(pool.clone()),
                ledger.clone(),
                settings.clone(),
            )),
            reports: Arc::new(SptService::new(ledger, settings.clone())),
            backups: Arc::new(BackupService::new(pool.clone(), backup_dir)),
            settings,
            pool,
        }
    }

    /// Shared data, extractor configs and every route
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.pool.clone()))
            .app_data(web::Data::new(self.settings.clone()))
            .app_data(web::Data::new(self.employees.clone()))
            .app_data(web::Data::new(self.transactions.clone()))
            .app_data(web::Data::new(self.taxes.clone()))
            .app_data(web::Data::new(self.reports.clone()))
            .app_data(web::Data::new(self.backups.clone()));

        error_handler::configure(cfg);
        configure(cfg);
    }
}

/// Mount all module routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(employees::controllers::configure)
        .configure(transactions::controllers::configure)
        .configure(taxes::controllers::configure)
        .configure(reports::controllers::configure)
        .configure(settings::controllers::configure)
        .configure(backups::controllers::configure);
}
