use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::core::Result;
use crate::modules::employees::models::Employee;
use crate::modules::taxes::models::TaxRecord;
use crate::modules::transactions::models::Transaction;

/// Row counts per ledger table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerCounts {
    pub employees: i64,
    pub transactions: i64,
    pub tax_records: i64,
}

/// Read/write access to the ledger as seen by the tax engines.
///
/// Each call returns a consistent snapshot; callers do no locking.
#[async_trait]
pub trait Ledger: Send + Sync {
    async fn list_employees(&self) -> Result<Vec<Employee>>;

    async fn get_employee(&self, id: i64) -> Result<Option<Employee>>;

    async fn list_transactions(&self) -> Result<Vec<Transaction>>;

    async fn list_tax_records_for_employee(&self, employee_id: i64) -> Result<Vec<TaxRecord>>;

    /// Persist an accepted computation as an audit snapshot
    async fn create_tax_record(&self, record: &TaxRecord) -> Result<TaxRecord>;

    async fn record_counts(&self) -> Result<LedgerCounts>;
}
