//! SQLite-backed [`Ledger`] assembled from the entity repositories.

use async_trait::async_trait;
use sqlx::SqlitePool;

use crate::core::traits::{Ledger, LedgerCounts, Repository};
use crate::core::Result;
use crate::modules::employees::models::Employee;
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::taxes::models::TaxRecord;
use crate::modules::taxes::repositories::TaxRecordRepository;
use crate::modules::transactions::models::Transaction;
use crate::modules::transactions::repositories::TransactionRepository;

pub struct SqliteLedger {
    pool: SqlitePool,
    employees: EmployeeRepository,
    transactions: TransactionRepository,
    tax_records: TaxRecordRepository,
}

impl SqliteLedger {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            employees: EmployeeRepository::new(pool.clone()),
            transactions: TransactionRepository::new(pool.clone()),
            tax_records: TaxRecordRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl Ledger for SqliteLedger {
    async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.employees.list().await
    }

    async fn get_employee(&self, id: i64) -> Result<Option<Employee>> {
        self.employees.find_by_id(id).await
    }

    async fn list_transactions(&self) -> Result<Vec<Transaction>> {
        self.transactions.list().await
    }

    async fn list_tax_records_for_employee(&self, employee_id: i64) -> Result<Vec<TaxRecord>> {
        self.tax_records.list_by_employee(employee_id).await
    }

    async fn create_tax_record(&self, record: &TaxRecord) -> Result<TaxRecord> {
        record.validate()?;
        self.tax_records.create(record).await
    }

    async fn record_counts(&self) -> Result<LedgerCounts> {
        let (employees, transactions, tax_records) = sqlx::query_as::<_, (i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM employees),
                (SELECT COUNT(*) FROM transactions),
                (SELECT COUNT(*) FROM tax_records)
            "#,
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(LedgerCounts {
            employees,
            transactions,
            tax_records,
        })
    }
}
