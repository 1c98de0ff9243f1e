use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::core::money::decimal_from_db;
use crate::core::traits::Repository;
use crate::core::{AppError, Result, TaxPeriod};
use crate::modules::taxes::models::TaxRecord;

#[derive(Debug, sqlx::FromRow)]
struct TaxRecordRow {
    id: i64,
    employee_id: Option<i64>,
    period: String,
    gross_income: String,
    taxable_income: String,
    tax_amount: String,
    tax_kind: String,
    description: String,
    created_at: DateTime<Utc>,
}

impl TaxRecordRow {
    fn into_record(self) -> Result<TaxRecord> {
        Ok(TaxRecord {
            id: Some(self.id),
            employee_id: self.employee_id,
            period: self.period.parse()?,
            gross_income: decimal_from_db("gross_income", &self.gross_income)?,
            taxable_income: decimal_from_db("taxable_income", &self.taxable_income)?,
            tax_amount: decimal_from_db("tax_amount", &self.tax_amount)?,
            tax_kind: self.tax_kind.parse()?,
            description: self.description,
            created_at: Some(self.created_at),
        })
    }
}

const SELECT_TAX_RECORD: &str = r#"
    SELECT id, employee_id, period, gross_income, taxable_income, tax_amount,
           tax_kind, description, created_at
    FROM tax_records
"#;

/// Repository for tax record audit snapshots
pub struct TaxRecordRepository {
    pool: SqlitePool,
}

impl TaxRecordRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Records for one employee, latest period first
    pub async fn list_by_employee(&self, employee_id: i64) -> Result<Vec<TaxRecord>> {
        let rows = sqlx::query_as::<_, TaxRecordRow>(&format!(
            "{} WHERE employee_id = ? ORDER BY period DESC, id DESC",
            SELECT_TAX_RECORD
        ))
        .bind(employee_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaxRecordRow::into_record).collect()
    }

    /// Records filed under exactly this period
    pub async fn list_by_period(&self, period: TaxPeriod) -> Result<Vec<TaxRecord>> {
        let rows = sqlx::query_as::<_, TaxRecordRow>(&format!(
            "{} WHERE period = ? ORDER BY id DESC",
            SELECT_TAX_RECORD
        ))
        .bind(period.to_string())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaxRecordRow::into_record).collect()
    }
}

#[async_trait]
impl Repository<TaxRecord, i64> for TaxRecordRepository {
    async fn create(&self, record: &TaxRecord) -> Result<TaxRecord> {
        let id = sqlx::query(
            r#"
            INSERT INTO tax_records (
                employee_id, period, gross_income, taxable_income, tax_amount,
                tax_kind, description, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(record.employee_id)
        .bind(record.period.to_string())
        .bind(record.gross_income.to_string())
        .bind(record.taxable_income.to_string())
        .bind(record.tax_amount.to_string())
        .bind(record.tax_kind.to_string())
        .bind(&record.description)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Tax record was created but not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<TaxRecord>> {
        let row = sqlx::query_as::<_, TaxRecordRow>(&format!("{} WHERE id = ?", SELECT_TAX_RECORD))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(TaxRecordRow::into_record).transpose()
    }

    async fn update(&self, id: i64, record: &TaxRecord) -> Result<TaxRecord> {
        let affected = sqlx::query(
            r#"
            UPDATE tax_records
            SET employee_id = ?, period = ?, gross_income = ?, taxable_income = ?,
                tax_amount = ?, tax_kind = ?, description = ?
            WHERE id = ?
            "#,
        )
        .bind(record.employee_id)
        .bind(record.period.to_string())
        .bind(record.gross_income.to_string())
        .bind(record.taxable_income.to_string())
        .bind(record.tax_amount.to_string())
        .bind(record.tax_kind.to_string())
        .bind(&record.description)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Tax record {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Tax record {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let affected = sqlx::query("DELETE FROM tax_records WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Tax record {}", id)));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<TaxRecord>> {
        let rows = sqlx::query_as::<_, TaxRecordRow>(&format!(
            "{} ORDER BY period DESC, id DESC",
            SELECT_TAX_RECORD
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaxRecordRow::into_record).collect()
    }
}
