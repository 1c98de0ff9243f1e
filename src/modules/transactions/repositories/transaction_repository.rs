use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::core::money::decimal_from_db;
use crate::core::traits::Repository;
use crate::core::{AppError, Result};
use crate::modules::transactions::models::Transaction;

#[derive(Debug, sqlx::FromRow)]
struct TransactionRow {
    id: i64,
    kind: String,
    description: String,
    amount: String,
    ppn_amount: String,
    transaction_date: String,
    invoice_number: Option<String>,
    created_at: DateTime<Utc>,
}

impl TransactionRow {
    fn into_transaction(self) -> Result<Transaction> {
        Ok(Transaction {
            id: Some(self.id),
            kind: self.kind.parse()?,
            description: self.description,
            amount: decimal_from_db("amount", &self.amount)?,
            ppn_amount: decimal_from_db("ppn_amount", &self.ppn_amount)?,
            transaction_date: self.transaction_date,
            invoice_number: self.invoice_number,
            created_at: Some(self.created_at),
        })
    }
}

const SELECT_TRANSACTION: &str = r#"
    SELECT id, kind, description, amount, ppn_amount, transaction_date,
           invoice_number, created_at
    FROM transactions
"#;

/// Repository for sale and purchase persistence
///
/// Listings are newest first by transaction date.
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Transactions whose date starts with `prefix` (`YYYY` or `YYYY-MM`)
    pub async fn list_by_period(&self, prefix: &str) -> Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE transaction_date LIKE ? || '%' ORDER BY transaction_date DESC, id DESC",
            SELECT_TRANSACTION
        ))
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_transaction).collect()
    }
}

#[async_trait]
impl Repository<Transaction, i64> for TransactionRepository {
    async fn create(&self, transaction: &Transaction) -> Result<Transaction> {
        let id = sqlx::query(
            r#"
            INSERT INTO transactions (
                kind, description, amount, ppn_amount, transaction_date,
                invoice_number, created_at
            )
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(transaction.kind.to_string())
        .bind(&transaction.description)
        .bind(transaction.amount.to_string())
        .bind(transaction.ppn_amount.to_string())
        .bind(&transaction.transaction_date)
        .bind(&transaction.invoice_number)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Transaction was created but not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Transaction>> {
        let row = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} WHERE id = ?",
            SELECT_TRANSACTION
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(TransactionRow::into_transaction).transpose()
    }

    async fn update(&self, id: i64, transaction: &Transaction) -> Result<Transaction> {
        let affected = sqlx::query(
            r#"
            UPDATE transactions
            SET kind = ?, description = ?, amount = ?, ppn_amount = ?,
                transaction_date = ?, invoice_number = ?
            WHERE id = ?
            "#,
        )
        .bind(transaction.kind.to_string())
        .bind(&transaction.description)
        .bind(transaction.amount.to_string())
        .bind(transaction.ppn_amount.to_string())
        .bind(&transaction.transaction_date)
        .bind(&transaction.invoice_number)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Transaction {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transaction {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let affected = sqlx::query("DELETE FROM transactions WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Transaction {}", id)));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(&format!(
            "{} ORDER BY transaction_date DESC, id DESC",
            SELECT_TRANSACTION
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TransactionRow::into_transaction).collect()
    }
}
