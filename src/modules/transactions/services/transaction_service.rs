use std::sync::Arc;

use tracing::info;

use crate::core::traits::Repository;
use crate::core::{AppError, Result, TaxPeriod};
use crate::modules::settings::SettingsService;
use crate::modules::taxes::models::CreditEligibility;
use crate::modules::taxes::services::PpnCalculator;
use crate::modules::transactions::models::{Transaction, TransactionRequest};
use crate::modules::transactions::repositories::TransactionRepository;

/// Service for sale and purchase bookkeeping
///
/// VAT is derived from the request amount at the PPN rate in effect when the
/// transaction is written, and stored with it.
pub struct TransactionService {
    repo: TransactionRepository,
    settings: Arc<SettingsService>,
}

impl TransactionService {
    pub fn new(repo: TransactionRepository, settings: Arc<SettingsService>) -> Self {
        Self { repo, settings }
    }

    /// Turn a request into a transaction with VAT filled in
    async fn build(&self, request: TransactionRequest) -> Result<Transaction> {
        let calculator = self.settings.current().await?.ppn_calculator()?;
        let breakdown = if request.amount_includes_vat {
            calculator.base_from_total(request.amount)?
        } else {
            calculator.tax_from_base(request.amount)?
        };

        let transaction = Transaction {
            id: None,
            kind: request.kind,
            description: request.description.trim().to_string(),
            amount: breakdown.base_amount,
            ppn_amount: breakdown.ppn_amount,
            transaction_date: request.date_or_today()?,
            invoice_number: request.normalized_invoice_number(),
            created_at: None,
        };
        transaction.validate()?;
        Ok(transaction)
    }

    pub async fn create_transaction(&self, request: TransactionRequest) -> Result<Transaction> {
        let transaction = self.build(request).await?;
        let created = self.repo.create(&transaction).await?;

        info!(
            transaction_id = ?created.id,
            kind = %created.kind,
            amount = %created.amount,
            ppn_amount = %created.ppn_amount,
            "Transaction recorded"
        );
        Ok(created)
    }

    pub async fn get_transaction(&self, id: i64) -> Result<Transaction> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Transaction {}", id)))
    }

    /// All transactions, or only those dated within `period`.
    ///
    /// `invoiced` narrows the list to transactions with (`true`) or
    /// without (`false`) a tax invoice number.
    pub async fn list_transactions(
        &self,
        period: Option<TaxPeriod>,
        invoiced: Option<bool>,
    ) -> Result<Vec<Transaction>> {
        let mut transactions = match period {
            Some(period) => self.repo.list_by_period(&period.to_string()).await?,
            None => self.repo.list().await?,
        };

        if let Some(invoiced) = invoiced {
            transactions.retain(|tx| tx.has_invoice_number() == invoiced);
        }
        Ok(transactions)
    }

    /// Replace a transaction; VAT is recomputed at the current rate
    pub async fn update_transaction(
        &self,
        id: i64,
        request: TransactionRequest,
    ) -> Result<Transaction> {
        let transaction = self.build(request).await?;
        let updated = self.repo.update(id, &transaction).await?;

        info!(transaction_id = id, "Transaction updated");
        Ok(updated)
    }

    pub async fn delete_transaction(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await?;
        info!(transaction_id = id, "Transaction deleted");
        Ok(())
    }

    pub async fn credit_eligibility(&self, id: i64) -> Result<CreditEligibility> {
        let transaction = self.get_transaction(id).await?;
        Ok(PpnCalculator::credit_report(&transaction))
    }
}
