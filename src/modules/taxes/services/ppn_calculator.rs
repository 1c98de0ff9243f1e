use rust_decimal::Decimal;

use crate::core::money::{validate_amount, validate_rate};
use crate::core::Result;
use crate::modules::taxes::models::{CreditEligibility, PpnBreakdown, PpnSummary};
use crate::modules::transactions::models::{Transaction, TransactionKind};

/// Default PPN rate (11%)
pub const DEFAULT_PPN_RATE: Decimal = Decimal::from_parts(11, 0, 0, false, 2);

/// VAT calculator at a fixed rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PpnCalculator {
    rate: Decimal,
}

impl PpnCalculator {
    /// Create a calculator, rejecting rates outside [0, 1]
    pub fn new(rate: Decimal) -> Result<Self> {
        validate_rate("ppn_rate", rate)?;
        Ok(Self { rate })
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// VAT on top of a base amount
    pub fn tax_from_base(&self, amount: Decimal) -> Result<PpnBreakdown> {
        validate_amount("amount", amount)?;

        let ppn_amount = amount * self.rate;
        Ok(PpnBreakdown {
            base_amount: amount,
            ppn_amount,
            total_amount: amount + ppn_amount,
            ppn_rate: self.rate,
        })
    }

    /// Split a VAT-inclusive total into base and VAT.
    ///
    /// base = total / (1 + rate); VAT is the remainder so the parts always
    /// add back up to the total.
    pub fn base_from_total(&self, total: Decimal) -> Result<PpnBreakdown> {
        validate_amount("total", total)?;

        let base_amount = total / (Decimal::ONE + self.rate);
        Ok(PpnBreakdown {
            base_amount,
            ppn_amount: total - base_amount,
            total_amount: total,
            ppn_rate: self.rate,
        })
    }

    /// Net output VAT against input VAT.
    ///
    /// With a prefix only transactions whose date starts with it are counted.
    /// Input tax covers every purchase; `creditable_input_tax` narrows it to
    /// purchases that pass [`Self::credit_eligibility`].
    pub fn period_summary(&self, transactions: &[Transaction], prefix: Option<&str>) -> PpnSummary {
        let mut summary = PpnSummary::empty(prefix.map(str::to_string));

        for tx in filter_by_prefix(transactions, prefix) {
            summary.transaction_count += 1;
            summary.total_transactions += tx.amount;

            match tx.kind {
                TransactionKind::Sale => summary.output_tax += tx.ppn_amount,
                TransactionKind::Purchase => {
                    summary.input_tax += tx.ppn_amount;
                    if Self::credit_eligibility(tx) {
                        summary.creditable_input_tax += tx.ppn_amount;
                    }
                }
            }
        }

        summary.net_payable = summary.output_tax - summary.input_tax;
        summary
    }

    /// A purchase with a tax invoice number and positive VAT can be credited
    pub fn credit_eligibility(transaction: &Transaction) -> bool {
        transaction.kind == TransactionKind::Purchase
            && transaction.has_invoice_number()
            && transaction.ppn_amount > Decimal::ZERO
    }

    /// Eligibility verdict shaped for the API
    pub fn credit_report(transaction: &Transaction) -> CreditEligibility {
        CreditEligibility {
            transaction_id: transaction.id.unwrap_or_default(),
            eligible: Self::credit_eligibility(transaction),
            invoice_number: transaction.invoice_number.clone(),
            ppn_amount: transaction.ppn_amount,
        }
    }
}

impl Default for PpnCalculator {
    fn default() -> Self {
        Self {
            rate: DEFAULT_PPN_RATE,
        }
    }
}

fn filter_by_prefix<'a>(
    transactions: &'a [Transaction],
    prefix: Option<&'a str>,
) -> impl Iterator<Item = &'a Transaction> + 'a {
    transactions.iter().filter(move |tx| match prefix {
        Some(p) => tx.transaction_date.starts_with(p),
        None => true,
    })
}
