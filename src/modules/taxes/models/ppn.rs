use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// VAT split of a single amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpnBreakdown {
    pub base_amount: Decimal,
    pub ppn_amount: Decimal,
    pub total_amount: Decimal,
    pub ppn_rate: Decimal,
}

/// Output/input VAT netting over a set of transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PpnSummary {
    /// Date prefix the summary was restricted to, if any
    pub period: Option<String>,
    pub transaction_count: usize,
    /// Sum of base amounts across sales and purchases
    pub total_transactions: Decimal,
    /// VAT collected on sales
    pub output_tax: Decimal,
    /// VAT paid on purchases
    pub input_tax: Decimal,
    /// Input VAT on purchases that qualify for crediting
    pub creditable_input_tax: Decimal,
    /// Output minus input; negative is a creditable excess
    pub net_payable: Decimal,
}

impl PpnSummary {
    pub fn empty(period: Option<String>) -> Self {
        Self {
            period,
            transaction_count: 0,
            total_transactions: Decimal::ZERO,
            output_tax: Decimal::ZERO,
            input_tax: Decimal::ZERO,
            creditable_input_tax: Decimal::ZERO,
            net_payable: Decimal::ZERO,
        }
    }

    pub fn is_refundable(&self) -> bool {
        self.net_payable < Decimal::ZERO
    }
}

/// Request body for the single-amount VAT endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct PpnAmountRequest {
    pub amount: Decimal,
}

/// Input tax credit verdict for one transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreditEligibility {
    pub transaction_id: i64,
    pub eligible: bool,
    pub invoice_number: Option<String>,
    pub ppn_amount: Decimal,
}
