use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::taxes::models::PpnSummary;

/// Consolidated annual tax-liability report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SptReport {
    pub year: i32,
    pub income_summary: IncomeSummary,
    pub employee_summary: EmployeeSummary,
    pub ppn_summary: PpnSummary,
    pub tax_calculation: TaxCalculation,
    pub generated_at: DateTime<Utc>,
}

/// Business income for the year, from the transaction ledger
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeSummary {
    pub year: i32,
    pub total_sales: Decimal,
    pub total_sales_ppn: Decimal,
    pub total_purchases: Decimal,
    pub total_purchases_ppn: Decimal,
    /// Sales total
    pub gross_income: Decimal,
    /// Purchases total; every purchase is treated as a business expense
    pub business_expenses: Decimal,
    pub net_income: Decimal,
}

/// PPh 21 withheld across all employees.
///
/// Every employee is computed as single with no dependents under the
/// progressive method, whatever their actual situation. Totals therefore
/// approximate, rather than reproduce, what was actually withheld.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSummary {
    pub year: i32,
    pub total_employees: usize,
    /// Annual base salaries
    pub total_gross_salary: Decimal,
    /// Annual allowances
    pub total_allowances: Decimal,
    pub total_pph21_withheld: Decimal,
    /// Zero when there are no employees
    pub average_pph21: Decimal,
}

/// Corporate income tax, credited with PPh 21 withheld
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxCalculation {
    pub taxable_income: Decimal,
    pub corporate_tax_rate: Decimal,
    pub corporate_tax_payable: Decimal,
    pub tax_paid: Decimal,
    pub net_tax_payable: Decimal,
}
