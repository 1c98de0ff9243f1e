use chrono::{Datelike, Days, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::core::money::{safe_div, validate_rate};
use crate::core::period::validate_year;
use crate::core::{AppError, Result, TaxPeriod};
use crate::modules::employees::models::Employee;
use crate::modules::reports::models::{
    DeadlineReminder, EmployeeSummary, IncomeSummary, ObligationKind, PaymentScheduleEntry,
    Priority, SptReport, SummaryKind, TaxCalculation, TaxSummaryNotice,
};
use crate::modules::taxes::models::{PpnSummary, TaxProfile};
use crate::modules::taxes::services::{Pph21Calculator, PpnCalculator};
use crate::modules::transactions::models::{Transaction, TransactionKind};

const PPN_DUE_DAY: u32 = 15;
const PPH21_DUE_DAY: u32 = 20;

/// Default corporate income tax rate (25%)
pub const DEFAULT_CORPORATE_TAX_RATE: Decimal = Decimal::from_parts(25, 0, 0, false, 2);

/// Combines the PPh 21 and PPN engines into an annual SPT report.
///
/// Works over plain slices of ledger data; it never touches storage.
#[derive(Debug, Clone)]
pub struct SptAggregator {
    pph21: Pph21Calculator,
    ppn: PpnCalculator,
    corporate_tax_rate: Decimal,
}

impl SptAggregator {
    pub fn new(
        pph21: Pph21Calculator,
        ppn: PpnCalculator,
        corporate_tax_rate: Decimal,
    ) -> Result<Self> {
        validate_rate("corporate_tax_rate", corporate_tax_rate)?;
        Ok(Self {
            pph21,
            ppn,
            corporate_tax_rate,
        })
    }

    pub fn corporate_tax_rate(&self) -> Decimal {
        self.corporate_tax_rate
    }

    /// Sales and purchase totals for transactions dated within `year`
    pub fn income_summary(&self, transactions: &[Transaction], year: i32) -> IncomeSummary {
        let period = TaxPeriod::Year(year);
        let mut summary = IncomeSummary {
            year,
            total_sales: Decimal::ZERO,
            total_sales_ppn: Decimal::ZERO,
            total_purchases: Decimal::ZERO,
            total_purchases_ppn: Decimal::ZERO,
            gross_income: Decimal::ZERO,
            business_expenses: Decimal::ZERO,
            net_income: Decimal::ZERO,
        };

        for tx in transactions
            .iter()
            .filter(|tx| period.contains_date(&tx.transaction_date))
        {
            match tx.kind {
                TransactionKind::Sale => {
                    summary.total_sales += tx.amount;
                    summary.total_sales_ppn += tx.ppn_amount;
                }
                TransactionKind::Purchase => {
                    summary.total_purchases += tx.amount;
                    summary.total_purchases_ppn += tx.ppn_amount;
                }
            }
        }

        summary.gross_income = summary.total_sales;
        summary.business_expenses = summary.total_purchases;
        summary.net_income = summary.gross_income - summary.business_expenses;
        summary
    }

    /// PPh 21 across all employees, each computed as TK/0 progressive
    pub fn employee_summary(&self, employees: &[Employee], year: i32) -> Result<EmployeeSummary> {
        let profile = TaxProfile::single();
        let months = Decimal::from(12);

        let mut total_gross_salary = Decimal::ZERO;
        let mut total_allowances = Decimal::ZERO;
        let mut total_pph21_withheld = Decimal::ZERO;

        for employee in employees {
            // calculate() validates the amounts before anything is summed
            let result = self.pph21.calculate(employee, &profile)?;
            total_gross_salary += employee.monthly_salary * months;
            total_allowances += employee.allowances * months;
            total_pph21_withheld += result.final_tax;
        }

        Ok(EmployeeSummary {
            year,
            total_employees: employees.len(),
            total_gross_salary,
            total_allowances,
            total_pph21_withheld,
            average_pph21: safe_div(total_pph21_withheld, Decimal::from(employees.len())),
        })
    }

    pub fn ppn_summary(&self, transactions: &[Transaction], year: i32) -> PpnSummary {
        let prefix = TaxPeriod::Year(year).to_string();
        self.ppn.period_summary(transactions, Some(&prefix))
    }

    /// Corporate tax on net income, less PPh 21 already withheld.
    /// Neither figure goes below zero.
    pub fn tax_calculation(
        &self,
        income: &IncomeSummary,
        employees: &EmployeeSummary,
    ) -> TaxCalculation {
        let taxable_income = income.net_income;
        let corporate_tax_payable = (taxable_income * self.corporate_tax_rate).max(Decimal::ZERO);
        let tax_paid = employees.total_pph21_withheld;

        TaxCalculation {
            taxable_income,
            corporate_tax_rate: self.corporate_tax_rate,
            corporate_tax_payable,
            tax_paid,
            net_tax_payable: (corporate_tax_payable - tax_paid).max(Decimal::ZERO),
        }
    }

    pub fn generate(
        &self,
        employees: &[Employee],
        transactions: &[Transaction],
        year: i32,
    ) -> Result<SptReport> {
        validate_year(year)?;

        let income_summary = self.income_summary(transactions, year);
        let employee_summary = self.employee_summary(employees, year)?;
        let ppn_summary = self.ppn_summary(transactions, year);
        let tax_calculation = self.tax_calculation(&income_summary, &employee_summary);

        Ok(SptReport {
            year,
            income_summary,
            employee_summary,
            ppn_summary,
            tax_calculation,
            generated_at: Utc::now(),
        })
    }

    /// Info-priority notices for the year's PPh 21 total and PPN balance
    pub fn tax_summary_notices(
        &self,
        employees: &[Employee],
        transactions: &[Transaction],
        year: i32,
    ) -> Result<Vec<TaxSummaryNotice>> {
        validate_year(year)?;

        let pph21 = self.employee_summary(employees, year)?.total_pph21_withheld;
        let ppn = self.ppn_summary(transactions, year);

        let ppn_notice = if ppn.is_refundable() {
            let excess = -ppn.net_payable;
            TaxSummaryNotice {
                kind: SummaryKind::PpnOverpaid,
                year,
                description: format!(
                    "PPN overpaid in {}: Rp {} carries forward",
                    year,
                    excess.round_dp(0)
                ),
                amount: excess,
                priority: Priority::Info,
            }
        } else {
            TaxSummaryNotice {
                kind: SummaryKind::PpnPayable,
                year,
                description: format!(
                    "PPN payable for {}: Rp {}",
                    year,
                    ppn.net_payable.round_dp(0)
                ),
                amount: ppn.net_payable,
                priority: Priority::Info,
            }
        };

        Ok(vec![
            TaxSummaryNotice {
                kind: SummaryKind::Pph21Withheld,
                year,
                description: format!("PPh 21 owed for {}: Rp {}", year, pph21.round_dp(0)),
                amount: pph21,
                priority: Priority::Info,
            },
            ppn_notice,
        ])
    }

    /// Statutory due dates for `year`: monthly PPh 21, monthly PPN, then
    /// the annual return due the following March.
    pub fn payment_schedule(year: i32) -> Result<Vec<PaymentScheduleEntry>> {
        validate_year(year)?;

        let mut schedule = Vec::with_capacity(25);

        for month in 1..=12 {
            schedule.push(PaymentScheduleEntry {
                period: TaxPeriod::Month { year, month }.to_string(),
                kind: ObligationKind::Pph21,
                due_date: date(year, month, PPH21_DUE_DAY)?,
                note: "Paid by the employer".to_string(),
            });
        }

        for month in 1..=12 {
            schedule.push(PaymentScheduleEntry {
                period: TaxPeriod::Month { year, month }.to_string(),
                kind: ObligationKind::Ppn,
                due_date: date(year, month, PPN_DUE_DAY)?,
                note: "Must be reported".to_string(),
            });
        }

        schedule.push(PaymentScheduleEntry {
            period: TaxPeriod::Year(year).to_string(),
            kind: ObligationKind::AnnualSpt,
            due_date: date(year + 1, 3, 31)?,
            note: "Must be filed".to_string(),
        });

        Ok(schedule)
    }

    /// Deadlines from `today` through `today + days_ahead`, soonest first.
    ///
    /// Deadlines within `reminder_days` are high priority. Both this year's
    /// and next year's calendars are scanned so a window that crosses
    /// December 31 still sees January deadlines.
    pub fn upcoming_deadlines(
        today: NaiveDate,
        days_ahead: u32,
        reminder_days: u32,
    ) -> Vec<DeadlineReminder> {
        let horizon = today
            .checked_add_days(Days::new(u64::from(days_ahead)))
            .unwrap_or(NaiveDate::MAX);

        let mut candidates = Vec::new();
        for year in [today.year(), today.year() + 1] {
            if let Some(deadline) = NaiveDate::from_ymd_opt(year, 3, 31) {
                candidates.push((
                    ObligationKind::AnnualSpt,
                    format!("Annual SPT for {} due", year - 1),
                    deadline,
                ));
            }
            for month in 1..=12 {
                if let Some(deadline) = NaiveDate::from_ymd_opt(year, month, PPN_DUE_DAY) {
                    candidates.push((
                        ObligationKind::Ppn,
                        format!("PPN report for {:04}-{:02}", year, month),
                        deadline,
                    ));
                }
                if let Some(deadline) = NaiveDate::from_ymd_opt(year, month, PPH21_DUE_DAY) {
                    candidates.push((
                        ObligationKind::Pph21,
                        format!("PPh 21 report for {:04}-{:02}", year, month),
                        deadline,
                    ));
                }
            }
        }

        let mut reminders: Vec<DeadlineReminder> = candidates
            .into_iter()
            .filter(|(_, _, deadline)| today <= *deadline && *deadline <= horizon)
            .map(|(kind, description, deadline)| {
                let days_until = (deadline - today).num_days();
                DeadlineReminder {
                    kind,
                    description,
                    deadline,
                    days_until,
                    priority: if days_until <= i64::from(reminder_days) {
                        Priority::High
                    } else {
                        Priority::Medium
                    },
                }
            })
            .collect();

        reminders.sort_by_key(|r| r.deadline);
        reminders
    }
}

impl Default for SptAggregator {
    fn default() -> Self {
        Self {
            pph21: Pph21Calculator::default(),
            ppn: PpnCalculator::default(),
            corporate_tax_rate: DEFAULT_CORPORATE_TAX_RATE,
        }
    }
}

fn date(year: i32, month: u32, day: u32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        AppError::validation(format!("Invalid date {:04}-{:02}-{:02}", year, month, day))
    })
}
