use rust_decimal::Decimal;

use crate::core::Result;
use crate::modules::employees::models::Employee;
use crate::modules::taxes::models::{
    BracketSlice, CalculationMethod, FilingStatus, MethodDetail, Pph21Result, RateTable,
    TaxProfile, MAX_DEPENDENTS,
};

const MONTHS_PER_YEAR: i64 = 12;

/// PPh 21 calculator for a single rate table.
///
/// Pure and synchronous: the only state is the rate table fixed at
/// construction, so one instance can be shared freely across requests.
#[derive(Debug, Clone, Default)]
pub struct Pph21Calculator {
    table: RateTable,
}

impl Pph21Calculator {
    pub fn new(table: RateTable) -> Self {
        Self { table }
    }

    pub fn rate_table(&self) -> &RateTable {
        &self.table
    }

    /// (monthly salary + allowances) x 12
    pub fn annual_gross_income(&self, employee: &Employee) -> Decimal {
        employee.monthly_income() * Decimal::from(MONTHS_PER_YEAR)
    }

    /// Total non-taxable threshold for a filing status and dependents count
    pub fn ptkp(&self, status: FilingStatus, dependents: u32) -> Decimal {
        let schedule = &self.table.ptkp;
        let spouse = if status.has_spouse() {
            schedule.spouse
        } else {
            Decimal::ZERO
        };
        let dependents = dependents.min(MAX_DEPENDENTS);

        schedule.personal + spouse + schedule.per_dependent * Decimal::from(dependents)
    }

    /// Biaya jabatan: a share of gross income, capped annually
    pub fn occupational_cost(&self, annual_gross: Decimal) -> Decimal {
        (annual_gross * self.table.occupational_cost_rate).min(self.table.occupational_cost_cap)
    }

    /// PKP, never negative
    pub fn taxable_income(&self, annual_gross: Decimal, ptkp: Decimal) -> Decimal {
        let net = annual_gross - self.occupational_cost(annual_gross);
        (net - ptkp).max(Decimal::ZERO)
    }

    /// Walk the brackets from the lowest slice up, taxing each portion at
    /// its own marginal rate.
    pub fn progressive_tax(&self, taxable_income: Decimal) -> (Decimal, Vec<BracketSlice>) {
        let mut remaining = taxable_income.max(Decimal::ZERO);
        let mut total = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for bracket in &self.table.brackets {
            if remaining <= Decimal::ZERO {
                break;
            }

            let taxable_amount = match bracket.limit {
                Some(width) => remaining.min(width),
                None => remaining,
            };
            let tax = taxable_amount * bracket.rate;

            breakdown.push(BracketSlice {
                limit: bracket.limit,
                rate: bracket.rate,
                taxable_amount,
                tax,
            });

            total += tax;
            remaining -= taxable_amount;
        }

        (total, breakdown)
    }

    /// TER rate for a filing status at the given monthly gross income
    pub fn ter_rate(&self, status: FilingStatus, monthly_gross: Decimal) -> Decimal {
        self.table
            .ter_table(status.ter_category())
            .rate_for(monthly_gross)
    }

    /// Full annual computation for one employee
    pub fn calculate(&self, employee: &Employee, profile: &TaxProfile) -> Result<Pph21Result> {
        employee.validate()?;

        let months = Decimal::from(MONTHS_PER_YEAR);
        let gross_income = self.annual_gross_income(employee);
        let occupational_cost = self.occupational_cost(gross_income);
        let net_income = gross_income - occupational_cost;
        let ptkp = self.ptkp(profile.filing_status, profile.dependents());
        let taxable_income = self.taxable_income(gross_income, ptkp);

        let (tax_amount, detail) = match profile.method {
            CalculationMethod::Progressive => {
                let (tax, breakdown) = self.progressive_tax(taxable_income);
                (tax, MethodDetail::Progressive { breakdown })
            }
            CalculationMethod::Ter if taxable_income.is_zero() => (
                Decimal::ZERO,
                MethodDetail::Ter {
                    effective_rate: Decimal::ZERO,
                },
            ),
            CalculationMethod::Ter => {
                let rate = self.ter_rate(profile.filing_status, gross_income / months);
                (
                    gross_income * rate,
                    MethodDetail::Ter {
                        effective_rate: rate,
                    },
                )
            }
        };

        let discount = if profile.apply_npwp_discount && employee.has_npwp() {
            tax_amount * self.table.npwp_discount_rate
        } else {
            Decimal::ZERO
        };
        let final_tax = tax_amount - discount;

        tracing::debug!(
            employee_id = ?employee.id,
            status = %profile.label(),
            method = %profile.method,
            %taxable_income,
            %final_tax,
            "Calculated PPh 21"
        );

        Ok(Pph21Result {
            filing_status: profile.filing_status,
            dependents: profile.dependents(),
            gross_income,
            occupational_cost,
            net_income,
            ptkp,
            taxable_income,
            tax_amount,
            monthly_tax: tax_amount / months,
            discount,
            final_tax,
            monthly_final_tax: final_tax / months,
            detail,
        })
    }
}
