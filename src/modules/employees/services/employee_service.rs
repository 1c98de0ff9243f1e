use std::sync::Arc;

use chrono::{Datelike, Utc};
use serde::Serialize;
use tracing::info;

use crate::core::traits::{Ledger, Repository};
use crate::core::{AppError, Result, TaxPeriod};
use crate::modules::employees::models::{Employee, EmployeeRequest};
use crate::modules::employees::repositories::EmployeeRepository;
use crate::modules::settings::SettingsService;
use crate::modules::taxes::models::{Pph21Request, Pph21Result, TaxRecord};

/// A PPh 21 computation, plus the saved record when one was requested
#[derive(Debug, Clone, Serialize)]
pub struct Pph21Calculation {
    pub employee_id: i64,
    pub result: Pph21Result,
    pub record: Option<TaxRecord>,
}

/// Service for employee business logic
pub struct EmployeeService {
    repo: EmployeeRepository,
    ledger: Arc<dyn Ledger>,
    settings: Arc<SettingsService>,
}

impl EmployeeService {
    pub fn new(
        repo: EmployeeRepository,
        ledger: Arc<dyn Ledger>,
        settings: Arc<SettingsService>,
    ) -> Self {
        Self {
            repo,
            ledger,
            settings,
        }
    }

    pub async fn create_employee(&self, request: EmployeeRequest) -> Result<Employee> {
        let employee = request.into_employee()?;
        let created = self.repo.create(&employee).await?;

        info!(employee_id = ?created.id, "Employee created");
        Ok(created)
    }

    pub async fn get_employee(&self, id: i64) -> Result<Employee> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {}", id)))
    }

    pub async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.repo.list().await
    }

    pub async fn update_employee(&self, id: i64, request: EmployeeRequest) -> Result<Employee> {
        let employee = request.into_employee()?;
        let updated = self.repo.update(id, &employee).await?;

        info!(employee_id = id, "Employee updated");
        Ok(updated)
    }

    /// Delete an employee; their tax records stay, detached from the employee
    pub async fn delete_employee(&self, id: i64) -> Result<()> {
        self.repo.delete(id).await?;
        info!(employee_id = id, "Employee deleted");
        Ok(())
    }

    /// Run PPh 21 for one employee at the current settings.
    ///
    /// With `save` the result is persisted as a tax record for the requested
    /// period, or the current year when none is given.
    pub async fn calculate_pph21(&self, id: i64, request: Pph21Request) -> Result<Pph21Calculation> {
        let employee = self
            .ledger
            .get_employee(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {}", id)))?;

        let profile = request.profile()?;
        let period = match request.period.as_deref() {
            Some(raw) => raw.parse::<TaxPeriod>()?,
            None => TaxPeriod::Year(Utc::now().year()),
        };

        let settings = self.settings.current().await?;
        let result = settings.pph21_calculator().calculate(&employee, &profile)?;

        let record = if request.save {
            let record = TaxRecord::from_pph21(id, period, &result);
            let saved = self.ledger.create_tax_record(&record).await?;
            info!(
                employee_id = id,
                tax_record_id = ?saved.id,
                period = %period,
                final_tax = %saved.tax_amount,
                "PPh 21 result saved"
            );
            Some(saved)
        } else {
            None
        };

        Ok(Pph21Calculation {
            employee_id: id,
            result,
            record,
        })
    }

    /// Tax records for an existing employee
    pub async fn tax_records(&self, id: i64) -> Result<Vec<TaxRecord>> {
        self.get_employee(id).await?;
        self.ledger.list_tax_records_for_employee(id).await
    }
}
