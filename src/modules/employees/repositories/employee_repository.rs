use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::core::money::decimal_from_db;
use crate::core::traits::Repository;
use crate::core::{AppError, Result};
use crate::modules::employees::models::Employee;

#[derive(Debug, sqlx::FromRow)]
struct EmployeeRow {
    id: i64,
    name: String,
    status: String,
    monthly_salary: String,
    allowances: String,
    npwp: Option<String>,
    created_at: DateTime<Utc>,
}

impl EmployeeRow {
    fn into_employee(self) -> Result<Employee> {
        Ok(Employee {
            id: Some(self.id),
            name: self.name,
            status: self.status.parse()?,
            monthly_salary: decimal_from_db("monthly_salary", &self.monthly_salary)?,
            allowances: decimal_from_db("allowances", &self.allowances)?,
            npwp: self.npwp,
            created_at: Some(self.created_at),
        })
    }
}

const SELECT_EMPLOYEE: &str = r#"
    SELECT id, name, status, monthly_salary, allowances, npwp, created_at
    FROM employees
"#;

/// Repository for employee persistence
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM employees")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl Repository<Employee, i64> for EmployeeRepository {
    async fn create(&self, employee: &Employee) -> Result<Employee> {
        let id = sqlx::query(
            r#"
            INSERT INTO employees (name, status, monthly_salary, allowances, npwp, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.name)
        .bind(employee.status.to_string())
        .bind(employee.monthly_salary.to_string())
        .bind(employee.allowances.to_string())
        .bind(&employee.npwp)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::internal("Employee was created but not found"))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Employee>> {
        let row = sqlx::query_as::<_, EmployeeRow>(&format!("{} WHERE id = ?", SELECT_EMPLOYEE))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(EmployeeRow::into_employee).transpose()
    }

    async fn update(&self, id: i64, employee: &Employee) -> Result<Employee> {
        let affected = sqlx::query(
            r#"
            UPDATE employees
            SET name = ?, status = ?, monthly_salary = ?, allowances = ?, npwp = ?
            WHERE id = ?
            "#,
        )
        .bind(&employee.name)
        .bind(employee.status.to_string())
        .bind(employee.monthly_salary.to_string())
        .bind(employee.allowances.to_string())
        .bind(&employee.npwp)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Employee {}", id)));
        }

        self.find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {}", id)))
    }

    async fn delete(&self, id: i64) -> Result<()> {
        let affected = sqlx::query("DELETE FROM employees WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(AppError::not_found(format!("Employee {}", id)));
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Employee>> {
        let rows = sqlx::query_as::<_, EmployeeRow>(&format!("{} ORDER BY name, id", SELECT_EMPLOYEE))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(EmployeeRow::into_employee).collect()
    }
}
