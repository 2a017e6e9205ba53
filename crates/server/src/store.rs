//! Insert path for the `employees` table.
//!
//! [`EmployeeStore`] is a stateless unit struct with async methods that take
//! a `&PgPool`. The pool hands out one connection per statement and returns
//! it when the statement future completes, on success or failure alike, so
//! no handle is ever held across requests.

use sqlx::PgPool;
use thiserror::Error;
use tracing::error;

use employee_core::Employee;

/// SQLSTATE for a unique-constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Errors from employee store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// A row with this `employee_id` or `email` already exists. The database
    /// constraints arbitrate concurrent duplicates; exactly one insert wins.
    #[error("Duplicate employee_id or email")]
    Duplicate { employee_id: i32 },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl StoreError {
    /// Map to an HTTP status code for API responses.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Duplicate { .. } => 400,
            Self::Database(_) => 500,
        }
    }
}

/// Stateless insert-only store for `employees`.
pub struct EmployeeStore;

impl EmployeeStore {
    /// Insert one validated employee. Single statement, auto-commit.
    pub async fn insert(pool: &PgPool, employee: &Employee) -> Result<(), StoreError> {
        let result = sqlx::query(
            "INSERT INTO employees
             (employee_id, name, email, department, designation, salary, date_of_joining)
             VALUES ($1, $2, $3, $4, $5, $6, $7)",
        )
        .bind(employee.employee_id)
        .bind(&employee.name)
        .bind(&employee.email)
        .bind(&employee.department)
        .bind(&employee.designation)
        .bind(employee.salary)
        .bind(employee.date_of_joining)
        .execute(pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => Err(map_unique_violation(e, employee.employee_id)),
        }
    }
}

fn map_unique_violation(e: sqlx::Error, employee_id: i32) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = e {
        if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return StoreError::Duplicate { employee_id };
        }
    }
    error!("employee store database error: {}", e);
    StoreError::Database(e)
}

// ── Tests ────────────────────────────────────────────────────────────
