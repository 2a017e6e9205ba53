//! Employee schema: the validated record type and the checks that gate it.
//!
//! [`Employee`] only exists in validated form. The single way to build one
//! from untrusted input is [`Employee::from_record`], which renames nothing
//! (callers canonicalize field names first, see [`canonical_name`]) and
//! enforces every field constraint before the value can travel further.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;

/// Untyped record as produced by a record source, keyed by field name.
pub type RawRecord = Map<String, Value>;

/// External (human) column names paired with their canonical snake_case names.
pub const EXTERNAL_FIELD_NAMES: &[(&str, &str)] = &[
    ("Employee ID", "employee_id"),
    ("Name", "name"),
    ("Email", "email"),
    ("Department", "department"),
    ("Designation", "designation"),
    ("Salary", "salary"),
    ("Date of Joining", "date_of_joining"),
];

/// Map an external column name to its canonical field name.
///
/// Names already in canonical form pass through unchanged; unknown names
/// return `None` so the caller can decide whether to drop or keep them.
pub fn canonical_name(external: &str) -> Option<&'static str> {
    EXTERNAL_FIELD_NAMES
        .iter()
        .find_map(|(ext, canon)| (*ext == external || *canon == external).then_some(*canon))
}

/// A fully validated employee record.
///
/// Immutable by convention: constructed only through [`Employee::from_record`],
/// never mutated afterward, and the only shape the store layer accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub employee_id: i32,
    pub name: String,
    pub email: String,
    pub department: String,
    pub designation: String,
    pub salary: i32,
    pub date_of_joining: NaiveDate,
}

impl Employee {
    /// Validate a raw record (canonical field names) into an `Employee`.
    ///
    /// Pure and deterministic; safe to call concurrently. Fails on the first
    /// violated constraint with the field path and reason.
    pub fn from_record(record: &RawRecord) -> Result<Employee, ValidationError> {
        let employee_id = require_int(record, "employee_id")?;
        if employee_id < 1 {
            return Err(ValidationError::new(
                "employee_id",
                format!("must be >= 1, got {}", employee_id),
            ));
        }
        let employee_id = i32::try_from(employee_id)
            .map_err(|_| ValidationError::new("employee_id", "out of range for a 32-bit id"))?;

        let name = require_str(record, "name")?;
        if name.trim().is_empty() {
            return Err(ValidationError::new("name", "must not be empty"));
        }

        let email = require_str(record, "email")?;
        if !is_valid_email(&email) {
            return Err(ValidationError::new(
                "email",
                format!("'{}' is not a valid email address", email),
            ));
        }

        let department = require_str(record, "department")?;
        let designation = require_str(record, "designation")?;

        let salary = require_int(record, "salary")?;
        if salary < 0 {
            return Err(ValidationError::new(
                "salary",
                format!("must be >= 0, got {}", salary),
            ));
        }
        let salary = i32::try_from(salary)
            .map_err(|_| ValidationError::new("salary", "out of range for a 32-bit integer"))?;

        let date_raw = require_str(record, "date_of_joining")?;
        let date_of_joining = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d").map_err(|_| {
            ValidationError::new(
                "date_of_joining",
                format!("'{}' is not a valid YYYY-MM-DD date", date_raw),
            )
        })?;

        Ok(Employee {
            employee_id,
            name,
            email,
            department,
            designation,
            salary,
            date_of_joining,
        })
    }
}

fn require_str(record: &RawRecord, field: &str) -> Result<String, ValidationError> {
    match record.get(field) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ValidationError::new(
            field,
            format!("expected a string, got {}", json_type_name(other)),
        )),
        None => Err(ValidationError::missing(field)),
    }
}

fn require_int(record: &RawRecord, field: &str) -> Result<i64, ValidationError> {
    match record.get(field) {
        Some(Value::Number(n)) => n.as_i64().ok_or_else(|| {
            ValidationError::new(field, format!("'{}' is not a whole number", n))
        }),
        Some(other) => Err(ValidationError::new(
            field,
            format!("expected an integer, got {}", json_type_name(other)),
        )),
        None => Err(ValidationError::missing(field)),
    }
}

fn json_type_name(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Syntax-only email check: one `@`, non-empty local part, dotted domain,
/// no whitespace. Deliverability is not our problem.
fn is_valid_email(s: &str) -> bool {
    if s.contains(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

// ── Tests ────────────────────────────────────────────────────────────
