//! `POST /add_employee` — the single-record ingestion handler.
//!
//! Per-request flow, terminal on every branch: deserialize, validate,
//! insert through the pool, classify. Validation failures respond before
//! any connection is acquired.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde_json::{json, Value};

use employee_core::Employee;

use crate::state::AppState;
use crate::store::{EmployeeStore, StoreError};

/// Map a StoreError to an HTTP response.
fn store_err(e: StoreError) -> (StatusCode, Json<Value>) {
    let status =
        StatusCode::from_u16(e.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    let body = match e {
        StoreError::Duplicate { employee_id } => json!({
            "employee_id": employee_id,
            "error": e.to_string(),
        }),
        StoreError::Database(_) => json!({ "error": e.to_string() }),
    };
    (status, Json(body))
}

fn invalid_data(detail: impl std::fmt::Display) -> (StatusCode, Json<Value>) {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": format!("Invalid data: {}", detail) })),
    )
}

/// POST /add_employee
pub async fn add_employee(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> (StatusCode, Json<Value>) {
    // Unparseable or non-JSON bodies get the same machine-readable shape
    // as schema violations.
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return invalid_data(rejection.body_text()),
    };
    let Some(record) = body.as_object() else {
        return invalid_data("request body must be a JSON object");
    };

    let employee = match Employee::from_record(record) {
        Ok(employee) => employee,
        Err(e) => return invalid_data(e),
    };

    match EmployeeStore::insert(&state.pool, &employee).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Employee added successfully" })),
        ),
        Err(e) => store_err(e),
    }
}
