//! Terminal classification of one dispatched record's round trip.

use serde_json::Value;

/// Produced exactly once per record after its round trip completes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Server stored the row (201).
    Accepted,
    /// Server refused the record for a non-duplicate reason.
    Rejected { reason: String },
    /// Uniqueness conflict on `employee_id` or `email` (400 + duplicate body).
    Conflict { employee_id: i64 },
    /// The round trip itself failed: refused, timed out, or unreadable body.
    TransportFailure { cause: String },
}

/// Classify a completed HTTP response.
///
/// `record_id` is the id the client sent, used when the conflict body
/// omits one.
pub fn classify_response(record_id: Option<i64>, status: u16, body: &Value) -> Outcome {
    if status == 201 {
        return Outcome::Accepted;
    }

    let error = body.get("error").and_then(Value::as_str).unwrap_or("");
    if status == 400 && error.contains("Duplicate") {
        let employee_id = body
            .get("employee_id")
            .and_then(Value::as_i64)
            .or(record_id)
            .unwrap_or(0);
        return Outcome::Conflict { employee_id };
    }

    let reason = if error.is_empty() {
        format!("status {}: {}", status, body)
    } else {
        error.to_string()
    };
    Outcome::Rejected { reason }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_created_is_accepted() {
        let body = json!({ "message": "Employee added successfully" });
        assert_eq!(classify_response(Some(1), 201, &body), Outcome::Accepted);
    }

    #[test]
    fn test_duplicate_body_is_conflict() {
        let body = json!({ "employee_id": 7, "error": "Duplicate employee_id or email" });
        assert_eq!(
            classify_response(Some(7), 400, &body),
            Outcome::Conflict { employee_id: 7 }
        );
    }

    #[test]
    fn test_conflict_falls_back_to_sent_id() {
        let body = json!({ "error": "Duplicate employee_id or email" });
        assert_eq!(
            classify_response(Some(9), 400, &body),
            Outcome::Conflict { employee_id: 9 }
        );
    }

    #[test]
    fn test_validation_failure_is_rejected() {
        let body = json!({ "error": "Invalid data: salary: must be >= 0, got -1" });
        match classify_response(Some(1), 400, &body) {
            Outcome::Rejected { reason } => assert!(reason.contains("salary")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_unexpected_status_is_rejected() {
        let body = json!({ "error": "database error: pool closed" });
        match classify_response(Some(1), 500, &body) {
            Outcome::Rejected { reason } => assert!(reason.contains("database error")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn test_bodyless_error_keeps_status() {
        match classify_response(Some(1), 502, &json!({})) {
            Outcome::Rejected { reason } => assert!(reason.contains("502")),
            other => panic!("expected Rejected, got {:?}", other),
        }
    }
}
