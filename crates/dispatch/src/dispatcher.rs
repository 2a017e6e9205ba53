//! Concurrent fan-out of employee records to the ingestion server.
//!
//! Every record gets one independent `POST /add_employee`; all requests run
//! interleaved on the runtime and the run joins on the full set before
//! returning. One [`Outcome`] per record, in input order, no matter how the
//! completions interleave. Transport failures are caught per record and
//! never abort the batch.

use std::time::Duration;

use futures::future::join_all;
use futures::StreamExt;
use serde_json::Value;
use tracing::{error, info, warn};

use employee_core::RawRecord;

use crate::outcome::{classify_response, Outcome};

/// Per-request timeout. Expiry surfaces as a `TransportFailure`.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Dispatcher {
    http: reqwest::Client,
    endpoint: String,
    /// Bound on in-flight requests; `None` dispatches everything at once.
    concurrency: Option<usize>,
}

impl Dispatcher {
    pub fn new(base_url: &str, concurrency: Option<usize>) -> Self {
        let endpoint = format!("{}/add_employee", base_url.trim_end_matches('/'));
        Self {
            http: reqwest::Client::new(),
            endpoint,
            concurrency,
        }
    }

    /// Dispatch every record and wait for all round trips to finish.
    ///
    /// Returns one outcome per record, index-aligned with the input.
    pub async fn run(&self, records: Vec<RawRecord>) -> Vec<Outcome> {
        let sends = records.into_iter().enumerate().map(|(row, record)| async move {
            let employee_id = record.get("employee_id").and_then(Value::as_i64);
            info!("Processing row {} (employee_id {:?})", row, employee_id);
            let outcome = self.send_record(employee_id, &record).await;
            log_outcome(row, employee_id, &outcome);
            (row, outcome)
        });

        let mut indexed: Vec<(usize, Outcome)> = match self.concurrency {
            None => join_all(sends).await,
            Some(limit) => {
                futures::stream::iter(sends)
                    .buffer_unordered(limit.max(1))
                    .collect()
                    .await
            }
        };

        indexed.sort_by_key(|(row, _)| *row);
        indexed.into_iter().map(|(_, outcome)| outcome).collect()
    }

    async fn send_record(&self, employee_id: Option<i64>, record: &RawRecord) -> Outcome {
        let response = match self
            .http
            .post(&self.endpoint)
            .json(record)
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                return Outcome::TransportFailure {
                    cause: e.to_string(),
                }
            }
        };

        let status = response.status().as_u16();
        let body: Value = match response.json().await {
            Ok(body) => body,
            Err(e) => {
                return Outcome::TransportFailure {
                    cause: format!("malformed response body: {}", e),
                }
            }
        };

        classify_response(employee_id, status, &body)
    }
}

fn log_outcome(row: usize, employee_id: Option<i64>, outcome: &Outcome) {
    match outcome {
        Outcome::Accepted => info!("Success: row {} (employee_id {:?})", row, employee_id),
        Outcome::Conflict { employee_id } => {
            warn!("Conflict: employee_id {} already exists", employee_id)
        }
        Outcome::Rejected { reason } => {
            error!("Failed to send row {} (employee_id {:?}): {}", row, employee_id, reason)
        }
        Outcome::TransportFailure { cause } => {
            error!("Request failed for row {} (employee_id {:?}): {}", row, employee_id, cause)
        }
    }
}

/// Tally of a finished run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct DispatchSummary {
    pub accepted: usize,
    pub rejected: usize,
    pub conflicts: usize,
    pub transport_failures: usize,
}

impl DispatchSummary {
    pub fn tally(outcomes: &[Outcome]) -> Self {
        let mut summary = Self::default();
        for outcome in outcomes {
            match outcome {
                Outcome::Accepted => summary.accepted += 1,
                Outcome::Rejected { .. } => summary.rejected += 1,
                Outcome::Conflict { .. } => summary.conflicts += 1,
                Outcome::TransportFailure { .. } => summary.transport_failures += 1,
            }
        }
        summary
    }

    pub fn total(&self) -> usize {
        self.accepted + self.rejected + self.conflicts + self.transport_failures
    }
}

// ── Tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashSet;
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    fn make_record(id: i64) -> RawRecord {
        let Value::Object(map) = json!({
            "employee_id": id,
            "name": format!("Employee {}", id),
            "email": format!("e{}@x.com", id),
            "department": "Eng",
            "designation": "Dev",
            "salary": 50000,
            "date_of_joining": "2024-01-01",
        }) else {
            unreachable!()
        };
        map
    }

    /// Stub ingestion endpoint: first sight of an id is a 201, any repeat
    /// is the duplicate-conflict 400.
    async fn stub_add_employee(
        State(seen): State<Arc<Mutex<HashSet<i64>>>>,
        Json(body): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let id = body["employee_id"].as_i64().unwrap_or(0);
        let first_time = seen.lock().unwrap().insert(id);
        if first_time {
            (
                StatusCode::CREATED,
                Json(json!({ "message": "Employee added successfully" })),
            )
        } else {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "employee_id": id, "error": "Duplicate employee_id or email" })),
            )
        }
    }

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route("/add_employee", post(stub_add_employee))
            .with_state(Arc::new(Mutex::new(HashSet::new())));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn test_distinct_records_all_accepted() {
        let base_url = spawn_stub().await;
        let dispatcher = Dispatcher::new(&base_url, None);
        let records = (1..=5).map(make_record).collect();

        let outcomes = dispatcher.run(records).await;

        assert_eq!(outcomes.len(), 5);
        assert!(outcomes.iter().all(|o| *o == Outcome::Accepted));
        let summary = DispatchSummary::tally(&outcomes);
        assert_eq!(summary.accepted, 5);
        assert_eq!(summary.total(), 5);
    }

    #[tokio::test]
    async fn test_same_id_twice_yields_exactly_one_conflict() {
        let base_url = spawn_stub().await;
        let dispatcher = Dispatcher::new(&base_url, None);
        let records = vec![make_record(1), make_record(1)];

        let outcomes = dispatcher.run(records).await;

        let summary = DispatchSummary::tally(&outcomes);
        assert_eq!(summary.accepted, 1);
        assert_eq!(summary.conflicts, 1);
        assert!(outcomes.contains(&Outcome::Conflict { employee_id: 1 }));
    }

    #[tokio::test]
    async fn test_concurrency_bound_preserves_record_order() {
        let base_url = spawn_stub().await;
        let dispatcher = Dispatcher::new(&base_url, Some(2));
        let records = (1..=8).map(make_record).collect();

        let outcomes = dispatcher.run(records).await;

        assert_eq!(outcomes.len(), 8);
        assert_eq!(DispatchSummary::tally(&outcomes).accepted, 8);
    }

    #[tokio::test]
    async fn test_unreachable_server_reports_every_outcome() {
        // Nothing listens on the bound-then-dropped port.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dispatcher = Dispatcher::new(&format!("http://{}", addr), None);
        let records = (1..=3).map(make_record).collect();

        let outcomes = dispatcher.run(records).await;

        assert_eq!(outcomes.len(), 3);
        for outcome in &outcomes {
            assert!(
                matches!(outcome, Outcome::TransportFailure { .. }),
                "expected TransportFailure, got {:?}",
                outcome
            );
        }
    }
}
