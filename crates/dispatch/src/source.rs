//! CSV record source.
//!
//! Boundary collaborator, not part of the dispatch core: reads the tabular
//! file, renames external column names to canonical ones, and hands the
//! rows on as raw records. Numeric columns are parsed eagerly so the wire
//! body carries JSON numbers, matching the schema the server expects.

use std::path::Path;

use anyhow::Context;
use serde_json::Value;

use employee_core::{canonical_name, RawRecord};

/// Columns whose values are integers on the wire.
const INTEGER_FIELDS: &[&str] = &["employee_id", "salary"];

/// Load every row of `path` as a raw record with canonical field names.
pub fn load_csv(path: &Path) -> anyhow::Result<Vec<RawRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .context("failed to read CSV header row")?
        .iter()
        .map(|h| canonical_name(h.trim()).map(str::to_string).unwrap_or_else(|| h.trim().to_string()))
        .collect();

    let mut records = Vec::new();
    for (i, row) in reader.records().enumerate() {
        let row = row.with_context(|| format!("failed to read CSV row {}", i + 1))?;
        let mut record = RawRecord::new();
        for (name, value) in headers.iter().zip(row.iter()) {
            record.insert(name.clone(), field_value(name, value.trim()));
        }
        records.push(record);
    }
    Ok(records)
}

/// Integer columns become JSON numbers when they parse; everything else
/// stays a string and the server's validator reports the problem.
fn field_value(name: &str, raw: &str) -> Value {
    if INTEGER_FIELDS.contains(&name) {
        if let Ok(n) = raw.parse::<i64>() {
            return Value::from(n);
        }
    }
    Value::from(raw)
}

// ── Tests ────────────────────────────────────────────────────────────
