use std::path::PathBuf;

use clap::Parser;

/// Reads employee records from a CSV file and fans them out concurrently
/// to the ingestion server.
#[derive(Parser, Debug)]
#[command(name = "employee-dispatch", about = "Concurrent employee record dispatcher")]
pub struct CliArgs {
    /// Path to the employee CSV file
    #[arg(long, default_value = "employee_data.csv")]
    pub csv: PathBuf,

    /// Base URL of the ingestion server
    #[arg(long, default_value = "http://127.0.0.1:8080", env = "SERVER_URL")]
    pub server: String,

    /// Bound on in-flight requests (unbounded when not set)
    #[arg(long)]
    pub concurrency: Option<usize>,
}
