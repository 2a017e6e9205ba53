mod cli;
mod dispatcher;
mod outcome;
mod source;

use clap::Parser;
use tracing::info;

use dispatcher::{DispatchSummary, Dispatcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let args = cli::CliArgs::parse();

    let records = source::load_csv(&args.csv)?;
    info!("Loaded {} records from {}", records.len(), args.csv.display());

    let dispatcher = Dispatcher::new(&args.server, args.concurrency);
    let outcomes = dispatcher.run(records).await;

    let summary = DispatchSummary::tally(&outcomes);
    info!(
        "Done: {} accepted, {} conflicts, {} rejected, {} transport failures ({} total)",
        summary.accepted,
        summary.conflicts,
        summary.rejected,
        summary.transport_failures,
        summary.total()
    );

    Ok(())
}
