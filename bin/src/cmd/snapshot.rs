//! Snapshot command implementation.

use std::path::Path;

use anyhow::Result;
use sintra::{MarketDataSource, Pipeline, Snapshot};

use super::{ConfigOverrides, header};
use crate::data;

/// Fetch raw data for the given symbols and write it to a snapshot file.
pub(crate) async fn take_snapshot(
    symbols: &[String],
    output: &Path,
    overrides: &ConfigOverrides,
) -> Result<()> {
    header("Data Snapshot");

    let config = overrides.resolve()?;
    let pipeline = Pipeline::new(&config)?;
    let (source, symbols) = data::open_source(None, symbols, config.fetch.periods)?;

    println!("Fetching raw data for {} symbol(s)...", symbols.len());
    let (securities, failed) = pipeline.collect(&source, &symbols).await;

    for failure in &failed {
        println!("  skipped {:<10} {}", failure.symbol, failure.reason);
    }

    let snapshot = Snapshot::new(source.name(), securities);
    snapshot.save(output)?;

    println!(
        "\nSaved {} securities to {} ({})",
        snapshot.securities.len(),
        output.display(),
        snapshot.captured_at.format("%Y-%m-%d %H:%M UTC")
    );
    println!("Replay with: sintra rank --input {}\n", output.display());

    Ok(())
}
