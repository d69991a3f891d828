//! Data source selection for the sintra CLI.

use std::path::Path;

use sintra::{MarketDataSource, SecurityData, Snapshot, SnapshotSource, Symbol, universe};
use sintra_fmp::{FmpClient, FmpSource};
use sintra_traits::Result;

/// Where raw security data comes from for one invocation.
#[derive(Debug)]
pub(crate) enum Source {
    /// Live Financial Modeling Prep API.
    Fmp(FmpSource),
    /// A previously frozen snapshot file.
    Snapshot(SnapshotSource),
}

impl MarketDataSource for Source {
    fn name(&self) -> &str {
        match self {
            Self::Fmp(source) => source.name(),
            Self::Snapshot(source) => source.name(),
        }
    }

    async fn fetch(&self, symbol: &str) -> Result<SecurityData> {
        match self {
            Self::Fmp(source) => source.fetch(symbol).await,
            Self::Snapshot(source) => source.fetch(symbol).await,
        }
    }
}

/// Open the requested source and resolve the symbols to run on.
///
/// With a snapshot and no explicit symbols, every captured symbol is used.
/// Without a snapshot the FMP API is used, defaulting to the PSI-20.
pub(crate) fn open_source(
    input: Option<&Path>,
    symbols: &[String],
    periods: u32,
) -> anyhow::Result<(Source, Vec<Symbol>)> {
    let requested = universe::normalize_symbols(symbols);

    match input {
        Some(path) => {
            let snapshot = Snapshot::load(path).map_err(|e| {
                anyhow::anyhow!("Failed to read snapshot {}: {}", path.display(), e)
            })?;
            let symbols = if requested.is_empty() {
                snapshot.symbols()
            } else {
                requested
            };
            Ok((Source::Snapshot(SnapshotSource::from(snapshot)), symbols))
        }
        None => {
            let client = FmpClient::from_env()?;
            let symbols = if requested.is_empty() {
                universe::psi20()
            } else {
                requested
            };
            Ok((Source::Fmp(FmpSource::new(client, periods)), symbols))
        }
    }
}
