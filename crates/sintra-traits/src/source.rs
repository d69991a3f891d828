//! Market data source abstraction.
//!
//! A [`MarketDataSource`] turns a security identifier into [`SecurityData`].
//! Sources may return partial records; the pipeline decides what is usable.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, future::Future, path::Path};

use crate::{Result, SecurityData, SintraError, Symbol};

/// Supplier of raw per-security data.
///
/// Implementations own their timeouts and cancellation. A failure for one
/// symbol must not poison later calls.
///
/// # Example
///
/// ```no_run
/// use sintra_traits::{MarketDataSource, Result, SecurityData};
///
/// struct Constant;
///
/// impl MarketDataSource for Constant {
///     fn name(&self) -> &str {
///         "constant"
///     }
///
///     async fn fetch(&self, symbol: &str) -> Result<SecurityData> {
///         Ok(SecurityData {
///             price: Some(10.0),
///             ..SecurityData::new(symbol)
///         })
///     }
/// }
/// ```
pub trait MarketDataSource {
    /// Returns the name of this source, used in logs.
    fn name(&self) -> &str;

    /// Fetch everything known about one security.
    ///
    /// # Errors
    ///
    /// Returns an error when nothing at all could be retrieved. Missing
    /// individual fields are reported as `None` instead.
    fn fetch(&self, symbol: &str) -> impl Future<Output = Result<SecurityData>> + Send;
}

/// A frozen set of raw security data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the data was captured.
    pub captured_at: DateTime<Utc>,
    /// Name of the source the data came from.
    pub source: String,
    /// The captured records, in request order.
    pub securities: Vec<SecurityData>,
}

impl Snapshot {
    /// Create a snapshot stamped with the current time.
    #[must_use]
    pub fn new(source: impl Into<String>, securities: Vec<SecurityData>) -> Self {
        Self {
            captured_at: Utc::now(),
            source: source.into(),
            securities,
        }
    }

    /// Read a snapshot from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Write the snapshot as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let text = serde_json::to_string_pretty(self)?;
        std::fs::write(path, text)?;
        Ok(())
    }

    /// Symbols in capture order.
    #[must_use]
    pub fn symbols(&self) -> Vec<Symbol> {
        self.securities.iter().map(|s| s.symbol.clone()).collect()
    }
}

/// In-memory source serving previously captured data.
///
/// Replaying the same snapshot always yields the same pipeline output.
#[derive(Debug, Clone, Default)]
pub struct SnapshotSource {
    name: String,
    data: HashMap<Symbol, SecurityData>,
}

impl SnapshotSource {
    /// Build a source from records. Later duplicates replace earlier ones.
    #[must_use]
    pub fn new(securities: impl IntoIterator<Item = SecurityData>) -> Self {
        let data = securities
            .into_iter()
            .map(|s| (s.symbol.to_uppercase(), s))
            .collect();
        Self {
            name: "snapshot".to_string(),
            data,
        }
    }

    /// Number of securities held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the source holds no data.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl From<Snapshot> for SnapshotSource {
    fn from(snapshot: Snapshot) -> Self {
        let mut source = Self::new(snapshot.securities);
        source.name = format!("snapshot:{}", snapshot.source);
        source
    }
}

impl MarketDataSource for SnapshotSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, symbol: &str) -> Result<SecurityData> {
        self.data
            .get(&symbol.to_uppercase())
            .cloned()
            .ok_or_else(|| SintraError::SymbolNotFound(symbol.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<SecurityData> {
        vec![
            SecurityData {
                price: Some(4.1),
                beta: Some(0.8),
                shares_outstanding: Some(1_000),
                free_cash_flow: vec![Some(110.0), Some(100.0)],
                ..SecurityData::new("EDP.LS")
            },
            SecurityData::new("CTT.LS"),
        ]
    }

    #[tokio::test]
    async fn test_snapshot_source_fetch() {
        let source = SnapshotSource::new(sample());
        assert_eq!(source.len(), 2);

        let edp = source.fetch("edp.ls").await.unwrap();
        assert_eq!(edp.price, Some(4.1));

        let missing = source.fetch("BCP.LS").await;
        assert!(matches!(missing, Err(SintraError::SymbolNotFound(_))));
    }

    #[test]
    fn test_snapshot_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "sintra-snapshot-{}.json",
            std::process::id()
        ));
        let snapshot = Snapshot::new("test", sample());
        snapshot.save(&path).unwrap();

        let loaded = Snapshot::load(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded, snapshot);
        assert_eq!(loaded.symbols(), vec!["EDP.LS", "CTT.LS"]);
    }

    #[test]
    fn test_source_name_from_snapshot() {
        let source = SnapshotSource::from(Snapshot::new("fmp", sample()));
        assert_eq!(source.name(), "snapshot:fmp");
    }
}
