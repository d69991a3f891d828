#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # sintra
//!
//! DCF fair-value ranking for equity universes.
//!
//! sintra is an umbrella crate that re-exports all sintra sub-crates and
//! provides the [`Pipeline`] that wires them together.
//!
//! ## Quick Start
//!
//! ```ignore
//! use sintra::{Pipeline, PipelineConfig};
//! use sintra::fmp::{FmpClient, FmpSource};
//!
//! # async fn example() -> sintra::Result<()> {
//! let config = PipelineConfig::default();
//! let pipeline = Pipeline::new(&config)?;
//! let source = FmpSource::new(FmpClient::from_env()?, config.fetch.periods);
//!
//! let report = pipeline.run(&source, &sintra::universe::psi20()).await?;
//! for result in &report.results {
//!     println!("{}", result.narrative);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! Data flows strictly forward:
//!
//! 1. A **source** supplies raw price, share, beta, cash flow, debt and cash data
//! 2. The **valuation engine** estimates growth and cost of capital and values
//!    each security independently
//! 3. The **ranker** normalizes the complete cross-section and blends the
//!    scores
//! 4. The **report** stage writes a narrative per security and builds the
//!    valuation table
//!
//! A security that cannot be valued is excluded with a reason; the run never
//! aborts because of one security.

/// Version information for the sintra crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod pipeline;
pub mod universe;

pub use pipeline::{ExcludedSecurity, Pipeline, PipelineReport};

/// Core types and the data source trait.
pub mod traits {
    pub use sintra_traits::*;
}

// Re-export core types at top level for convenience
pub use sintra_traits::{
    Exclusion, MarketDataSource, PipelineConfig, RankConfig, RankedResult, Result, SecurityData,
    SintraError, Snapshot, SnapshotSource, Symbol, ValuationConfig, ValuationResult,
};

/// Growth estimation, cost of capital and DCF valuation.
///
/// # Example
///
/// ```ignore
/// use sintra::valuation::{ValuationEngine, estimate_growth};
///
/// let growth = estimate_growth(&[Some(110.0), Some(100.0)])?.rate;
/// let ev = ValuationEngine::default().enterprise_value(110.0, growth, 0.08)?;
/// ```
pub mod valuation {
    pub use sintra_valuation::*;
}

/// Cross-sectional normalization and ranking.
pub mod rank {
    pub use sintra_rank::*;
}

/// Narratives, the valuation table and exports.
pub mod report {
    pub use sintra_report::*;
}

/// Financial Modeling Prep (FMP) data source.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
pub mod fmp {
    pub use sintra_fmp::*;
}

/// Prelude module for convenient imports.
///
/// ```ignore
/// use sintra::prelude::*;
/// ```
pub mod prelude {
    pub use crate::traits::*;
    pub use crate::{Pipeline, PipelineReport};
    pub use sintra_rank::Ranker;
    pub use sintra_valuation::ValuationEngine;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_error_types() {
        let _result: Result<()> = Ok(());
        let _error: SintraError = SintraError::InvalidData("test".to_string());
    }
}
