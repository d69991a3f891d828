#![doc(issue_tracker_base_url = "https://github.com/factordynamics/sintra/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types for the Sintra valuation pipeline.
//!
//! This crate holds the data model shared by every stage of the pipeline
//! (raw security data, valuation results, ranked results), the error and
//! exclusion taxonomy, the immutable configuration values and the
//! [`MarketDataSource`] trait through which raw data enters the pipeline.

/// The version of the sintra-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod config;
pub mod error;
pub mod source;
pub mod types;

// Re-exports
pub use config::{
    FetchConfig, MAX_PROJECTION_YEARS, PipelineConfig, RankConfig, ScoreWeights, ValuationConfig,
};
pub use error::{Exclusion, Result, SintraError};
pub use source::{MarketDataSource, Snapshot, SnapshotSource};
pub use types::{RankedResult, SecurityData, Symbol, ValuationResult};
