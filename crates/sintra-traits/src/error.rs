//! Error types for the Sintra pipeline.
//!
//! Two kinds of failure exist. [`SintraError`] is fatal for the operation that
//! raised it (bad configuration, I/O, table construction). [`Exclusion`] is
//! local to one security: it removes that security from the result set and
//! the run carries on.

use thiserror::Error;

/// The main error type for Sintra operations.
#[derive(Debug, Error)]
pub enum SintraError {
    /// Error due to invalid or malformed data.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Configuration value out of its valid range.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Error from Polars operations.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// Error reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error (de)serializing JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Error fetching data from external sources.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// Error when a symbol is not known to a source.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Generic error for other cases.
    #[error("Error: {0}")]
    Other(String),
}

impl From<String> for SintraError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for SintraError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

/// A specialized Result type for Sintra operations.
pub type Result<T> = std::result::Result<T, SintraError>;

/// Reason a security was dropped from a pipeline run.
///
/// Exclusions are never retried and never abort the batch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Exclusion {
    /// A field required for valuation is absent (or non-positive where it
    /// must be positive).
    #[error("missing input data: {field}")]
    MissingInputData {
        /// Name of the missing field.
        field: &'static str,
    },

    /// Fewer than two usable free-cash-flow observations, or the oldest one
    /// is not positive, so no growth rate can be computed.
    #[error("insufficient free cash flow history ({observations} usable observations)")]
    InsufficientHistory {
        /// Number of non-null observations available.
        observations: usize,
    },

    /// Growth rate at or below the degenerate-growth floor.
    #[error("degenerate growth rate {:.2}%", .growth * 100.0)]
    DegenerateGrowth {
        /// The estimated growth rate (decimal).
        growth: f64,
    },

    /// Discount rate at or below the terminal growth rate.
    #[error(
        "terminal value diverges: wacc {:.2}% <= terminal growth {:.2}%",
        .wacc * 100.0,
        .terminal_growth * 100.0
    )]
    TerminalValueDivergence {
        /// Discount rate (decimal).
        wacc: f64,
        /// Terminal growth rate (decimal).
        terminal_growth: f64,
    },

    /// A derived figure overflowed or is not a number.
    #[error("valuation is not finite: {field}")]
    NonFiniteValuation {
        /// Name of the offending figure.
        field: &'static str,
    },

    /// The data source failed to return anything for the security.
    #[error("fetch failed: {0}")]
    FetchFailed(String),
}

impl Exclusion {
    /// Short machine-friendly label for the exclusion kind.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MissingInputData { .. } => "missing_input_data",
            Self::InsufficientHistory { .. } => "insufficient_history",
            Self::DegenerateGrowth { .. } => "degenerate_growth",
            Self::TerminalValueDivergence { .. } => "terminal_value_divergence",
            Self::NonFiniteValuation { .. } => "non_finite_valuation",
            Self::FetchFailed(_) => "fetch_failed",
        }
    }
}
