//! Min-max normalization of one cross-sectional metric.

use ndarray::Array1;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A ranked dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    /// Discount of fair value to price; higher is better.
    Discount,
    /// Free cash flow growth; higher is better.
    Growth,
    /// Cost of capital; lower is better, so its score is inverted.
    Risk,
}

impl Dimension {
    /// Stable name used in logs and score columns.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Discount => "discount",
            Self::Growth => "growth",
            Self::Risk => "risk",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized values of one metric.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    /// Scores in [0, 1], or the fallback everywhere when degenerate.
    pub scores: Array1<f64>,
    /// True when every input value was equal.
    pub degenerate: bool,
}

/// Scale values onto [0, 1] with `(v - min) / (max - min)`.
///
/// When the range is zero (a single value, or all values equal) nothing can
/// be told apart and every entry receives `fallback`.
#[must_use]
pub fn min_max(values: &Array1<f64>, fallback: f64) -> Normalized {
    if values.is_empty() {
        return Normalized {
            scores: Array1::zeros(0),
            degenerate: false,
        };
    }

    let min = values.fold(f64::INFINITY, |acc, &v| acc.min(v));
    let max = values.fold(f64::NEG_INFINITY, |acc, &v| acc.max(v));
    let range = max - min;

    if range <= 0.0 {
        return Normalized {
            scores: Array1::from_elem(values.len(), fallback),
            degenerate: true,
        };
    }

    Normalized {
        scores: values.mapv(|v| (v - min) / range),
        degenerate: false,
    }
}
