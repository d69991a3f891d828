//! Compound growth of a free cash flow history.

use serde::{Deserialize, Serialize};
use sintra_traits::Exclusion;

/// Compound growth rate derived from a cash flow history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GrowthEstimate {
    /// Growth per period (decimal, 0.08 for 8%).
    pub rate: f64,
    /// Number of periods spanned, one less than the usable observations.
    pub periods: usize,
    /// Most recent usable observation.
    pub newest: f64,
    /// Oldest usable observation.
    pub oldest: f64,
}

/// Estimate compound growth from observations ordered most recent first.
///
/// Gaps are dropped, then the series is treated as one geometric step
/// between its newest and oldest values:
///
/// `rate = (newest / oldest)^(1 / n) - 1`, with `n = observations - 1`.
///
/// Negative rates are returned as is; deciding whether they are too low to
/// value is the caller's concern.
///
/// # Errors
///
/// Returns [`Exclusion::InsufficientHistory`] when fewer than two
/// observations remain, the oldest one is not positive, or the rate is not
/// a real number (a negative newest value over an even root).
pub fn estimate_growth(series: &[Option<f64>]) -> Result<GrowthEstimate, Exclusion> {
    let values: Vec<f64> = series.iter().flatten().copied().collect();
    let insufficient = Exclusion::InsufficientHistory {
        observations: values.len(),
    };

    let (Some(&newest), Some(&oldest)) = (values.first(), values.last()) else {
        return Err(insufficient);
    };
    if values.len() < 2 || oldest <= 0.0 {
        return Err(insufficient);
    }

    let periods = values.len() - 1;
    let rate = (newest / oldest).powf(1.0 / periods as f64) - 1.0;
    if !rate.is_finite() {
        return Err(insufficient);
    }

    Ok(GrowthEstimate {
        rate,
        periods,
        newest,
        oldest,
    })
}
