//! Immutable configuration values passed into each pipeline stage.

use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

use crate::{Result, SintraError};

/// Longest explicit projection horizon accepted, in periods.
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Parameters of the DCF valuation.
///
/// The cost of capital is a CAPM cost of equity,
/// `risk_free_rate + beta * market_risk_premium`, used as the full discount
/// rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValuationConfig {
    /// Risk-free rate (default: 0.025)
    pub risk_free_rate: f64,

    /// Equity market risk premium (default: 0.055)
    pub market_risk_premium: f64,

    /// Perpetual growth after the projection horizon (default: 0.02)
    pub terminal_growth: f64,

    /// Number of explicitly projected periods (default: 5)
    pub projection_years: u32,

    /// Growth rates at or below this floor exclude the security (default: -0.5)
    pub min_growth: f64,
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.025,
            market_risk_premium: 0.055,
            terminal_growth: 0.02,
            projection_years: 5,
            min_growth: -0.5,
        }
    }
}

impl ValuationConfig {
    /// Check that every parameter is usable.
    ///
    /// # Errors
    ///
    /// Returns [`SintraError::InvalidConfig`] for a horizon outside
    /// `1..=MAX_PROJECTION_YEARS` or non-finite rates.
    pub fn validate(&self) -> Result<()> {
        if self.projection_years == 0 || self.projection_years > MAX_PROJECTION_YEARS {
            return Err(SintraError::InvalidConfig(format!(
                "projection_years must be between 1 and {MAX_PROJECTION_YEARS}, got {}",
                self.projection_years
            )));
        }
        let rates = [
            ("risk_free_rate", self.risk_free_rate),
            ("market_risk_premium", self.market_risk_premium),
            ("terminal_growth", self.terminal_growth),
            ("min_growth", self.min_growth),
        ];
        for (name, value) in rates {
            if !value.is_finite() {
                return Err(SintraError::InvalidConfig(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        if self.terminal_growth <= -1.0 {
            return Err(SintraError::InvalidConfig(format!(
                "terminal_growth must be above -100%, got {}",
                self.terminal_growth
            )));
        }
        Ok(())
    }
}

/// Weights of the composite ranking score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Weight of the normalized discount (default: 0.5)
    pub discount: f64,
    /// Weight of the normalized growth (default: 0.3)
    pub growth: f64,
    /// Weight of the inverted normalized cost of capital (default: 0.2)
    pub risk: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            discount: 0.5,
            growth: 0.3,
            risk: 0.2,
        }
    }
}

impl ScoreWeights {
    /// Sum of the three weights.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.discount + self.growth + self.risk
    }
}

/// Parameters of the cross-sectional ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankConfig {
    /// Composite score weights.
    pub weights: ScoreWeights,

    /// Score assigned to every entry of a dimension whose values are all
    /// equal (default: 0.5, the midpoint of the score range)
    pub zero_range_fallback: f64,
}

impl Default for RankConfig {
    fn default() -> Self {
        Self {
            weights: ScoreWeights::default(),
            zero_range_fallback: 0.5,
        }
    }
}

impl RankConfig {
    /// Check that the weights and fallback are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SintraError::InvalidConfig`] for negative or non-finite
    /// weights, or a fallback outside [0, 1].
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("discount", self.weights.discount),
            ("growth", self.weights.growth),
            ("risk", self.weights.risk),
        ];
        for (name, w) in weights {
            if !w.is_finite() || w < 0.0 {
                return Err(SintraError::InvalidConfig(format!(
                    "{name} weight must be a non-negative number, got {w}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.zero_range_fallback) {
            return Err(SintraError::InvalidConfig(format!(
                "zero_range_fallback must lie in [0, 1], got {}",
                self.zero_range_fallback
            )));
        }
        Ok(())
    }
}

/// Settings for talking to an external data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Pause between consecutive securities, in milliseconds (default: 0)
    pub request_delay_ms: u64,

    /// Number of annual statements to request (default: 5)
    pub periods: u32,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            request_delay_ms: 0,
            periods: 5,
        }
    }
}

impl FetchConfig {
    /// Courtesy delay between fetches, if any.
    #[must_use]
    pub const fn request_delay(&self) -> Option<Duration> {
        if self.request_delay_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.request_delay_ms))
        }
    }
}

/// Complete configuration of one pipeline run.
///
/// Ranking weights are deliberately absent: they are fixed in code through
/// [`RankConfig::default`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Valuation parameters.
    pub valuation: ValuationConfig,
    /// Data source settings.
    pub fetch: FetchConfig,
}

impl PipelineConfig {
    /// Load a configuration from a JSON file. Missing keys take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid JSON, or
    /// holds invalid values.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.valuation.validate()?;
        Ok(config)
    }
}
