//! Cost of capital.

use sintra_traits::ValuationConfig;

/// CAPM cost of equity: `risk_free_rate + beta * market_risk_premium`.
///
/// Used as the whole discount rate. There is no cost-of-debt leg and no
/// capital-structure weighting.
#[must_use]
pub fn cost_of_equity(beta: f64, config: &ValuationConfig) -> f64 {
    config.risk_free_rate + beta * config.market_risk_premium
}
