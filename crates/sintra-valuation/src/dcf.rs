//! Discounted cash flow valuation engine.

use serde::{Deserialize, Serialize};
use sintra_traits::{Exclusion, SecurityData, ValuationConfig, ValuationResult};
use tracing::debug;

use crate::{capm::cost_of_equity, growth::estimate_growth};

/// One explicitly projected period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedCashFlow {
    /// Period index, starting at 1.
    pub period: u32,
    /// Projected free cash flow.
    pub cash_flow: f64,
    /// Cash flow discounted to today.
    pub present_value: f64,
}

/// Full breakdown of an enterprise value computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Explicit projection, period 1 first.
    pub periods: Vec<ProjectedCashFlow>,
    /// Gordon terminal value at the end of the horizon.
    pub terminal_value: f64,
    /// Terminal value discounted to today.
    pub terminal_present_value: f64,
    /// Sum of the discounted projection and discounted terminal value.
    pub enterprise_value: f64,
}

/// DCF valuation engine.
///
/// Projects the latest free cash flow at the estimated growth rate over the
/// configured horizon, discounts it at the CAPM cost of equity, adds a
/// discounted Gordon terminal value and bridges enterprise value to a fair
/// price per share.
///
/// # Example
///
/// ```ignore
/// use sintra_valuation::ValuationEngine;
///
/// let engine = ValuationEngine::default();
/// let ev = engine.enterprise_value(100.0, 0.05, 0.08)?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValuationEngine {
    config: ValuationConfig,
}

impl ValuationEngine {
    /// Create a new engine with the given configuration.
    #[must_use]
    pub const fn new(config: ValuationConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &ValuationConfig {
        &self.config
    }

    /// Discount rate for a given beta.
    #[must_use]
    pub fn discount_rate(&self, beta: f64) -> f64 {
        cost_of_equity(beta, &self.config)
    }

    /// Project and discount cash flows, returning the full breakdown.
    ///
    /// # Errors
    ///
    /// Returns [`Exclusion::TerminalValueDivergence`] when `wacc` does not
    /// exceed the terminal growth rate.
    pub fn project(
        &self,
        current_fcf: f64,
        growth: f64,
        wacc: f64,
    ) -> Result<Projection, Exclusion> {
        let terminal_growth = self.config.terminal_growth;
        if wacc <= terminal_growth {
            return Err(Exclusion::TerminalValueDivergence {
                wacc,
                terminal_growth,
            });
        }

        let horizon = self.config.projection_years;
        let periods: Vec<ProjectedCashFlow> = (1..=horizon)
            .map(|t| {
                let exponent = i32::try_from(t).unwrap_or(i32::MAX);
                let cash_flow = current_fcf * (1.0 + growth).powi(exponent);
                ProjectedCashFlow {
                    period: t,
                    cash_flow,
                    present_value: cash_flow / (1.0 + wacc).powi(exponent),
                }
            })
            .collect();

        let final_cash_flow = periods.last().map_or(current_fcf, |p| p.cash_flow);
        let terminal_value = final_cash_flow * (1.0 + terminal_growth) / (wacc - terminal_growth);
        let horizon_exponent = i32::try_from(horizon).unwrap_or(i32::MAX);
        let terminal_present_value = terminal_value / (1.0 + wacc).powi(horizon_exponent);

        let enterprise_value =
            periods.iter().map(|p| p.present_value).sum::<f64>() + terminal_present_value;

        Ok(Projection {
            periods,
            terminal_value,
            terminal_present_value,
            enterprise_value,
        })
    }

    /// Enterprise value of a cash flow stream.
    ///
    /// # Errors
    ///
    /// Returns [`Exclusion::TerminalValueDivergence`] when `wacc` does not
    /// exceed the terminal growth rate.
    pub fn enterprise_value(
        &self,
        current_fcf: f64,
        growth: f64,
        wacc: f64,
    ) -> Result<f64, Exclusion> {
        self.project(current_fcf, growth, wacc)
            .map(|projection| projection.enterprise_value)
    }

    /// Value one security end to end.
    ///
    /// Debt and cash default to zero when absent. Price, shares, beta and a
    /// cash flow history are required.
    ///
    /// # Errors
    ///
    /// Returns the [`Exclusion`] explaining why the security cannot be valued.
    pub fn value(&self, data: &SecurityData) -> Result<ValuationResult, Exclusion> {
        let price = data
            .price
            .filter(|p| p.is_finite() && *p > 0.0)
            .ok_or(Exclusion::MissingInputData { field: "price" })?;
        let shares = data
            .shares_outstanding
            .filter(|s| *s > 0)
            .ok_or(Exclusion::MissingInputData {
                field: "shares_outstanding",
            })?;
        let beta = data
            .beta
            .filter(|b| b.is_finite())
            .ok_or(Exclusion::MissingInputData { field: "beta" })?;
        let current_fcf = data
            .latest_free_cash_flow()
            .ok_or(Exclusion::MissingInputData {
                field: "free_cash_flow",
            })?;

        let wacc = self.discount_rate(beta);

        let growth = estimate_growth(&data.free_cash_flow)?.rate;
        if growth <= self.config.min_growth {
            return Err(Exclusion::DegenerateGrowth { growth });
        }

        let enterprise_value = self.enterprise_value(current_fcf, growth, wacc)?;
        let equity_value = enterprise_value - data.debt_or_zero() + data.cash_or_zero();
        let fair_price = equity_value / shares as f64;
        let discount_pct = (fair_price - price) / price * 100.0;

        let figures = [
            ("enterprise_value", enterprise_value),
            ("equity_value", equity_value),
            ("fair_price", fair_price),
            ("discount_pct", discount_pct),
        ];
        if let Some((field, _)) = figures.into_iter().find(|(_, v)| !v.is_finite()) {
            return Err(Exclusion::NonFiniteValuation { field });
        }

        debug!(
            symbol = %data.symbol,
            growth,
            wacc,
            fair_price,
            discount_pct,
            "valued security"
        );

        Ok(ValuationResult {
            symbol: data.symbol.clone(),
            price,
            fair_price,
            discount_pct,
            growth_pct: growth * 100.0,
            wacc_pct: wacc * 100.0,
            enterprise_value,
            equity_value,
        })
    }
}
