//! Data model shared by every pipeline stage.
//!
//! Data flows strictly forward: [`SecurityData`] is what a source returns,
//! [`ValuationResult`] is what the valuation engine derives from it and
//! [`RankedResult`] adds the cross-sectional scores and the narrative.

use serde::{Deserialize, Serialize};

/// A security identifier.
///
/// Typically an exchange-qualified ticker such as "EDP.LS".
pub type Symbol = String;

/// Raw per-security data as supplied by a [`MarketDataSource`](crate::MarketDataSource).
///
/// Every field except the symbol may be absent. Absent debt and cash are
/// read as zero; absent price, shares, beta or cash flow history exclude the
/// security from valuation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SecurityData {
    /// Security identifier.
    pub symbol: Symbol,
    /// Current market price per share.
    #[serde(default)]
    pub price: Option<f64>,
    /// Shares outstanding.
    #[serde(default)]
    pub shares_outstanding: Option<u64>,
    /// Equity beta against the market.
    #[serde(default)]
    pub beta: Option<f64>,
    /// Free cash flow history, most recent period first. `None` marks a gap.
    #[serde(default)]
    pub free_cash_flow: Vec<Option<f64>>,
    /// Total debt from the latest balance sheet.
    #[serde(default)]
    pub total_debt: Option<f64>,
    /// Cash and cash equivalents from the latest balance sheet.
    #[serde(default)]
    pub cash: Option<f64>,
}

impl SecurityData {
    /// Create an empty record for a symbol.
    #[must_use]
    pub fn new(symbol: impl Into<Symbol>) -> Self {
        Self {
            symbol: symbol.into(),
            ..Self::default()
        }
    }

    /// Total debt, defaulting to zero when absent.
    #[must_use]
    pub fn debt_or_zero(&self) -> f64 {
        self.total_debt.unwrap_or(0.0)
    }

    /// Cash balance, defaulting to zero when absent.
    #[must_use]
    pub fn cash_or_zero(&self) -> f64 {
        self.cash.unwrap_or(0.0)
    }

    /// Most recent non-null free cash flow observation.
    #[must_use]
    pub fn latest_free_cash_flow(&self) -> Option<f64> {
        self.free_cash_flow.iter().flatten().copied().next()
    }
}

/// Outcome of a successful DCF valuation of one security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Security identifier.
    pub symbol: Symbol,
    /// Current market price per share.
    pub price: f64,
    /// DCF fair value per share.
    pub fair_price: f64,
    /// `(fair - price) / price * 100`.
    pub discount_pct: f64,
    /// Compound free cash flow growth, in percent.
    pub growth_pct: f64,
    /// Discount rate (cost of capital), in percent.
    pub wacc_pct: f64,
    /// Enterprise value: discounted projection plus discounted terminal value.
    pub enterprise_value: f64,
    /// Enterprise value less debt plus cash.
    pub equity_value: f64,
}

/// A valuation with its cross-sectional scores and narrative.
///
/// The wrapped [`ValuationResult`] is carried over untouched from the
/// valuation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedResult {
    /// Raw valuation metrics.
    #[serde(flatten)]
    pub valuation: ValuationResult,
    /// Min-max normalized discount, in [0, 1].
    pub score_discount: f64,
    /// Min-max normalized growth, in [0, 1].
    pub score_growth: f64,
    /// One minus the min-max normalized cost of capital, in [0, 1].
    pub score_risk: f64,
    /// Weighted composite of the three scores.
    pub score_final: f64,
    /// Human-readable summary.
    pub narrative: String,
}

impl RankedResult {
    /// Security identifier.
    #[must_use]
    pub fn symbol(&self) -> &str {
        &self.valuation.symbol
    }
}
