//! Discounted-cash-flow valuation for sintra.
//!
//! This crate turns raw security data into a fair value per share:
//! - Growth: compound free cash flow growth over the full history span
//! - Cost of capital: CAPM cost of equity used as the discount rate
//! - DCF: explicit projection, Gordon terminal value, equity bridge
//!
//! Every function is pure. A security that cannot be valued yields an
//! [`Exclusion`](sintra_traits::Exclusion) naming the reason.
//!
//! # Example
//!
//! ```rust,ignore
//! use sintra_valuation::ValuationEngine;
//!
//! let engine = ValuationEngine::default();
//! match engine.value(&security) {
//!     Ok(result) => println!("{} fair value {:.2}", result.symbol, result.fair_price),
//!     Err(reason) => println!("excluded: {reason}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod capm;
pub mod dcf;
pub mod growth;

// Re-export key types
pub use capm::cost_of_equity;
pub use dcf::{ProjectedCashFlow, Projection, ValuationEngine};
pub use growth::{GrowthEstimate, estimate_growth};
