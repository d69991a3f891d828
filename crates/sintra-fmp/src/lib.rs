//! Financial Modeling Prep (FMP) data source for Sintra.
//!
//! This crate fetches the inputs of a DCF valuation from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) stable API
//! and exposes them through [`MarketDataSource`](sintra_traits::MarketDataSource).
//!
//! # Usage
//!
//! ```rust,ignore
//! use sintra_fmp::{FmpClient, FmpSource};
//! use sintra_traits::MarketDataSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = FmpSource::new(FmpClient::from_env()?, 5);
//!
//!     // Price, beta, shares, free cash flow history, debt and cash
//!     let data = source.fetch("EDP.LS").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod source;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use source::{FmpSource, security_data};
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
