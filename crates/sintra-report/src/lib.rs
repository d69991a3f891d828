//! Presentation of sintra rankings.
//!
//! The valuation table is the single hand-off artifact of a run: one row per
//! ranked security, best first, with the raw metrics, the three normalized
//! scores, the composite score and a generated narrative.
//!
//! - [`narrative`]: fixed-template summary sentence per security
//! - [`table`]: table rows, polars DataFrame, CSV and JSON export
//! - [`text`]: fixed-width terminal rendering
//!
//! # Example
//!
//! ```rust,ignore
//! use sintra_report::{ValuationTable, narrative};
//!
//! for result in &mut ranking.results {
//!     result.narrative = narrative(&result.valuation);
//! }
//! let mut table = ValuationTable::from_results(&ranking.results)?;
//! table.write_csv(std::io::stdout())?;
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod narrative;
pub mod table;
pub mod text;

// Re-export key types
pub use narrative::narrative;
pub use table::{ExportFormat, TableRow, ValuationTable, columns};
pub use text::render_table;
