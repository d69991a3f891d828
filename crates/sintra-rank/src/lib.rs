//! Cross-sectional ranking for sintra.
//!
//! The ranker needs every valuation of a run before it scores anything:
//! each metric is min-max normalized across the whole cross-section, then
//! the normalized columns are blended into one composite score.
//!
//! # Examples
//!
//! ```rust,ignore
//! use sintra_rank::Ranker;
//!
//! let ranking = Ranker::default().rank(valuations)?;
//! for result in &ranking.results {
//!     println!("{} {:.3}", result.symbol(), result.score_final);
//! }
//! ```

mod combiner;
mod normalize;
mod ranker;

// Re-export main types
pub use combiner::{Combiner, ScoreColumn, WeightedCombiner};
pub use normalize::{Dimension, Normalized, min_max};
pub use ranker::{Ranker, Ranking};
