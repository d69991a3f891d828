//! Blending of normalized score columns into a composite.

use ndarray::Array1;
use sintra_traits::{Result, ScoreWeights};

use crate::normalize::Dimension;

/// Normalized scores of one dimension across the cross-section.
#[derive(Debug, Clone)]
pub struct ScoreColumn {
    /// Which dimension the scores belong to
    pub dimension: Dimension,

    /// Scores in [0, 1], one per security, in input order
    pub scores: Array1<f64>,
}

/// Combines score columns into one composite score per security.
///
/// All implementations must be thread-safe (Send + Sync).
///
/// # Examples
///
/// ```rust,no_run
/// use sintra_rank::{Combiner, ScoreColumn};
/// use ndarray::Array1;
///
/// struct FirstOnly;
///
/// impl Combiner for FirstOnly {
///     fn combine(&self, columns: &[ScoreColumn]) -> sintra_traits::Result<Array1<f64>> {
///         Ok(columns[0].scores.clone())
///     }
///
///     fn name(&self) -> &str {
///         "first_only"
///     }
/// }
/// ```
pub trait Combiner: Send + Sync {
    /// Combine score columns into a composite vector.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No columns are provided
    /// - Columns have mismatched lengths
    /// - Combination produces invalid values (NaN, Inf)
    fn combine(&self, columns: &[ScoreColumn]) -> Result<Array1<f64>>;

    /// Name of this combination strategy.
    fn name(&self) -> &str;
}

/// Fixed-weight linear combiner.
///
/// `final = w_discount * discount + w_growth * growth + w_risk * risk`
#[derive(Debug, Clone, Copy, Default)]
pub struct WeightedCombiner {
    weights: ScoreWeights,
}

impl WeightedCombiner {
    /// Create a new combiner with the given weights.
    #[must_use]
    pub const fn new(weights: ScoreWeights) -> Self {
        Self { weights }
    }

    /// Get the weights.
    #[must_use]
    pub const fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    const fn weight(&self, dimension: Dimension) -> f64 {
        match dimension {
            Dimension::Discount => self.weights.discount,
            Dimension::Growth => self.weights.growth,
            Dimension::Risk => self.weights.risk,
        }
    }
}

impl Combiner for WeightedCombiner {
    fn combine(&self, columns: &[ScoreColumn]) -> Result<Array1<f64>> {
        let Some(first) = columns.first() else {
            return Err("Cannot combine zero score columns".into());
        };
        let n_assets = first.scores.len();

        for column in columns {
            if column.scores.len() != n_assets {
                return Err(format!(
                    "Score column '{}' has {} entries, expected {}",
                    column.dimension,
                    column.scores.len(),
                    n_assets
                )
                .into());
            }
        }

        let mut composite = Array1::zeros(n_assets);
        for column in columns {
            composite.scaled_add(self.weight(column.dimension), &column.scores);
        }

        if composite.iter().any(|x: &f64| !x.is_finite()) {
            return Err("Combination produced non-finite values".into());
        }

        Ok(composite)
    }

    fn name(&self) -> &str {
        "weighted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn column(dimension: Dimension, scores: Vec<f64>) -> ScoreColumn {
        ScoreColumn {
            dimension,
            scores: Array1::from_vec(scores),
        }
    }

    #[test]
    fn test_default_weights() {
        let combiner = WeightedCombiner::default();
        let columns = vec![
            column(Dimension::Discount, vec![1.0, 0.0]),
            column(Dimension::Growth, vec![0.0, 1.0]),
            column(Dimension::Risk, vec![0.0, 1.0]),
        ];

        let result = combiner.combine(&columns).unwrap();
        assert_relative_eq!(result[0], 0.5);
        assert_relative_eq!(result[1], 0.5);
    }

    #[test]
    fn test_custom_weights() {
        let combiner = WeightedCombiner::new(ScoreWeights {
            discount: 1.0,
            growth: 0.0,
            risk: 0.0,
        });
        let columns = vec![
            column(Dimension::Discount, vec![0.2, 0.8]),
            column(Dimension::Growth, vec![1.0, 0.0]),
        ];

        let result = combiner.combine(&columns).unwrap();
        assert_relative_eq!(result[0], 0.2);
        assert_relative_eq!(result[1], 0.8);
    }

    #[test]
    fn test_mismatched_lengths() {
        let combiner = WeightedCombiner::default();
        let columns = vec![
            column(Dimension::Discount, vec![1.0, 0.0]),
            column(Dimension::Growth, vec![1.0]),
        ];
        assert!(combiner.combine(&columns).is_err());
    }

    #[test]
    fn test_empty_columns() {
        assert!(WeightedCombiner::default().combine(&[]).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let columns = vec![column(Dimension::Discount, vec![f64::NAN])];
        assert!(WeightedCombiner::default().combine(&columns).is_err());
    }
}
