//! Cross-sectional ranker.

use ndarray::Array1;
use sintra_traits::{RankConfig, RankedResult, Result, ValuationResult};
use tracing::{debug, warn};

use crate::{
    combiner::{Combiner, ScoreColumn, WeightedCombiner},
    normalize::{Dimension, min_max},
};

/// Ranked securities of one run, best first.
#[derive(Debug, Clone, Default)]
pub struct Ranking {
    /// Ranked results sorted by composite score, descending.
    pub results: Vec<RankedResult>,
    /// Dimensions whose values were all equal and fell back to a constant.
    pub degenerate: Vec<Dimension>,
}

impl Ranking {
    /// Number of ranked securities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Whether nothing was ranked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Scores and orders a complete set of valuations.
///
/// Discount and growth are min-max normalized, cost of capital is
/// normalized then inverted so a cheaper discount rate scores higher. The
/// three scores are blended with [`WeightedCombiner`]. Narratives are left
/// empty for the report stage to fill in.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankConfig,
}

impl Ranker {
    /// Create a new ranker with the given configuration.
    #[must_use]
    pub const fn new(config: RankConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RankConfig {
        &self.config
    }

    /// Rank the full cross-section.
    ///
    /// Results are sorted by composite score, descending. Equal scores keep
    /// their input order. Valuation metrics are moved over unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or a score is not
    /// finite.
    pub fn rank(&self, valuations: Vec<ValuationResult>) -> Result<Ranking> {
        self.config.validate()?;

        if valuations.is_empty() {
            return Ok(Ranking::default());
        }

        let fallback = self.config.zero_range_fallback;
        let mut degenerate = Vec::new();
        let mut columns = Vec::with_capacity(3);

        let metrics: [(Dimension, fn(&ValuationResult) -> f64); 3] = [
            (Dimension::Discount, |v| v.discount_pct),
            (Dimension::Growth, |v| v.growth_pct),
            (Dimension::Risk, |v| v.wacc_pct),
        ];

        for (dimension, metric) in metrics {
            let values: Array1<f64> = valuations.iter().map(metric).collect();
            let normalized = min_max(&values, fallback);
            if normalized.degenerate {
                warn!(
                    %dimension,
                    fallback,
                    securities = valuations.len(),
                    "zero cross-sectional range, assigning fallback score"
                );
                degenerate.push(dimension);
            }

            let scores = match dimension {
                // The fallback is assigned as is, never inverted.
                Dimension::Risk if !normalized.degenerate => normalized.scores.mapv(|s| 1.0 - s),
                _ => normalized.scores,
            };
            columns.push(ScoreColumn { dimension, scores });
        }

        let combiner = WeightedCombiner::new(self.config.weights);
        let composite = combiner.combine(&columns)?;

        let mut results: Vec<RankedResult> = valuations
            .into_iter()
            .enumerate()
            .map(|(i, valuation)| RankedResult {
                valuation,
                score_discount: columns[0].scores[i],
                score_growth: columns[1].scores[i],
                score_risk: columns[2].scores[i],
                score_final: composite[i],
                narrative: String::new(),
            })
            .collect();

        // Stable sort keeps input order among ties.
        results.sort_by(|a, b| b.score_final.total_cmp(&a.score_final));

        debug!(
            ranked = results.len(),
            combiner = combiner.name(),
            "ranked cross-section"
        );

        Ok(Ranking {
            results,
            degenerate,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sintra_traits::ScoreWeights;

    fn valuation(symbol: &str, discount: f64, growth: f64, wacc: f64) -> ValuationResult {
        ValuationResult {
            symbol: symbol.to_string(),
            price: 10.0,
            fair_price: 10.0 * (1.0 + discount / 100.0),
            discount_pct: discount,
            growth_pct: growth,
            wacc_pct: wacc,
            enterprise_value: 1_000.0,
            equity_value: 1_000.0,
        }
    }

    #[test]
    fn test_two_security_tie_keeps_input_order() {
        let ranking = Ranker::default()
            .rank(vec![
                valuation("A", 20.0, 5.0, 8.0),
                valuation("B", 10.0, 15.0, 6.0),
            ])
            .unwrap();

        let a = &ranking.results[0];
        let b = &ranking.results[1];
        assert_eq!(a.symbol(), "A");
        assert_eq!(b.symbol(), "B");

        assert_relative_eq!(a.score_discount, 1.0);
        assert_relative_eq!(a.score_growth, 0.0);
        assert_relative_eq!(a.score_risk, 0.0);
        assert_relative_eq!(b.score_discount, 0.0);
        assert_relative_eq!(b.score_growth, 1.0);
        assert_relative_eq!(b.score_risk, 1.0);

        assert_relative_eq!(a.score_final, 0.5);
        assert_relative_eq!(b.score_final, 0.5);
        assert!(ranking.degenerate.is_empty());
    }

    #[test]
    fn test_sorted_descending() {
        let ranking = Ranker::default()
            .rank(vec![
                valuation("LOW", -20.0, 1.0, 10.0),
                valuation("HIGH", 60.0, 12.0, 6.0),
                valuation("MID", 10.0, 4.0, 8.0),
            ])
            .unwrap();

        let order: Vec<&str> = ranking.results.iter().map(RankedResult::symbol).collect();
        assert_eq!(order, vec!["HIGH", "MID", "LOW"]);
        assert_relative_eq!(ranking.results[0].score_final, 1.0);
        assert_relative_eq!(ranking.results[2].score_final, 0.0);
    }

    #[test]
    fn test_equal_discounts_fall_back() {
        let ranking = Ranker::default()
            .rank(vec![
                valuation("A", 15.0, 2.0, 7.0),
                valuation("B", 15.0, 8.0, 7.5),
                valuation("C", 15.0, 5.0, 9.0),
            ])
            .unwrap();

        assert_eq!(ranking.degenerate, vec![Dimension::Discount]);
        for result in &ranking.results {
            assert_relative_eq!(result.score_discount, 0.5);
        }

        // With discount constant, order follows 0.3 * growth + 0.2 * risk.
        let order: Vec<&str> = ranking.results.iter().map(RankedResult::symbol).collect();
        assert_eq!(order, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_single_security() {
        let ranking = Ranker::default()
            .rank(vec![valuation("ONLY", 30.0, 5.0, 8.0)])
            .unwrap();

        assert_eq!(ranking.len(), 1);
        assert_eq!(ranking.degenerate.len(), 3);
        assert_relative_eq!(ranking.results[0].score_final, 0.5);
    }

    #[test]
    fn test_empty_input() {
        let ranking = Ranker::default().rank(Vec::new()).unwrap();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_valuation_untouched() {
        let input = vec![
            valuation("A", 20.0, 5.0, 8.0),
            valuation("B", 10.0, 15.0, 6.0),
        ];
        let ranking = Ranker::default().rank(input.clone()).unwrap();
        for result in &ranking.results {
            let original = input
                .iter()
                .find(|v| v.symbol == result.valuation.symbol)
                .unwrap();
            assert_eq!(&result.valuation, original);
        }
    }

    #[test]
    fn test_invalid_config() {
        let ranker = Ranker::new(RankConfig {
            weights: ScoreWeights {
                discount: f64::NAN,
                ..ScoreWeights::default()
            },
            ..RankConfig::default()
        });
        assert!(ranker.rank(vec![valuation("A", 1.0, 1.0, 1.0)]).is_err());
    }

    #[test]
    fn test_repeatable() {
        let input = vec![
            valuation("A", 12.0, 3.0, 8.0),
            valuation("B", 40.0, -5.0, 9.5),
            valuation("C", -3.0, 9.0, 6.5),
        ];
        let first = Ranker::default().rank(input.clone()).unwrap();
        let second = Ranker::default().rank(input).unwrap();
        assert_eq!(first.results, second.results);
    }
}
