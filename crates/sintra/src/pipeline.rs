//! End-to-end valuation pipeline.
//!
//! Fetch and valuation run per security, one after another. Ranking is a
//! barrier over the complete set of valuations, and narratives are written
//! once the scores exist.

use serde::Serialize;
use sintra_rank::{Dimension, Ranker};
use sintra_report::narrative;
use sintra_traits::{
    Exclusion, FetchConfig, MarketDataSource, PipelineConfig, RankConfig, RankedResult, Result,
    SecurityData, Symbol,
};
use sintra_valuation::ValuationEngine;
use tracing::{debug, info, warn};

/// A security dropped from a run, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedSecurity {
    /// Security identifier.
    pub symbol: Symbol,
    /// Why it was dropped.
    #[serde(serialize_with = "serialize_reason")]
    pub reason: Exclusion,
}

fn serialize_reason<S: serde::Serializer>(
    reason: &Exclusion,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&reason.to_string())
}

/// Outcome of a pipeline run.
#[derive(Debug, Clone, Default)]
pub struct PipelineReport {
    /// Ranked securities, best first, narratives filled in.
    pub results: Vec<RankedResult>,
    /// Securities that could not be fetched or valued, in request order.
    pub excluded: Vec<ExcludedSecurity>,
    /// Dimensions that fell back to a constant score.
    pub degenerate: Vec<Dimension>,
}

impl PipelineReport {
    /// Look up a ranked security by symbol.
    #[must_use]
    pub fn get(&self, symbol: &str) -> Option<&RankedResult> {
        self.results
            .iter()
            .find(|r| r.symbol().eq_ignore_ascii_case(symbol))
    }

    /// Why a security was excluded, if it was.
    #[must_use]
    pub fn exclusion(&self, symbol: &str) -> Option<&Exclusion> {
        self.excluded
            .iter()
            .find(|e| e.symbol.eq_ignore_ascii_case(symbol))
            .map(|e| &e.reason)
    }
}

/// Fetch → value → rank → narrate.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    engine: ValuationEngine,
    ranker: Ranker,
    fetch: FetchConfig,
}

impl Pipeline {
    /// Create a pipeline with the default ranking weights.
    ///
    /// # Errors
    ///
    /// Returns an error if the valuation configuration is invalid.
    pub fn new(config: &PipelineConfig) -> Result<Self> {
        config.valuation.validate()?;
        Ok(Self {
            engine: ValuationEngine::new(config.valuation.clone()),
            ranker: Ranker::default(),
            fetch: config.fetch.clone(),
        })
    }

    /// Replace the ranking configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn with_rank_config(mut self, config: RankConfig) -> Result<Self> {
        config.validate()?;
        self.ranker = Ranker::new(config);
        Ok(self)
    }

    /// The valuation engine used for every security.
    #[must_use]
    pub const fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// Fetch raw data for every symbol, in order.
    ///
    /// Failing symbols are returned as [`Exclusion::FetchFailed`] instead of
    /// aborting. When a request delay is configured it is awaited between
    /// consecutive symbols.
    pub async fn collect<S: MarketDataSource>(
        &self,
        source: &S,
        symbols: &[Symbol],
    ) -> (Vec<SecurityData>, Vec<ExcludedSecurity>) {
        let mut fetched = Vec::with_capacity(symbols.len());
        let mut excluded = Vec::new();

        for (i, symbol) in symbols.iter().enumerate() {
            if i > 0
                && let Some(delay) = self.fetch.request_delay()
            {
                tokio::time::sleep(delay).await;
            }

            match source.fetch(symbol).await {
                Ok(data) => fetched.push(data),
                Err(e) => {
                    warn!(symbol = %symbol, source = source.name(), error = %e, "fetch failed");
                    excluded.push(ExcludedSecurity {
                        symbol: symbol.clone(),
                        reason: Exclusion::FetchFailed(e.to_string()),
                    });
                }
            }
        }

        (fetched, excluded)
    }

    /// Value, rank and narrate already-fetched data.
    ///
    /// Pure: the same input always yields the same report.
    ///
    /// # Errors
    ///
    /// Returns an error only if ranking fails as a whole; individual
    /// securities are excluded instead.
    pub fn evaluate(&self, securities: &[SecurityData]) -> Result<PipelineReport> {
        let mut valuations = Vec::with_capacity(securities.len());
        let mut excluded = Vec::new();

        for data in securities {
            match self.engine.value(data) {
                Ok(valuation) => valuations.push(valuation),
                Err(reason) => {
                    debug!(symbol = %data.symbol, kind = reason.kind(), %reason, "excluded");
                    excluded.push(ExcludedSecurity {
                        symbol: data.symbol.clone(),
                        reason,
                    });
                }
            }
        }

        let ranking = self.ranker.rank(valuations)?;
        let mut results = ranking.results;
        for result in &mut results {
            result.narrative = narrative(&result.valuation);
        }

        Ok(PipelineReport {
            results,
            excluded,
            degenerate: ranking.degenerate,
        })
    }

    /// Run the whole pipeline against a source.
    ///
    /// An empty ranking is a valid outcome.
    ///
    /// # Errors
    ///
    /// Returns an error only if ranking fails as a whole.
    pub async fn run<S: MarketDataSource>(
        &self,
        source: &S,
        symbols: &[Symbol],
    ) -> Result<PipelineReport> {
        info!(
            source = source.name(),
            symbols = symbols.len(),
            "starting valuation run"
        );

        let (fetched, mut fetch_failures) = self.collect(source, symbols).await;
        let mut report = self.evaluate(&fetched)?;

        // Keep exclusions in request order.
        fetch_failures.append(&mut report.excluded);
        fetch_failures.sort_by_key(|e| {
            symbols
                .iter()
                .position(|s| s.eq_ignore_ascii_case(&e.symbol))
                .unwrap_or(usize::MAX)
        });
        report.excluded = fetch_failures;

        info!(
            ranked = report.results.len(),
            excluded = report.excluded.len(),
            "valuation run finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use sintra_traits::{SintraError, SnapshotSource};

    fn security(symbol: &str, price: f64, beta: f64, fcf: &[f64]) -> SecurityData {
        SecurityData {
            price: Some(price),
            shares_outstanding: Some(1_000),
            beta: Some(beta),
            free_cash_flow: fcf.iter().copied().map(Some).collect(),
            total_debt: Some(500.0),
            cash: Some(100.0),
            ..SecurityData::new(symbol)
        }
    }

    fn universe() -> Vec<SecurityData> {
        vec![
            security("EDP.LS", 4.0, 0.6, &[300.0, 280.0, 250.0]),
            security("GALP.LS", 15.0, 1.1, &[900.0, 1_000.0, 700.0]),
            SecurityData {
                beta: None,
                ..security("BCP.LS", 0.5, 1.3, &[50.0, 40.0])
            },
            security("CTT.LS", 3.5, 0.9, &[20.0, 60.0]),
            security("NOS.LS", 4.2, 0.7, &[120.0, 110.0, 115.0, 100.0]),
        ]
    }

    #[test]
    fn test_evaluate_excludes_and_ranks() {
        let pipeline = Pipeline::default();
        let report = pipeline.evaluate(&universe()).unwrap();

        assert_eq!(report.results.len(), 3);
        assert_eq!(
            report.exclusion("BCP.LS"),
            Some(&Exclusion::MissingInputData { field: "beta" })
        );
        assert!(matches!(
            report.exclusion("CTT.LS"),
            Some(Exclusion::DegenerateGrowth { .. })
        ));

        for pair in report.results.windows(2) {
            assert!(pair[0].score_final >= pair[1].score_final);
        }
        for result in &report.results {
            assert!(result.narrative.starts_with(result.symbol()));
            assert!((0.0..=1.0).contains(&result.score_final));
        }
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let pipeline = Pipeline::default();
        let first = pipeline.evaluate(&universe()).unwrap();
        let second = pipeline.evaluate(&universe()).unwrap();

        assert_eq!(first.results, second.results);
        for (a, b) in first.results.iter().zip(&second.results) {
            assert_eq!(a.score_final.to_bits(), b.score_final.to_bits());
        }
    }

    #[test]
    fn test_ranked_metrics_match_valuation() {
        let pipeline = Pipeline::default();
        let data = universe();
        let report = pipeline.evaluate(&data).unwrap();

        for result in &report.results {
            let raw = data.iter().find(|d| d.symbol == result.symbol()).unwrap();
            let valuation = pipeline.engine().value(raw).unwrap();
            assert_eq!(result.valuation, valuation);
        }
    }

    #[test]
    fn test_empty_input_is_valid() {
        let report = Pipeline::default().evaluate(&[]).unwrap();
        assert!(report.results.is_empty());
        assert!(report.excluded.is_empty());
    }

    #[test]
    fn test_single_survivor_gets_fallback_scores() {
        let report = Pipeline::default()
            .evaluate(&[security("EDP.LS", 4.0, 0.6, &[300.0, 250.0])])
            .unwrap();

        assert_eq!(report.results.len(), 1);
        assert_eq!(report.degenerate.len(), 3);
        assert_relative_eq!(report.results[0].score_final, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.valuation.projection_years = 0;
        assert!(matches!(
            Pipeline::new(&config),
            Err(SintraError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_run_against_snapshot_source() {
        let source = SnapshotSource::new(universe());
        let symbols: Vec<Symbol> = ["EDP.LS", "UNKNOWN.LS", "GALP.LS", "BCP.LS", "NOS.LS"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let report = Pipeline::default().run(&source, &symbols).await.unwrap();

        assert_eq!(report.results.len(), 3);
        assert!(report.get("edp.ls").is_some());
        assert!(report.get("CTT.LS").is_none());

        let excluded: Vec<&str> = report.excluded.iter().map(|e| e.symbol.as_str()).collect();
        assert_eq!(excluded, vec!["UNKNOWN.LS", "BCP.LS"]);
        assert!(matches!(
            report.exclusion("UNKNOWN.LS"),
            Some(Exclusion::FetchFailed(_))
        ));
    }

    #[test]
    fn test_overflowing_security_does_not_abort_batch() {
        let mut data = universe();
        data.push(security("HUGE.LS", 4.0, 0.8, &[1e306, 1e300]));

        let report = Pipeline::default().evaluate(&data).unwrap();

        assert_eq!(report.results.len(), 3);
        assert!(report.get("HUGE.LS").is_none());
        assert!(matches!(
            report.exclusion("HUGE.LS"),
            Some(Exclusion::NonFiniteValuation { .. })
        ));
        for result in &report.results {
            assert!(result.score_final.is_finite());
        }
    }

    #[tokio::test]
    async fn test_exclusion_order_ignores_symbol_case() {
        let stored: Vec<SecurityData> = universe()
            .into_iter()
            .map(|mut s| {
                s.symbol = s.symbol.to_lowercase();
                s
            })
            .collect();
        let source = SnapshotSource::new(stored);
        let symbols: Vec<Symbol> = ["BCP.LS", "MISSING.LS", "CTT.LS", "EDP.LS"]
            .iter()
            .map(|s| s.to_string())
            .collect();

        let report = Pipeline::default().run(&source, &symbols).await.unwrap();

        let excluded: Vec<String> = report
            .excluded
            .iter()
            .map(|e| e.symbol.to_uppercase())
            .collect();
        assert_eq!(excluded, vec!["BCP.LS", "MISSING.LS", "CTT.LS"]);
    }

    #[tokio::test]
    async fn test_run_matches_evaluate() {
        let data = universe();
        let symbols: Vec<Symbol> = data.iter().map(|d| d.symbol.clone()).collect();
        let pipeline = Pipeline::default();

        let from_source = pipeline
            .run(&SnapshotSource::new(data.clone()), &symbols)
            .await
            .unwrap();
        let direct = pipeline.evaluate(&data).unwrap();

        assert_eq!(from_source.results, direct.results);
    }

    #[tokio::test]
    async fn test_collect_with_delay() {
        let config = PipelineConfig {
            fetch: FetchConfig {
                request_delay_ms: 1,
                ..FetchConfig::default()
            },
            ..PipelineConfig::default()
        };
        let pipeline = Pipeline::new(&config).unwrap();
        let symbols: Vec<Symbol> = vec!["EDP.LS".into(), "NOS.LS".into()];

        let (fetched, excluded) = pipeline
            .collect(&SnapshotSource::new(universe()), &symbols)
            .await;
        assert_eq!(fetched.len(), 2);
        assert!(excluded.is_empty());
    }
}
