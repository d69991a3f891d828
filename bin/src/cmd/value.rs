//! Value command implementation.

use std::path::Path;

use anyhow::Result;
use sintra::{Exclusion, MarketDataSource, Pipeline, SecurityData, ValuationResult};
use sintra_report::narrative;
use sintra_valuation::{GrowthEstimate, Projection, ValuationEngine, estimate_growth};

use super::{ConfigOverrides, header};
use crate::data;

/// Show inputs, projection and fair value for a single security.
pub(crate) async fn show_valuation(
    symbol: &str,
    input: Option<&Path>,
    overrides: &ConfigOverrides,
) -> Result<()> {
    header("Security Valuation");

    let config = overrides.resolve()?;
    let pipeline = Pipeline::new(&config)?;
    let (source, _) = data::open_source(input, &[], config.fetch.periods)?;

    let security = source.fetch(&symbol.trim().to_uppercase()).await?;
    print_inputs(&security);

    let engine = pipeline.engine();
    let (valuation, growth, projection) = match valuation_detail(engine, &security) {
        Ok(detail) => detail,
        Err(reason) => {
            println!("Cannot be valued: {}\n", reason);
            return Ok(());
        }
    };

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("ASSUMPTIONS");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    println!(
        "  FCF growth:      {:>8.2}%  ({} period(s), {:.0} → {:.0})",
        valuation.growth_pct, growth.periods, growth.oldest, growth.newest
    );
    println!("  WACC:            {:>8.2}%", valuation.wacc_pct);
    println!(
        "  Terminal growth: {:>8.2}%",
        engine.config().terminal_growth * 100.0
    );
    println!();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("PROJECTION");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    println!("{:>8} {:>20} {:>20}", "Year", "Free Cash Flow", "Present Value");
    println!("{}", "─".repeat(50));
    for period in &projection.periods {
        println!(
            "{:>8} {:>20.0} {:>20.0}",
            period.period, period.cash_flow, period.present_value
        );
    }
    println!(
        "{:>8} {:>20.0} {:>20.0}",
        "Terminal", projection.terminal_value, projection.terminal_present_value
    );
    println!();

    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("FAIR VALUE");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n");
    println!("  Enterprise value:  {:>20.0}", valuation.enterprise_value);
    println!("  - Debt:            {:>20.0}", security.debt_or_zero());
    println!("  + Cash:            {:>20.0}", security.cash_or_zero());
    println!("  = Equity value:    {:>20.0}", valuation.equity_value);
    println!();
    println!("  Fair price:        {:>20.2}", valuation.fair_price);
    println!("  Market price:      {:>20.2}", valuation.price);
    println!("  Discount:          {:>19.2}%", valuation.discount_pct);
    println!();
    println!("{}\n", narrative(&valuation));

    Ok(())
}

/// Value one security and rebuild the projection behind its fair price.
///
/// A single security has no cross-section to rank against, so it is valued
/// directly rather than through the ranker.
fn valuation_detail(
    engine: &ValuationEngine,
    security: &SecurityData,
) -> std::result::Result<(ValuationResult, GrowthEstimate, Projection), Exclusion> {
    let valuation = engine.value(security)?;

    let beta = security
        .beta
        .ok_or(Exclusion::MissingInputData { field: "beta" })?;
    let current_fcf = security
        .latest_free_cash_flow()
        .ok_or(Exclusion::MissingInputData {
            field: "free_cash_flow",
        })?;
    let growth = estimate_growth(&security.free_cash_flow)?;
    let projection = engine.project(current_fcf, growth.rate, engine.discount_rate(beta))?;

    Ok((valuation, growth, projection))
}

fn print_inputs(security: &SecurityData) {
    fn show(value: Option<f64>, decimals: usize) -> String {
        value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.decimals$}"))
    }

    println!("Symbol:   {}", security.symbol);
    println!("Price:    {}", show(security.price, 2));
    println!(
        "Shares:   {}",
        security
            .shares_outstanding
            .map_or_else(|| "n/a".to_string(), |s| s.to_string())
    );
    println!("Beta:     {}", show(security.beta, 2));
    println!("Debt:     {}", show(security.total_debt, 0));
    println!("Cash:     {}", show(security.cash, 0));

    let history: Vec<String> = security
        .free_cash_flow
        .iter()
        .map(|fcf| show(*fcf, 0))
        .collect();
    println!("FCF:      [{}] (most recent first)", history.join(", "));
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn security() -> SecurityData {
        SecurityData {
            price: Some(17.5),
            shares_outstanding: Some(1_000),
            beta: Some(0.9),
            free_cash_flow: vec![Some(1_000.0), None, Some(800.0)],
            total_debt: Some(3_800.0),
            cash: Some(1_900.0),
            ..SecurityData::new("GALP.LS")
        }
    }

    #[test]
    fn test_projection_matches_valuation() {
        let engine = ValuationEngine::default();
        let (valuation, growth, projection) = valuation_detail(&engine, &security()).unwrap();

        assert_eq!(
            projection.enterprise_value.to_bits(),
            valuation.enterprise_value.to_bits()
        );
        assert_eq!(growth.periods, 1);
        assert_eq!(projection.periods.len(), 5);
    }

    #[test]
    fn test_detail_reports_exclusion() {
        let engine = ValuationEngine::default();
        let data = SecurityData {
            beta: None,
            ..security()
        };
        assert_eq!(
            valuation_detail(&engine, &data).err(),
            Some(Exclusion::MissingInputData { field: "beta" })
        );
    }
}
