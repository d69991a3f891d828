//! Narrative generation.

use sintra_traits::ValuationResult;

/// Render the summary sentence for one valued security.
///
/// A fixed template over the symbol, discount, growth and cost of capital.
/// Every figure is printed signed with one decimal, so a negative discount
/// means the market price is above fair value.
#[must_use]
pub fn narrative(valuation: &ValuationResult) -> String {
    format!(
        "{} trades at a {:.1}% discount to its estimated fair value. \
         Historical free cash flow growth is {:.1}% per year, \
         with a cost of capital (WACC) of {:.1}%. \
         Together these factors explain its position in the ranking.",
        valuation.symbol, valuation.discount_pct, valuation.growth_pct, valuation.wacc_pct
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valued(discount: f64, growth: f64, wacc: f64) -> ValuationResult {
        ValuationResult {
            symbol: "EDP.LS".to_string(),
            price: 4.0,
            fair_price: 5.0,
            discount_pct: discount,
            growth_pct: growth,
            wacc_pct: wacc,
            enterprise_value: 0.0,
            equity_value: 0.0,
        }
    }

    #[test]
    fn test_discount_sentence() {
        let text = narrative(&valued(25.04, 7.96, 8.07));
        assert_eq!(
            text,
            "EDP.LS trades at a 25.0% discount to its estimated fair value. \
             Historical free cash flow growth is 8.0% per year, \
             with a cost of capital (WACC) of 8.1%. \
             Together these factors explain its position in the ranking."
        );
    }

    #[test]
    fn test_negative_discount_keeps_sign() {
        let text = narrative(&valued(-12.34, -3.0, 6.5));
        assert!(text.starts_with("EDP.LS trades at a -12.3% discount"));
        assert!(text.contains("growth is -3.0% per year"));
    }

    #[test]
    fn test_deterministic() {
        let result = valued(10.0, 5.0, 8.0);
        assert_eq!(narrative(&result), narrative(&result));
    }
}
