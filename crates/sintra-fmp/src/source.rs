//! [`MarketDataSource`] backed by the FMP API.

use sintra_traits::{MarketDataSource, SecurityData, SintraError};
use tracing::{debug, warn};

use crate::{
    client::FmpClient,
    error::FmpError,
    types::{BalanceSheet, CashFlowStatement, CompanyProfile, Period, SharesFloat},
};

/// Data source fetching valuation inputs from Financial Modeling Prep.
///
/// For each symbol the profile, share count, cash flow statements and
/// balance sheets are requested concurrently. Individual endpoint failures
/// leave the corresponding fields empty; only a symbol for which every
/// endpoint fails is reported as an error.
#[derive(Debug, Clone)]
pub struct FmpSource {
    client: FmpClient,
    periods: u32,
}

impl FmpSource {
    /// Create a source requesting `periods` annual statements per symbol.
    #[must_use]
    pub const fn new(client: FmpClient, periods: u32) -> Self {
        Self { client, periods }
    }

    /// Number of annual statements requested.
    #[must_use]
    pub const fn periods(&self) -> u32 {
        self.periods
    }
}

fn ok_or_warn<T>(symbol: &str, what: &str, result: crate::Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            warn!(symbol, endpoint = what, error = %e, "FMP request failed");
            None
        }
    }
}

impl MarketDataSource for FmpSource {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn fetch(&self, symbol: &str) -> sintra_traits::Result<SecurityData> {
        let limit = Some(self.periods);
        let (profile, shares, cash_flows, balances) = tokio::join!(
            self.client.profile(symbol),
            self.client.shares_float(symbol),
            self.client.cash_flow(symbol, Period::Annual, limit),
            self.client.balance_sheet(symbol, Period::Annual, Some(1)),
        );

        if profile.is_err() && shares.is_err() && cash_flows.is_err() && balances.is_err() {
            return Err(match profile {
                Err(FmpError::SymbolNotFound(s)) => SintraError::SymbolNotFound(s),
                Err(e) => e.into(),
                Ok(_) => SintraError::DataFetch(format!("no data for {symbol}")),
            });
        }

        let data = security_data(
            symbol,
            ok_or_warn(symbol, "profile", profile).as_ref(),
            ok_or_warn(symbol, "shares-float", shares).as_ref(),
            &ok_or_warn(symbol, "cash-flow-statement", cash_flows).unwrap_or_default(),
            &ok_or_warn(symbol, "balance-sheet-statement", balances).unwrap_or_default(),
        );

        debug!(
            symbol,
            observations = data.free_cash_flow.len(),
            "fetched from FMP"
        );
        Ok(data)
    }
}

/// Assemble [`SecurityData`] from FMP responses.
///
/// Statements are ordered newest first by filing date; undated ones sort
/// last. Debt and cash come
/// from the latest balance sheet. Non-positive prices and share counts are
/// treated as absent.
#[must_use]
pub fn security_data(
    symbol: &str,
    profile: Option<&CompanyProfile>,
    shares: Option<&SharesFloat>,
    cash_flows: &[CashFlowStatement],
    balances: &[BalanceSheet],
) -> SecurityData {
    let mut cash_flows: Vec<&CashFlowStatement> = cash_flows.iter().collect();
    cash_flows.sort_by_key(|c| std::cmp::Reverse(c.parsed_date()));

    let latest_balance = balances.iter().max_by_key(|b| b.parsed_date());

    SecurityData {
        symbol: symbol.to_uppercase(),
        price: profile.and_then(|p| p.price).filter(|p| *p > 0.0),
        shares_outstanding: shares
            .and_then(|s| s.outstanding_shares)
            .filter(|s| s.is_finite() && *s >= 1.0)
            .map(|s| s.round() as u64),
        beta: profile.and_then(|p| p.beta),
        free_cash_flow: cash_flows.iter().map(|c| c.free_cash_flow).collect(),
        total_debt: latest_balance.and_then(|b| b.total_debt),
        cash: latest_balance.and_then(|b| b.cash_and_cash_equivalents),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cash_flow(date: &str, fcf: Option<f64>) -> CashFlowStatement {
        CashFlowStatement {
            date: date.to_string(),
            symbol: "GALP.LS".to_string(),
            period: Some("FY".to_string()),
            operating_cash_flow: None,
            capital_expenditure: None,
            free_cash_flow: fcf,
        }
    }

    fn balance(date: &str, debt: f64, cash: f64) -> BalanceSheet {
        BalanceSheet {
            date: date.to_string(),
            symbol: "GALP.LS".to_string(),
            period: Some("FY".to_string()),
            cash_and_cash_equivalents: Some(cash),
            total_debt: Some(debt),
        }
    }

    #[test]
    fn test_security_data_assembly() {
        let profile = CompanyProfile {
            symbol: "GALP.LS".to_string(),
            company_name: None,
            price: Some(17.5),
            beta: Some(0.9),
            market_cap: None,
            currency: Some("EUR".to_string()),
        };
        let shares = SharesFloat {
            symbol: "GALP.LS".to_string(),
            date: None,
            float_shares: None,
            outstanding_shares: Some(753_580_000.0),
        };
        let flows = vec![
            cash_flow("2022-12-31", Some(800.0)),
            cash_flow("2024-12-31", Some(1_000.0)),
            cash_flow("2023-12-31", None),
        ];
        let sheets = vec![
            balance("2023-12-31", 4_000.0, 1_500.0),
            balance("2024-12-31", 3_800.0, 1_900.0),
        ];

        let data = security_data("galp.ls", Some(&profile), Some(&shares), &flows, &sheets);

        assert_eq!(data.symbol, "GALP.LS");
        assert_eq!(data.price, Some(17.5));
        assert_eq!(data.beta, Some(0.9));
        assert_eq!(data.shares_outstanding, Some(753_580_000));
        assert_eq!(
            data.free_cash_flow,
            vec![Some(1_000.0), None, Some(800.0)]
        );
        assert_eq!(data.total_debt, Some(3_800.0));
        assert_eq!(data.cash, Some(1_900.0));
    }

    #[test]
    fn test_security_data_without_responses() {
        let data = security_data("BCP.LS", None, None, &[], &[]);
        assert_eq!(data, SecurityData::new("BCP.LS"));
    }

    #[test]
    fn test_non_positive_price_is_absent() {
        let profile = CompanyProfile {
            symbol: "X".to_string(),
            company_name: None,
            price: Some(0.0),
            beta: None,
            market_cap: None,
            currency: None,
        };
        let data = security_data("X", Some(&profile), None, &[], &[]);
        assert_eq!(data.price, None);
    }

    #[test]
    fn test_source_periods() {
        let source = FmpSource::new(FmpClient::new("key"), 7);
        assert_eq!(source.periods(), 7);
        assert_eq!(source.name(), "fmp");
    }
}
