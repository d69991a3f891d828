//! HTTP client for the FMP stable API.

use crate::{
    Result,
    error::FmpError,
    types::{BalanceSheet, CashFlowStatement, CompanyProfile, Period, SharesFloat},
};
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::{env, time::Duration};
use tracing::trace;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Financial Modeling Prep API client.
///
/// Only the four endpoints needed for a valuation are wrapped: company
/// profile, share count, cash flow statements and balance sheets.
#[derive(Debug, Clone)]
pub struct FmpClient {
    http: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            api_key: api_key.into(),
        }
    }

    /// Create a client from `FMP_API_KEY`, reading a `.env` file first if
    /// one exists.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::MissingApiKey`] if the variable is unset or empty.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        match env::var("FMP_API_KEY") {
            Ok(key) if !key.trim().is_empty() => Ok(Self::new(key.trim())),
            _ => Err(FmpError::MissingApiKey),
        }
    }

    /// Full URL of an endpoint, without query parameters.
    fn endpoint_url(endpoint: &str) -> String {
        format!("{FMP_BASE_URL}/{endpoint}")
    }

    /// Issue a GET request and decode the JSON body.
    ///
    /// FMP reports some failures with a 200 status and an error object in
    /// the body; those are mapped to [`FmpError::Api`].
    async fn get<T: DeserializeOwned>(&self, endpoint: &str, query: &[(&str, String)]) -> Result<T> {
        trace!(endpoint, ?query, "FMP request");

        let response = self
            .http
            .get(Self::endpoint_url(endpoint))
            .query(query)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }
        let body = response.text().await?;
        if !status.is_success() {
            return Err(FmpError::Api(format!("HTTP {status}: {body}")));
        }
        if body.contains("\"Error Message\"") {
            return Err(FmpError::Api(body));
        }

        Ok(serde_json::from_str(&body)?)
    }

    /// Company profile: price and beta.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::SymbolNotFound`] for an empty response, or the
    /// request error.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let symbol = symbol.to_uppercase();
        let profiles: Vec<CompanyProfile> =
            self.get("profile", &[("symbol", symbol.clone())]).await?;
        profiles
            .into_iter()
            .next()
            .ok_or(FmpError::SymbolNotFound(symbol))
    }

    /// Share count.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::NoData`] for an empty response, or the request
    /// error.
    pub async fn shares_float(&self, symbol: &str) -> Result<SharesFloat> {
        let symbol = symbol.to_uppercase();
        let floats: Vec<SharesFloat> = self
            .get("shares-float", &[("symbol", symbol.clone())])
            .await?;
        floats
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::NoData(format!("share count for {symbol}")))
    }

    /// Cash flow statements, most recent first, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn cash_flow(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<CashFlowStatement>> {
        self.get("cash-flow-statement", &statement_query(symbol, period, limit))
            .await
    }

    /// Balance sheets, most recent first, at most `limit` of them.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn balance_sheet(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<BalanceSheet>> {
        self.get(
            "balance-sheet-statement",
            &statement_query(symbol, period, limit),
        )
        .await
    }
}

/// Query parameters shared by the statement endpoints.
fn statement_query(symbol: &str, period: Period, limit: Option<u32>) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("symbol", symbol.to_uppercase()),
        ("period", period.as_str().to_string()),
    ];
    if let Some(limit) = limit {
        query.push(("limit", limit.to_string()));
    }
    query
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_url() {
        assert_eq!(
            FmpClient::endpoint_url("shares-float"),
            "https://financialmodelingprep.com/stable/shares-float"
        );
    }

    #[test]
    fn test_statement_query() {
        let query = statement_query("edp.ls", Period::Annual, Some(5));
        assert_eq!(
            query,
            vec![
                ("symbol", "EDP.LS".to_string()),
                ("period", "annual".to_string()),
                ("limit", "5".to_string()),
            ]
        );

        let query = statement_query("GALP.LS", Period::Quarter, None);
        assert_eq!(query.len(), 2);
        assert_eq!(query[1].1, "quarter");
    }
}
