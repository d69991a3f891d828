//! Data types for FMP API responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports.
    #[default]
    Annual,
    /// Quarterly reports.
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Company profile from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Current price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Beta against the market.
    #[serde(default)]
    pub beta: Option<f64>,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: Option<f64>,
    /// Reporting currency.
    #[serde(default)]
    pub currency: Option<String>,
}

/// Share count data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SharesFloat {
    /// Ticker symbol.
    pub symbol: String,
    /// Observation date.
    #[serde(default)]
    pub date: Option<String>,
    /// Free-floating shares.
    #[serde(default)]
    pub float_shares: Option<f64>,
    /// Total shares outstanding.
    #[serde(default)]
    pub outstanding_shares: Option<f64>,
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Filing date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    #[serde(default)]
    pub period: Option<String>,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure.
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Free cash flow.
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

impl CashFlowStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Filing date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    #[serde(default)]
    pub period: Option<String>,
    /// Cash and cash equivalents.
    #[serde(default)]
    pub cash_and_cash_equivalents: Option<f64>,
    /// Total debt.
    #[serde(default)]
    pub total_debt: Option<f64>,
}

impl BalanceSheet {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profile() {
        let json = r#"[{"symbol":"EDP.LS","price":3.85,"beta":0.62,"marketCap":16000000000,
            "companyName":"EDP - Energias de Portugal, S.A.","currency":"EUR","isin":"PTEDP0AM0009"}]"#;
        let profiles: Vec<CompanyProfile> = serde_json::from_str(json).unwrap();
        assert_eq!(profiles[0].price, Some(3.85));
        assert_eq!(profiles[0].beta, Some(0.62));
        assert_eq!(profiles[0].currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_parse_cash_flow_with_null() {
        let json = r#"[{"date":"2024-12-31","symbol":"EDP.LS","period":"FY","freeCashFlow":null},
                      {"date":"2023-12-31","symbol":"EDP.LS","period":"FY","freeCashFlow":-512000000}]"#;
        let statements: Vec<CashFlowStatement> = serde_json::from_str(json).unwrap();
        assert_eq!(statements[0].free_cash_flow, None);
        assert_eq!(statements[1].free_cash_flow, Some(-512_000_000.0));
        assert_eq!(
            statements[1].parsed_date(),
            NaiveDate::from_ymd_opt(2023, 12, 31)
        );
    }

    #[test]
    fn test_parse_balance_sheet_missing_fields() {
        let json = r#"[{"date":"2024-12-31","symbol":"BCP.LS"}]"#;
        let sheets: Vec<BalanceSheet> = serde_json::from_str(json).unwrap();
        assert_eq!(sheets[0].total_debt, None);
        assert_eq!(sheets[0].cash_and_cash_equivalents, None);
    }

    #[test]
    fn test_period_as_str() {
        assert_eq!(Period::Annual.as_str(), "annual");
        assert_eq!(Period::Quarter.as_str(), "quarter");
    }
}
