//! The valuation table and its exports.

use polars::prelude::*;
use serde::{Deserialize, Serialize};
use sintra_traits::{RankedResult, Result, SintraError};
use std::{fmt, io::Write, str::FromStr};

/// Column names of the valuation table.
pub mod columns {
    /// Security identifier.
    pub const SYMBOL: &str = "Symbol";
    /// Current price.
    pub const PRICE: &str = "Price";
    /// DCF fair price per share.
    pub const FAIR_PRICE: &str = "Fair Price";
    /// Discount of fair value to price.
    pub const DISCOUNT: &str = "Discount (%)";
    /// Free cash flow growth.
    pub const GROWTH: &str = "FCF Growth (%)";
    /// Cost of capital.
    pub const WACC: &str = "WACC (%)";
    /// Normalized discount.
    pub const SCORE_DISCOUNT: &str = "Score Discount";
    /// Normalized growth.
    pub const SCORE_GROWTH: &str = "Score Growth";
    /// Inverted normalized cost of capital.
    pub const SCORE_RISK: &str = "Score Risk";
    /// Composite score.
    pub const SCORE_FINAL: &str = "Score Final";
    /// Generated narrative.
    pub const ANALYSIS: &str = "Analysis";

    /// All columns, in table order.
    pub const ALL: [&str; 11] = [
        SYMBOL,
        PRICE,
        FAIR_PRICE,
        DISCOUNT,
        GROWTH,
        WACC,
        SCORE_DISCOUNT,
        SCORE_GROWTH,
        SCORE_RISK,
        SCORE_FINAL,
        ANALYSIS,
    ];
}

/// Decimals kept for prices and percentages.
const VALUE_DECIMALS: i32 = 2;

/// Decimals kept for scores.
const SCORE_DECIMALS: i32 = 4;

fn round(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// One row of the valuation table, already rounded for presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Security identifier.
    #[serde(rename = "Symbol")]
    pub symbol: String,
    /// Current price.
    #[serde(rename = "Price")]
    pub price: f64,
    /// DCF fair price per share.
    #[serde(rename = "Fair Price")]
    pub fair_price: f64,
    /// Discount of fair value to price, in percent.
    #[serde(rename = "Discount (%)")]
    pub discount_pct: f64,
    /// Free cash flow growth, in percent.
    #[serde(rename = "FCF Growth (%)")]
    pub growth_pct: f64,
    /// Cost of capital, in percent.
    #[serde(rename = "WACC (%)")]
    pub wacc_pct: f64,
    /// Normalized discount.
    #[serde(rename = "Score Discount")]
    pub score_discount: f64,
    /// Normalized growth.
    #[serde(rename = "Score Growth")]
    pub score_growth: f64,
    /// Inverted normalized cost of capital.
    #[serde(rename = "Score Risk")]
    pub score_risk: f64,
    /// Composite score.
    #[serde(rename = "Score Final")]
    pub score_final: f64,
    /// Generated narrative.
    #[serde(rename = "Analysis")]
    pub analysis: String,
}

impl From<&RankedResult> for TableRow {
    fn from(result: &RankedResult) -> Self {
        let v = &result.valuation;
        Self {
            symbol: v.symbol.clone(),
            price: round(v.price, VALUE_DECIMALS),
            fair_price: round(v.fair_price, VALUE_DECIMALS),
            discount_pct: round(v.discount_pct, VALUE_DECIMALS),
            growth_pct: round(v.growth_pct, VALUE_DECIMALS),
            wacc_pct: round(v.wacc_pct, VALUE_DECIMALS),
            score_discount: round(result.score_discount, SCORE_DECIMALS),
            score_growth: round(result.score_growth, SCORE_DECIMALS),
            score_risk: round(result.score_risk, SCORE_DECIMALS),
            score_final: round(result.score_final, SCORE_DECIMALS),
            analysis: result.narrative.clone(),
        }
    }
}

/// Output format for a valuation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Fixed-width text for the terminal.
    #[default]
    Text,
    /// JSON array of rows.
    Json,
    /// Comma-separated values with a header line.
    Csv,
}

impl ExportFormat {
    /// Get the format name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = SintraError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(SintraError::InvalidData(format!(
                "Unknown output format '{other}', expected text, json or csv"
            ))),
        }
    }
}

/// The ranked valuation table.
///
/// Wraps a polars DataFrame with the columns listed in [`columns::ALL`], one
/// row per ranked security in rank order.
#[derive(Debug, Clone)]
pub struct ValuationTable {
    rows: Vec<TableRow>,
    data: DataFrame,
}

impl ValuationTable {
    /// Build the table from ranked results, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns an error if the DataFrame cannot be assembled.
    pub fn from_results(results: &[RankedResult]) -> Result<Self> {
        let rows: Vec<TableRow> = results.iter().map(TableRow::from).collect();

        let data = df! {
            columns::SYMBOL => rows.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>(),
            columns::PRICE => rows.iter().map(|r| r.price).collect::<Vec<_>>(),
            columns::FAIR_PRICE => rows.iter().map(|r| r.fair_price).collect::<Vec<_>>(),
            columns::DISCOUNT => rows.iter().map(|r| r.discount_pct).collect::<Vec<_>>(),
            columns::GROWTH => rows.iter().map(|r| r.growth_pct).collect::<Vec<_>>(),
            columns::WACC => rows.iter().map(|r| r.wacc_pct).collect::<Vec<_>>(),
            columns::SCORE_DISCOUNT => rows.iter().map(|r| r.score_discount).collect::<Vec<_>>(),
            columns::SCORE_GROWTH => rows.iter().map(|r| r.score_growth).collect::<Vec<_>>(),
            columns::SCORE_RISK => rows.iter().map(|r| r.score_risk).collect::<Vec<_>>(),
            columns::SCORE_FINAL => rows.iter().map(|r| r.score_final).collect::<Vec<_>>(),
            columns::ANALYSIS => rows.iter().map(|r| r.analysis.as_str()).collect::<Vec<_>>(),
        }?;

        Ok(Self { rows, data })
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Rounded rows, in rank order.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Write the table as CSV with a header line.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    pub fn write_csv<W: Write>(&mut self, mut writer: W) -> Result<()> {
        CsvWriter::new(&mut writer)
            .include_header(true)
            .finish(&mut self.data)?;
        Ok(())
    }

    /// Serialize the rows as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.rows)?)
    }

    /// Write the table in the requested format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn export<W: Write>(&mut self, format: ExportFormat, mut writer: W) -> Result<()> {
        match format {
            ExportFormat::Csv => self.write_csv(writer),
            ExportFormat::Json => {
                writeln!(writer, "{}", self.to_json()?)?;
                Ok(())
            }
            ExportFormat::Text => {
                write!(writer, "{}", crate::text::render_table(&self.rows))?;
                Ok(())
            }
        }
    }
}
