//! Fixed-width terminal rendering.

use std::fmt::Write;

use crate::table::TableRow;

/// Render rows as a fixed-width ranking followed by one narrative per row.
#[must_use]
pub fn render_table(rows: &[TableRow]) -> String {
    let mut out = String::new();

    if rows.is_empty() {
        out.push_str("No securities could be valued.\n");
        return out;
    }

    let _ = writeln!(
        out,
        "{:>4}  {:<10} {:>10} {:>10} {:>10} {:>10} {:>8} {:>8} {:>8} {:>8} {:>8}",
        "#", "Symbol", "Price", "Fair", "Disc %", "Growth %", "WACC %", "S.Disc", "S.Grow",
        "S.Risk", "Score"
    );
    let _ = writeln!(out, "{}", "─".repeat(106));

    for (i, row) in rows.iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>4}  {:<10} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>8.2} {:>8.4} {:>8.4} {:>8.4} {:>8.4}",
            i + 1,
            row.symbol,
            row.price,
            row.fair_price,
            row.discount_pct,
            row.growth_pct,
            row.wacc_pct,
            row.score_discount,
            row.score_growth,
            row.score_risk,
            row.score_final
        );
    }

    out.push('\n');
    for row in rows.iter().filter(|r| !r.analysis.is_empty()) {
        let _ = writeln!(out, "  {}", row.analysis);
    }

    out
}
