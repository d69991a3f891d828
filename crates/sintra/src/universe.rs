//! Default security universes.

use sintra_traits::Symbol;

/// Euronext Lisbon constituents used when no symbols are given.
pub const PSI20: [&str; 20] = [
    "EDP.LS", "EDPR.LS", "GALP.LS", "BCP.LS", "JMT.LS", "NOS.LS", "SON.LS", "REN.LS", "CTT.LS",
    "ALTR.LS", "SEM.LS", "SCP.LS", "IBS.LS", "MOTA.LS", "NVG.LS", "VAF.LS", "IMP.LS", "COFINA.LS",
    "RAM.LS", "GLINT.LS",
];

/// The PSI-20 universe as owned symbols.
#[must_use]
pub fn psi20() -> Vec<Symbol> {
    PSI20.iter().map(|s| (*s).to_string()).collect()
}

/// Normalize user-supplied symbols: trim, upper-case, drop blanks and
/// duplicates while keeping first-seen order.
#[must_use]
pub fn normalize_symbols<S: AsRef<str>>(symbols: &[S]) -> Vec<Symbol> {
    let mut out: Vec<Symbol> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.as_ref().trim().to_uppercase();
        if !symbol.is_empty() && !out.contains(&symbol) {
            out.push(symbol);
        }
    }
    out
}
