//! Universe listing command implementation.

use sintra::universe;

use super::header;

/// List the default ticker universe.
pub(crate) fn list_universe() {
    header("PSI-20 Universe");

    for (i, symbol) in universe::PSI20.iter().enumerate() {
        println!("  {:>2}. {}", i + 1, symbol);
    }
    println!();
    println!("Pass symbols explicitly to rank a different universe.\n");
}
