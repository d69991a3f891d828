//! Sintra CLI binary.
//!
//! Provides a command-line interface for DCF fair-value ranking.

mod cmd;
mod data;

use anyhow::Result;
use clap::{Parser, Subcommand};
use sintra_report::ExportFormat;
use std::{path::PathBuf, process};
use tracing_subscriber::{EnvFilter, filter::LevelFilter};

#[derive(Parser)]
#[command(name = "sintra")]
#[command(about = "DCF fair-value ranking for equity universes", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Value and rank a universe of securities
    Rank {
        /// Ticker symbols (defaults to the PSI-20, or the snapshot contents)
        #[arg(value_delimiter = ',')]
        symbols: Vec<String>,

        /// Read raw data from a snapshot file instead of the FMP API
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Output format (text, json or csv)
        #[arg(short, long, default_value = "text")]
        format: ExportFormat,

        /// Write the table to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Pause between securities, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Number of annual statements to request
        #[arg(long)]
        periods: Option<u32>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show the full valuation of one security
    Value {
        /// Ticker symbol
        symbol: String,

        /// Read raw data from a snapshot file instead of the FMP API
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// JSON configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Fetch raw data and freeze it to a snapshot file
    Snapshot {
        /// Ticker symbols (defaults to the PSI-20)
        #[arg(value_delimiter = ',')]
        symbols: Vec<String>,

        /// Snapshot file to write
        #[arg(short, long)]
        output: PathBuf,

        /// Pause between securities, in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Number of annual statements to request
        #[arg(long)]
        periods: Option<u32>,
    },

    /// List the default ticker universe
    Universe,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Install the stderr log subscriber so stdout carries only the table.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Rank {
            symbols,
            input,
            format,
            output,
            delay_ms,
            periods,
            config,
        } => {
            let options = cmd::rank::RankOptions {
                input,
                format,
                output,
                overrides: cmd::ConfigOverrides {
                    config,
                    delay_ms,
                    periods,
                },
            };
            cmd::rank::run_rank(&symbols, options).await?;
        }
        Commands::Value {
            symbol,
            input,
            config,
        } => {
            let overrides = cmd::ConfigOverrides {
                config,
                ..Default::default()
            };
            cmd::value::show_valuation(&symbol, input.as_deref(), &overrides).await?;
        }
        Commands::Snapshot {
            symbols,
            output,
            delay_ms,
            periods,
        } => {
            let overrides = cmd::ConfigOverrides {
                config: None,
                delay_ms,
                periods,
            };
            cmd::snapshot::take_snapshot(&symbols, &output, &overrides).await?;
        }
        Commands::Universe => {
            cmd::universe::list_universe();
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_rank() {
        let cli = Cli::try_parse_from([
            "sintra", "-v", "rank", "EDP.LS,GALP.LS", "NOS.LS", "--format", "csv", "--delay-ms",
            "250",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Rank {
                symbols,
                format,
                delay_ms,
                input,
                ..
            } => {
                assert_eq!(symbols, vec!["EDP.LS", "GALP.LS", "NOS.LS"]);
                assert_eq!(format, ExportFormat::Csv);
                assert_eq!(delay_ms, Some(250));
                assert!(input.is_none());
            }
            _ => panic!("expected rank"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["sintra", "rank", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_snapshot_requires_output() {
        assert!(Cli::try_parse_from(["sintra", "snapshot", "EDP.LS"]).is_err());
        assert!(Cli::try_parse_from(["sintra", "snapshot", "-o", "out.json"]).is_ok());
    }
}
