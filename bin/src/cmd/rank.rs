//! Rank command implementation.

use std::{fs::File, io, path::PathBuf};

use anyhow::Result;
use sintra::{Pipeline, PipelineReport};
use sintra_report::{ExportFormat, ValuationTable};

use super::{ConfigOverrides, header};
use crate::data;

/// Options of the rank command.
#[derive(Debug)]
pub(crate) struct RankOptions {
    pub(crate) input: Option<PathBuf>,
    pub(crate) format: ExportFormat,
    pub(crate) output: Option<PathBuf>,
    pub(crate) overrides: ConfigOverrides,
}

/// Value and rank the given symbols, writing the valuation table.
pub(crate) async fn run_rank(symbols: &[String], options: RankOptions) -> Result<()> {
    let config = options.overrides.resolve()?;
    let pipeline = Pipeline::new(&config)?;
    let (source, symbols) =
        data::open_source(options.input.as_deref(), symbols, config.fetch.periods)?;

    let report = pipeline.run(&source, &symbols).await?;
    let mut table = ValuationTable::from_results(&report.results)?;

    match &options.output {
        Some(path) => {
            let file = File::create(path)
                .map_err(|e| anyhow::anyhow!("Failed to create {}: {}", path.display(), e))?;
            table.export(options.format, io::BufWriter::new(file))?;
            eprintln!("Wrote {} row(s) to {}", table.len(), path.display());
        }
        None => {
            if options.format == ExportFormat::Text {
                header("Valuation Ranking");
            }
            table.export(options.format, io::stdout().lock())?;
        }
    }

    if options.format == ExportFormat::Text || options.output.is_some() {
        print_exclusions(&report);
    }

    Ok(())
}

/// Report excluded securities on stderr.
fn print_exclusions(report: &PipelineReport) {
    if report.excluded.is_empty() {
        return;
    }

    eprintln!("\nExcluded ({}):", report.excluded.len());
    for excluded in &report.excluded {
        eprintln!("  {:<10} {}", excluded.symbol, excluded.reason);
    }
    for dimension in &report.degenerate {
        eprintln!("  note: all {} values equal, neutral score assigned", dimension);
    }
}
