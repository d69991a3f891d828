//! CLI subcommand modules.
//!
//! This module contains the implementations for all sintra CLI subcommands.

pub(crate) mod rank;
pub(crate) mod snapshot;
pub(crate) mod universe;
pub(crate) mod value;

use std::path::PathBuf;

use anyhow::Result;
use sintra::PipelineConfig;

/// Configuration sources given on the command line.
///
/// Flags win over the file, the file wins over defaults.
#[derive(Debug, Clone, Default)]
pub(crate) struct ConfigOverrides {
    pub(crate) config: Option<PathBuf>,
    pub(crate) delay_ms: Option<u64>,
    pub(crate) periods: Option<u32>,
}

impl ConfigOverrides {
    /// Resolve the effective pipeline configuration.
    pub(crate) fn resolve(&self) -> Result<PipelineConfig> {
        let mut config = match &self.config {
            Some(path) => PipelineConfig::from_file(path).map_err(|e| {
                anyhow::anyhow!("Failed to load config {}: {}", path.display(), e)
            })?,
            None => PipelineConfig::default(),
        };

        if let Some(delay_ms) = self.delay_ms {
            config.fetch.request_delay_ms = delay_ms;
        }
        if let Some(periods) = self.periods {
            anyhow::ensure!(periods >= 2, "--periods must be at least 2");
            config.fetch.periods = periods;
        }

        Ok(config)
    }
}

/// Print a boxed section header.
pub(crate) fn header(title: &str) {
    println!("\n╔══════════════════════════════════════════════════════════════╗");
    println!("║{:^62}║", title);
    println!("╚══════════════════════════════════════════════════════════════╝\n");
}
