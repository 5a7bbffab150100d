//! CLI command implementations.
//!
//! Available commands:
//! - **report**: run the analytics pipeline for one selection and write exports
//! - **options**: list the selector values of a division
//! - **init**: write a default `.stocklens.toml`
//!
//! Command-line values win over the configuration file, which wins over
//! built-in defaults.

pub mod init;
pub mod options;
pub mod report;

pub use init::init_config;
pub use options::{list_options, OptionsConfig};
pub use report::{run_report, ReportConfig, ReportOutcome};

use crate::config::StocklensConfig;
use crate::dataset::{load_dataset, Dataset, Division};
use crate::error::AnalyticsError;
use crate::formatting::{ColorMode, FormattingConfig};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Dataset path from the command line, else from the config file.
pub fn resolve_data_path(cli: Option<PathBuf>, config: &StocklensConfig) -> Result<PathBuf> {
    cli.or_else(|| config.data.path.clone()).ok_or_else(|| {
        AnalyticsError::missing_input(
            "no dataset given; pass --data or set [data] path in .stocklens.toml",
            None,
        )
        .into()
    })
}

/// Division from the command line, else the configured default, else ALMACEN.
pub fn resolve_division(cli: Option<Division>, config: &StocklensConfig) -> Division {
    cli.or_else(|| config.display.division())
        .unwrap_or(Division::Warehouse)
}

pub fn formatting_for(plain: bool) -> FormattingConfig {
    if plain {
        FormattingConfig::new(ColorMode::Never)
    } else {
        FormattingConfig::from_env()
    }
}

/// One load per invocation; each run of the binary reads the file once.
pub(crate) fn load(path: &Path) -> Result<Dataset> {
    load_dataset(path).with_context(|| format!("Failed to load dataset {}", path.display()))
}
