use crate::analytics::DEFAULT_SLOW_MOVER_LIMIT;
use crate::dataset::Division;
use crate::report::DEFAULT_COLUMN_MARGIN;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for stocklens
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct StocklensConfig {
    /// Dataset location
    #[serde(default)]
    pub data: DataConfig,

    /// Terminal report settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Spreadsheet export settings
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DataConfig {
    /// Path to the summary table (.csv or .json), relative to the working directory
    #[serde(default)]
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DisplayConfig {
    /// Rows in the slow-mover table (default: 5)
    #[serde(default = "default_top_slow_movers")]
    pub top_slow_movers: usize,

    /// Division used when none is given on the command line
    #[serde(default)]
    pub default_division: Option<String>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            top_slow_movers: default_top_slow_movers(),
            default_division: None,
        }
    }
}

impl DisplayConfig {
    /// Parsed default division; unknown names are ignored with a warning.
    pub fn division(&self) -> Option<Division> {
        let name = self.default_division.as_deref()?;
        let parsed = Division::parse(name);
        if parsed.is_none() {
            log::warn!("Ignoring unknown default_division '{}' in config", name);
        }
        parsed
    }
}

fn default_top_slow_movers() -> usize {
    DEFAULT_SLOW_MOVER_LIMIT
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExportConfig {
    /// Directory the xlsx files are written to (default: working directory)
    #[serde(default)]
    pub directory: Option<PathBuf>,

    /// Characters added to autofit column widths (default: 2)
    #[serde(default = "default_column_margin")]
    pub column_margin: usize,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: None,
            column_margin: default_column_margin(),
        }
    }
}

fn default_column_margin() -> usize {
    DEFAULT_COLUMN_MARGIN
}
