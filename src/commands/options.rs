use super::{formatting_for, load, resolve_data_path, resolve_division};
use crate::analytics::FilterOptions;
use crate::cli::OutputFormat;
use crate::config::StocklensConfig;
use crate::dataset::Division;
use crate::formatting::formatter_for;
use crate::output::{self, json, terminal};
use anyhow::Result;
use std::path::PathBuf;

pub struct OptionsConfig {
    pub data: Option<PathBuf>,
    pub division: Option<Division>,
    pub format: OutputFormat,
    pub plain: bool,
}

pub fn list_options(config: OptionsConfig, settings: &StocklensConfig) -> Result<()> {
    let path = resolve_data_path(config.data, settings)?;
    let division = resolve_division(config.division, settings);
    let dataset = load(&path)?;

    let options = FilterOptions::from_records(&dataset.division(division));
    let content = match config.format {
        OutputFormat::Json => json::render_options(division, &options)?,
        OutputFormat::Terminal => {
            let formatter = formatter_for(formatting_for(config.plain));
            terminal::render_options(
                division,
                &options,
                &terminal::TerminalStyle {
                    formatter: formatter.as_ref(),
                    ascii: config.plain,
                },
            )
        }
    };
    output::emit(&content, None)
}
