use crate::dataset::Division;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "stocklens")]
#[command(about = "Inventory analytics and spreadsheet reports for retail stock summaries", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute KPIs, distributions and slow movers, and write the xlsx exports
    Report {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        filters: FilterArgs,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Directory for the xlsx exports (overrides config)
        #[arg(long = "export-dir")]
        export_dir: Option<PathBuf>,

        /// Skip building the xlsx exports
        #[arg(long = "no-export")]
        no_export: bool,

        /// Rows in the slow-mover table (overrides config)
        #[arg(long = "top")]
        top: Option<usize>,

        /// Plain output: ASCII tables, no colors
        #[arg(long = "plain")]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// List the categories, subcategories and brands of a division
    Options {
        #[command(flatten)]
        source: SourceArgs,

        /// Division to list (ALMACEN/warehouse or TALLER/workshop)
        #[arg(short, long)]
        division: Option<Division>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "terminal")]
        format: OutputFormat,

        /// Plain output: ASCII tables, no colors
        #[arg(long = "plain")]
        plain: bool,

        /// Increase verbosity level (can be repeated: -v, -vv, -vvv)
        #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
        verbosity: u8,
    },

    /// Initialize a .stocklens.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    pub fn verbosity(&self) -> u8 {
        match self {
            Commands::Report { verbosity, .. } | Commands::Options { verbosity, .. } => *verbosity,
            Commands::Init { .. } => 0,
        }
    }
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct SourceArgs {
    /// Dataset file (.csv or .json); falls back to [data] path in the config
    #[arg(long, env = "STOCKLENS_DATA")]
    pub data: Option<PathBuf>,
}

#[derive(clap::Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Division (ALMACEN/warehouse or TALLER/workshop)
    #[arg(short, long)]
    pub division: Option<Division>,

    /// Category filter ("Todas" for no constraint)
    #[arg(long)]
    pub category: Option<String>,

    /// Subcategory filter ("Todas" for no constraint)
    #[arg(long)]
    pub subcategory: Option<String>,

    /// Brand filter ("Todas" for no constraint)
    #[arg(long)]
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Terminal,
    Json,
}
