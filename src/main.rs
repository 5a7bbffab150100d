use anyhow::Result;
use clap::Parser;
use stocklens::cli::{Cli, Commands};
use stocklens::commands::{self, OptionsConfig, ReportConfig};
use stocklens::config;

fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    // RUST_LOG takes precedence over -v
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.command.verbosity());

    match cli.command {
        Commands::Report {
            source,
            filters,
            format,
            output,
            export_dir,
            no_export,
            top,
            plain,
            verbosity: _,
        } => {
            let settings = config::load_config();
            let report_config = ReportConfig {
                data: source.data,
                division: filters.division,
                category: filters.category,
                subcategory: filters.subcategory,
                brand: filters.brand,
                format,
                output,
                export_dir,
                no_export,
                top,
                plain,
            };
            let outcome = commands::run_report(report_config, &settings)?;
            log::debug!("Report finished: {outcome:?}");
        }
        Commands::Options {
            source,
            division,
            format,
            plain,
            verbosity: _,
        } => {
            let settings = config::load_config();
            commands::list_options(
                OptionsConfig {
                    data: source.data,
                    division,
                    format,
                    plain,
                },
                &settings,
            )?;
        }
        Commands::Init { force } => commands::init_config(force)?,
    }

    Ok(())
}
