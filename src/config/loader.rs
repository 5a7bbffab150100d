use std::fs;
use std::path::{Path, PathBuf};

use super::core::StocklensConfig;

pub const CONFIG_FILE_NAME: &str = ".stocklens.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Parse and validate config from a TOML string
pub fn parse_config(contents: &str) -> Result<StocklensConfig, String> {
    let mut config = toml::from_str::<StocklensConfig>(contents)
        .map_err(|e| format!("Failed to parse {CONFIG_FILE_NAME}: {e}"))?;

    if config.display.top_slow_movers == 0 {
        log::warn!("display.top_slow_movers must be at least 1; using the default");
        config.display.top_slow_movers = StocklensConfig::default().display.top_slow_movers;
    }

    Ok(config)
}

/// Try loading config from a specific path
pub(crate) fn try_load_config_from_path(config_path: &Path) -> Option<StocklensConfig> {
    let contents = match fs::read_to_string(config_path) {
        Ok(contents) => contents,
        Err(e) => {
            handle_read_error(config_path, &e);
            return None;
        }
    };

    match parse_config(&contents) {
        Ok(config) => {
            log::debug!("Loaded config from {}", config_path.display());
            Some(resolve_relative_paths(config, config_path.parent()))
        }
        Err(e) => {
            log::warn!("{}. Using defaults.", e);
            None
        }
    }
}

fn handle_read_error(config_path: &Path, error: &std::io::Error) {
    // "not found" is the normal case while walking up
    if error.kind() != std::io::ErrorKind::NotFound {
        log::warn!(
            "Failed to read config file {}: {}",
            config_path.display(),
            error
        );
    }
}

/// Relative paths in a config file are relative to the file itself.
fn resolve_relative_paths(mut config: StocklensConfig, base: Option<&Path>) -> StocklensConfig {
    let Some(base) = base else {
        return config;
    };
    let resolve = |p: PathBuf| if p.is_relative() { base.join(p) } else { p };
    config.data.path = config.data.path.map(resolve);
    config.export.directory = config.export.directory.map(resolve);
    config
}

/// Directory ancestors of `start`, itself included, up to `max_depth` entries
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

/// Find the nearest config file above `start`, or defaults.
pub fn load_config_from(start: PathBuf) -> StocklensConfig {
    directory_ancestors(start, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find_map(|path| try_load_config_from_path(&path))
        .unwrap_or_else(|| {
            log::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            StocklensConfig::default()
        })
}

pub fn load_config() -> StocklensConfig {
    match std::env::current_dir() {
        Ok(dir) => load_config_from(dir),
        Err(e) => {
            log::warn!(
                "Failed to get current directory: {}. Using default config.",
                e
            );
            StocklensConfig::default()
        }
    }
}
