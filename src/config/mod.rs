//! `.stocklens.toml` configuration.
//!
//! The file is looked up from the working directory upwards. Values given
//! on the command line always win over the file.

mod core;
mod loader;

pub use self::core::{DataConfig, DisplayConfig, ExportConfig, StocklensConfig};
pub use loader::{
    directory_ancestors, load_config, load_config_from, parse_config, CONFIG_FILE_NAME,
};

/// Contents written by `stocklens init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# stocklens configuration

[data]
# Summary table exported from the sales system (.csv or .json)
path = "data/resumen_productos.csv"

[display]
top_slow_movers = 5
# default_division = "ALMACEN"

[export]
directory = "exports"
column_margin = 2
"#;
