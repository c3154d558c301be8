//! Config module.
//! Provides configuration types, the config file location, XML loading, and root validation.

pub mod paths;
pub mod types;
mod validate;
pub mod xml;

pub use paths::{default_config_path, path_has_symlink_ancestor};
pub use types::{Config, LogLevel};
pub use validate::Roots;
pub use xml::{CONFIG_TEMPLATE, load_config, load_config_from_xml_path};

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "FILE_SORTER_CONFIG";
