//! Config-file defaults for the CLI.
//!
//! Every CLI parameter can be given a default in a TOML file passed via
//! `--config`. Resolution order is: explicit CLI flag, then config file,
//! then the built-in defaults below.

use anyhow::Context;
use magicgen_output::PrefixStrategy;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults for every CLI parameter. Field names match the CLI flags.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub path_to_save_files: PathBuf,
    pub files_count: u64,
    pub file_name: String,
    pub file_prefix: PrefixStrategy,
    pub data_schema: String,
    pub data_lines: u64,
    pub clear_path: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path_to_save_files: PathBuf::from("."),
            files_count: 0,
            file_name: "data".to_string(),
            file_prefix: PrefixStrategy::Count,
            data_schema: r#"{"date": "timestamp:", "name": "str:rand", "age": "int:rand(1, 90)"}"#
                .to_string(),
            data_lines: 1000,
            clear_path: false,
        }
    }
}

impl Config {
    /// Load defaults from a TOML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}
