use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use verba_config::Config;

const DEFAULT_CONFIG_FILE: &str = "config.json";

fn read_config_file(path: &Path) -> anyhow::Result<Config> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("Invalid config file {}", path.display()))?;
    Ok(config)
}

/// Config from an explicit file, else `config.json` in the working
/// directory, else defaults with environment overrides
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        tracing::info!("Loading config from {}", path.display());
        return read_config_file(path);
    }

    let default_file = PathBuf::from(DEFAULT_CONFIG_FILE);
    if default_file.is_file() {
        tracing::info!("Loading config from {}", default_file.display());
        return read_config_file(&default_file);
    }

    tracing::debug!("No config file, using defaults and environment");
    Ok(Config::new())
}
