use crate::config::model::Config;
use anyhow::Context;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

pub fn load_config() -> Result<Config, anyhow::Error> {
    load_config_from_path(DEFAULT_CONFIG_PATH)
}

pub fn load_config_from_path(config_path: impl AsRef<Path>) -> Result<Config, anyhow::Error> {
    let config_path = config_path.as_ref();
    let config_str = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config {}", config_path.display()))?;
    let config: Config = toml::from_str(&config_str).context("Failed to parse config")?;
    Ok(config)
}
