mod types;

pub use types::*;

use crate::Result;
use std::{env, io::ErrorKind, path::Path};
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

pub async fn load() -> Result<Config> {
    let explicit_path = env::var("CONFIG_PATH").ok();
    let required = explicit_path.is_some();
    let config_path = explicit_path.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = load_file(&config_path, required).await?;
    config.apply_env_overrides(|key| env::var(key).ok())?;

    Ok(config)
}

/// Reads a YAML config file. When `required` is false a missing file yields
/// the defaults.
pub async fn load_file(path: impl AsRef<Path>, required: bool) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    match tokio::fs::read_to_string(path).await {
        Ok(config_str) => from_yaml(&config_str),
        Err(e) if e.kind() == ErrorKind::NotFound && !required => {
            debug!("No {} found, using defaults", path.display());
            Ok(Config::default())
        }
        Err(e) => Err(e.into()),
    }
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    Ok(serde_yaml::from_str(config_str)?)
}
