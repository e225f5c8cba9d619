//! Config file persistence
//!
//! The config tree lives in `pulse-types`; this module only moves it to and
//! from disk through confy (TOML).

use std::path::{Path, PathBuf};

use pulse_types::PulseConfig;

use crate::error::ConfigError;

/// confy application name; the file lands in the platform config dir
pub const APP_NAME: &str = "pulse";

/// Load the user config, falling back to defaults on any error.
///
/// The result is always sanitized.
pub fn load() -> PulseConfig {
    let config = match confy::load::<PulseConfig>(APP_NAME, None) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(error = %ConfigError::from(e), "Using default config");
            PulseConfig::default()
        }
    };
    sanitized(config)
}

/// Load an existing config file at `path`
pub fn load_from(path: &Path) -> Result<PulseConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let config = confy::load_path::<PulseConfig>(path)?;
    Ok(sanitized(config))
}

pub fn store(config: &PulseConfig) -> Result<(), ConfigError> {
    confy::store(APP_NAME, None, config.clone())?;
    Ok(())
}

pub fn store_to(path: &Path, config: &PulseConfig) -> Result<(), ConfigError> {
    confy::store_path(path, config.clone())?;
    Ok(())
}

/// Where [`load`] and [`store`] read and write
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(confy::get_configuration_file_path(APP_NAME, None)?)
}

fn sanitized(mut config: PulseConfig) -> PulseConfig {
    let fixed = config.sanitize();
    if !fixed.is_empty() {
        tracing::warn!(fields = ?fixed, "Config values out of range, adjusted");
    }
    config
}
