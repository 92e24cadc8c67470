//! Device configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Runtime settings of the device, loaded from a small YAML file at
/// boot. Wireless and network settings belong to the excluded control
/// layer and are not represented here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Root directory of the signal library.
    pub storage_root: PathBuf,
    /// How long the receiver waits for a waveform during learning.
    pub capture_timeout_ms: u64,
    /// How many times a selected waveform is replayed per control
    /// request.
    pub transmit_repeat: u32,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            storage_root: PathBuf::from("signals"),
            capture_timeout_ms: 3000,
            transmit_repeat: 1,
        }
    }
}

/// Load configuration from a YAML file.
pub fn load_config(path: &Path) -> AppResult<DeviceConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: DeviceConfig = serde_yaml::from_str(&content)
        .map_err(|e| AppError::Config(format!("Failed to parse config YAML: {}", e)))?;
    validate_config(&config)?;
    Ok(config)
}

/// Validate configuration values.
pub fn validate_config(config: &DeviceConfig) -> AppResult<()> {
    if config.storage_root.as_os_str().is_empty() {
        return Err(AppError::Config(
            "storage_root must not be empty".to_string(),
        ));
    }
    if config.capture_timeout_ms == 0 {
        return Err(AppError::Config(
            "capture_timeout_ms must be greater than zero".to_string(),
        ));
    }
    if config.transmit_repeat == 0 {
        return Err(AppError::Config(
            "transmit_repeat must be greater than zero".to_string(),
        ));
    }
    Ok(())
}
