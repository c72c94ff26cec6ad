//! Config file plus command-line overrides

use std::path::Path;

use anyhow::Result;
use easel_core::config::{self, Config, PowerPreference};

/// Flags that take precedence over the config file
#[derive(Debug, Clone, Copy, Default)]
pub struct Overrides {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub power: Option<PowerPreference>,
}

/// Load the config and apply overrides.
///
/// An explicit `--config` path must exist and parse. The platform default
/// falls back to defaults when missing or invalid.
pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Config> {
    let mut config = match path {
        Some(path) => config::load_from(path)?,
        None => config::load(),
    };
    apply(&mut config, overrides);
    Ok(config)
}

fn apply(config: &mut Config, overrides: Overrides) {
    if let Some(width) = overrides.width {
        config.window.width = width.max(1);
    }
    if let Some(height) = overrides.height {
        config.window.height = height.max(1);
    }
    if let Some(power) = overrides.power {
        config.gpu.power_preference = power;
    }
}
