//! Configuration management (config.toml)
//!
//! Handles loading, saving, and providing defaults for bridge and player
//! settings. Settings are stored in TOML format in the platform-specific
//! config directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use easel_shared::names::DEFAULT_ENTRY_POINT;

/// Application configuration.
///
/// Contains all user-configurable settings organized into sections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// GPU negotiation and validation settings
    #[serde(default)]
    pub gpu: GpuConfig,
    /// Window settings (ignored in headless mode)
    #[serde(default)]
    pub window: WindowConfig,
    /// Module execution settings
    #[serde(default)]
    pub runtime: RuntimeConfig,
}

/// Adapter power preference as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PowerPreference {
    #[default]
    None,
    Low,
    High,
}

impl PowerPreference {
    pub fn to_wgpu(self) -> wgpu::PowerPreference {
        match self {
            Self::None => wgpu::PowerPreference::None,
            Self::Low => wgpu::PowerPreference::LowPower,
            Self::High => wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// Texture format of the offscreen target in headless mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum HeadlessFormat {
    #[default]
    Bgra8unorm,
    Rgba8unorm,
    Bgra8unormsrgb,
    Rgba8unormsrgb,
}

impl HeadlessFormat {
    pub fn to_wgpu(self) -> wgpu::TextureFormat {
        match self {
            Self::Bgra8unorm => wgpu::TextureFormat::Bgra8Unorm,
            Self::Rgba8unorm => wgpu::TextureFormat::Rgba8Unorm,
            Self::Bgra8unormsrgb => wgpu::TextureFormat::Bgra8UnormSrgb,
            Self::Rgba8unormsrgb => wgpu::TextureFormat::Rgba8UnormSrgb,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GpuConfig {
    /// Adapter power preference (default: none)
    #[serde(default)]
    pub power_preference: PowerPreference,
    /// Number of initial ticks wrapped in a validation error scope (default: 3)
    #[serde(default = "default_validation_ticks")]
    pub validation_ticks: u32,
    /// Offscreen target format in headless mode (default: bgra8unorm)
    #[serde(default)]
    pub headless_format: HeadlessFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Initial canvas width in pixels (default: 800)
    #[serde(default = "default_width")]
    pub width: u32,
    /// Initial canvas height in pixels (default: 600)
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default = "default_title")]
    pub title: String,
    /// Whether to enable vertical sync (default: true)
    #[serde(default = "default_true")]
    pub vsync: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Export called once after instantiation (default: `_start`)
    #[serde(default = "default_entry_point")]
    pub entry_point: String,
    /// Maximum linear memory in bytes (default: 256 MiB)
    #[serde(default = "default_ram_limit")]
    pub ram_limit: usize,
}

fn default_validation_ticks() -> u32 {
    3
}
fn default_width() -> u32 {
    800
}
fn default_height() -> u32 {
    600
}
fn default_title() -> String {
    "Easel".to_string()
}
fn default_true() -> bool {
    true
}
fn default_entry_point() -> String {
    DEFAULT_ENTRY_POINT.to_string()
}
fn default_ram_limit() -> usize {
    256 * 1024 * 1024
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            power_preference: PowerPreference::default(),
            validation_ticks: default_validation_ticks(),
            headless_format: HeadlessFormat::default(),
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            title: default_title(),
            vsync: default_true(),
        }
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            entry_point: default_entry_point(),
            ram_limit: default_ram_limit(),
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Easel\config`
/// On macOS: `~/Library/Application Support/io.easel.Easel`
/// On Linux: `~/.config/Easel`
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.easel", "", "Easel")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Loads the configuration from disk.
///
/// Returns default values if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    match config_dir() {
        Some(dir) => {
            let path = dir.join("config.toml");
            if !path.exists() {
                return Config::default();
            }
            load_from(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config file: {:#}", e);
                Config::default()
            })
        }
        None => Config::default(),
    }
}

/// Loads the configuration from an explicit path.
///
/// Unlike [`load`], a missing or malformed file is an error.
pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))
}

/// Saves the configuration to disk.
///
/// Writes `config.toml` to the platform's configuration directory.
/// Creates the directory if it doesn't exist.
pub fn save(config: &Config) -> Result<()> {
    if let Some(dir) = config_dir() {
        save_to(config, &dir.join("config.toml"))?;
    }
    Ok(())
}

/// Saves the configuration to an explicit path, creating parent directories.
pub fn save_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
    std::fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    // =============================================================
    // Default value tests
    // =============================================================

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.gpu.power_preference, PowerPreference::None);
        assert_eq!(config.gpu.validation_ticks, 3);
        assert_eq!(config.gpu.headless_format, HeadlessFormat::Bgra8unorm);
        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 600);
        assert_eq!(config.window.title, "Easel");
        assert!(config.window.vsync);
        assert_eq!(config.runtime.entry_point, "_start");
        assert_eq!(config.runtime.ram_limit, 256 * 1024 * 1024);
    }

    // =============================================================
    // TOML serialization tests
    // =============================================================

    #[test]
    fn test_config_deserialize_empty() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_config_deserialize_partial_gpu() {
        let toml_str = r#"
[gpu]
power_preference = "high"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gpu.power_preference, PowerPreference::High);
        assert_eq!(config.gpu.validation_ticks, 3); // default
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_config_deserialize_runtime() {
        let toml_str = r#"
[runtime]
entry_point = "main"
ram_limit = 1048576
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.runtime.entry_point, "main");
        assert_eq!(config.runtime.ram_limit, 1024 * 1024);
    }

    #[test]
    fn test_config_rejects_unknown_power_preference() {
        let toml_str = r#"
[gpu]
power_preference = "turbo"
"#;
        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_power_preference_to_wgpu() {
        assert_eq!(PowerPreference::None.to_wgpu(), wgpu::PowerPreference::None);
        assert_eq!(PowerPreference::Low.to_wgpu(), wgpu::PowerPreference::LowPower);
        assert_eq!(
            PowerPreference::High.to_wgpu(),
            wgpu::PowerPreference::HighPerformance
        );
    }

    #[test]
    fn test_headless_format_to_wgpu() {
        assert_eq!(
            HeadlessFormat::default().to_wgpu(),
            wgpu::TextureFormat::Bgra8Unorm
        );
        assert_eq!(
            HeadlessFormat::Rgba8unormsrgb.to_wgpu(),
            wgpu::TextureFormat::Rgba8UnormSrgb
        );
    }

    // =============================================================
    // File round trip
    // =============================================================

    #[test]
    fn test_save_and_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.window.title = "Sketch".to_string();
        config.gpu.validation_ticks = 0;

        save_to(&config, &path).unwrap();
        let loaded = load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn test_load_from_malformed_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[gpu\nvalidation_ticks = ").unwrap();
        assert!(load_from(&path).is_err());
    }
}
