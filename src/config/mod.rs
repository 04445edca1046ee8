//! Configuration file support for flowboard.
//!
//! This module handles loading and validating user settings from the configuration file
//! located at `~/.config/flowboard/config.toml`. Settings include pencil and eraser
//! appearance, overlay sizing, and the external diagram renderer.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

// Re-export commonly used types at module level
pub use enums::ColorSpec;
pub use types::{EraserConfig, OverlayConfig, PencilConfig, SurfaceConfig};

use crate::draw::MAX_SURFACE_EDGE;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure containing all user settings.
///
/// This is the root configuration type that gets deserialized from the TOML file.
/// All fields have sensible defaults and will use those if not specified in the config file.
///
/// # Example TOML
/// ```toml
/// [pencil]
/// color = "blue"
/// width = 3.0
///
/// [eraser]
/// width = 20.0
///
/// [overlay]
/// fallback_width = 800
/// fallback_height = 600
/// renderer_command = ["node", "flowchart.js"]
///
/// [surface]
/// width = 430
/// height = 650
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Pencil (ink) appearance
    #[serde(default)]
    pub pencil: PencilConfig,

    /// Eraser width
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Flowchart overlay sizing and renderer
    #[serde(default)]
    pub overlay: OverlayConfig,

    /// Base surface size for the command-line host
    #[serde(default)]
    pub surface: SurfaceConfig,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Invalid values are clamped to the nearest valid value and a warning is logged.
    ///
    /// Validated ranges:
    /// - `pencil.width`: 0.5 - 50.0
    /// - `eraser.width`: 1.0 - 200.0
    /// - `overlay.fallback_width` / `fallback_height`: 1 - 16384
    /// - `surface.width` / `height`: 1 - 16384
    fn validate_and_clamp(&mut self) {
        // Pencil width: 0.5 - 50.0 (NaN falls back to the default)
        if self.pencil.width.is_nan() {
            log::warn!("Invalid pencil width NaN, using 2.0");
            self.pencil.width = 2.0;
        } else if !(0.5..=50.0).contains(&self.pencil.width) {
            log::warn!(
                "Invalid pencil width {:.1}, clamping to 0.5-50.0 range",
                self.pencil.width
            );
            self.pencil.width = self.pencil.width.clamp(0.5, 50.0);
        }

        // Eraser width: 1.0 - 200.0
        if self.eraser.width.is_nan() {
            log::warn!("Invalid eraser width NaN, using 15.0");
            self.eraser.width = 15.0;
        } else if !(1.0..=200.0).contains(&self.eraser.width) {
            log::warn!(
                "Invalid eraser width {:.1}, clamping to 1.0-200.0 range",
                self.eraser.width
            );
            self.eraser.width = self.eraser.width.clamp(1.0, 200.0);
        }

        clamp_edge("overlay.fallback_width", &mut self.overlay.fallback_width);
        clamp_edge("overlay.fallback_height", &mut self.overlay.fallback_height);
        clamp_edge("surface.width", &mut self.surface.width);
        clamp_edge("surface.height", &mut self.surface.height);

        if self
            .overlay
            .renderer_command
            .as_ref()
            .is_some_and(|argv| argv.is_empty())
        {
            log::warn!("Empty overlay.renderer_command, treating source as SVG");
            self.overlay.renderer_command = None;
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/flowboard/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("flowboard");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if not found.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The config directory path cannot be determined
    /// - The file exists but cannot be read
    /// - The file exists but contains invalid TOML syntax
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates the configuration at `path`.
    pub fn load_from(path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config = Self::from_toml(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Parses TOML text and clamps the result.
    pub fn from_toml(text: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(text)?;
        config.validate_and_clamp();
        Ok(config)
    }

    /// Creates a default configuration file with documentation comments.
    ///
    /// Writes the example config from `config.example.toml` to the user's config
    /// directory and returns the path written.
    ///
    /// # Errors
    /// Returns an error if:
    /// - A config file already exists at the target path
    /// - The config directory cannot be created
    /// - The file cannot be written
    pub fn create_default_file() -> Result<PathBuf> {
        let config_path = Self::get_config_path()?;

        if config_path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                config_path.display()
            ));
        }

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(&config_path, default_config)?;

        info!("Created default config at {}", config_path.display());
        Ok(config_path)
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

fn clamp_edge(name: &str, value: &mut u32) {
    if !(1..=MAX_SURFACE_EDGE).contains(value) {
        log::warn!(
            "Invalid {} {}, clamping to 1-{} range",
            name,
            value,
            MAX_SURFACE_EDGE
        );
        *value = (*value).clamp(1, MAX_SURFACE_EDGE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.surface.width, 430);
        assert_eq!(config.surface.height, 650);
        assert_eq!(config.overlay.fallback_width, 800);
        assert_eq!(config.overlay.fallback_height, 600);
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = Config::from_toml(
            r#"
            [pencil]
            color = [0, 0, 255]

            [overlay]
            renderer_command = ["node", "flowchart.js"]
            "#,
        )
        .unwrap();

        assert_eq!(config.pencil.color, ColorSpec::Rgb([0, 0, 255]));
        assert_eq!(config.pencil.width, 2.0);
        assert_eq!(
            config.overlay.renderer_command,
            Some(vec!["node".to_string(), "flowchart.js".to_string()])
        );
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let config = Config::from_toml(
            r#"
            [pencil]
            width = 500.0

            [eraser]
            width = 0.1

            [overlay]
            fallback_width = 0
            fallback_height = 100000
            renderer_command = []
            "#,
        )
        .unwrap();

        assert_eq!(config.pencil.width, 50.0);
        assert_eq!(config.eraser.width, 1.0);
        assert_eq!(config.overlay.fallback_width, 1);
        assert_eq!(config.overlay.fallback_height, MAX_SURFACE_EDGE);
        assert_eq!(config.overlay.renderer_command, None);
    }

    #[test]
    fn invalid_toml_is_an_error() {
        assert!(Config::from_toml("[pencil\nwidth = ").is_err());
    }

    #[test]
    fn load_from_reports_path_on_failure() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "surface = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }

    #[test]
    fn example_file_parses() {
        let config = Config::from_toml(include_str!("../../config.example.toml")).unwrap();
        assert_eq!(config.eraser.width, 15.0);
    }

    #[test]
    fn schema_lists_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = &schema["properties"];
        for section in ["pencil", "eraser", "overlay", "surface"] {
            assert!(properties.get(section).is_some(), "missing {section}");
        }
    }
}
