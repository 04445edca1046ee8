//! Configuration type definitions.

use super::enums::ColorSpec;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Pencil (ink) settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PencilConfig {
    /// Ink color - either a named color (red, green, blue, yellow, orange, pink, white, black)
    /// or an RGB array like `[255, 0, 0]` for red
    #[serde(default = "default_pencil_color")]
    pub color: ColorSpec,

    /// Stroke width in pixels (valid range: 0.5 - 50.0)
    #[serde(default = "default_pencil_width")]
    pub width: f64,
}

impl Default for PencilConfig {
    fn default() -> Self {
        Self {
            color: default_pencil_color(),
            width: default_pencil_width(),
        }
    }
}

/// Eraser settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EraserConfig {
    /// Erase width in pixels (valid range: 1.0 - 200.0)
    #[serde(default = "default_eraser_width")]
    pub width: f64,
}

impl Default for EraserConfig {
    fn default() -> Self {
        Self {
            width: default_eraser_width(),
        }
    }
}

/// Flowchart overlay settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OverlayConfig {
    /// Surface width used when a diagram declares no width (valid range: 1 - 16384)
    #[serde(default = "default_fallback_width")]
    pub fallback_width: u32,

    /// Surface height used when a diagram declares no height (valid range: 1 - 16384)
    #[serde(default = "default_fallback_height")]
    pub fallback_height: u32,

    /// External converter that reads source code on stdin and prints SVG,
    /// e.g. `["node", "flowchart.js"]`. When unset the source must already be SVG.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renderer_command: Option<Vec<String>>,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fallback_width: default_fallback_width(),
            fallback_height: default_fallback_height(),
            renderer_command: None,
        }
    }
}

/// Base surface size used by the command-line host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SurfaceConfig {
    /// Width in pixels (valid range: 1 - 16384)
    #[serde(default = "default_surface_width")]
    pub width: u32,

    /// Height in pixels (valid range: 1 - 16384)
    #[serde(default = "default_surface_height")]
    pub height: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: default_surface_width(),
            height: default_surface_height(),
        }
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_pencil_color() -> ColorSpec {
    ColorSpec::Name("black".to_string())
}

fn default_pencil_width() -> f64 {
    2.0
}

fn default_eraser_width() -> f64 {
    15.0
}

fn default_fallback_width() -> u32 {
    800
}

fn default_fallback_height() -> u32 {
    600
}

fn default_surface_width() -> u32 {
    430
}

fn default_surface_height() -> u32 {
    650
}
