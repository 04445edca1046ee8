//! Host-facing inputs and presentation state of a surface.

use crate::config::Config;
use crate::draw::{PaintMode, SurfaceSize};
use crate::input::CursorIcon;

/// Properties supplied by the embedding host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SurfaceProps {
    /// Base width while the overlay is hidden
    pub width: u32,
    /// Base height while the overlay is hidden
    pub height: u32,
    /// Source code handed to the diagram renderer (absent means empty)
    pub code: Option<String>,
    /// Opaque styling tag, passed through untouched
    pub class_name: Option<String>,
}

impl SurfaceProps {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            code: None,
            class_name: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    pub fn base_size(&self) -> SurfaceSize {
        SurfaceSize::new(self.width, self.height)
    }

    /// Renderer input; a missing `code` is treated as an empty string.
    pub fn source(&self) -> &str {
        self.code.as_deref().unwrap_or_default()
    }
}

/// Tool and overlay tuning, normally derived from [`Config`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceOptions {
    pub pencil: PaintMode,
    pub eraser: PaintMode,
    pub fallback_size: SurfaceSize,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl SurfaceOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            pencil: PaintMode::ink(config.pencil.color.to_color(), config.pencil.width),
            eraser: PaintMode::erase(config.eraser.width),
            fallback_size: SurfaceSize::new(
                config.overlay.fallback_width,
                config.overlay.fallback_height,
            ),
        }
    }
}

/// Highlight state of the host's controls plus the cursor to show.
///
/// Reset carries no state of its own and so has no flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Affordances {
    pub pencil: bool,
    pub eraser: bool,
    pub flowchart: bool,
    pub cursor: CursorIcon,
}
