//! Input handling and tool state machine.
//!
//! This module translates host pointer events into rasterized strokes.
//! It owns which tool is active, enforces pencil/eraser mutual exclusion,
//! and configures the raster surface's paint mode for each tool.

pub mod controller;
pub mod events;
pub mod stroke;
pub mod tool;

// Re-export commonly used types at module level
pub use controller::ToolController;
pub use events::{Point, PointerEvent};
pub use stroke::{StrokeRasterizer, StrokeSession};
pub use tool::{CursorIcon, Tool};
