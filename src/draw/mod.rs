//! Pixel buffer primitives (Cairo-based).
//!
//! This module defines the raster layer the surface state machine drives:
//! - [`Color`]: RGBA color representation with predefined color constants
//! - [`RasterSurface`]: the begin/line-to/clear/read/write/draw-image boundary
//! - [`CairoSurface`]: the production buffer backed by a cairo image surface
//! - [`DirtyTracker`]: damage accumulated between host repaints

pub mod cairo_surface;
pub mod color;
pub mod dirty;
pub mod raster;

#[cfg(test)]
pub(crate) mod testing;

// Re-export commonly used types at module level
pub use cairo_surface::CairoSurface;
pub use color::Color;
pub use dirty::DirtyTracker;
pub use raster::{
    CompositeMode, DecodedImage, MAX_SURFACE_EDGE, PaintMode, RasterError, RasterSnapshot,
    RasterSurface, SurfaceSize,
};

// Re-export color constants for public API
pub use color::{BLACK, BLUE, GREEN, ORANGE, PINK, RED, WHITE, YELLOW};
