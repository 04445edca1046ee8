//! Embeddable drawing surface.
//!
//! [`SurfaceController`] composes the tool controller, the stroke rasterizer
//! and the flowchart overlay over a single [`RasterSurface`](crate::draw::RasterSurface)
//! and exposes the four user actions: pencil, eraser, reset, and overlay toggle.

pub mod controller;
pub mod props;

pub use controller::SurfaceController;
pub use props::{Affordances, SurfaceOptions, SurfaceProps};
