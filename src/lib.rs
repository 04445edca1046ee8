//! Embeddable drawing surface with pencil and eraser tools and a flowchart
//! overlay rendered from source code.
//!
//! The core ([`surface::SurfaceController`]) is host-agnostic: it drives any
//! [`draw::RasterSurface`] and consumes any [`overlay::DiagramRenderer`]. The
//! `flowboard` binary replays TOML scripts against a cairo-backed surface.

pub mod config;
pub mod draw;
pub mod input;
pub mod notification;
pub mod overlay;
pub mod script;
pub mod surface;
pub mod util;

pub use config::Config;
