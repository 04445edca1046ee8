//! Flowchart overlay.
//!
//! Turning the overlay on snapshots the freehand drawing, renders the source
//! code into an SVG diagram, resizes the surface to the diagram, and schedules
//! the diagram paint. Turning it off restores the snapshot at the host size.

pub mod decode;
pub mod document;
pub mod manager;
pub mod renderer;

pub use decode::{
    DecodeError, DiagramDecoder, PaintTicket, PendingPaint, ResvgDecoder, decode_in_background,
};
pub use document::{DEFAULT_DIAGRAM_SIZE, DiagramDocument};
pub use manager::{OverlayError, OverlayManager, OverlayState, OverlayTransition, PaintOutcome};
pub use renderer::{CommandRenderer, DiagramRenderer, RenderError, SvgMarkupRenderer};
