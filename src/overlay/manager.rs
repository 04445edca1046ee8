//! Overlay toggle state machine with snapshot capture and restore.

use super::decode::{DecodeError, PaintTicket, PendingPaint};
use super::document::DEFAULT_DIAGRAM_SIZE;
use super::renderer::{DiagramRenderer, RenderError};
use crate::draw::{DecodedImage, RasterError, RasterSnapshot, RasterSurface, SurfaceSize};
use thiserror::Error;

/// Whether the diagram currently occupies the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    Visible,
}

/// Errors that abort an overlay transition.
#[derive(Debug, Error)]
pub enum OverlayError {
    /// The renderer rejected the source. Display text is deliberately generic;
    /// the underlying cause is available through `source()`.
    #[error("Invalid source code for flowchart")]
    Render(#[from] RenderError),

    #[error("surface update failed: {0}")]
    Raster(#[from] RasterError),
}

/// Result of a successful toggle.
#[derive(Debug)]
pub enum OverlayTransition {
    /// Overlay is now visible; the diagram still has to be decoded and painted.
    Shown(PendingPaint),
    /// Overlay is hidden again and the freehand content restored.
    Hidden,
}

/// What happened to a decode completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintOutcome {
    /// Diagram pixels were written to the surface.
    Painted,
    /// The ticket belongs to an older activation (or was already used); ignored.
    Stale,
    /// Decoding failed; the surface stays cleared.
    Failed,
}

/// Owns the overlay toggle, the single snapshot slot, and the paint generation.
///
/// Invariant: a snapshot is held exactly while the state is `Visible`.
#[derive(Debug)]
pub struct OverlayManager {
    state: OverlayState,
    snapshot: Option<RasterSnapshot>,
    generation: u64,
    awaiting: Option<PaintTicket>,
    fallback_size: SurfaceSize,
}

impl Default for OverlayManager {
    fn default() -> Self {
        Self::new(DEFAULT_DIAGRAM_SIZE)
    }
}

impl OverlayManager {
    /// Creates a hidden overlay.
    ///
    /// # Arguments
    /// * `fallback_size` - Surface size for diagrams that declare no width/height
    pub fn new(fallback_size: SurfaceSize) -> Self {
        Self {
            state: OverlayState::Hidden,
            snapshot: None,
            generation: 0,
            awaiting: None,
            fallback_size,
        }
    }

    pub fn state(&self) -> OverlayState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == OverlayState::Visible
    }

    pub fn has_snapshot(&self) -> bool {
        self.snapshot.is_some()
    }

    /// Ticket of the paint still expected for the current activation, if any.
    pub fn awaiting_paint(&self) -> Option<PaintTicket> {
        self.awaiting
    }

    /// Flips between `Hidden` and `Visible`.
    ///
    /// # Arguments
    /// * `surface` - Pixel buffer the overlay replaces
    /// * `renderer` - Converts `source` into a diagram (only used when showing)
    /// * `source` - Current source-code string
    /// * `base_size` - Host-supplied size restored when hiding
    pub fn toggle(
        &mut self,
        surface: &mut dyn RasterSurface,
        renderer: &dyn DiagramRenderer,
        source: &str,
        base_size: SurfaceSize,
    ) -> Result<OverlayTransition, OverlayError> {
        match self.state {
            OverlayState::Hidden => self
                .show(surface, renderer, source)
                .map(OverlayTransition::Shown),
            OverlayState::Visible => {
                self.hide(surface, base_size)?;
                Ok(OverlayTransition::Hidden)
            }
        }
    }

    /// Hidden -> Visible.
    ///
    /// The snapshot is taken before anything else touches the buffer. If the
    /// renderer fails or the diagram size is not drawable, the snapshot is
    /// dropped and neither the buffer nor the state change.
    pub fn show(
        &mut self,
        surface: &mut dyn RasterSurface,
        renderer: &dyn DiagramRenderer,
        source: &str,
    ) -> Result<PendingPaint, OverlayError> {
        let snapshot = surface.snapshot()?;

        let document = match renderer.render(source) {
            Ok(document) => document,
            Err(err) => {
                log::warn!("Flowchart rendering failed: {}", err);
                return Err(err.into());
            }
        };

        let size = document.size_or(self.fallback_size);
        if let Err(err) = size.validated() {
            log::warn!("Diagram size rejected: {}", err);
            return Err(err.into());
        }
        surface.resize(size)?;
        surface.clear_all()?;

        self.generation += 1;
        let ticket = PaintTicket(self.generation);
        self.snapshot = Some(snapshot);
        self.awaiting = Some(ticket);
        self.state = OverlayState::Visible;

        log::info!(
            "Overlay shown at {}x{} (generation {})",
            size.width,
            size.height,
            self.generation
        );

        Ok(PendingPaint {
            ticket,
            document,
            size,
        })
    }

    /// Visible -> Hidden.
    ///
    /// Restores `base_size` and writes the snapshot back. Any paint still in
    /// flight for this activation becomes stale.
    ///
    /// If the buffer cannot be restored the overlay stays `Visible` and keeps
    /// its snapshot, so a later hide can still bring the drawing back.
    pub fn hide(
        &mut self,
        surface: &mut dyn RasterSurface,
        base_size: SurfaceSize,
    ) -> Result<(), RasterError> {
        surface.resize(base_size.validated()?)?;
        match &self.snapshot {
            Some(snapshot) => surface.write_pixels(snapshot, (0, 0))?,
            None => {
                log::warn!("Overlay hidden without a snapshot; clearing surface");
                surface.clear_all()?;
            }
        }

        self.snapshot = None;
        self.awaiting = None;
        self.state = OverlayState::Hidden;

        log::info!(
            "Overlay hidden, restored {}x{}",
            base_size.width,
            base_size.height
        );
        Ok(())
    }

    /// Applies a decode completion.
    ///
    /// Only the ticket issued by the current activation is honored, and only
    /// once. The buffer is cleared again right before painting, so a reset
    /// or stray stroke since activation never shows under the diagram.
    pub fn complete_paint(
        &mut self,
        surface: &mut dyn RasterSurface,
        ticket: PaintTicket,
        result: Result<DecodedImage, DecodeError>,
    ) -> Result<PaintOutcome, RasterError> {
        if !self.is_visible() || self.awaiting != Some(ticket) {
            log::debug!(
                "Discarding stale diagram paint (generation {})",
                ticket.generation()
            );
            return Ok(PaintOutcome::Stale);
        }
        self.awaiting = None;

        match result {
            Ok(image) => {
                let size = surface.size();
                surface.clear_all()?;
                surface.draw_image(&image, (0, 0), size)?;
                log::debug!("Painted diagram (generation {})", ticket.generation());
                Ok(PaintOutcome::Painted)
            }
            Err(err) => {
                log::warn!("Diagram could not be painted: {}", err);
                Ok(PaintOutcome::Failed)
            }
        }
    }
}
