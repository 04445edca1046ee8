//! The drawing surface: tools, strokes, reset, and the flowchart overlay over
//! one pixel buffer.

use super::props::{Affordances, SurfaceOptions, SurfaceProps};
use crate::draw::{DecodedImage, DirtyTracker, RasterError, RasterSurface, SurfaceSize};
use crate::input::{Point, PointerEvent, Tool, ToolController};
use crate::overlay::{
    DecodeError, DiagramRenderer, OverlayError, OverlayManager, OverlayState, OverlayTransition,
    PaintOutcome, PaintTicket,
};
use crate::util::Rect;

/// Embeddable drawing surface.
///
/// All operations run on the caller's thread. The only deferred work is the
/// diagram decode after [`toggle_overlay`](Self::toggle_overlay), which the
/// host performs and reports back through [`complete_paint`](Self::complete_paint).
pub struct SurfaceController<S: RasterSurface> {
    surface: S,
    renderer: Box<dyn DiagramRenderer>,
    tools: ToolController,
    overlay: OverlayManager,
    props: SurfaceProps,
    dirty: DirtyTracker,
}

impl<S: RasterSurface> SurfaceController<S> {
    /// Creates a surface with no tool selected and the overlay hidden.
    ///
    /// The buffer is resized to the props' base size if it differs. A base
    /// size outside `1..=MAX_SURFACE_EDGE` is rejected with `InvalidSize`.
    pub fn new(
        props: SurfaceProps,
        options: SurfaceOptions,
        mut surface: S,
        renderer: Box<dyn DiagramRenderer>,
    ) -> Result<Self, RasterError> {
        let base = props.base_size().validated()?;
        if surface.size() != base {
            surface.resize(base)?;
        }

        let mut dirty = DirtyTracker::new();
        dirty.mark_full();

        Ok(Self {
            surface,
            renderer,
            tools: ToolController::new(options.pencil, options.eraser),
            overlay: OverlayManager::new(options.fallback_size),
            props,
            dirty,
        })
    }

    /// Current logical size of the buffer.
    pub fn size(&self) -> SurfaceSize {
        self.surface.size()
    }

    pub fn tool(&self) -> Tool {
        self.tools.tool()
    }

    pub fn overlay_state(&self) -> OverlayState {
        self.overlay.state()
    }

    pub fn props(&self) -> &SurfaceProps {
        &self.props
    }

    pub fn class_name(&self) -> Option<&str> {
        self.props.class_name.as_deref()
    }

    /// Ticket of the diagram paint the surface is still waiting for.
    pub fn pending_paint(&self) -> Option<PaintTicket> {
        self.overlay.awaiting_paint()
    }

    pub fn affordances(&self) -> Affordances {
        let tool = self.tools.tool();
        Affordances {
            pencil: tool == Tool::Pencil,
            eraser: tool == Tool::Eraser,
            flowchart: self.overlay.is_visible(),
            cursor: tool.cursor(),
        }
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Drains the regions changed since the last call, clamped to the buffer.
    pub fn take_dirty_regions(&mut self) -> Vec<Rect> {
        self.dirty.take_regions(self.surface.size())
    }

    pub fn select_pencil(&mut self) {
        self.tools.select_pencil(&mut self.surface);
    }

    pub fn select_eraser(&mut self) {
        self.tools.select_eraser(&mut self.surface);
    }

    /// Clears the whole buffer at its current size.
    ///
    /// Tool, overlay state and the overlay snapshot are left alone.
    pub fn reset(&mut self) {
        if let Err(err) = self.surface.clear_all() {
            log::warn!("Failed to clear surface: {}", err);
        }
        self.dirty.mark_full();
        log::debug!("Surface reset");
    }

    /// Shows or hides the flowchart overlay.
    ///
    /// On show the returned [`PendingPaint`](crate::overlay::PendingPaint) must
    /// be decoded and passed to [`complete_paint`](Self::complete_paint). A
    /// render failure leaves the surface exactly as it was.
    pub fn toggle_overlay(&mut self) -> Result<OverlayTransition, OverlayError> {
        let base = self.props.base_size();
        let result = self.overlay.toggle(
            &mut self.surface,
            self.renderer.as_ref(),
            self.props.source(),
            base,
        );
        if !matches!(result, Err(OverlayError::Render(_))) {
            self.dirty.mark_full();
        }
        result
    }

    /// Decode completion for a paint issued by [`toggle_overlay`](Self::toggle_overlay).
    pub fn complete_paint(
        &mut self,
        ticket: PaintTicket,
        result: Result<DecodedImage, DecodeError>,
    ) -> PaintOutcome {
        match self
            .overlay
            .complete_paint(&mut self.surface, ticket, result)
        {
            Ok(PaintOutcome::Painted) => {
                self.dirty.mark_full();
                PaintOutcome::Painted
            }
            Ok(outcome) => outcome,
            Err(err) => {
                log::warn!("Failed to paint diagram: {}", err);
                self.dirty.mark_full();
                PaintOutcome::Failed
            }
        }
    }

    /// Applies new host props.
    ///
    /// `code` and `class_name` take effect immediately. A new base size
    /// resizes (and thereby clears) the buffer right away while the overlay is
    /// hidden; while it is visible the size is used on the next restore.
    ///
    /// Props with an undrawable base size are rejected and nothing changes.
    pub fn update_props(&mut self, props: SurfaceProps) -> Result<(), RasterError> {
        let base = props.base_size().validated()?;
        if base != self.props.base_size() && !self.overlay.is_visible() {
            self.surface.resize(base)?;
            self.dirty.mark_full();
            log::info!("Surface resized to {}x{}", base.width, base.height);
        }

        self.props = props;
        Ok(())
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.dispatch(PointerEvent::Down(at));
    }

    pub fn pointer_move(&mut self, to: Point) {
        self.dispatch(PointerEvent::Move(to));
    }

    pub fn pointer_up(&mut self) {
        self.dispatch(PointerEvent::Up);
    }

    pub fn pointer_leave(&mut self) {
        self.dispatch(PointerEvent::Leave);
    }

    /// Routes a pointer event to the active tool. Never fails.
    pub fn dispatch(&mut self, event: PointerEvent) {
        match self.tools.handle_pointer(&mut self.surface, event) {
            Ok(damage) => self.dirty.mark_optional_rect(damage),
            Err(err) => log::warn!("Dropped stroke segment: {}", err),
        }
    }
}
