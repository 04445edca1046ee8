//! Pointer-driven stroke lifecycle.

use super::events::Point;
use crate::draw::{PaintMode, RasterError, RasterSurface};
use crate::util::Rect;

/// In-progress stroke: exists from pointer-down until pointer-up/leave.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeSession {
    /// Most recent sample; the next segment starts here
    pub last_point: Point,
}

/// Turns pointer samples into rasterized ink or erasure.
///
/// A rasterizer is bound to the paint mode of one tool selection. An unbound
/// rasterizer (no tool active) ignores all pointer input, which keeps the
/// "session only while a drawing tool is active" invariant structural.
#[derive(Debug, Default)]
pub struct StrokeRasterizer {
    mode: Option<PaintMode>,
    session: Option<StrokeSession>,
}

impl StrokeRasterizer {
    /// Rasterizer for the `Tool::None` state.
    pub fn unbound() -> Self {
        Self::default()
    }

    /// Rasterizer drawing with `mode`.
    pub fn bound(mode: PaintMode) -> Self {
        Self {
            mode: Some(mode),
            session: None,
        }
    }

    pub fn mode(&self) -> Option<PaintMode> {
        self.mode
    }

    pub fn session(&self) -> Option<&StrokeSession> {
        self.session.as_ref()
    }

    pub fn is_stroking(&self) -> bool {
        self.session.is_some()
    }

    /// Processes a pointer press.
    ///
    /// # Behavior
    /// - Unbound: no-op, returns false
    /// - Bound: re-applies the paint mode to the surface, opens a fresh path at
    ///   `at` (nothing is drawn yet) and starts a new session
    /// - Non-finite `at`: ignored, returns false
    pub fn on_pointer_down(&mut self, surface: &mut dyn RasterSurface, at: Point) -> bool {
        let Some(mode) = self.mode else {
            return false;
        };
        if !at.is_finite() {
            log::debug!("Ignoring pointer down at non-finite position");
            return false;
        }

        surface.set_paint_mode(mode);
        surface.begin_path(at);
        self.session = Some(StrokeSession { last_point: at });
        log::debug!("Stroke started at ({:.1}, {:.1})", at.x, at.y);
        true
    }

    /// Processes pointer motion.
    ///
    /// Each segment is rasterized immediately so an interrupted stroke stays
    /// visible up to its last sample.
    ///
    /// # Returns
    /// The damaged rectangle, or `None` when no session is active or `to` is
    /// not finite. Non-finite samples are dropped and the stroke continues
    /// from the last good point.
    pub fn on_pointer_move(
        &mut self,
        surface: &mut dyn RasterSurface,
        to: Point,
    ) -> Result<Option<Rect>, RasterError> {
        let (Some(mode), Some(session)) = (self.mode, self.session.as_mut()) else {
            return Ok(None);
        };
        if !to.is_finite() {
            return Ok(None);
        }

        let from = session.last_point;
        session.last_point = to;
        surface.line_to(to)?;

        Ok(Rect::around_segment(
            from.x,
            from.y,
            to.x,
            to.y,
            mode.line_width,
        ))
    }

    /// Ends the current session. Returns whether one was active.
    ///
    /// Pointer-up and pointer-leave both end up here; calling it without an
    /// active session is a no-op.
    pub fn end_stroke(&mut self) -> bool {
        let ended = self.session.take().is_some();
        if ended {
            log::debug!("Stroke ended");
        }
        ended
    }
}
