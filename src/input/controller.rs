//! Tool activation and rasterizer binding.

use super::events::PointerEvent;
use super::stroke::StrokeRasterizer;
use super::tool::Tool;
use crate::draw::{PaintMode, RasterError, RasterSurface};
use crate::util::Rect;

/// Owns the active [`Tool`] and the rasterizer bound to it.
///
/// Every tool change replaces the rasterizer binding; dropping the old
/// binding ends any stroke that was in progress.
pub struct ToolController {
    tool: Tool,
    pencil: PaintMode,
    eraser: PaintMode,
    rasterizer: StrokeRasterizer,
}

impl ToolController {
    /// Creates a controller with no tool selected.
    ///
    /// # Arguments
    /// * `pencil` - Paint mode applied while the pencil is active
    /// * `eraser` - Paint mode applied while the eraser is active
    pub fn new(pencil: PaintMode, eraser: PaintMode) -> Self {
        Self {
            tool: Tool::None,
            pencil,
            eraser,
            rasterizer: StrokeRasterizer::unbound(),
        }
    }

    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Paint mode for the active tool, `None` when no tool is selected.
    pub fn paint_mode(&self) -> Option<PaintMode> {
        self.mode_for(self.tool)
    }

    pub fn rasterizer(&self) -> &StrokeRasterizer {
        &self.rasterizer
    }

    fn mode_for(&self, tool: Tool) -> Option<PaintMode> {
        match tool {
            Tool::None => None,
            Tool::Pencil => Some(self.pencil),
            Tool::Eraser => Some(self.eraser),
        }
    }

    /// Activates the pencil (ink mode). Deactivates the eraser.
    pub fn select_pencil(&mut self, surface: &mut dyn RasterSurface) {
        self.select(Tool::Pencil, surface);
    }

    /// Activates the eraser (erase mode). Deactivates the pencil.
    pub fn select_eraser(&mut self, surface: &mut dyn RasterSurface) {
        self.select(Tool::Eraser, surface);
    }

    /// Switches to `tool` and configures the surface synchronously.
    ///
    /// Re-selecting the active tool only re-applies its paint mode; the
    /// binding (and any stroke in progress) survives.
    pub fn select(&mut self, tool: Tool, surface: &mut dyn RasterSurface) {
        let mode = self.mode_for(tool);

        if tool != self.tool {
            let previous = std::mem::replace(&mut self.tool, tool);
            self.rasterizer = match mode {
                Some(mode) => StrokeRasterizer::bound(mode),
                None => StrokeRasterizer::unbound(),
            };
            log::info!("Tool changed from {:?} to {:?}", previous, tool);
        }

        if let Some(mode) = mode {
            surface.set_paint_mode(mode);
        }
    }

    /// Routes a pointer event through the bound rasterizer.
    ///
    /// # Returns
    /// The damaged rectangle for motion that produced a segment.
    pub fn handle_pointer(
        &mut self,
        surface: &mut dyn RasterSurface,
        event: PointerEvent,
    ) -> Result<Option<Rect>, RasterError> {
        match event {
            PointerEvent::Down(at) => {
                self.rasterizer.on_pointer_down(surface, at);
                Ok(None)
            }
            PointerEvent::Move(to) => self.rasterizer.on_pointer_move(surface, to),
            PointerEvent::Up | PointerEvent::Leave => {
                self.rasterizer.end_stroke();
                Ok(None)
            }
        }
    }
}
