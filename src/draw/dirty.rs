//! Repaint damage accumulated between host frames.

use super::raster::SurfaceSize;
use crate::util::Rect;

/// Damage recorded by strokes (segment bounds) and by whole-buffer changes
/// such as reset, resize, snapshot restore and diagram paint.
#[derive(Debug, Default)]
pub struct DirtyTracker {
    regions: Vec<Rect>,
    whole_surface: bool,
}

impl DirtyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything changed; individual regions are dropped.
    pub fn mark_full(&mut self) {
        self.whole_surface = true;
        self.regions.clear();
    }

    /// Records the bounds of a stroked segment, if any.
    pub fn mark_optional_rect(&mut self, rect: Option<Rect>) {
        match rect {
            Some(rect) if !self.whole_surface && rect.is_valid() => self.regions.push(rect),
            _ => {}
        }
    }

    pub fn is_clean(&self) -> bool {
        !self.whole_surface && self.regions.is_empty()
    }

    /// Drains the recorded damage, clipped to a surface of `size`.
    pub fn take_regions(&mut self, size: SurfaceSize) -> Vec<Rect> {
        let regions = std::mem::take(&mut self.regions);
        if std::mem::take(&mut self.whole_surface) {
            return size.full_rect().into_iter().collect();
        }

        let (width, height) = (size.width as i32, size.height as i32);
        regions
            .into_iter()
            .filter_map(|rect| rect.clamped_to(width, height))
            .collect()
    }
}
