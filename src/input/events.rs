//! Pointer event types delivered by the host.

/// Surface-local coordinate in the surface's own pixel space.
///
/// Hosts that embed the surface in a scrolling container must translate
/// pointer positions into this space before dispatching.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x as f64, y as f64)
    }
}

/// Pointer (mouse) event on the surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Primary button pressed at a point
    Down(Point),
    /// Pointer moved to a point (button state is tracked by the stroke session)
    Move(Point),
    /// Primary button released
    Up,
    /// Pointer left the surface bounds
    Leave,
}
