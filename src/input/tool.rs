//! Drawing tool selection.

/// Drawing tool selection.
///
/// Exactly one value is active at a time. Tools change only through explicit
/// selection actions, never through pointer events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tool {
    /// No drawing tool; pointer input is ignored
    #[default]
    None,
    /// Freehand ink
    Pencil,
    /// Freehand erasure
    Eraser,
}

impl Tool {
    /// Returns true if pointer input produces strokes with this tool.
    pub fn is_drawing(self) -> bool {
        !matches!(self, Self::None)
    }

    /// Pointer cursor the host should show over the surface.
    pub fn cursor(self) -> CursorIcon {
        match self {
            Self::None => CursorIcon::Default,
            Self::Pencil => CursorIcon::Pencil,
            Self::Eraser => CursorIcon::Eraser,
        }
    }
}

/// Cursor shown over the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorIcon {
    Default,
    /// Pencil icon, hotspot at its tip
    Pencil,
    /// Eraser icon, hotspot at its tip
    Eraser,
}

impl CursorIcon {
    /// Hotspot offset within the cursor image, in pixels.
    pub fn hotspot(self) -> (u32, u32) {
        match self {
            Self::Default => (0, 0),
            Self::Pencil | Self::Eraser => (0, 14),
        }
    }
}
