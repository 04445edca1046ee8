//! Raster primitive boundary shared by the stroke, overlay, and reset paths.
//!
//! Everything above this module talks to the pixel buffer exclusively through
//! [`RasterSurface`]. The production implementation is
//! [`CairoSurface`](super::CairoSurface); tests substitute recording doubles.

use super::color::{BLACK, Color};
use crate::input::Point;
use crate::util::Rect;
use thiserror::Error;

/// Largest edge, in pixels, accepted for the surface or a diagram.
pub const MAX_SURFACE_EDGE: u32 = 16384;

/// Logical raster dimensions of the surface, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Rectangle covering the whole surface, `None` for a zero-area size.
    pub fn full_rect(&self) -> Option<Rect> {
        Rect::full(self.width, self.height)
    }

    /// Both edges lie in `1..=MAX_SURFACE_EDGE`.
    pub fn is_drawable(&self) -> bool {
        let edge = 1..=MAX_SURFACE_EDGE;
        edge.contains(&self.width) && edge.contains(&self.height)
    }

    /// Returns the size unchanged if it is drawable, otherwise `InvalidSize`.
    pub fn validated(self) -> Result<Self, RasterError> {
        if self.is_drawable() {
            Ok(self)
        } else {
            Err(RasterError::InvalidSize {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Number of bytes in a tightly packed ARGB32 buffer of this size.
    pub fn byte_len(&self) -> usize {
        self.width as usize * self.height as usize * BYTES_PER_PIXEL
    }
}

/// Bytes per ARGB32 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// How stroked pixels combine with what is already in the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompositeMode {
    /// Paint on top of existing content (ink).
    SourceOver,
    /// Remove existing content wherever the stroke covers it (erase).
    DestinationOut,
}

impl CompositeMode {
    pub fn operator(self) -> cairo::Operator {
        match self {
            Self::SourceOver => cairo::Operator::Over,
            Self::DestinationOut => cairo::Operator::DestOut,
        }
    }
}

/// Stroke configuration applied to the surface before rasterizing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaintMode {
    pub composite: CompositeMode,
    pub line_width: f64,
    pub color: Color,
}

impl PaintMode {
    /// Ink mode: solid color painted over existing content.
    pub fn ink(color: Color, line_width: f64) -> Self {
        Self {
            composite: CompositeMode::SourceOver,
            line_width,
            color,
        }
    }

    /// Erase mode: removes pixels along the stroke. Color only affects coverage.
    pub fn erase(line_width: f64) -> Self {
        Self {
            composite: CompositeMode::DestinationOut,
            line_width,
            color: BLACK,
        }
    }

    pub fn is_erase(&self) -> bool {
        self.composite == CompositeMode::DestinationOut
    }
}

impl Default for PaintMode {
    /// Freshly created or resized surfaces start with a 1px black ink stroke.
    fn default() -> Self {
        Self::ink(BLACK, 1.0)
    }
}

/// Captured pixel block in tightly packed, premultiplied ARGB32 (native endian).
#[derive(Clone, PartialEq, Eq)]
pub struct RasterSnapshot {
    size: SurfaceSize,
    data: Vec<u8>,
}

impl RasterSnapshot {
    /// Wraps raw pixel data. Returns `None` if the length does not match `size`.
    pub fn from_raw(size: SurfaceSize, data: Vec<u8>) -> Option<Self> {
        (data.len() == size.byte_len()).then_some(Self { size, data })
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Returns the ARGB32 value at `(x, y)`, if inside the snapshot.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let offset = (y as usize * self.size.width as usize + x as usize) * BYTES_PER_PIXEL;
        let bytes: [u8; 4] = self.data[offset..offset + BYTES_PER_PIXEL].try_into().ok()?;
        Some(u32::from_ne_bytes(bytes))
    }
}

impl std::fmt::Debug for RasterSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RasterSnapshot")
            .field("size", &self.size)
            .field("bytes", &self.data.len())
            .finish()
    }
}

/// Decoded diagram image ready to be painted, in the same format as [`RasterSnapshot`].
pub type DecodedImage = RasterSnapshot;

/// Errors raised by raster primitives.
#[derive(Debug, Error)]
pub enum RasterError {
    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("pixel buffer is borrowed elsewhere: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("failed to write image: {0}")]
    Io(#[from] cairo::IoError),

    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

/// Low-level operations on the single pixel buffer backing the surface.
///
/// Mirrors the 2D-canvas model: resizing discards content *and* resets the
/// paint mode, `line_to` strokes the new segment immediately, and
/// `write_pixels` replaces pixels rather than compositing them.
pub trait RasterSurface {
    /// Current raster dimensions.
    fn size(&self) -> SurfaceSize;

    /// Reallocates the buffer. Content becomes transparent, paint mode and path reset.
    fn resize(&mut self, size: SurfaceSize) -> Result<(), RasterError>;

    /// Paint mode used by subsequent strokes.
    fn paint_mode(&self) -> PaintMode;

    fn set_paint_mode(&mut self, mode: PaintMode);

    /// Opens a fresh path at `at` without drawing anything.
    fn begin_path(&mut self, at: Point);

    /// Extends the open path to `to` and strokes the new segment with the current mode.
    fn line_to(&mut self, to: Point) -> Result<(), RasterError>;

    /// Makes every pixel inside `rect` fully transparent.
    fn clear(&mut self, rect: Rect) -> Result<(), RasterError>;

    /// Copies the pixels inside `rect`. Areas outside the surface read as transparent.
    fn read_pixels(&mut self, rect: Rect) -> Result<RasterSnapshot, RasterError>;

    /// Writes `pixels` with its top-left corner at `origin`, clipping to the surface.
    fn write_pixels(
        &mut self,
        pixels: &RasterSnapshot,
        origin: (i32, i32),
    ) -> Result<(), RasterError>;

    /// Paints `image` scaled to `size` at `origin`, composited over existing content.
    fn draw_image(
        &mut self,
        image: &DecodedImage,
        origin: (i32, i32),
        size: SurfaceSize,
    ) -> Result<(), RasterError>;

    /// Clears the entire buffer at its current size.
    fn clear_all(&mut self) -> Result<(), RasterError> {
        match self.size().full_rect() {
            Some(rect) => self.clear(rect),
            None => Ok(()),
        }
    }

    /// Captures the entire buffer at its current size.
    fn snapshot(&mut self) -> Result<RasterSnapshot, RasterError> {
        let size = self.size();
        match size.full_rect() {
            Some(rect) => self.read_pixels(rect),
            None => Err(RasterError::InvalidSize {
                width: size.width,
                height: size.height,
            }),
        }
    }
}
