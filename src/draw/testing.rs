use super::{
    CairoSurface, DecodedImage, PaintMode, RasterError, RasterSnapshot, RasterSurface, SurfaceSize,
};
use crate::input::Point;
use crate::util::Rect;

/// Primitive calls observed by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum RasterCall {
    Resize(SurfaceSize),
    SetPaintMode(PaintMode),
    BeginPath(Point),
    LineTo(Point),
    Clear(Rect),
    ReadPixels(Rect),
    WritePixels((i32, i32)),
    DrawImage(SurfaceSize),
}

/// Cairo surface that also logs every primitive call in order.
pub(crate) struct RecordingSurface {
    inner: CairoSurface,
    pub(crate) calls: Vec<RasterCall>,
}

impl RecordingSurface {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self {
            inner: CairoSurface::new(SurfaceSize::new(width, height)).unwrap(),
            calls: Vec::new(),
        }
    }

    pub(crate) fn take_calls(&mut self) -> Vec<RasterCall> {
        std::mem::take(&mut self.calls)
    }

    /// Number of calls that can change pixels.
    pub(crate) fn mutation_count(&self) -> usize {
        self.calls
            .iter()
            .filter(|call| {
                matches!(
                    call,
                    RasterCall::LineTo(_)
                        | RasterCall::Clear(_)
                        | RasterCall::WritePixels(_)
                        | RasterCall::DrawImage(_)
                        | RasterCall::Resize(_)
                )
            })
            .count()
    }
}

impl RasterSurface for RecordingSurface {
    fn size(&self) -> SurfaceSize {
        self.inner.size()
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), RasterError> {
        self.calls.push(RasterCall::Resize(size));
        self.inner.resize(size)
    }

    fn paint_mode(&self) -> PaintMode {
        self.inner.paint_mode()
    }

    fn set_paint_mode(&mut self, mode: PaintMode) {
        self.calls.push(RasterCall::SetPaintMode(mode));
        self.inner.set_paint_mode(mode);
    }

    fn begin_path(&mut self, at: Point) {
        self.calls.push(RasterCall::BeginPath(at));
        self.inner.begin_path(at);
    }

    fn line_to(&mut self, to: Point) -> Result<(), RasterError> {
        self.calls.push(RasterCall::LineTo(to));
        self.inner.line_to(to)
    }

    fn clear(&mut self, rect: Rect) -> Result<(), RasterError> {
        self.calls.push(RasterCall::Clear(rect));
        self.inner.clear(rect)
    }

    fn read_pixels(&mut self, rect: Rect) -> Result<RasterSnapshot, RasterError> {
        self.calls.push(RasterCall::ReadPixels(rect));
        self.inner.read_pixels(rect)
    }

    fn write_pixels(
        &mut self,
        pixels: &RasterSnapshot,
        origin: (i32, i32),
    ) -> Result<(), RasterError> {
        self.calls.push(RasterCall::WritePixels(origin));
        self.inner.write_pixels(pixels, origin)
    }

    fn draw_image(
        &mut self,
        image: &DecodedImage,
        origin: (i32, i32),
        size: SurfaceSize,
    ) -> Result<(), RasterError> {
        self.calls.push(RasterCall::DrawImage(size));
        self.inner.draw_image(image, origin, size)
    }
}

/// Solid-color decoded image for paint-completion tests.
pub(crate) fn solid_image(size: SurfaceSize, argb: u32) -> DecodedImage {
    let data = argb
        .to_ne_bytes()
        .repeat(size.width as usize * size.height as usize);
    DecodedImage::from_raw(size, data).unwrap()
}
