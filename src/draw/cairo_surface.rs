//! Cairo-backed pixel buffer implementing the raster primitives.

use super::raster::{
    BYTES_PER_PIXEL, DecodedImage, PaintMode, RasterError, RasterSnapshot, RasterSurface,
    SurfaceSize,
};
use crate::input::Point;
use crate::util::Rect;
use cairo::{Context, Format, ImageSurface, LineCap, LineJoin, Operator};
use std::fs::File;
use std::path::Path;

/// ARGB32 image surface plus the canvas-style state (paint mode, open path).
///
/// No cairo context outlives a single primitive call, so the image data can
/// always be borrowed exclusively for pixel reads and writes.
pub struct CairoSurface {
    surface: ImageSurface,
    size: SurfaceSize,
    mode: PaintMode,
    cursor: Option<Point>,
}

impl CairoSurface {
    /// Creates a transparent surface of the given size.
    pub fn new(size: SurfaceSize) -> Result<Self, RasterError> {
        Ok(Self {
            surface: create_image_surface(size)?,
            size,
            mode: PaintMode::default(),
            cursor: None,
        })
    }

    /// Borrow the underlying cairo surface (e.g. to composite it into a window).
    pub fn image_surface(&self) -> &ImageSurface {
        &self.surface
    }

    /// Writes the current buffer to `path` as PNG.
    pub fn write_png(&self, path: &Path) -> Result<(), RasterError> {
        let mut file = File::create(path).map_err(cairo::IoError::Io)?;
        self.surface.write_to_png(&mut file)?;
        log::info!(
            "Wrote {}x{} surface to {}",
            self.size.width,
            self.size.height,
            path.display()
        );
        Ok(())
    }

    fn context(&self) -> Result<Context, RasterError> {
        Ok(Context::new(&self.surface)?)
    }
}

fn create_image_surface(size: SurfaceSize) -> Result<ImageSurface, RasterError> {
    let size = size.validated()?;
    Ok(ImageSurface::create(
        Format::ARgb32,
        size.width as i32,
        size.height as i32,
    )?)
}

impl RasterSurface for CairoSurface {
    fn size(&self) -> SurfaceSize {
        self.size
    }

    fn resize(&mut self, size: SurfaceSize) -> Result<(), RasterError> {
        self.surface = create_image_surface(size)?;
        self.size = size;
        self.mode = PaintMode::default();
        self.cursor = None;
        log::debug!("Resized surface to {}x{}", size.width, size.height);
        Ok(())
    }

    fn paint_mode(&self) -> PaintMode {
        self.mode
    }

    fn set_paint_mode(&mut self, mode: PaintMode) {
        self.mode = mode;
    }

    fn begin_path(&mut self, at: Point) {
        self.cursor = Some(at);
    }

    fn line_to(&mut self, to: Point) -> Result<(), RasterError> {
        // An empty path treats the first line_to as a move.
        let Some(from) = self.cursor.replace(to) else {
            return Ok(());
        };

        let ctx = self.context()?;
        ctx.set_operator(self.mode.composite.operator());
        ctx.set_line_width(self.mode.line_width);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);
        self.mode.color.apply(&ctx);
        ctx.move_to(from.x, from.y);
        ctx.line_to(to.x, to.y);
        ctx.stroke()?;
        Ok(())
    }

    fn clear(&mut self, rect: Rect) -> Result<(), RasterError> {
        let ctx = self.context()?;
        ctx.set_operator(Operator::Clear);
        ctx.rectangle(
            rect.x as f64,
            rect.y as f64,
            rect.width as f64,
            rect.height as f64,
        );
        ctx.fill()?;
        Ok(())
    }

    fn read_pixels(&mut self, rect: Rect) -> Result<RasterSnapshot, RasterError> {
        let size = SurfaceSize::new(rect.width as u32, rect.height as u32);
        let mut out = vec![0u8; size.byte_len()];
        let out_stride = size.width as usize * BYTES_PER_PIXEL;

        if let Some(visible) = rect.clamped_to(self.size.width as i32, self.size.height as i32) {
            let stride = self.surface.stride() as usize;
            let data = self.surface.data()?;
            let row_bytes = visible.width as usize * BYTES_PER_PIXEL;
            for y in visible.y..visible.y + visible.height {
                let src = y as usize * stride + visible.x as usize * BYTES_PER_PIXEL;
                let dst = (y - rect.y) as usize * out_stride
                    + (visible.x - rect.x) as usize * BYTES_PER_PIXEL;
                out[dst..dst + row_bytes].copy_from_slice(&data[src..src + row_bytes]);
            }
        }

        RasterSnapshot::from_raw(size, out).ok_or(RasterError::InvalidSize {
            width: size.width,
            height: size.height,
        })
    }

    fn write_pixels(
        &mut self,
        pixels: &RasterSnapshot,
        origin: (i32, i32),
    ) -> Result<(), RasterError> {
        let src_size = pixels.size();
        let Some(target) = Rect::new(
            origin.0,
            origin.1,
            src_size.width as i32,
            src_size.height as i32,
        )
        .and_then(|rect| rect.clamped_to(self.size.width as i32, self.size.height as i32)) else {
            return Ok(());
        };

        let stride = self.surface.stride() as usize;
        let src_stride = src_size.width as usize * BYTES_PER_PIXEL;
        let row_bytes = target.width as usize * BYTES_PER_PIXEL;
        let src_data = pixels.data();
        let mut data = self.surface.data()?;
        for y in target.y..target.y + target.height {
            let dst = y as usize * stride + target.x as usize * BYTES_PER_PIXEL;
            let src = (y - origin.1) as usize * src_stride
                + (target.x - origin.0) as usize * BYTES_PER_PIXEL;
            data[dst..dst + row_bytes].copy_from_slice(&src_data[src..src + row_bytes]);
        }
        Ok(())
    }

    fn draw_image(
        &mut self,
        image: &DecodedImage,
        origin: (i32, i32),
        size: SurfaceSize,
    ) -> Result<(), RasterError> {
        let image_size = image.size();
        if image_size.width == 0 || image_size.height == 0 {
            return Ok(());
        }

        let source = ImageSurface::create_for_data(
            image.data().to_vec(),
            Format::ARgb32,
            image_size.width as i32,
            image_size.height as i32,
            (image_size.width as usize * BYTES_PER_PIXEL) as i32,
        )?;

        let ctx = self.context()?;
        ctx.translate(origin.0 as f64, origin.1 as f64);
        ctx.scale(
            size.width as f64 / image_size.width as f64,
            size.height as f64 / image_size.height as f64,
        );
        ctx.set_source_surface(&source, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }
}
