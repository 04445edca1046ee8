//! Asynchronous diagram image decoding.
//!
//! Showing the overlay resizes and clears the surface right away, but the
//! diagram pixels arrive later: the host decodes the [`PendingPaint`] (on a
//! worker, a tokio blocking task, or inline) and hands the result back to the
//! surface together with the [`PaintTicket`] it was issued.

use super::document::DiagramDocument;
use crate::draw::{DecodedImage, SurfaceSize};
use resvg::{tiny_skia, usvg};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::{self, JoinHandle};

/// Errors that can occur while decoding a diagram into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to parse diagram SVG: {0}")]
    Parse(#[from] usvg::Error),

    #[error("cannot allocate a {width}x{height} diagram image")]
    InvalidSize { width: u32, height: u32 },

    #[error("decode task failed: {0}")]
    Task(String),
}

/// Generation stamp issued by each overlay activation.
///
/// A completion carrying a ticket from an older activation is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaintTicket(pub(crate) u64);

impl PaintTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Diagram paint waiting for its image to be decoded.
#[derive(Debug, Clone)]
pub struct PendingPaint {
    pub ticket: PaintTicket,
    pub document: DiagramDocument,
    /// Natural size the diagram is painted at (the surface size while visible)
    pub size: SurfaceSize,
}

impl PendingPaint {
    /// Decodes synchronously on the calling thread.
    pub fn decode_with(
        &self,
        decoder: &dyn DiagramDecoder,
    ) -> (PaintTicket, Result<DecodedImage, DecodeError>) {
        (self.ticket, decoder.decode(&self.document, self.size))
    }
}

/// Abstraction over turning SVG markup into premultiplied ARGB32 pixels.
pub trait DiagramDecoder: Send + Sync {
    fn decode(
        &self,
        document: &DiagramDocument,
        size: SurfaceSize,
    ) -> Result<DecodedImage, DecodeError>;
}

/// Decoder backed by `resvg`.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResvgDecoder;

impl DiagramDecoder for ResvgDecoder {
    fn decode(
        &self,
        document: &DiagramDocument,
        size: SurfaceSize,
    ) -> Result<DecodedImage, DecodeError> {
        let invalid = || DecodeError::InvalidSize {
            width: size.width,
            height: size.height,
        };

        let tree = usvg::Tree::from_str(document.markup(), &usvg::Options::default())?;
        let mut pixmap = tiny_skia::Pixmap::new(size.width, size.height).ok_or_else(invalid)?;

        // Stretch the SVG's own viewport onto the requested size.
        let natural = tree.size();
        let transform = tiny_skia::Transform::from_scale(
            size.width as f32 / natural.width(),
            size.height as f32 / natural.height(),
        );
        resvg::render(&tree, transform, &mut pixmap.as_mut());

        log::debug!("Decoded diagram at {}x{}", size.width, size.height);
        DecodedImage::from_raw(size, rgba_to_argb32(pixmap.data())).ok_or_else(invalid)
    }
}

/// Converts premultiplied RGBA bytes to cairo's native-endian ARGB32 words.
fn rgba_to_argb32(rgba: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(rgba.len());
    for px in rgba.chunks_exact(4) {
        let word = u32::from_be_bytes([px[3], px[0], px[1], px[2]]);
        out.extend_from_slice(&word.to_ne_bytes());
    }
    out
}

/// Decodes a pending paint on the tokio blocking pool.
///
/// The returned handle resolves to the ticket and decode result, ready to be
/// passed to the surface's paint completion.
///
/// # Arguments
/// * `runtime_handle` - Handle to the tokio runtime
/// * `decoder` - Decoder shared with the blocking task
/// * `pending` - Paint issued by the overlay activation
pub fn decode_in_background(
    runtime_handle: &tokio::runtime::Handle,
    decoder: Arc<dyn DiagramDecoder>,
    pending: PendingPaint,
) -> JoinHandle<(PaintTicket, Result<DecodedImage, DecodeError>)> {
    runtime_handle.spawn(async move {
        let ticket = pending.ticket;
        let result = task::spawn_blocking(move || decoder.decode(&pending.document, pending.size))
            .await
            .map_err(|e| DecodeError::Task(e.to_string()))
            .and_then(|decoded| decoded);
        if let Err(err) = &result {
            log::warn!("Diagram decode failed: {}", err);
        }
        (ticket, result)
    })
}
