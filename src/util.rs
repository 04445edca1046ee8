//! Utility functions for colors, geometry, and attribute parsing.
//!
//! This module provides:
//! - Name-to-color mapping for the configuration file (constants live in draw::color)
//! - The [`Rect`] helper shared by dirty tracking and the raster primitives
//! - Lenient integer parsing for diagram size attributes

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by the configuration system to parse color names from the config file.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Axis-aligned rectangle helper used for dirty tracking and pixel access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

/// Segment bounds are clamped to this magnitude so their span fits in `i32`.
const SEGMENT_COORD_LIMIT: f64 = (i32::MAX / 2) as f64;

impl Rect {
    /// Creates a new rectangle. Width/height must be positive.
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Option<Self> {
        if width <= 0 || height <= 0 {
            None
        } else {
            Some(Self {
                x,
                y,
                width,
                height,
            })
        }
    }

    /// Builds a rectangle from min/max bounds (inclusive min, exclusive max).
    pub fn from_min_max(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Option<Self> {
        let width = max_x.checked_sub(min_x)?;
        let height = max_y.checked_sub(min_y)?;
        Self::new(min_x, min_y, width, height)
    }

    /// Rectangle covering a whole `width` x `height` surface.
    pub fn full(width: u32, height: u32) -> Option<Self> {
        Self::new(
            0,
            0,
            width.min(i32::MAX as u32) as i32,
            height.min(i32::MAX as u32) as i32,
        )
    }

    /// Bounding box of a stroked segment, grown by half the line width on every side.
    ///
    /// Bounds are limited to `±SEGMENT_COORD_LIMIT`; non-finite input yields `None`.
    pub fn around_segment(x0: f64, y0: f64, x1: f64, y1: f64, line_width: f64) -> Option<Self> {
        if ![x0, y0, x1, y1, line_width].iter().all(|v| v.is_finite()) {
            return None;
        }

        let pad = (line_width / 2.0).ceil() + 1.0;
        let edge = |v: f64| v.clamp(-SEGMENT_COORD_LIMIT, SEGMENT_COORD_LIMIT) as i32;
        Self::from_min_max(
            edge((x0.min(x1) - pad).floor()),
            edge((y0.min(y1) - pad).floor()),
            edge((x0.max(x1) + pad).ceil()),
            edge((y0.max(y1) + pad).ceil()),
        )
    }

    /// Returns the overlap with a `width` x `height` surface anchored at the origin.
    pub fn clamped_to(&self, width: i32, height: i32) -> Option<Self> {
        let min_x = self.x.clamp(0, width);
        let min_y = self.y.clamp(0, height);
        let max_x = (self.x.saturating_add(self.width)).clamp(0, width);
        let max_y = (self.y.saturating_add(self.height)).clamp(0, height);
        Self::from_min_max(min_x, min_y, max_x, max_y)
    }

    /// Returns true if rectangle has a positive area.
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

// ============================================================================
// Attribute Parsing
// ============================================================================

/// Parses the leading integer of an attribute value.
///
/// Mirrors how browsers read numeric SVG/HTML attributes: leading whitespace
/// and an optional sign are accepted, parsing stops at the first non-digit
/// (`"1000px"` and `"1000.5"` both give 1000), and a value without leading
/// digits yields `None`.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(idx, _)| idx)
        .unwrap_or(digits.len());

    if end == 0 {
        return None;
    }

    let magnitude: i64 = digits[..end].parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
