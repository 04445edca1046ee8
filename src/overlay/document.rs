//! Rendered diagram documents and their intrinsic size.

use crate::draw::SurfaceSize;
use crate::util::parse_leading_int;
use regex::Regex;
use std::sync::LazyLock;

/// Size used when a diagram does not declare usable width/height attributes.
pub const DEFAULT_DIAGRAM_SIZE: SurfaceSize = SurfaceSize::new(800, 600);

static SVG_ROOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<svg\b([^>]*)>").expect("valid svg root pattern"));

static SIZE_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?:^|\s)(width|height)\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .expect("valid size attribute pattern")
});

/// SVG markup produced by a [`DiagramRenderer`](super::DiagramRenderer).
///
/// Width and height are read once from the root `<svg>` element. Each axis is
/// independent: a document declaring only `width="1000"` reports no height.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramDocument {
    markup: String,
    width: Option<u32>,
    height: Option<u32>,
}

impl DiagramDocument {
    /// Wraps SVG markup and extracts the root element's declared size.
    pub fn from_svg(markup: impl Into<String>) -> Self {
        let markup = markup.into();
        let (width, height) = root_dimensions(&markup);
        Self {
            markup,
            width,
            height,
        }
    }

    pub fn markup(&self) -> &str {
        &self.markup
    }

    /// Declared width/height of the root element (positive values only).
    pub fn intrinsic_size(&self) -> (Option<u32>, Option<u32>) {
        (self.width, self.height)
    }

    /// Size the surface takes while this diagram is shown.
    ///
    /// Each missing axis falls back to the matching axis of `fallback`.
    pub fn size_or(&self, fallback: SurfaceSize) -> SurfaceSize {
        SurfaceSize::new(
            self.width.unwrap_or(fallback.width),
            self.height.unwrap_or(fallback.height),
        )
    }

    /// Size with the standard 800x600 fallback.
    pub fn size(&self) -> SurfaceSize {
        self.size_or(DEFAULT_DIAGRAM_SIZE)
    }
}

fn root_dimensions(markup: &str) -> (Option<u32>, Option<u32>) {
    let Some(root) = SVG_ROOT.captures(markup).and_then(|caps| caps.get(1)) else {
        return (None, None);
    };

    let mut width = None;
    let mut height = None;
    for caps in SIZE_ATTR.captures_iter(root.as_str()) {
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        let parsed = parse_dimension(value);
        match &caps[1] {
            "width" if width.is_none() => width = parsed,
            "height" if height.is_none() => height = parsed,
            _ => {}
        }
    }

    (width, height)
}

/// Zero, negative, and non-numeric values count as "not declared".
fn parse_dimension(value: &str) -> Option<u32> {
    parse_leading_int(value)
        .filter(|v| *v > 0)
        .and_then(|v| u32::try_from(v).ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_declared_size() {
        let doc = DiagramDocument::from_svg(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="1000" height="400"></svg>"#,
        );
        assert_eq!(doc.intrinsic_size(), (Some(1000), Some(400)));
        assert_eq!(doc.size(), SurfaceSize::new(1000, 400));
    }

    #[test]
    fn missing_size_uses_default() {
        let doc = DiagramDocument::from_svg(r#"<svg viewBox="0 0 10 10"></svg>"#);
        assert_eq!(doc.intrinsic_size(), (None, None));
        assert_eq!(doc.size(), DEFAULT_DIAGRAM_SIZE);
    }

    #[test]
    fn axes_fall_back_independently() {
        let doc = DiagramDocument::from_svg(r#"<svg width="1200"></svg>"#);
        assert_eq!(doc.size(), SurfaceSize::new(1200, 600));

        let doc = DiagramDocument::from_svg(r#"<svg height='90'></svg>"#);
        assert_eq!(doc.size_or(SurfaceSize::new(10, 20)), SurfaceSize::new(10, 90));
    }

    #[test]
    fn units_and_fractions_are_truncated() {
        let doc = DiagramDocument::from_svg(r#"<svg width="640.7px" height=" 480pt"></svg>"#);
        assert_eq!(doc.size(), SurfaceSize::new(640, 480));
    }

    #[test]
    fn zero_or_non_numeric_counts_as_missing() {
        let doc = DiagramDocument::from_svg(r#"<svg width="0" height="auto"></svg>"#);
        assert_eq!(doc.size(), DEFAULT_DIAGRAM_SIZE);
    }

    #[test]
    fn ignores_prefixed_attributes_and_child_elements() {
        let doc = DiagramDocument::from_svg(
            r#"<?xml version="1.0"?>
<svg stroke-width="3" data-height="9" width="300" height="200">
  <rect width="5000" height="5000"/>
</svg>"#,
        );
        assert_eq!(doc.size(), SurfaceSize::new(300, 200));
    }

    #[test]
    fn attribute_and_element_names_are_case_sensitive() {
        let doc = DiagramDocument::from_svg(r#"<svg WIDTH="10" Height="20"></svg>"#);
        assert_eq!(doc.intrinsic_size(), (None, None));

        let upper = DiagramDocument::from_svg(r#"<SVG width="10" height="20"></SVG>"#);
        assert_eq!(upper.intrinsic_size(), (None, None));

        let mixed = DiagramDocument::from_svg(r#"<svg Width="10" width="30" height="20"></svg>"#);
        assert_eq!(mixed.intrinsic_size(), (Some(30), Some(20)));
    }

    #[test]
    fn markup_without_svg_root_has_no_size() {
        let doc = DiagramDocument::from_svg("<div width=\"10\"></div>");
        assert_eq!(doc.intrinsic_size(), (None, None));
        assert_eq!(doc.markup(), "<div width=\"10\"></div>");
    }
}
