//! Font metrics consumed by spacing math.

/// Metrics of an installed font, in em units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FontInfo {
    /// Font-family id assigned by the font registry.
    pub id: i64,
    pub ascent: f64,
    /// Usually negative.
    pub descent: f64,
    /// Advance of the space glyph.
    pub space_width: f64,
}

impl FontInfo {
    /// Create font metrics.
    #[must_use]
    pub const fn new(id: i64, ascent: f64, descent: f64, space_width: f64) -> Self {
        Self {
            id,
            ascent,
            descent,
            space_width,
        }
    }
}

impl Default for FontInfo {
    fn default() -> Self {
        Self::new(0, 1.0, 0.0, 0.25)
    }
}
