//! Compositor tuning and markup vocabulary.

use crate::aspect::{Aspect, AspectValues};

/// Numeric tuning for spacing inference and gap emission.
#[derive(Clone, Debug, PartialEq)]
pub struct CompositorOptions {
    /// Gaps with magnitude at or below this are invisible. Also the tolerance
    /// for matching a gap against a single space.
    pub h_eps: f64,
    /// Em-size ratio below which a gap is too small to become word spacing
    /// or to carry a visible space.
    pub space_threshold: f64,
    /// Tolerance for bucketing gap widths in the spacing optimizer. Widths
    /// jittering by ±`width_eps / 2` around one value share a bucket.
    pub width_eps: f64,
    /// Fold recurring gaps into word spacing before composing.
    pub optimize_spacing: bool,
}

impl Default for CompositorOptions {
    fn default() -> Self {
        Self {
            h_eps: 1.0,
            space_threshold: 1.0 / 8.0,
            width_eps: 0.02,
            optimize_spacing: true,
        }
    }
}

impl CompositorOptions {
    /// Set the horizontal epsilon.
    #[must_use]
    pub fn with_h_eps(mut self, h_eps: f64) -> Self {
        self.h_eps = h_eps;
        self
    }

    /// Set the space threshold ratio.
    #[must_use]
    pub fn with_space_threshold(mut self, ratio: f64) -> Self {
        self.space_threshold = ratio;
        self
    }

    /// Set the bucket tolerance of the spacing optimizer.
    #[must_use]
    pub fn with_width_eps(mut self, width_eps: f64) -> Self {
        self.width_eps = width_eps;
        self
    }

    /// Enable or disable the spacing optimizer.
    #[must_use]
    pub fn with_optimize_spacing(mut self, enabled: bool) -> Self {
        self.optimize_spacing = enabled;
        self
    }
}

/// Class-name prefixes written by [`MarkupWriter`](crate::markup::MarkupWriter).
///
/// Each id-carrying class is the prefix immediately followed by the id in
/// lowercase hexadecimal, or by [`invalid`](Self::invalid) when the id is −1.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    /// Marker class of every line element.
    pub line: String,
    pub transform_matrix: String,
    pub left: String,
    pub height: String,
    pub bottom: String,
    /// Per-aspect prefixes, in [`Aspect::ALL`] order.
    pub aspects: AspectValues<String>,
    /// Marker and prefix of whitespace elements.
    pub whitespace: String,
    /// Written in place of an id the owning registry could not represent.
    pub invalid: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            line: "t".to_string(),
            transform_matrix: "m".to_string(),
            left: "x".to_string(),
            height: "h".to_string(),
            bottom: "y".to_string(),
            aspects: AspectValues::from_fn(|aspect| {
                match aspect {
                    Aspect::FontFamily => "ff",
                    Aspect::FontSize => "fs",
                    Aspect::FillColor => "fc",
                    Aspect::StrokeColor => "sc",
                    Aspect::LetterSpace => "ls",
                    Aspect::WordSpace => "ws",
                    Aspect::Rise => "r",
                }
                .to_string()
            }),
            whitespace: "_".to_string(),
            invalid: "_".to_string(),
        }
    }
}

impl ClassNames {
    /// Prefix used for `aspect`.
    #[must_use]
    pub fn aspect(&self, aspect: Aspect) -> &str {
        &self.aspects[aspect]
    }
}
