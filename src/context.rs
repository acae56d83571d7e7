//! Collaborator interfaces the line buffer consumes.
//!
//! The interpreter owns the graphics state and the document-wide value
//! registries. The line buffer borrows them per call instead of holding
//! them, so the interpreter stays free to mutate both between appends.

use crate::aspect::{Aspect, AspectValues};
use crate::font::FontInfo;

/// A registry id paired with the value it resolved to.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Valued {
    pub id: i64,
    pub value: f64,
}

impl Valued {
    #[must_use]
    pub const fn new(id: i64, value: f64) -> Self {
        Self { id, value }
    }
}

/// Snapshot of the style-relevant part of the graphics state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct StyleSnapshot {
    pub font: FontInfo,
    /// Font size id and the resolved drawing size.
    pub font_size: Valued,
    pub fill_color: i64,
    pub stroke_color: i64,
    pub letter_space: Valued,
    /// Word spacing. The id must come from the registry that answers
    /// [`Quantity::WordSpace`], since inferred and declared word spacing
    /// are compared by id.
    pub word_space: Valued,
    pub rise: i64,
}

impl StyleSnapshot {
    /// Attribute ids in aspect order.
    #[must_use]
    pub fn ids(&self) -> AspectValues<i64> {
        AspectValues::from_fn(|aspect| match aspect {
            Aspect::FontFamily => self.font.id,
            Aspect::FontSize => self.font_size.id,
            Aspect::FillColor => self.fill_color,
            Aspect::StrokeColor => self.stroke_color,
            Aspect::LetterSpace => self.letter_space.id,
            Aspect::WordSpace => self.word_space.id,
            Aspect::Rise => self.rise,
        })
    }
}

/// Read access to the interpreter's current graphics state.
pub trait GraphicsState {
    /// Map user-space coordinates to device space with the current transform.
    fn transform(&self, x: f64, y: f64) -> (f64, f64);

    /// Id of the current transform matrix.
    fn transform_id(&self) -> i64;

    /// Current style attributes.
    fn style(&self) -> StyleSnapshot;
}

/// Numeric quantities deduplicated by registries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Line box height.
    Height,
    /// Horizontal line anchor.
    Left,
    /// Vertical line anchor.
    Bottom,
    /// Width of an explicit gap element.
    Whitespace,
    /// Inferred word spacing. Shares its id space with
    /// [`StyleSnapshot::word_space`].
    WordSpace,
}

/// Result of installing a value in a registry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Installed {
    /// Assigned id, or −1 when the registry is out of representable slots.
    pub id: i64,
    /// Value the registry actually represents under `id`.
    pub actual: f64,
}

impl Installed {
    /// Id reserved for values a registry cannot represent.
    pub const INVALID_ID: i64 = -1;

    #[must_use]
    pub const fn new(id: i64, actual: f64) -> Self {
        Self { id, actual }
    }

    /// The registry could not allocate an id.
    #[must_use]
    pub const fn is_invalid(&self) -> bool {
        self.id == Self::INVALID_ID
    }
}

/// Value deduplication services shared across the document.
///
/// Implementations must hand out ids monotonically and without collisions.
/// Ids returned for [`Quantity::WordSpace`] must be drawn from the same
/// registry the interpreter uses for [`StyleSnapshot::word_space`]; an
/// inferred value equal to a declared one then gets the same id.
pub trait Registries {
    /// Install `value`, reusing an existing id when an equivalent value exists.
    fn install(&mut self, quantity: Quantity, value: f64) -> Installed;
}
