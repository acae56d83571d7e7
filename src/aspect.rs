//! Style aspects and per-aspect inheritance state.
//!
//! A style run carries one identifier per [`Aspect`]. Each aspect is either
//! [`Binding::Fixed`] (the value is authoritative and must be visible in the
//! output) or [`Binding::Inherited`] (any ancestor value will do).
//!
//! [`AspectMask`] is the set form of the same information, used where whole
//! groups of aspects are compared at once.

use bitflags::bitflags;
use std::ops::{Index, IndexMut};

/// One style dimension of a text run.
///
/// The declaration order is the emission order of class tokens and the byte
/// order of the packed style hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Aspect {
    FontFamily,
    FontSize,
    FillColor,
    StrokeColor,
    LetterSpace,
    WordSpace,
    Rise,
}

impl Aspect {
    /// Number of aspects.
    pub const COUNT: usize = 7;

    /// All aspects in emission order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::FontFamily,
        Self::FontSize,
        Self::FillColor,
        Self::StrokeColor,
        Self::LetterSpace,
        Self::WordSpace,
        Self::Rise,
    ];

    /// Position of this aspect in [`Aspect::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-aspect mask.
    #[must_use]
    pub const fn mask(self) -> AspectMask {
        AspectMask::from_bits_retain(1 << self.index())
    }
}

/// Whether a run's value for an aspect is authoritative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Binding {
    /// Value irrelevant; inherit whatever an ancestor provides.
    Inherited,
    /// Value authoritative; must be visible in the output.
    #[default]
    Fixed,
}

bitflags! {
    /// Set of aspects.
    #[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
    pub struct AspectMask: u8 {
        const FONT_FAMILY  = 0x01;
        const FONT_SIZE    = 0x02;
        const FILL_COLOR   = 0x04;
        const STROKE_COLOR = 0x08;
        const LETTER_SPACE = 0x10;
        const WORD_SPACE   = 0x20;
        const RISE         = 0x40;
    }
}

impl AspectMask {
    /// Widen to a mask over a hash packed one byte per aspect.
    ///
    /// Byte `i` counted from the most significant used byte belongs to
    /// `Aspect::ALL[i]`.
    #[must_use]
    pub fn byte_mask(self) -> u64 {
        Aspect::ALL
            .iter()
            .filter(|aspect| self.contains(aspect.mask()))
            .fold(0u64, |acc, aspect| acc | (0xff << byte_shift(*aspect)))
    }

    /// Iterate the aspects in this set, in emission order.
    pub fn aspects(self) -> impl Iterator<Item = Aspect> {
        Aspect::ALL
            .into_iter()
            .filter(move |aspect| self.contains(aspect.mask()))
    }
}

/// Bit shift of an aspect's byte in the packed hash.
#[must_use]
pub const fn byte_shift(aspect: Aspect) -> u32 {
    8 * (Aspect::COUNT - 1 - aspect.index()) as u32
}

/// Fixed-size array indexed by [`Aspect`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct AspectValues<T>([T; Aspect::COUNT]);

impl<T> AspectValues<T> {
    /// Build from a per-aspect constructor.
    pub fn from_fn(mut f: impl FnMut(Aspect) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Aspect::ALL[i])))
    }

    /// Iterate `(aspect, value)` pairs in emission order.
    pub fn iter(&self) -> impl Iterator<Item = (Aspect, &T)> {
        Aspect::ALL.into_iter().zip(self.0.iter())
    }
}

impl<T: Copy> AspectValues<T> {
    /// All aspects set to `value`.
    #[must_use]
    pub const fn splat(value: T) -> Self {
        Self([value; Aspect::COUNT])
    }
}

impl<T> Index<Aspect> for AspectValues<T> {
    type Output = T;

    fn index(&self, aspect: Aspect) -> &T {
        &self.0[aspect.index()]
    }
}

impl<T> IndexMut<Aspect> for AspectValues<T> {
    fn index_mut(&mut self, aspect: Aspect) -> &mut T {
        &mut self.0[aspect.index()]
    }
}

impl AspectValues<Binding> {
    /// Aspects bound as [`Binding::Fixed`].
    #[must_use]
    pub fn fixed(&self) -> AspectMask {
        self.iter()
            .filter(|(_, binding)| **binding == Binding::Fixed)
            .fold(AspectMask::empty(), |acc, (aspect, _)| acc | aspect.mask())
    }
}
