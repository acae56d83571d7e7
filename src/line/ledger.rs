//! Gap and style-run entries keyed by glyph index.

use crate::aspect::{Aspect, AspectMask, AspectValues, Binding};
use crate::context::StyleSnapshot;
use crate::font::FontInfo;

/// Horizontal displacement applied before the glyph at `start`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gap {
    pub start: usize,
    pub width: f64,
}

impl Gap {
    #[must_use]
    pub const fn new(start: usize, width: f64) -> Self {
        Self { start, width }
    }
}

/// Style attributes in effect from glyph index `start` until the next run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleRun {
    pub start: usize,
    /// Attribute ids in aspect order.
    pub ids: AspectValues<i64>,
    pub bindings: AspectValues<Binding>,
    /// Ids packed one byte per aspect. Refreshed by [`rehash`](Self::rehash).
    pub hash: u64,
    pub draw_font_size: f64,
    pub letter_space: f64,
    pub word_space: f64,
    pub font: FontInfo,
    /// An element was opened for this run and must be closed.
    pub(crate) opened: bool,
}

impl StyleRun {
    /// Empty run at `start` with every aspect fixed.
    #[must_use]
    pub fn new(start: usize) -> Self {
        Self {
            start,
            ids: AspectValues::splat(0),
            bindings: AspectValues::splat(Binding::Fixed),
            hash: 0,
            draw_font_size: 0.0,
            letter_space: 0.0,
            word_space: 0.0,
            font: FontInfo::default(),
            opened: false,
        }
    }

    /// Load ids and numeric values from the current graphics state.
    pub fn apply(&mut self, style: &StyleSnapshot) {
        self.ids = style.ids();
        self.font = style.font;
        self.draw_font_size = style.font_size.value;
        self.letter_space = style.letter_space.value;
        self.word_space = style.word_space.value;
    }

    /// Horizontal advance a literal space produces in this style.
    #[must_use]
    pub fn single_space_offset(&self) -> f64 {
        self.word_space + self.letter_space + self.font.space_width * self.draw_font_size
    }

    #[must_use]
    pub fn em_size(&self) -> f64 {
        self.draw_font_size * (self.font.ascent - self.font.descent)
    }

    #[must_use]
    pub fn ascent(&self) -> f64 {
        self.font.ascent * self.draw_font_size
    }

    /// Aspects whose values are authoritative.
    #[must_use]
    pub fn fixed(&self) -> AspectMask {
        self.bindings.fixed()
    }

    #[must_use]
    pub fn is_fixed(&self, aspect: Aspect) -> bool {
        self.bindings[aspect] == Binding::Fixed
    }

    /// Recompute [`hash`](Self::hash) from the current ids.
    pub fn rehash(&mut self) {
        self.hash = self
            .ids
            .iter()
            .fold(0u64, |acc, (_, &id)| (acc << 8) | (id & 0xff) as u64);
    }

    /// Number of aspects fixed in both runs whose ids differ.
    ///
    /// The packed hashes settle the common case where every shared aspect
    /// agrees. Byte packing aliases ids that differ by multiples of 256, so
    /// a hash match is confirmed on the ids themselves.
    #[must_use]
    pub fn diff(&self, other: &Self) -> usize {
        let common = self.fixed() & other.fixed();
        let differs = |aspect: &Aspect| self.ids[*aspect] != other.ids[*aspect];

        if (self.hash ^ other.hash) & common.byte_mask() == 0
            && !common.aspects().any(|aspect| differs(&aspect))
        {
            return 0;
        }
        common.aspects().filter(differs).count()
    }

    /// Take `aspect` from `parent` and mark it fixed.
    pub fn inherit(&mut self, aspect: Aspect, parent: &Self) {
        self.ids[aspect] = parent.ids[aspect];
        self.bindings[aspect] = Binding::Fixed;
        match aspect {
            Aspect::FontSize => self.draw_font_size = parent.draw_font_size,
            Aspect::LetterSpace => self.letter_space = parent.letter_space,
            Aspect::WordSpace => self.word_space = parent.word_space,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Valued;

    fn style(font_id: i64, size_id: i64) -> StyleSnapshot {
        StyleSnapshot {
            font: FontInfo::new(font_id, 0.8, -0.2, 0.25),
            font_size: Valued::new(size_id, 10.0),
            letter_space: Valued::new(0, 0.5),
            word_space: Valued::new(0, 1.0),
            ..StyleSnapshot::default()
        }
    }

    fn run(start: usize, font_id: i64, size_id: i64) -> StyleRun {
        let mut run = StyleRun::new(start);
        run.apply(&style(font_id, size_id));
        run.rehash();
        run
    }

    #[test]
    fn test_new_run_is_fully_fixed() {
        let run = StyleRun::new(4);
        assert_eq!(run.start, 4);
        assert_eq!(run.fixed(), AspectMask::all());
    }

    #[test]
    fn test_spacing_metrics() {
        let run = run(0, 1, 1);
        assert!((run.single_space_offset() - 4.0).abs() < 1e-9);
        assert!((run.em_size() - 10.0).abs() < 1e-9);
        assert!((run.ascent() - 8.0).abs() < 1e-9);
    }

    #[test]
    fn test_hash_packs_one_byte_per_aspect() {
        let run = run(0, 0x12, 0x34);
        assert_eq!(run.hash >> 48, 0x12);
        assert_eq!((run.hash >> 40) & 0xff, 0x34);
    }

    #[test]
    fn test_diff_identical_is_zero() {
        assert_eq!(run(0, 1, 2).diff(&run(3, 1, 2)), 0);
    }

    #[test]
    fn test_diff_counts_differing_fixed_aspects() {
        assert_eq!(run(0, 1, 2).diff(&run(3, 5, 2)), 1);
        assert_eq!(run(0, 1, 2).diff(&run(3, 5, 6)), 2);
    }

    #[test]
    fn test_diff_ignores_inherited_aspects() {
        let a = run(0, 1, 2);
        let mut b = run(3, 1, 9);
        b.bindings[Aspect::FontSize] = Binding::Inherited;
        assert_eq!(a.diff(&b), 0);
        assert_eq!(b.diff(&a), 0);
    }

    #[test]
    fn test_diff_not_fooled_by_byte_aliasing() {
        let a = run(0, 1, 2);
        let b = run(3, 1 + 256, 2);
        assert_eq!(a.hash, b.hash);
        assert_eq!(a.diff(&b), 1);
    }

    #[test]
    fn test_inherit_copies_value() {
        let parent = run(0, 1, 2);
        let mut child = run(3, 1, 7);
        child.draw_font_size = 20.0;
        child.bindings[Aspect::FontSize] = Binding::Inherited;
        child.inherit(Aspect::FontSize, &parent);
        assert_eq!(child.ids[Aspect::FontSize], 2);
        assert!((child.draw_font_size - 10.0).abs() < 1e-9);
        assert!(child.is_fixed(Aspect::FontSize));
    }
}
