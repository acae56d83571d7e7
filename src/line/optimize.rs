//! Word-spacing inference.
//!
//! Some producers position every word explicitly instead of writing a space.
//! For a run whose text holds no literal space, the word spacing value is
//! otherwise unused, so it can be chosen freely: either released for
//! inheritance or set so that the most common gap becomes a plain space.

use crate::aspect::{Aspect, Binding};
use crate::context::{Quantity, Registries};
use crate::line::ledger::{Gap, StyleRun};
use crate::math::EPS;
use crate::options::CompositorOptions;

/// Gap widths within tolerance of each other, summed so the bucket width is
/// their mean regardless of arrival order.
#[derive(Clone, Copy, Debug, PartialEq)]
struct WidthBucket {
    sum: f64,
    count: usize,
}

impl WidthBucket {
    fn width(&self) -> f64 {
        self.sum / self.count as f64
    }
}

/// Histogram of gap widths, ordered by width.
#[derive(Debug, Default)]
pub(crate) struct WidthHistogram {
    buckets: Vec<WidthBucket>,
}

impl WidthHistogram {
    pub(crate) fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Count `width` in the bucket within `tolerance` of it, or open a new one.
    pub(crate) fn add(&mut self, width: f64, tolerance: f64) {
        let tolerance = tolerance + EPS;
        let pos = self
            .buckets
            .partition_point(|bucket| bucket.width() < width - tolerance);
        match self.buckets.get_mut(pos) {
            Some(bucket) if (bucket.width() - width).abs() <= tolerance => {
                bucket.sum += width;
                bucket.count += 1;
            }
            _ => self.buckets.insert(
                pos,
                WidthBucket {
                    sum: width,
                    count: 1,
                },
            ),
        }
    }

    /// Width of the most frequent bucket. Ties go to the smallest width.
    pub(crate) fn most_frequent(&self) -> Option<f64> {
        let mut best: Option<WidthBucket> = None;
        for bucket in &self.buckets {
            if best.is_none_or(|b| bucket.count > b.count) {
                best = Some(*bucket);
            }
        }
        best.as_ref().map(WidthBucket::width)
    }
}

/// Rewrite the word-spacing aspect of every space-free run.
///
/// `runs` and `gaps` must be ordered by start index.
pub(crate) fn optimize_spacing<R: Registries + ?Sized>(
    text: &[char],
    runs: &mut [StyleRun],
    gaps: &[Gap],
    options: &CompositorOptions,
    registries: &mut R,
    histogram: &mut WidthHistogram,
) {
    let mut gap_cursor = 0;

    for i in 0..runs.len() {
        let seg_start = runs[i].start;
        let seg_end = runs.get(i + 1).map_or(text.len(), |next| next.start);

        if text[seg_start..seg_end].contains(&' ') {
            continue;
        }

        while gaps.get(gap_cursor).is_some_and(|gap| gap.start < seg_start) {
            gap_cursor += 1;
        }

        let run = &mut runs[i];
        let threshold = run.em_size() * options.space_threshold;
        histogram.clear();
        while let Some(gap) = gaps.get(gap_cursor).filter(|gap| gap.start < seg_end) {
            gap_cursor += 1;
            // Tiny gaps and negative shifts never become spaces.
            if gap.width < threshold - EPS {
                continue;
            }
            histogram.add(gap.width, options.width_eps);
        }

        let Some(width) = histogram.most_frequent() else {
            run.bindings[Aspect::WordSpace] = Binding::Inherited;
            continue;
        };

        run.word_space = 0.0;
        let new_word_space = width - run.single_space_offset();
        let installed = registries.install(Quantity::WordSpace, new_word_space);
        run.ids[Aspect::WordSpace] = installed.id;
        run.word_space = installed.actual;
        run.bindings[Aspect::WordSpace] = Binding::Fixed;
    }
}
