//! Nesting compositor: turns a line's ledgers into nested markup.
//!
//! The compositor keeps a stack of open style runs. At every style boundary
//! it looks down the stack for the ancestor the new run differs from least,
//! closes everything above that ancestor, and opens an element carrying
//! only the aspects the ancestor does not already provide. A run that
//! differs from nothing opens no element at all.
//!
//! Negative gaps are rendered as negative margins, which only shift text
//! inside the element that carries them. Once one is emitted, elements
//! opened at or before it stay open for the rest of the line.

use crate::aspect::{Aspect, Binding};
use crate::context::{Quantity, Registries};
use crate::line::ledger::{Gap, StyleRun};
use crate::markup::MarkupWriter;
use crate::math::{self, EPS};
use crate::options::CompositorOptions;
use std::io::Write;

/// Counters describing one emitted line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineStats {
    /// Glyphs written, not counting inserted spaces.
    pub glyphs: usize,
    pub style_elements: usize,
    pub whitespace_elements: usize,
    /// Gaps rendered as a literal space.
    pub inserted_spaces: usize,
    /// Markup bytes written for the line.
    pub bytes: usize,
}

/// Per-line walk state. The stack allocation is reused across lines.
#[derive(Debug, Default)]
pub(crate) struct NestingCompositor {
    /// Indices into the run ledger, innermost last. Empty means top level.
    stack: Vec<usize>,
    tokens: Vec<(Aspect, i64)>,
    /// Glyph index of the last negative gap; elements starting at or before
    /// it must not be closed.
    last_negative: usize,
    /// Residual between requested and emitted gap widths.
    dx: f64,
}

impl NestingCompositor {
    /// Emit the body of one line (everything inside the line element).
    ///
    /// Every run must be hashed, and the first run must start at index 0.
    pub(crate) fn compose<R, W>(
        &mut self,
        text: &[char],
        runs: &mut [StyleRun],
        gaps: &[Gap],
        options: &CompositorOptions,
        registries: &mut R,
        out: &mut MarkupWriter<W>,
    ) -> LineStats
    where
        R: Registries + ?Sized,
        W: Write,
    {
        let mut stats = LineStats {
            glyphs: text.len(),
            ..LineStats::default()
        };
        self.stack.clear();
        self.last_negative = 0;
        self.dx = 0.0;

        let mut run_cursor = 0;
        let mut gap_cursor = 0;
        let mut idx = 0;

        while idx < text.len() {
            if runs.get(run_cursor).is_some_and(|run| idx >= run.start) {
                self.enter_run(run_cursor, runs, out, &mut stats);
                run_cursor += 1;
            }

            if let Some(gap) = gaps.get(gap_cursor).filter(|gap| idx >= gap.start) {
                let target = gap.width + self.dx;
                let actual = self.emit_gap(target, idx, runs, options, registries, out, &mut stats);
                self.dx = target - actual;
                gap_cursor += 1;
            }

            let next_run = runs.get(run_cursor).map_or(text.len(), |run| run.start);
            let next_gap = gaps.get(gap_cursor).map_or(text.len(), |gap| gap.start);
            let next = next_run.min(next_gap).min(text.len());

            out.text(&text[idx..next]);
            idx = next;
        }

        while !self.stack.is_empty() {
            self.close_top(runs, out);
        }

        stats
    }

    /// Reuse the cheapest open ancestor for `runs[current]` and begin it.
    fn enter_run<W: Write>(
        &mut self,
        current: usize,
        runs: &mut [StyleRun],
        out: &mut MarkupWriter<W>,
        stats: &mut LineStats,
    ) {
        // A run differing on every aspect is nested rather than reusing anything.
        let mut best_cost = Aspect::COUNT;

        for pos in (0..self.stack.len()).rev() {
            let candidate = self.stack[pos];
            let cost = runs[current].diff(&runs[candidate]);
            if cost < best_cost {
                while self.stack.len() > pos + 1 {
                    self.close_top(runs, out);
                }
                best_cost = cost;
                if best_cost == 0 {
                    break;
                }
            }

            if runs[candidate].start <= self.last_negative {
                break;
            }
        }

        let parent = self.stack.last().map(|&p| runs[p]);
        let run = &mut runs[current];
        self.tokens.clear();

        for aspect in Aspect::ALL {
            let provider = parent.filter(|p| p.is_fixed(aspect));
            match run.bindings[aspect] {
                Binding::Inherited => {
                    if let Some(provider) = provider {
                        run.inherit(aspect, &provider);
                    }
                }
                Binding::Fixed => {
                    if provider.is_some_and(|p| p.ids[aspect] == run.ids[aspect]) {
                        continue;
                    }
                    self.tokens.push((aspect, run.ids[aspect]));
                }
            }
        }

        run.rehash();
        run.opened = !self.tokens.is_empty();
        if run.opened {
            out.open_style(&self.tokens);
            stats.style_elements += 1;
        }
        self.stack.push(current);
    }

    /// Render a gap of `target` width before glyph `idx`; returns the width emitted.
    #[allow(clippy::too_many_arguments)]
    fn emit_gap<R, W>(
        &mut self,
        target: f64,
        idx: usize,
        runs: &[StyleRun],
        options: &CompositorOptions,
        registries: &mut R,
        out: &mut MarkupWriter<W>,
        stats: &mut LineStats,
    ) -> f64
    where
        R: Registries + ?Sized,
        W: Write,
    {
        if target.abs() <= options.h_eps {
            return 0.0;
        }

        let style = self.stack.last().map(|&top| &runs[top]);

        if let Some(style) = style.filter(|s| s.is_fixed(Aspect::WordSpace)) {
            let space = style.single_space_offset();
            if (target - space).abs() <= options.h_eps {
                out.text(&[' ']);
                stats.inserted_spaces += 1;
                return space;
            }
        }

        let installed = registries.install(Quantity::Whitespace, target);
        if installed.is_invalid() {
            tracing::debug!(width = target, idx, "gap width has no representable id");
        }

        if !math::equal(installed.actual, 0.0) {
            if math::is_positive(-installed.actual) {
                self.last_negative = idx;
            }
            let threshold = style.map_or(0.0, StyleRun::em_size) * options.space_threshold;
            out.whitespace(installed.id, target > threshold - EPS);
            stats.whitespace_elements += 1;
        }

        installed.actual
    }

    fn close_top<W: Write>(&mut self, runs: &[StyleRun], out: &mut MarkupWriter<W>) {
        if let Some(top) = self.stack.pop() {
            if runs[top].opened {
                out.close_style();
            }
        }
    }
}
