//! Line buffer: accumulates one line of positioned text and flushes it as markup.

use crate::context::{GraphicsState, Quantity, Registries};
use crate::error::{Error, Result};
use crate::line::compose::{LineStats, NestingCompositor};
use crate::line::ledger::{Gap, StyleRun};
use crate::line::optimize::{WidthHistogram, optimize_spacing};
use crate::markup::{LineClasses, MarkupWriter};
use crate::options::CompositorOptions;
use std::io::Write;

/// What a call to [`LineBuffer::flush`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlushOutcome {
    /// No glyphs were buffered; nothing was written or installed.
    Empty,
    /// The line was written.
    Emitted(LineStats),
    /// The ledgers were inconsistent; the line was discarded.
    Dropped,
}

/// Buffer for the glyphs, gaps and style runs of one line.
///
/// The buffer is reused: `append_*` grows it while one line is interpreted,
/// [`flush`](Self::flush) writes it out and leaves it empty for the next.
///
/// # Examples
///
/// ```
/// use line_compositor::{
///     DocumentRegistries, FontInfo, LineBuffer, MarkupWriter, SimpleGraphicsState,
///     StyleSnapshot, Valued,
/// };
///
/// let gs = SimpleGraphicsState::new(StyleSnapshot {
///     font: FontInfo::new(1, 0.9, -0.1, 0.25),
///     font_size: Valued::new(0, 12.0),
///     ..StyleSnapshot::default()
/// });
/// let mut registries = DocumentRegistries::new(0.01, 0.01);
/// let mut out = MarkupWriter::new(Vec::new());
///
/// let mut line = LineBuffer::default();
/// line.set_pos(&gs, 72.0, 700.0);
/// line.append_state(&gs);
/// line.append_unicodes(&['H', 'i']);
/// line.flush(&mut registries, &mut out);
///
/// let html = String::from_utf8(out.finish().unwrap()).unwrap();
/// assert!(html.ends_with(">Hi</span></div>"));
/// ```
#[derive(Debug, Default)]
pub struct LineBuffer {
    options: CompositorOptions,
    text: Vec<char>,
    gaps: Vec<Gap>,
    runs: Vec<StyleRun>,
    x: f64,
    y: f64,
    transform_id: i64,
    compositor: NestingCompositor,
    histogram: WidthHistogram,
}

impl LineBuffer {
    /// Create an empty line buffer.
    #[must_use]
    pub fn new(options: CompositorOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn options(&self) -> &CompositorOptions {
        &self.options
    }

    /// Record the line anchor: `(x, y)` mapped through the current transform.
    pub fn set_pos<G: GraphicsState + ?Sized>(&mut self, state: &G, x: f64, y: f64) {
        (self.x, self.y) = state.transform(x, y);
        self.transform_id = state.transform_id();
    }

    /// Append glyph code points.
    pub fn append_unicodes(&mut self, chars: &[char]) {
        self.text.extend_from_slice(chars);
    }

    /// Add a horizontal displacement before the next glyph.
    ///
    /// Displacements at the same glyph index are summed into one gap.
    pub fn append_offset(&mut self, width: f64) {
        let idx = self.text.len();
        match self.gaps.last_mut() {
            Some(last) if last.start == idx => last.width += width,
            _ => self.gaps.push(Gap::new(idx, width)),
        }
    }

    /// Capture the current style at the next glyph index.
    ///
    /// Repeated calls at one index update the same run.
    pub fn append_state<G: GraphicsState + ?Sized>(&mut self, state: &G) {
        let idx = self.text.len();
        if self.runs.last().is_none_or(|run| run.start != idx) {
            self.runs.push(StyleRun::new(idx));
        }
        if let Some(run) = self.runs.last_mut() {
            run.apply(&state.style());
        }
    }

    /// Write the buffered line to `out` and reset the buffer.
    ///
    /// An empty buffer is left untouched and nothing is installed or
    /// written. A buffer whose first style run does not start at index 0
    /// is discarded with an error diagnostic.
    pub fn flush<R, W>(&mut self, registries: &mut R, out: &mut MarkupWriter<W>) -> FlushOutcome
    where
        R: Registries + ?Sized,
        W: Write,
    {
        if self.text.is_empty() {
            return FlushOutcome::Empty;
        }

        if let Err(err) = self.validate() {
            tracing::error!(%err, glyphs = self.text.len(), "dropping line");
            self.clear();
            return FlushOutcome::Dropped;
        }

        if self.options.optimize_spacing {
            optimize_spacing(
                &self.text,
                &mut self.runs,
                &self.gaps,
                &self.options,
                registries,
                &mut self.histogram,
            );
        }

        let max_ascent = self
            .runs
            .iter()
            .map(StyleRun::ascent)
            .fold(0.0_f64, f64::max);
        for run in &mut self.runs {
            run.rehash();
        }

        let classes = LineClasses {
            transform_matrix: self.transform_id,
            height: registries.install(Quantity::Height, max_ascent).id,
            left: registries.install(Quantity::Left, self.x).id,
            bottom: registries.install(Quantity::Bottom, self.y).id,
        };

        let start_len = out.buffered_len();
        out.open_line(classes);
        let mut stats = self.compositor.compose(
            &self.text,
            &mut self.runs,
            &self.gaps,
            &self.options,
            registries,
            out,
        );
        out.close_line();
        stats.bytes = out.buffered_len() - start_len;

        tracing::trace!(
            glyphs = stats.glyphs,
            style_elements = stats.style_elements,
            whitespace_elements = stats.whitespace_elements,
            inserted_spaces = stats.inserted_spaces,
            bytes = stats.bytes,
            "line flushed"
        );

        self.clear();
        FlushOutcome::Emitted(stats)
    }

    /// Check that buffered glyphs are covered by a style run from index 0.
    pub fn validate(&self) -> Result<()> {
        match self.runs.first() {
            _ if self.text.is_empty() => Ok(()),
            Some(run) if run.start == 0 => Ok(()),
            first => Err(Error::UnstyledText {
                first_run_start: first.map(|run| run.start),
            }),
        }
    }

    /// Discard everything buffered for the current line.
    pub fn clear(&mut self) {
        self.text.clear();
        self.gaps.clear();
        self.runs.clear();
    }

    #[must_use]
    pub fn text(&self) -> &[char] {
        &self.text
    }

    #[must_use]
    pub fn gaps(&self) -> &[Gap] {
        &self.gaps
    }

    #[must_use]
    pub fn runs(&self) -> &[StyleRun] {
        &self.runs
    }

    /// Device-space anchor recorded by [`set_pos`](Self::set_pos).
    #[must_use]
    pub fn anchor(&self) -> (f64, f64) {
        (self.x, self.y)
    }

    #[must_use]
    pub fn transform_id(&self) -> i64 {
        self.transform_id
    }

    /// Number of buffered glyphs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
