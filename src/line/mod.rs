//! Line accumulation and composition.
//!
//! - [`ledger`]: gap and style-run entries keyed by glyph index
//! - [`buffer`]: the [`LineBuffer`] the interpreter appends to and flushes
//! - `optimize`: folds recurring gaps into word spacing
//! - `compose`: nests style elements and renders gaps

pub mod buffer;
mod compose;
pub mod ledger;
mod optimize;

pub use buffer::{FlushOutcome, LineBuffer};
pub use compose::LineStats;
pub use ledger::{Gap, StyleRun};
