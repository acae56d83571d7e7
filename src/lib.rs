//! Line compositor for positioned text.
//!
//! A [`LineBuffer`] collects everything belonging to one visual line of
//! rendered text (glyphs, style changes and horizontal gaps) and emits it
//! as one markup fragment. The fragment nests style elements so that no
//! attribute is repeated where an enclosing element already provides it,
//! and renders gaps as literal spaces or zero-width gap elements.
//!
//! Recurring numeric values are shared across a document through
//! [`Registries`]; the interpreter's current style is read through
//! [`GraphicsState`]. Both are passed per call, so tests can use fakes.

#![allow(clippy::cast_possible_truncation)] // Ids are small
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)] // Registry sizes fit in i64
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::float_cmp)] // Exact comparisons only where values are copied, not computed
#![allow(clippy::ref_option)]

pub mod aspect;
pub mod context;
pub mod error;
pub mod font;
pub mod line;
pub mod markup;
pub mod math;
pub mod options;
pub mod registry;

// Re-export core types at crate root
pub use aspect::{Aspect, AspectMask, AspectValues, Binding};
pub use context::{GraphicsState, Installed, Quantity, Registries, StyleSnapshot, Valued};
pub use error::{Error, Result};
pub use font::FontInfo;
pub use line::{FlushOutcome, Gap, LineBuffer, LineStats, StyleRun};
pub use markup::{LineClasses, MarkupWriter};
pub use options::{ClassNames, CompositorOptions};
pub use registry::{DocumentRegistries, SimpleGraphicsState, ValueRegistry};
