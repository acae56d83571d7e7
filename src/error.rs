//! Error types for the line compositor.

use std::io;

/// Result type alias for compositor operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for compositor operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O error from the markup sink.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Glyphs were buffered without a style run covering index 0.
    ///
    /// This is an upstream defect, not bad input.
    #[error("text without a style: first style run starts at {}", describe_start(.first_run_start))]
    UnstyledText {
        /// Start index of the first run, `None` when no run exists at all.
        first_run_start: Option<usize>,
    },
}

fn describe_start(start: &Option<usize>) -> String {
    start.map_or_else(|| "<none>".to_string(), |idx| idx.to_string())
}
