#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)]

use line_compositor::{
    DocumentRegistries, FlushOutcome, FontInfo, LineBuffer, MarkupWriter, SimpleGraphicsState,
    StyleSnapshot, Valued,
};

/// Route crate diagnostics to the test output.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
}

/// Font with ascent 0.8, descent -0.2 and a quarter-em space.
pub const FONT: FontInfo = FontInfo::new(1, 0.8, -0.2, 0.25);

/// Size-10 style in `FONT`; every other id is 0.
pub fn base_style() -> StyleSnapshot {
    StyleSnapshot {
        font: FONT,
        font_size: Valued::new(2, 10.0),
        ..StyleSnapshot::default()
    }
}

pub fn with_fill(fill_color: i64) -> StyleSnapshot {
    StyleSnapshot {
        fill_color,
        ..base_style()
    }
}

pub fn gs(style: StyleSnapshot) -> SimpleGraphicsState {
    SimpleGraphicsState::new(style)
}

/// Registries that store values exactly.
pub fn exact_registries() -> DocumentRegistries {
    DocumentRegistries::new(0.0, 0.0)
}

pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// Flush `line` into a fresh writer and return the outcome with the markup.
pub fn flush(line: &mut LineBuffer, registries: &mut DocumentRegistries) -> (FlushOutcome, String) {
    let mut out = MarkupWriter::new(Vec::new());
    let outcome = line.flush(registries, &mut out);
    let sink = out.finish().expect("writing to a Vec cannot fail");
    (outcome, String::from_utf8(sink).expect("markup is UTF-8"))
}

/// Text content of `markup` with every tag removed.
pub fn strip_tags(markup: &str) -> String {
    let mut text = String::with_capacity(markup.len());
    let mut in_tag = false;
    for ch in markup.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }
    text
}

/// Check that every `<span` is closed in LIFO order inside one `<div>`.
pub fn is_well_nested(markup: &str) -> bool {
    if !markup.starts_with("<div") || !markup.ends_with("</div>") {
        return false;
    }
    let mut depth: i64 = 0;
    let mut rest = markup;
    while let Some(pos) = rest.find('<') {
        rest = &rest[pos..];
        if rest.starts_with("<span") {
            depth += 1;
        } else if rest.starts_with("</span>") {
            depth -= 1;
            if depth < 0 {
                return false;
            }
        }
        rest = &rest[1..];
    }
    depth == 0
}
