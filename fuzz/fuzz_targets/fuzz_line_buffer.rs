//! Fuzz target for line accumulation and flushing.
//!
//! Drives arbitrary append/flush sequences, including unstyled text and
//! extreme gap widths, and checks that flushing never panics and always
//! leaves balanced markup.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use line_compositor::{
    DocumentRegistries, FlushOutcome, FontInfo, LineBuffer, MarkupWriter, SimpleGraphicsState,
    StyleSnapshot, Valued,
};

#[derive(Arbitrary, Debug)]
enum Op {
    Text(Vec<char>),
    Offset(f64),
    State { font: u8, size: u8, fill: i8 },
    Flush,
}

fuzz_target!(|ops: Vec<Op>| {
    let mut line = LineBuffer::default();
    let mut registries = DocumentRegistries::new(0.01, 0.01);
    let mut out = MarkupWriter::new(Vec::new());

    for op in ops {
        match op {
            Op::Text(chars) => line.append_unicodes(&chars),
            Op::Offset(width) if width.is_finite() => line.append_offset(width),
            Op::Offset(_) => {}
            Op::State { font, size, fill } => {
                let gs = SimpleGraphicsState::new(StyleSnapshot {
                    font: FontInfo::new(i64::from(font), 0.8, -0.2, 0.25),
                    font_size: Valued::new(i64::from(size), f64::from(size)),
                    fill_color: i64::from(fill),
                    ..StyleSnapshot::default()
                });
                line.append_state(&gs);
            }
            Op::Flush => {
                let before = out.buffered_len();
                if let FlushOutcome::Emitted(_) = line.flush(&mut registries, &mut out) {
                    let markup = std::str::from_utf8(&out.buffer()[before..]).unwrap();
                    assert_eq!(
                        markup.matches("<span").count(),
                        markup.matches("</span>").count()
                    );
                }
                out.clear_buffer();
            }
        }
    }
});
