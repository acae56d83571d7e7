//! Property-based tests for line accumulation and composition.
//!
//! Uses proptest to verify the ledger invariants of `LineBuffer` and the
//! text and nesting guarantees of flushed markup.

mod common;

use common::{base_style, exact_registries, flush, gs, is_well_nested, strip_tags};
use line_compositor::{FlushOutcome, LineBuffer, StyleSnapshot, Valued};
use proptest::prelude::*;

// ============================================================================
// Strategies
// ============================================================================

/// One interpreter call.
#[derive(Clone, Debug)]
enum Op {
    Text(String),
    Offset(f64),
    State { fill: i64, size: i64 },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => "[a-z ]{1,4}".prop_map(Op::Text),
        3 => (-12.0f64..12.0).prop_map(Op::Offset),
        2 => (0i64..3, 0i64..3).prop_map(|(fill, size)| Op::State { fill, size }),
    ]
}

fn style(fill: i64, size: i64) -> StyleSnapshot {
    StyleSnapshot {
        fill_color: fill,
        font_size: Valued::new(size, 8.0 + 2.0 * size as f64),
        ..base_style()
    }
}

/// Apply `ops` to a buffer that starts with a style at index 0; returns the text appended.
fn build(line: &mut LineBuffer, ops: &[Op]) -> String {
    let mut text = String::new();
    line.append_state(&gs(base_style()));
    for op in ops {
        match op {
            Op::Text(s) => {
                let chars: Vec<char> = s.chars().collect();
                line.append_unicodes(&chars);
                text.push_str(s);
            }
            Op::Offset(w) => line.append_offset(*w),
            Op::State { fill, size } => line.append_state(&gs(style(*fill, *size))),
        }
    }
    text
}

/// `needle` appears in `hay` in order, possibly with extra characters between.
fn is_subsequence(needle: &str, hay: &str) -> bool {
    let mut hay = hay.chars();
    needle.chars().all(|c| hay.any(|h| h == c))
}

// ============================================================================
// Ledger Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Gap and style-run start indices are strictly increasing.
    #[test]
    fn ledger_indices_strictly_increase(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut line = LineBuffer::default();
        build(&mut line, &ops);
        for pair in line.gaps().windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
        for pair in line.runs().windows(2) {
            prop_assert!(pair[0].start < pair[1].start);
        }
        prop_assert_eq!(line.runs()[0].start, 0);
    }

    /// Offsets appended without glyphs in between merge into one summed gap.
    #[test]
    fn offsets_at_one_index_merge(widths in prop::collection::vec(-50.0f64..50.0, 1..8)) {
        let mut line = LineBuffer::default();
        line.append_unicodes(&['x']);
        for w in &widths {
            line.append_offset(*w);
        }
        prop_assert_eq!(line.gaps().len(), 1);
        let sum: f64 = widths.iter().sum();
        prop_assert!((line.gaps()[0].width - sum).abs() < 1e-9);
    }

    /// Repeated style captures at one index keep a single run.
    #[test]
    fn states_at_one_index_never_duplicate(count in 1usize..6) {
        let mut line = LineBuffer::default();
        for i in 0..count {
            line.append_state(&gs(style(i as i64 % 3, 0)));
        }
        prop_assert_eq!(line.runs().len(), 1);
    }
}

// ============================================================================
// Flush Properties
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Markup text reproduces the appended glyphs, with only spaces inserted.
    #[test]
    fn flushed_text_round_trips(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut line = LineBuffer::default();
        let mut regs = exact_registries();
        let text = build(&mut line, &ops);
        let (outcome, html) = flush(&mut line, &mut regs);

        if text.is_empty() {
            prop_assert_eq!(outcome, FlushOutcome::Empty);
            prop_assert!(html.is_empty());
        } else {
            let emitted = strip_tags(&html);
            prop_assert!(is_subsequence(&text, &emitted), "{:?} not in {:?}", text, emitted);
            prop_assert_eq!(emitted.replace(' ', ""), text.replace(' ', ""));
        }
    }

    /// Every opened element is closed in LIFO order inside the line element.
    #[test]
    fn flushed_markup_is_well_nested(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut line = LineBuffer::default();
        let mut regs = exact_registries();
        let text = build(&mut line, &ops);
        let (_, html) = flush(&mut line, &mut regs);
        if !text.is_empty() {
            prop_assert!(is_well_nested(&html), "{}", html);
        }
    }

    /// Element counts reported by the flush match the markup.
    #[test]
    fn stats_match_markup(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut line = LineBuffer::default();
        let mut regs = exact_registries();
        build(&mut line, &ops);
        let (outcome, html) = flush(&mut line, &mut regs);
        if let FlushOutcome::Emitted(stats) = outcome {
            let spans = html.matches("<span").count();
            prop_assert_eq!(spans, stats.style_elements + stats.whitespace_elements);
            prop_assert_eq!(stats.bytes, html.len());
        }
    }

    /// A flushed buffer is empty and ready for the next line.
    #[test]
    fn flush_resets_buffer(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let mut line = LineBuffer::default();
        let mut regs = exact_registries();
        let text = build(&mut line, &ops);
        flush(&mut line, &mut regs);
        if !text.is_empty() {
            prop_assert!(line.is_empty());
            prop_assert!(line.gaps().is_empty());
            prop_assert!(line.runs().is_empty());
        }
    }
}
