//! Buffered markup writer with text escaping.
//!
//! Output is accumulated in memory and handed to the inner sink on
//! [`MarkupWriter::flush`], so many lines share one write to the sink.

use crate::aspect::Aspect;
use crate::error::Result;
use crate::options::ClassNames;
use std::io::Write;

/// Ids of the classes carried by a line element.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineClasses {
    pub transform_matrix: i64,
    pub left: i64,
    pub height: i64,
    pub bottom: i64,
}

/// Buffered writer producing line, style and whitespace elements.
pub struct MarkupWriter<W: Write> {
    writer: W,
    buffer: Vec<u8>,
    class_names: ClassNames,
}

impl<W: Write> MarkupWriter<W> {
    /// Create a writer with the default class names.
    pub fn new(writer: W) -> Self {
        Self::with_class_names(writer, ClassNames::default())
    }

    /// Create a writer with custom class names.
    pub fn with_class_names(writer: W, class_names: ClassNames) -> Self {
        Self {
            writer,
            buffer: Vec::with_capacity(4096),
            class_names,
        }
    }

    /// Class names this writer emits.
    pub fn class_names(&self) -> &ClassNames {
        &self.class_names
    }

    /// Open the element wrapping one line.
    pub fn open_line(&mut self, classes: LineClasses) {
        self.buffer.extend_from_slice(b"<div class=\"");
        self.buffer
            .extend_from_slice(self.class_names.line.as_bytes());
        let names = &self.class_names;
        let tokens = [
            (&names.transform_matrix, classes.transform_matrix),
            (&names.left, classes.left),
            (&names.height, classes.height),
            (&names.bottom, classes.bottom),
        ];
        for (prefix, id) in tokens {
            self.buffer.push(b' ');
            push_class(&mut self.buffer, prefix, id, &names.invalid);
        }
        self.buffer.extend_from_slice(b"\">");
    }

    /// Close the line element.
    pub fn close_line(&mut self) {
        self.buffer.extend_from_slice(b"</div>");
    }

    /// Open a style element carrying one class per `(aspect, id)` pair.
    ///
    /// Callers pass pairs in aspect order and never pass an empty slice.
    pub fn open_style(&mut self, tokens: &[(Aspect, i64)]) {
        self.buffer.extend_from_slice(b"<span class=\"");
        for (i, &(aspect, id)) in tokens.iter().enumerate() {
            if i > 0 {
                self.buffer.push(b' ');
            }
            push_class(
                &mut self.buffer,
                self.class_names.aspect(aspect),
                id,
                &self.class_names.invalid,
            );
        }
        self.buffer.extend_from_slice(b"\">");
    }

    /// Close the innermost style element.
    pub fn close_style(&mut self) {
        self.buffer.extend_from_slice(b"</span>");
    }

    /// Write a zero-width gap element, optionally holding a visible space.
    pub fn whitespace(&mut self, id: i64, visible_space: bool) {
        self.buffer.extend_from_slice(b"<span class=\"");
        self.buffer
            .extend_from_slice(self.class_names.whitespace.as_bytes());
        self.buffer.push(b' ');
        push_class(
            &mut self.buffer,
            &self.class_names.whitespace,
            id,
            &self.class_names.invalid,
        );
        self.buffer.extend_from_slice(b"\">");
        if visible_space {
            self.buffer.push(b' ');
        }
        self.buffer.extend_from_slice(b"</span>");
    }

    /// Write text, escaping markup-significant characters.
    pub fn text(&mut self, chars: &[char]) {
        let mut utf8 = [0u8; 4];
        for &ch in chars {
            match ch {
                '&' => self.buffer.extend_from_slice(b"&amp;"),
                '<' => self.buffer.extend_from_slice(b"&lt;"),
                '>' => self.buffer.extend_from_slice(b"&gt;"),
                '"' => self.buffer.extend_from_slice(b"&quot;"),
                '\'' => self.buffer.extend_from_slice(b"&apos;"),
                _ => self
                    .buffer
                    .extend_from_slice(ch.encode_utf8(&mut utf8).as_bytes()),
            }
        }
    }

    /// Bytes buffered and not yet flushed.
    pub fn buffered_len(&self) -> usize {
        self.buffer.len()
    }

    /// Get a reference to the buffer.
    pub fn buffer(&self) -> &[u8] {
        &self.buffer
    }

    /// Clear the buffer without flushing.
    pub fn clear_buffer(&mut self) {
        self.buffer.clear();
    }

    /// Flush the buffer to the underlying writer.
    pub fn flush(&mut self) -> Result<()> {
        self.writer.write_all(&self.buffer)?;
        self.buffer.clear();
        self.writer.flush()?;
        Ok(())
    }

    /// Flush and return the underlying writer.
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        Ok(self.writer)
    }
}

/// Append `prefix` followed by `id` in lowercase hex, or by `invalid` for negative ids.
fn push_class(buffer: &mut Vec<u8>, prefix: &str, id: i64, invalid: &str) {
    buffer.extend_from_slice(prefix.as_bytes());
    if id < 0 {
        buffer.extend_from_slice(invalid.as_bytes());
    } else {
        let _ = write!(buffer, "{id:x}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(writer: &MarkupWriter<Vec<u8>>) -> &str {
        std::str::from_utf8(writer.buffer()).unwrap()
    }

    #[test]
    fn test_line_element() {
        let mut writer = MarkupWriter::new(Vec::new());
        writer.open_line(LineClasses {
            transform_matrix: 0,
            left: 10,
            height: 2,
            bottom: 255,
        });
        writer.close_line();
        assert_eq!(output(&writer), "<div class=\"t m0 xa h2 yff\"></div>");
    }

    #[test]
    fn test_style_element_tokens_in_order() {
        let mut writer = MarkupWriter::new(Vec::new());
        writer.open_style(&[(Aspect::FontFamily, 1), (Aspect::FillColor, 0x1f)]);
        writer.text(&['a']);
        writer.close_style();
        assert_eq!(output(&writer), "<span class=\"ff1 fc1f\">a</span>");
    }

    #[test]
    fn test_invalid_id_token() {
        let mut writer = MarkupWriter::new(Vec::new());
        writer.open_style(&[(Aspect::StrokeColor, -1)]);
        assert_eq!(output(&writer), "<span class=\"sc_\">");
    }

    #[test]
    fn test_whitespace_element() {
        let mut writer = MarkupWriter::new(Vec::new());
        writer.whitespace(3, true);
        writer.whitespace(4, false);
        assert_eq!(
            output(&writer),
            "<span class=\"_ _3\"> </span><span class=\"_ _4\"></span>"
        );
    }

    #[test]
    fn test_text_escaping() {
        let mut writer = MarkupWriter::new(Vec::new());
        let text: Vec<char> = "a<b>&\"c'é".chars().collect();
        writer.text(&text);
        assert_eq!(output(&writer), "a&lt;b&gt;&amp;&quot;c&apos;é");
    }

    #[test]
    fn test_clear_buffer_discards_pending_output() {
        let mut writer = MarkupWriter::new(Vec::new());
        writer.text(&['x']);
        assert_eq!(writer.buffered_len(), 1);
        writer.clear_buffer();
        assert_eq!(writer.finish().unwrap(), b"");
    }

    #[test]
    fn test_flush_moves_buffer_to_sink() {
        let mut writer = MarkupWriter::new(Vec::new());
        writer.open_line(LineClasses::default());
        writer.close_line();
        writer.flush().unwrap();
        assert!(writer.buffer().is_empty());
        let sink = writer.finish().unwrap();
        assert_eq!(sink, b"<div class=\"t m0 x0 h0 y0\"></div>");
    }
}
