//! `OutputBuffer`: Single-write output buffer for styled text.

use super::style::{Modifiers, Rgb, SpanStyle};
use std::io::Write;

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// Everything for a frame is accumulated here, then flushed in a single
/// `write_all` so the terminal never shows a half-drawn reveal.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for a typical chat message (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Terminal line break (the cursor returns to column 0 in raw mode too).
    #[inline]
    pub fn line_break(&mut self) {
        self.data.extend_from_slice(b"\r\n");
    }

    /// Set foreground color (true color).
    pub fn set_fg(&mut self, color: Rgb) {
        // Writing into a Vec cannot fail.
        let _ = write!(self.data, "\x1b[38;2;{};{};{}m", color.r, color.g, color.b);
    }

    /// Turn on every modifier in `modifiers`.
    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        for (flag, code) in Modifiers::SGR {
            if modifiers.contains(flag) {
                let _ = write!(self.data, "\x1b[{code}m");
            }
        }
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Write `text` in `style`, resetting attributes afterwards.
    ///
    /// Plain styles write the text alone.
    pub fn write_styled(&mut self, text: &str, style: SpanStyle) {
        if style.is_plain() {
            self.write_str(text);
            return;
        }
        if let Some(fg) = style.fg {
            self.set_fg(fg);
        }
        self.set_modifiers(style.modifiers);
        self.write_str(text);
        self.reset_attrs();
    }

    /// Open an OSC 8 hyperlink to `uri`.
    pub fn hyperlink_start(&mut self, uri: &str) {
        self.data.extend_from_slice(b"\x1b]8;;");
        self.write_str(uri);
        self.data.extend_from_slice(b"\x1b\\");
    }

    /// Close the open OSC 8 hyperlink.
    pub fn hyperlink_end(&mut self) {
        self.data.extend_from_slice(b"\x1b]8;;\x1b\\");
    }

    /// Flush to a writer in a single write.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}
