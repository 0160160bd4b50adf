//! Live region: redraw a growing message in place.
//!
//! The region owns the bottom rows of the terminal starting at the cursor.
//! Each [`LiveRegion::draw`] moves back to the first row of the previous
//! frame, clears to the end of the screen, and writes the new frame, so a
//! reveal grows without scrolling copies of itself.

use super::output::OutputBuffer;
use super::style::Theme;
use super::write_text;
use crate::markdown::{self, Span, SpanKind};
use crossterm::cursor::{MoveToColumn, MoveUp};
use crossterm::queue;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Write};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// An in-place redrawn block of terminal rows.
#[derive(Debug)]
pub struct LiveRegion<W: Write> {
    writer: W,
    theme: Theme,
    width: u16,
    /// Rows occupied by the last frame.
    drawn_rows: usize,
    out: OutputBuffer,
}

impl<W: Write> LiveRegion<W> {
    /// Create a region `width` columns wide drawing to `writer`.
    pub fn new(writer: W, theme: Theme, width: u16) -> Self {
        Self {
            writer,
            theme,
            width: width.max(1),
            drawn_rows: 0,
            out: OutputBuffer::new(),
        }
    }

    /// Replace the previous frame with `text`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn draw(&mut self, text: &str) -> io::Result<()> {
        self.erase()?;

        self.out.clear();
        write_text(&mut self.out, text, &self.theme);
        self.out.flush_to(&mut self.writer)?;

        self.drawn_rows = self.rows_for(text);
        tracing::trace!(rows = self.drawn_rows, "live region drawn");
        Ok(())
    }

    /// Leave the last frame on screen and move below it. The next
    /// [`draw`](Self::draw) starts a fresh region.
    ///
    /// # Errors
    ///
    /// Returns an error if writing to the terminal fails.
    pub fn finish(&mut self) -> io::Result<()> {
        if self.drawn_rows > 0 {
            self.writer.write_all(b"\r\n")?;
            self.writer.flush()?;
        }
        self.drawn_rows = 0;
        Ok(())
    }

    /// The terminal width changed.
    pub fn resize(&mut self, width: u16) {
        self.width = width.max(1);
    }

    /// Rows the last frame occupies.
    pub const fn drawn_rows(&self) -> usize {
        self.drawn_rows
    }

    /// The theme frames are drawn with.
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn erase(&mut self) -> io::Result<()> {
        if self.drawn_rows == 0 {
            return Ok(());
        }
        let up = u16::try_from(self.drawn_rows - 1).unwrap_or(u16::MAX);
        if up > 0 {
            queue!(self.writer, MoveUp(up))?;
        }
        queue!(self.writer, MoveToColumn(0), Clear(ClearType::FromCursorDown))
    }

    /// Terminal rows `text` takes once wrapped at the region width.
    fn rows_for(&self, text: &str) -> usize {
        markdown::lines(text).map(|line| self.line_rows(&line)).sum()
    }

    /// Rows for one line, wrapping a glyph that does not fit in what is
    /// left of the row onto the next one, as terminals do for wide glyphs.
    fn line_rows(&self, spans: &[Span<'_>]) -> usize {
        let width = usize::from(self.width);
        let mut rows = 1;
        let mut column = 0;
        let mut place = |piece: &str| {
            for grapheme in piece.graphemes(true) {
                let w = grapheme.width();
                if w == 0 {
                    continue;
                }
                if column > 0 && column + w > width {
                    rows += 1;
                    column = 0;
                }
                column += w;
            }
        };

        for span in spans {
            place(span.content);
            if let SpanKind::Link { href } = span.kind {
                if self.theme.show_link_targets && !href.is_empty() {
                    place(" (");
                    place(href);
                    place(")");
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen(bytes: &[u8], width: u16) -> (vt100::Parser, Vec<String>) {
        let mut parser = vt100::Parser::new(6, width, 0);
        parser.process(bytes);
        let rows = parser
            .screen()
            .rows(0, width)
            .map(|row| row.trim_end().to_string())
            .collect();
        (parser, rows)
    }

    #[test]
    fn test_draw_replaces_previous_frame() {
        let mut region = LiveRegion::new(Vec::new(), Theme::default(), 20);
        region.draw("he").unwrap();
        region.draw("hello **wo").unwrap();
        region.draw("hello **world**").unwrap();

        let (parser, rows) = screen(&region.into_inner(), 20);
        assert_eq!(rows[0], "hello world");
        assert_eq!(rows[1], "");
        assert!(parser.screen().cell(0, 6).unwrap().bold());
        assert!(!parser.screen().cell(0, 0).unwrap().bold());
    }

    #[test]
    fn test_wrapped_frame_is_fully_erased() {
        let mut region = LiveRegion::new(Vec::new(), Theme::plain(), 10);
        region.draw("abcdefghijklmno").unwrap();
        assert_eq!(region.drawn_rows(), 2);
        region.draw("short").unwrap();
        assert_eq!(region.drawn_rows(), 1);

        let (_, rows) = screen(&region.into_inner(), 10);
        assert_eq!(rows[0], "short");
        assert_eq!(rows[1], "");
    }

    #[test]
    fn test_multiline_and_finish() {
        let mut region = LiveRegion::new(Vec::new(), Theme::plain(), 20);
        region.draw("one\ntw").unwrap();
        region.draw("one\ntwo").unwrap();
        assert_eq!(region.drawn_rows(), 2);
        region.finish().unwrap();
        assert_eq!(region.drawn_rows(), 0);
        region.draw("next").unwrap();

        let (_, rows) = screen(&region.into_inner(), 20);
        assert_eq!(rows[..3], ["one", "two", "next"]);
    }

    #[test]
    fn test_link_target_counts_toward_width() {
        let mut region = LiveRegion::new(Vec::new(), Theme::plain(), 10);
        region.draw("[ab](http://x)").unwrap();
        // "ab (http://x)" is 13 columns.
        assert_eq!(region.drawn_rows(), 2);

        let (_, rows) = screen(&region.into_inner(), 10);
        assert_eq!(rows[0], "ab (http:/");
        assert_eq!(rows[1], "/x)");
    }

    #[test]
    fn test_wide_characters_wrap() {
        let mut region = LiveRegion::new(Vec::new(), Theme::plain(), 4);
        region.draw("日本語").unwrap();
        assert_eq!(region.drawn_rows(), 2);
    }

    #[test]
    fn test_wide_glyph_wraps_before_last_column() {
        // Each glyph is two columns, so none fits beside another at width 3.
        let mut region = LiveRegion::new(Vec::new(), Theme::plain(), 3);
        region.draw("日本語").unwrap();
        assert_eq!(region.drawn_rows(), 3);
        region.draw("x").unwrap();
        assert_eq!(region.drawn_rows(), 1);

        let (_, rows) = screen(&region.into_inner(), 3);
        assert_eq!(rows[0], "x");
        assert_eq!(rows[1], "");
        assert_eq!(rows[2], "");
    }
}
