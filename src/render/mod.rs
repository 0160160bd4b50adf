//! Rendering: Styled terminal output for tokenized, partially revealed text.
//!
//! Presentation is a pure function of the revealed prefix: every frame
//! re-tokenizes the prefix line by line and maps span kinds through a
//! [`Theme`]. Nothing about an earlier frame is carried over, so a marker
//! that only closes later in the reveal simply shows as literal text
//! until it does.

mod live;
mod output;
mod style;
mod view;

pub use live::LiveRegion;
pub use output::OutputBuffer;
pub use style::{Modifiers, Rgb, SpanStyle, Theme};
pub use view::{MarkdownView, ViewStatus};

use crate::markdown::{self, Span, SpanKind};

/// Write one tokenized line into `out`.
pub fn write_line(out: &mut OutputBuffer, spans: &[Span<'_>], theme: &Theme) {
    for span in spans {
        let style = theme.style_for(&span.kind);
        match span.kind {
            SpanKind::Link { href } => {
                if theme.hyperlinks && !href.is_empty() {
                    out.hyperlink_start(href);
                    out.write_styled(span.content, style);
                    out.hyperlink_end();
                } else {
                    out.write_styled(span.content, style);
                }
                if theme.show_link_targets && !href.is_empty() {
                    out.write_styled(" (", theme.text);
                    out.write_styled(href, theme.text);
                    out.write_styled(")", theme.text);
                }
            }
            _ => out.write_styled(span.content, style),
        }
    }
}

/// Tokenize and write multi-line `text` into `out`, one terminal line per
/// `\n`-separated line.
pub fn write_text(out: &mut OutputBuffer, text: &str, theme: &Theme) {
    for (index, line) in markdown::lines(text).enumerate() {
        if index > 0 {
            out.line_break();
        }
        write_line(out, &line, theme);
    }
}
