//! Span: The typed output unit of the inline tokenizer.
//!
//! Spans borrow their content from the tokenized text and remember the
//! byte range they were cut from, so a caller can always map a rendered
//! fragment back to its source.

use std::ops::Range;

/// The kind of an inline span.
///
/// Only links carry an extra payload, so "href present only for links"
/// holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanKind<'a> {
    /// Literal text.
    Text,
    /// `**strong**` emphasis.
    Bold,
    /// `*emphasis*`.
    Italic,
    /// `` `inline code` ``.
    Code,
    /// `[label](href)`.
    Link {
        /// Link target, verbatim.
        href: &'a str,
    },
}

impl SpanKind<'_> {
    /// Short lowercase name of the kind (`text`, `bold`, ...).
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Code => "code",
            Self::Link { .. } => "link",
        }
    }

    /// Whether this kind renders with any styling at all.
    pub const fn is_styled(&self) -> bool {
        !matches!(self, Self::Text)
    }
}

/// A typed, contiguous fragment of one tokenized line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span<'a> {
    /// What the fragment is.
    pub kind: SpanKind<'a>,
    /// Text to display (markers stripped).
    pub content: &'a str,
    /// Byte range of the whole fragment, markers included, in the source.
    pub source: Range<usize>,
}

impl<'a> Span<'a> {
    /// Create a plain-text span.
    pub const fn text(content: &'a str, source: Range<usize>) -> Self {
        Self {
            kind: SpanKind::Text,
            content,
            source,
        }
    }

    /// The href of a link span.
    pub const fn href(&self) -> Option<&'a str> {
        match self.kind {
            SpanKind::Link { href } => Some(href),
            _ => None,
        }
    }

    /// Shift the source range by `offset` bytes.
    ///
    /// Used when a line is tokenized on its own and then placed back into
    /// a larger document.
    #[must_use]
    pub fn offset(mut self, offset: usize) -> Self {
        self.source = (self.source.start + offset)..(self.source.end + offset);
        self
    }
}

/// One element of a tokenized multi-line text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// An inline span.
    Span(Span<'a>),
    /// A hard `\n` separating two lines.
    LineBreak,
}

impl<'a> Segment<'a> {
    /// The inner span, if this is not a line break.
    pub const fn as_span(&self) -> Option<&Span<'a>> {
        match self {
            Self::Span(span) => Some(span),
            Self::LineBreak => None,
        }
    }
}

impl<'a> From<Span<'a>> for Segment<'a> {
    fn from(span: Span<'a>) -> Self {
        Self::Span(span)
    }
}
