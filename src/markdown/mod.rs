//! Inline Markdown: A small, total tokenizer for chat text.
//!
//! Recognizes four inline constructs and nothing else:
//!
//! | Construct       | Kind                 | Priority |
//! |-----------------|----------------------|----------|
//! | `[label](url)`  | [`SpanKind::Link`]   | 1        |
//! | `**text**`      | [`SpanKind::Bold`]   | 2        |
//! | `` `text` ``    | [`SpanKind::Code`]   | 3        |
//! | `*text*`        | [`SpanKind::Italic`] | 4        |
//!
//! Overlapping matches are resolved by priority; everything unmatched is
//! plain [`SpanKind::Text`]. Block-level markdown and nested emphasis are
//! not recognized.
//!
//! # Example
//!
//! ```rust
//! use typewriter::markdown::{tokenize_text, Segment};
//!
//! let segments = tokenize_text("see [docs](https://example.com)\n`done`");
//! assert!(segments.contains(&Segment::LineBreak));
//! ```

mod scan;
mod span;
mod tokenizer;

pub use scan::Pattern;
pub use span::{Segment, Span, SpanKind};
pub use tokenizer::{lines, tokenize, tokenize_text, visible_text};
