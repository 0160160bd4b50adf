//! Tokenizer: raw line → ordered, non-overlapping typed spans.
//!
//! # Algorithm
//!
//! 1. Each [`Pattern`] scanner independently produces candidates.
//! 2. Candidates are offered to an [`IntervalSet`] in fixed priority order
//!    (link, bold, code, italic), and in scan order within one pattern. A
//!    candidate is accepted only if it does not intersect anything already
//!    accepted, so the first registered candidate wins every conflict.
//! 3. The accepted set is kept sorted by start position.
//! 4. A left-to-right walk fills the gaps between accepted candidates with
//!    plain-text spans.
//!
//! The tokenizer is total: unterminated or malformed markers simply never
//! become candidates and fall through to plain text.

use super::scan::{scan, Candidate, Pattern};
use super::span::{Segment, Span, SpanKind};

/// Disjoint candidates, sorted by start.
#[derive(Debug, Default)]
struct IntervalSet {
    accepted: Vec<Candidate>,
}

impl IntervalSet {
    /// Accept `candidate` unless it intersects an accepted interval.
    ///
    /// Accepted intervals are disjoint and sorted, so their ends are sorted
    /// too: only the last interval starting before `candidate` ends can
    /// possibly overlap it.
    fn try_insert(&mut self, candidate: Candidate) -> bool {
        let idx = self
            .accepted
            .partition_point(|a| a.range.start < candidate.range.end);
        if idx > 0 && self.accepted[idx - 1].range.end > candidate.range.start {
            return false;
        }
        self.accepted.insert(idx, candidate);
        true
    }

    fn into_sorted(self) -> Vec<Candidate> {
        self.accepted
    }
}

/// Resolve all scanner candidates of `line` into a disjoint, sorted set.
fn select(line: &str) -> Vec<Candidate> {
    let mut set = IntervalSet::default();
    for pattern in Pattern::PRIORITY {
        for candidate in scan(line, pattern) {
            set.try_insert(candidate);
        }
    }
    set.into_sorted()
}

fn to_span<'a>(line: &'a str, candidate: &Candidate) -> Span<'a> {
    let kind = match candidate.pattern {
        Pattern::Link => SpanKind::Link {
            href: candidate
                .href
                .clone()
                .map_or("", |href| &line[href]),
        },
        Pattern::Bold => SpanKind::Bold,
        Pattern::Code => SpanKind::Code,
        Pattern::Italic => SpanKind::Italic,
    };

    Span {
        kind,
        content: &line[candidate.content.clone()],
        source: candidate.range.clone(),
    }
}

/// Tokenize a single line of inline markdown.
///
/// The line should not contain `\n`; use [`tokenize_text`] for multi-line
/// input. An empty line yields an empty vector. Source ranges are byte
/// offsets into `line`, and together they cover it exactly.
///
/// # Example
///
/// ```
/// use typewriter::markdown::{tokenize, SpanKind};
///
/// let spans = tokenize("**bold** and *italic*");
/// assert_eq!(spans.len(), 3);
/// assert_eq!(spans[0].kind, SpanKind::Bold);
/// assert_eq!(spans[1].content, " and ");
/// assert_eq!(spans[2].kind, SpanKind::Italic);
/// ```
pub fn tokenize(line: &str) -> Vec<Span<'_>> {
    if line.is_empty() {
        return Vec::new();
    }

    let candidates = select(line);
    let mut spans = Vec::with_capacity(candidates.len() * 2 + 1);
    let mut cursor = 0;

    for candidate in &candidates {
        if candidate.range.start > cursor {
            spans.push(Span::text(
                &line[cursor..candidate.range.start],
                cursor..candidate.range.start,
            ));
        }
        spans.push(to_span(line, candidate));
        cursor = candidate.range.end;
    }

    if cursor < line.len() {
        spans.push(Span::text(&line[cursor..], cursor..line.len()));
    }

    spans
}

/// Tokenize each `\n`-separated line of `text`, with source ranges
/// relative to the whole text.
pub fn lines(text: &str) -> impl Iterator<Item = Vec<Span<'_>>> {
    text.split('\n').scan(0usize, |offset, line| {
        let base = *offset;
        *offset += line.len() + 1;
        Some(
            tokenize(line)
                .into_iter()
                .map(|span| span.offset(base))
                .collect(),
        )
    })
}

/// Tokenize multi-line text into spans joined by explicit line breaks.
///
/// Every `\n` in `text` becomes exactly one [`Segment::LineBreak`], so
/// blank lines survive as consecutive breaks.
pub fn tokenize_text(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    for (index, line) in lines(text).enumerate() {
        if index > 0 {
            segments.push(Segment::LineBreak);
        }
        segments.extend(line.into_iter().map(Segment::Span));
    }
    segments
}

/// The visible characters of a tokenized line: contents concatenated,
/// markers stripped.
pub fn visible_text(spans: &[Span<'_>]) -> String {
    spans.iter().map(|span| span.content).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary<'a>(spans: &[Span<'a>]) -> Vec<(&'static str, &'a str)> {
        spans.iter().map(|s| (s.kind.name(), s.content)).collect()
    }

    #[test]
    fn test_plain_line() {
        let spans = tokenize("just words");
        assert_eq!(summary(&spans), vec![("text", "just words")]);
        assert_eq!(spans[0].source, 0..10);
    }

    #[test]
    fn test_empty_line() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_bold_then_italic() {
        let spans = tokenize("**bold** and *italic*");
        assert_eq!(
            summary(&spans),
            vec![("bold", "bold"), ("text", " and "), ("italic", "italic")]
        );
    }

    #[test]
    fn test_italic_spans_past_double_star() {
        let spans = tokenize("*a** b*");
        assert_eq!(summary(&spans), vec![("italic", "a** b")]);
        assert_eq!(spans[0].source, 0..7);
    }

    #[test]
    fn test_unterminated_bold_is_text() {
        let spans = tokenize("**bold");
        assert_eq!(summary(&spans), vec![("text", "**bold")]);
    }

    #[test]
    fn test_link_wins_over_surrounding_bold() {
        let spans = tokenize("**[a](http://x)**");
        assert_eq!(
            summary(&spans),
            vec![("text", "**"), ("link", "a"), ("text", "**")]
        );
        assert_eq!(spans[1].href(), Some("http://x"));
        assert_eq!(spans[1].source, 2..15);
    }

    #[test]
    fn test_bold_wins_over_overlapping_code() {
        // Bold `**a `b**` and code `` `b** c` `` intersect; bold has priority.
        let spans = tokenize("**a `b** c`");
        assert_eq!(summary(&spans), vec![("bold", "a `b"), ("text", " c`")]);
    }

    #[test]
    fn test_code_wins_over_overlapping_italic() {
        let spans = tokenize("*a `b* c`");
        assert_eq!(summary(&spans), vec![("text", "*a "), ("code", "b* c")]);
    }

    #[test]
    fn test_bold_outranks_enclosing_code() {
        let spans = tokenize("run `**not code**` now");
        assert_eq!(
            summary(&spans),
            vec![("text", "run `"), ("bold", "not code"), ("text", "` now")]
        );
    }

    #[test]
    fn test_triple_emphasis_is_plain() {
        let spans = tokenize("***text***");
        assert_eq!(summary(&spans), vec![("text", "***text***")]);
    }

    #[test]
    fn test_empty_contents_are_kept() {
        let spans = tokenize("a `` b [](u)");
        assert_eq!(
            summary(&spans),
            vec![("text", "a "), ("code", ""), ("text", " b "), ("link", "")]
        );
        assert_eq!(spans[3].href(), Some("u"));
    }

    #[test]
    fn test_sources_cover_line() {
        let line = "x [l](h) **b** `c` *i* y";
        let spans = tokenize(line);
        let rebuilt: String = spans.iter().map(|s| &line[s.source.clone()]).collect();
        assert_eq!(rebuilt, line);
        assert!(spans.windows(2).all(|w| w[0].source.end == w[1].source.start));
        assert_eq!(visible_text(&spans), "x l b c i y");
    }

    #[test]
    fn test_tokenize_text_line_breaks() {
        let segments = tokenize_text("**a**\n\nb");
        assert_eq!(segments.len(), 4);
        assert_eq!(segments[0].as_span().map(|s| s.kind), Some(SpanKind::Bold));
        assert_eq!(segments[1], Segment::LineBreak);
        assert_eq!(segments[2], Segment::LineBreak);
        let last = segments[3].as_span().unwrap();
        assert_eq!(last.content, "b");
        assert_eq!(last.source, 7..8);
    }

    #[test]
    fn test_lines_offsets() {
        let text = "a\n*b*";
        let all: Vec<_> = lines(text).collect();
        assert_eq!(all.len(), 2);
        assert_eq!(all[1][0].kind, SpanKind::Italic);
        assert_eq!(&text[all[1][0].source.clone()], "*b*");
    }

    #[test]
    fn test_interval_set_rejects_overlap() {
        let mut set = IntervalSet::default();
        let make = |start: usize, end: usize| Candidate {
            pattern: Pattern::Code,
            range: start..end,
            content: start..end,
            href: None,
        };
        assert!(set.try_insert(make(5, 8)));
        assert!(set.try_insert(make(0, 5)));
        assert!(set.try_insert(make(8, 9)));
        assert!(!set.try_insert(make(4, 6)));
        assert!(!set.try_insert(make(7, 12)));
        let starts: Vec<_> = set.into_sorted().iter().map(|c| c.range.start).collect();
        assert_eq!(starts, vec![0, 5, 8]);
    }
}
