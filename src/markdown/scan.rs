//! Pattern scanners: candidate discovery for each inline construct.
//!
//! Every scanner walks the line left to right and behaves like a global,
//! non-overlapping regex search: on a successful match scanning resumes at
//! the match end, on failure it resumes one byte after the failed start.
//! All delimiters are ASCII, so byte positions are always valid `char`
//! boundaries of the UTF-8 input.
//!
//! The adjacency rules for `*` delimiters live here, inside the scanners,
//! rather than in a post-filter: a delimiter run that touches another `*`
//! is never a candidate in the first place.

use std::ops::Range;

/// The lexical patterns, declared in priority order.
///
/// `Ord` follows declaration order, so `Link < Bold < Code < Italic`
/// reads as "higher priority first".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Pattern {
    /// `[label](url)`
    Link,
    /// `**text**`
    Bold,
    /// `` `text` ``
    Code,
    /// `*text*`
    Italic,
}

impl Pattern {
    /// All patterns, highest priority first.
    pub const PRIORITY: [Self; 4] = [Self::Link, Self::Bold, Self::Code, Self::Italic];

    /// The byte every match of this pattern starts with.
    const fn opener(self) -> u8 {
        match self {
            Self::Link => b'[',
            Self::Bold | Self::Italic => b'*',
            Self::Code => b'`',
        }
    }
}

/// A match produced by one scanner, before overlap resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Which pattern produced the match.
    pub pattern: Pattern,
    /// Byte range of the full match, delimiters included.
    pub range: Range<usize>,
    /// Byte range of the displayed content.
    pub content: Range<usize>,
    /// Byte range of the link target (links only).
    pub href: Option<Range<usize>>,
}

/// Scan `line` for every non-overlapping match of `pattern`.
pub fn scan(line: &str, pattern: Pattern) -> Vec<Candidate> {
    let bytes = line.as_bytes();
    let opener = pattern.opener();
    let mut found = Vec::new();
    let mut pos = 0;

    while let Some(offset) = find(bytes, pos, opener) {
        let start = pos + offset;
        let attempt = match pattern {
            Pattern::Link => match_link(bytes, start),
            Pattern::Bold => match_bold(bytes, start),
            Pattern::Code => match_code(bytes, start),
            Pattern::Italic => match_italic(bytes, start),
        };

        match attempt {
            Some(candidate) => {
                pos = candidate.range.end;
                found.push(candidate);
            }
            None => pos = start + 1,
        }
    }

    found
}

/// Position of `needle` in `bytes[from..]`, relative to `from`.
fn find(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes.get(from..)?.iter().position(|&b| b == needle)
}

fn is_star(bytes: &[u8], index: usize) -> bool {
    bytes.get(index) == Some(&b'*')
}

/// Star at `index - 1`, treating "before the line" as not a star.
fn star_before(bytes: &[u8], index: usize) -> bool {
    index > 0 && is_star(bytes, index - 1)
}

/// `[label](url)`: label has no `]`, url has no `)`; both may be empty.
fn match_link(bytes: &[u8], start: usize) -> Option<Candidate> {
    let label_start = start + 1;
    let label_end = label_start + find(bytes, label_start, b']')?;
    if bytes.get(label_end + 1) != Some(&b'(') {
        return None;
    }
    let href_start = label_end + 2;
    let href_end = href_start + find(bytes, href_start, b')')?;

    Some(Candidate {
        pattern: Pattern::Link,
        range: start..href_end + 1,
        content: label_start..label_end,
        href: Some(href_start..href_end),
    })
}

/// `**text**`: no `*` inside, and neither delimiter touches a third `*`.
fn match_bold(bytes: &[u8], start: usize) -> Option<Candidate> {
    if !is_star(bytes, start + 1) || star_before(bytes, start) {
        return None;
    }
    let content_start = start + 2;
    let content_end = content_start + find(bytes, content_start, b'*')?;
    if !is_star(bytes, content_end + 1) || is_star(bytes, content_end + 2) {
        return None;
    }

    Some(Candidate {
        pattern: Pattern::Bold,
        range: start..content_end + 2,
        content: content_start..content_end,
        href: None,
    })
}

/// `` `text` ``: the first closing backtick ends the span.
fn match_code(bytes: &[u8], start: usize) -> Option<Candidate> {
    let content_start = start + 1;
    let content_end = content_start + find(bytes, content_start, b'`')?;

    Some(Candidate {
        pattern: Pattern::Code,
        range: start..content_end + 1,
        content: content_start..content_end,
        href: None,
    })
}

/// `*text*`: a lone star on each side, never adjacent to another `*`.
fn match_italic(bytes: &[u8], start: usize) -> Option<Candidate> {
    if star_before(bytes, start) || start + 1 >= bytes.len() || is_star(bytes, start + 1) {
        return None;
    }
    let content_start = start + 1;
    // Closing star must stand alone; stars touching another star are content.
    let mut content_end = content_start;
    loop {
        content_end += find(bytes, content_end, b'*')?;
        if !star_before(bytes, content_end) && !is_star(bytes, content_end + 1) {
            break;
        }
        content_end += 1;
    }

    Some(Candidate {
        pattern: Pattern::Italic,
        range: start..content_end + 1,
        content: content_start..content_end,
        href: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranges(line: &str, pattern: Pattern) -> Vec<Range<usize>> {
        scan(line, pattern).into_iter().map(|c| c.range).collect()
    }

    #[test]
    fn test_priority_order() {
        assert!(Pattern::Link < Pattern::Bold);
        assert!(Pattern::Bold < Pattern::Code);
        assert!(Pattern::Code < Pattern::Italic);
        let mut sorted = Pattern::PRIORITY;
        sorted.sort();
        assert_eq!(sorted, Pattern::PRIORITY);
    }

    #[test]
    fn test_link_scan() {
        let found = scan("see [docs](http://a.b) and [x](y)", Pattern::Link);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].range, 4..22);
        assert_eq!(found[0].content, 5..9);
        assert_eq!(found[0].href, Some(11..21));
    }

    #[test]
    fn test_link_requires_adjacent_paren() {
        assert!(ranges("[a] (b)", Pattern::Link).is_empty());
        assert!(ranges("[a](b", Pattern::Link).is_empty());
    }

    #[test]
    fn test_empty_link_parts() {
        let found = scan("[](u)[l]()", Pattern::Link);
        assert_eq!(found.len(), 2);
        assert!(found[0].content.is_empty());
        assert_eq!(found[1].href, Some(9..9));
    }

    #[test]
    fn test_bold_scan() {
        assert_eq!(ranges("**a** b **c**", Pattern::Bold), vec![0..5, 8..13]);
        assert!(ranges("**unterminated", Pattern::Bold).is_empty());
    }

    #[test]
    fn test_bold_rejects_star_runs() {
        assert!(ranges("***a***", Pattern::Bold).is_empty());
        assert!(ranges("a***b", Pattern::Bold).is_empty());
    }

    #[test]
    fn test_empty_bold() {
        assert_eq!(ranges("****", Pattern::Bold), vec![0..4]);
    }

    #[test]
    fn test_code_scan() {
        assert_eq!(ranges("`a` and `` and `b", Pattern::Code), vec![0..3, 8..10]);
    }

    #[test]
    fn test_italic_never_touches_bold_delimiters() {
        assert!(ranges("**bold**", Pattern::Italic).is_empty());
        assert_eq!(ranges("**bold** and *it*", Pattern::Italic), vec![13..17]);
    }

    #[test]
    fn test_italic_retries_after_failed_start() {
        // "**" cannot close, so the match runs on to the next lone star.
        assert_eq!(ranges("*a** *b*", Pattern::Italic), vec![0..6]);
        assert_eq!(ranges("*a** b*", Pattern::Italic), vec![0..7]);
        assert!(ranges("*a**", Pattern::Italic).is_empty());
    }

    #[test]
    fn test_multibyte_content() {
        let line = "*héllo* `ü`";
        assert_eq!(ranges(line, Pattern::Italic), vec![0..8]);
        assert_eq!(ranges(line, Pattern::Code), vec![9..13]);
    }
}
