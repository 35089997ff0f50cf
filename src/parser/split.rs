//! Delimiter-preserving split
//!
//! `str::split` throws the delimiter away. The expression grammar needs it
//! kept, both to know which keyword joined two chunks and to report byte
//! offsets back to the user, so every match becomes its own span.

use regex::Regex;

/// One piece of a split string, in input order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Span<'t> {
    /// Text between matches (possibly empty)
    Unmatched(&'t str),
    /// Text matched by the pattern
    Captured(&'t str),
}

impl<'t> Span<'t> {
    pub fn as_str(&self) -> &'t str {
        match self {
            Span::Unmatched(s) | Span::Captured(s) => s,
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, Span::Captured(_))
    }
}

/// Split `text` on every non-overlapping match of `pattern`, keeping matches.
///
/// The result always alternates `Unmatched, Captured, Unmatched, ...` and
/// starts and ends with an `Unmatched` span, so `n` matches give `2n + 1`
/// spans. Runs between adjacent matches (or before a leading / after a
/// trailing match) come back as empty `Unmatched` spans.
pub fn split<'t>(pattern: &Regex, text: &'t str) -> Vec<Span<'t>> {
    let mut spans = Vec::new();
    let mut cursor = 0;

    for m in pattern.find_iter(text) {
        // empty matches would loop forever in a consumer expecting progress
        if m.start() == m.end() {
            continue;
        }
        spans.push(Span::Unmatched(&text[cursor..m.start()]));
        spans.push(Span::Captured(m.as_str()));
        cursor = m.end();
    }
    spans.push(Span::Unmatched(&text[cursor..]));

    spans
}

/// Pair each span with its starting byte offset in the original text.
pub fn with_offsets<'a, 't>(
    spans: &'a [Span<'t>],
    base: usize,
) -> impl Iterator<Item = (usize, Span<'t>)> + 'a {
    spans.iter().scan(base, |offset, span| {
        let start = *offset;
        *offset += span.as_str().len();
        Some((start, *span))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn and() -> Regex {
        Regex::new(r"\bAND\b").unwrap()
    }

    fn concat(spans: &[Span]) -> String {
        spans.iter().map(Span::as_str).collect()
    }

    #[test]
    fn test_no_match_is_single_span() {
        let spans = split(&and(), "assembly_span > 10");
        assert_eq!(spans, vec![Span::Unmatched("assembly_span > 10")]);
    }

    #[test]
    fn test_match_is_kept() {
        let spans = split(&and(), "a=1 AND b=2");
        assert_eq!(
            spans,
            vec![
                Span::Unmatched("a=1 "),
                Span::Captured("AND"),
                Span::Unmatched(" b=2"),
            ]
        );
    }

    #[test]
    fn test_adjacent_and_trailing_matches_keep_empty_spans() {
        let ops = Regex::new(r"<=|<|=").unwrap();
        let spans = split(&ops, "<=<");
        assert_eq!(
            spans,
            vec![
                Span::Unmatched(""),
                Span::Captured("<="),
                Span::Unmatched(""),
                Span::Captured("<"),
                Span::Unmatched(""),
            ]
        );
    }

    #[test]
    fn test_word_boundary() {
        // BANDIT is not the AND keyword
        let spans = split(&and(), "BANDIT");
        assert_eq!(spans.len(), 1);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(split(&and(), ""), vec![Span::Unmatched("")]);
    }

    #[test]
    fn test_offsets() {
        let spans = split(&and(), "a=1 AND b=2");
        let offsets: Vec<usize> = with_offsets(&spans, 10).map(|(o, _)| o).collect();
        assert_eq!(offsets, vec![10, 14, 17]);
    }

    proptest! {
        #[test]
        fn prop_round_trip(text in "[a-zA-Z0-9_ <>=!(),.-]{0,64}") {
            for pattern in [r"\bAND\b", r"\bOR\b", r"!=|<=|>=|==|=|<|>", r",", r"\s+"] {
                let re = Regex::new(pattern).unwrap();
                let spans = split(&re, &text);
                prop_assert_eq!(concat(&spans), text.clone());
            }
        }

        #[test]
        fn prop_alternates(text in "[a-c, ]{0,32}") {
            let re = Regex::new(",").unwrap();
            let spans = split(&re, &text);
            prop_assert_eq!(spans.len() % 2, 1);
            for (i, span) in spans.iter().enumerate() {
                prop_assert_eq!(span.is_captured(), i % 2 == 1);
            }
        }
    }
}
