//! Pure text wrapping utilities and dimensional constants for `TextField`.
//!
//! Stateless helpers with no dependency on `TextField` or `CursorState`.

/// Left + right borders of the field block
pub(super) const HORIZONTAL_OVERHEAD: u16 = 2;
/// Top + bottom borders of the field block
pub(super) const VERTICAL_OVERHEAD: u16 = 2;
/// Offset from area edge to content (border width)
pub(super) const BORDER_OFFSET: u16 = 1;

/// Build textwrap options for a field of the given inner width.
pub(super) fn wrap_options(inner_width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(inner_width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// Inner content width after subtracting the borders. 0 if too narrow.
pub(super) fn inner_width(outer_width: u16) -> u16 {
    outer_width.saturating_sub(HORIZONTAL_OVERHEAD)
}

/// Wrap `text` into display lines, keeping the empty line that a trailing
/// newline starts.
pub(super) fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 || text.is_empty() {
        return vec![String::new()];
    }

    let mut lines: Vec<String> = textwrap::wrap(text, wrap_options(width))
        .into_iter()
        .map(|line| line.into_owned())
        .collect();

    // textwrap doesn't always produce an empty trailing line for a trailing newline
    if text.ends_with('\n') && !lines.last().is_some_and(|l| l.is_empty()) {
        lines.push(String::new());
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Count wrapped lines for the given text (at least 1).
pub(super) fn wrap_line_count(text: &str, width: u16) -> u16 {
    wrap_lines(text, width).len() as u16
}

/// Byte range of each wrapped display line within `text`, one per entry of
/// [`wrap_lines`]. A range runs up to where the next line starts, so the
/// whitespace dropped at a soft break belongs to the line before it.
pub(super) fn wrap_spans(text: &str, width: u16) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut line_start = 0;

    for line in text.split('\n') {
        let line_end = line_start + line.len();
        let mut starts = Vec::new();
        let mut search = 0;
        for segment in wrap_lines(line, width) {
            // Wrapped segments are slices of the line with separators trimmed
            let offset = line
                .get(search..)
                .and_then(|rest| rest.find(segment.as_str()))
                .map_or(search, |i| search + i);
            starts.push(line_start + offset);
            search = offset + segment.len();
        }
        for (i, start) in starts.iter().enumerate() {
            let end = starts.get(i + 1).copied().unwrap_or(line_end);
            spans.push((*start, end));
        }
        line_start = line_end + 1;
    }
    spans
}

/// Byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_line_count_empty_is_one() {
        assert_eq!(wrap_line_count("", 10), 1);
        assert_eq!(wrap_line_count("abc", 0), 1);
    }

    #[test]
    fn test_wrap_breaks_long_words() {
        assert_eq!(wrap_line_count("abcdefghij", 4), 3);
    }

    #[test]
    fn test_trailing_newline_adds_line() {
        let lines = wrap_lines("abc\n", 10);
        assert_eq!(lines.len(), 2);
        assert!(lines[1].is_empty());
    }

    #[test]
    fn test_wrap_spans_cover_soft_and_hard_breaks() {
        assert_eq!(wrap_spans("hello world", 8), vec![(0, 6), (6, 11)]);
        assert_eq!(wrap_spans("ab\ncd", 10), vec![(0, 2), (3, 5)]);
        assert_eq!(wrap_spans("abc\n", 10), vec![(0, 3), (4, 4)]);
        assert_eq!(wrap_spans("", 10), vec![(0, 0)]);
        assert_eq!(wrap_spans("abcdef", 3), vec![(0, 3), (3, 6)]);
    }

    #[test]
    fn test_wrap_spans_match_wrapped_line_count() {
        for text in ["hello world", "aaaa bbbb cc", "x\n\ny z", "文字 文字 文字", "a  b"] {
            for width in 1..8 {
                assert_eq!(
                    wrap_spans(text, width).len(),
                    wrap_lines(text, width).len(),
                    "{text:?} at {width}"
                );
            }
        }
    }

    #[test]
    fn test_char_boundaries_multibyte() {
        let text = "aé文";
        assert_eq!(next_char_boundary(text, 0), 1);
        assert_eq!(next_char_boundary(text, 1), 3);
        assert_eq!(next_char_boundary(text, 3), 6);
        assert_eq!(prev_char_boundary(text, 6), 3);
        assert_eq!(prev_char_boundary(text, 3), 1);
        assert_eq!(prev_char_boundary(text, 0), 0);
    }
}
