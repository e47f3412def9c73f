//! Approximate text metrics for wrapped labels
//!
//! Widths come from a fixed average-glyph-width heuristic rather than real
//! font metrics, so a label's measured box is only an estimate of its
//! rendered size.

/// Average glyph width as a fraction of the font size
pub const DEFAULT_CHAR_WIDTH_FACTOR: f64 = 0.6;

/// Characters per line used when no wrap width is configured
pub const DEFAULT_MAX_CHARS_PER_LINE: usize = 20;

/// Wrapped lines of a label and the estimated size of the block
#[derive(Debug, Clone, PartialEq)]
pub struct TextMeasure {
    pub lines: Vec<String>,
    pub width: f64,
    pub height: f64,
}

/// Wrap `label` at `max_chars_per_line` characters and estimate its size
///
/// `height` is always `font_size * lines.len()`.
pub fn wrap_and_measure(label: &str, font_size: f64, max_chars_per_line: usize) -> TextMeasure {
    measure_with_factor(label, font_size, max_chars_per_line, DEFAULT_CHAR_WIDTH_FACTOR)
}

/// Same as [`wrap_and_measure`] with an explicit glyph width factor
pub fn measure_with_factor(
    label: &str,
    font_size: f64,
    max_chars_per_line: usize,
    char_width_factor: f64,
) -> TextMeasure {
    measure_lines(wrap(label, max_chars_per_line), font_size, char_width_factor)
}

/// Estimate the size of already-split lines
pub fn measure_lines(lines: Vec<String>, font_size: f64, char_width_factor: f64) -> TextMeasure {
    let longest = lines
        .iter()
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    TextMeasure {
        width: longest as f64 * font_size * char_width_factor,
        height: font_size * lines.len() as f64,
        lines,
    }
}

/// Greedy word wrap
///
/// Tabs expand to the next multiple of eight columns and other ASCII
/// whitespace becomes a space. Lines break at space runs, after a hyphen
/// joining two words, and before a run of dashes between words. Whitespace
/// is dropped at the end of every line and at the start of every line but
/// the first; runs inside a line are kept. A chunk longer than a whole line
/// fills the rest of the current line, preferring to split after a hyphen.
/// Always returns at least one (possibly empty) line.
pub fn wrap(text: &str, max_chars_per_line: usize) -> Vec<String> {
    let width = max_chars_per_line.max(1);

    // Pending chunks, next one last
    let mut chunks = split_chunks(&normalize_whitespace(text));
    chunks.reverse();

    let mut lines: Vec<String> = Vec::new();
    while !chunks.is_empty() {
        let mut line: Vec<Vec<char>> = Vec::new();
        let mut line_len = 0usize;

        if !lines.is_empty() && chunks.last().is_some_and(|c| is_blank(c)) {
            chunks.pop();
        }

        while let Some(chunk) = chunks.last() {
            if line_len + chunk.len() > width {
                break;
            }
            line_len += chunk.len();
            line.extend(chunks.pop());
        }

        if chunks.last().is_some_and(|c| c.len() > width) {
            break_long_chunk(&mut chunks, &mut line, width - line_len);
        }

        // Only the last piece is dropped, so an empty split leaves the
        // space before it in place
        if line.last().is_some_and(|c| is_blank(c)) {
            line.pop();
        }
        if !line.is_empty() {
            lines.push(line.concat().into_iter().collect());
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn is_blank(chunk: &[char]) -> bool {
    chunk.iter().all(|c| c.is_whitespace())
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn is_letter(c: Option<char>) -> bool {
    c.is_some_and(|c| is_word_char(c) && !c.is_numeric())
}

/// Characters that may precede a dash run used as a separator
fn is_dash_lead(c: char) -> bool {
    is_word_char(c) || matches!(c, '!' | '"' | '\'' | '&' | '.' | ',' | '?')
}

fn normalize_whitespace(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len());
    let mut column = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                let pad = 8 - column % 8;
                out.extend(std::iter::repeat(' ').take(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(' ');
                column = 0;
            }
            '\x0b' | '\x0c' => {
                out.push(' ');
                column += 1;
            }
            c => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

/// Split normalized text into space runs, words and dash separators
fn split_chunks(chars: &[char]) -> Vec<Vec<char>> {
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < chars.len() {
        let end = chunk_end(chars, start);
        chunks.push(chars[start..end].to_vec());
        start = end;
    }
    chunks
}

/// Length of a run of two or more dashes at `i` that runs into a word
fn dash_separator(chars: &[char], i: usize) -> Option<usize> {
    let dashes = chars[i..].iter().take_while(|c| **c == '-').count();
    let next = chars.get(i + dashes).copied();
    (dashes >= 2 && next.is_some_and(is_word_char)).then_some(dashes)
}

fn chunk_end(chars: &[char], start: usize) -> usize {
    let at = |i: usize| chars.get(i).copied();

    if chars[start] == ' ' {
        return start + chars[start..].iter().take_while(|c| **c == ' ').count();
    }
    if start > 0 && is_dash_lead(chars[start - 1]) {
        if let Some(dashes) = dash_separator(chars, start) {
            return start + dashes;
        }
    }

    let mut end = start + 1;
    loop {
        if at(end) == Some('-') && is_hyphen_break(chars, end) {
            return end + 1;
        }
        if end == chars.len() || chars[end] == ' ' {
            return end;
        }
        if is_dash_lead(chars[end - 1]) && dash_separator(chars, end).is_some() {
            return end;
        }
        end += 1;
    }
}

/// The hyphen at `i` follows two letters (or letter, hyphen, letter) and
/// is followed by two letters, optionally hyphen-joined
fn is_hyphen_break(chars: &[char], i: usize) -> bool {
    let at = |offset: isize| {
        i.checked_add_signed(offset)
            .and_then(|j| chars.get(j).copied())
    };

    let before = is_letter(at(-1))
        && (is_letter(at(-2)) || (at(-2) == Some('-') && is_letter(at(-3))));
    let after =
        is_letter(at(1)) && (is_letter(at(2)) || (at(2) == Some('-') && is_letter(at(3))));
    before && after
}

/// Move as much of an oversized chunk as fits onto the current line
fn break_long_chunk(chunks: &mut [Vec<char>], line: &mut Vec<Vec<char>>, space_left: usize) {
    let Some(chunk) = chunks.last_mut() else {
        return;
    };
    let mut end = space_left;
    if chunk.len() > space_left {
        if let Some(hyphen) = chunk[..space_left].iter().rposition(|c| *c == '-') {
            if hyphen > 0 && chunk[..hyphen].iter().any(|c| *c != '-') {
                end = hyphen + 1;
            }
        }
    }
    line.push(chunk.drain(..end).collect());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_label_is_not_wrapped() {
        let m = wrap_and_measure("Kitchen", 20.0, 20);
        assert_eq!(m.lines, vec!["Kitchen"]);
        assert_eq!(m.width, 84.0);
        assert_eq!(m.height, 20.0);
    }

    #[test]
    fn wraps_at_word_boundaries() {
        assert_eq!(
            wrap("Master Bedroom With Ensuite", 20),
            vec!["Master Bedroom With", "Ensuite"]
        );
    }

    #[test]
    fn exact_fit_stays_on_one_line() {
        assert_eq!(wrap("abcde fghij klmn opq", 20), vec!["abcde fghij klmn opq"]);
    }

    #[test]
    fn keeps_inner_whitespace_runs() {
        assert_eq!(wrap("a  b", 20), vec!["a  b"]);
        assert_eq!(wrap("Living\nRoom", 20), vec!["Living Room"]);
        assert_eq!(wrap("a\tb", 20), vec!["a       b"]);
    }

    #[test]
    fn drops_whitespace_at_line_edges() {
        assert_eq!(
            wrap("abcde fghij klmn opq   rst", 20),
            vec!["abcde fghij klmn opq", "rst"]
        );
        assert_eq!(wrap("  Hall  ", 20), vec!["  Hall"]);
    }

    #[test]
    fn breaks_after_hyphens() {
        assert_eq!(
            wrap("Reception-Waiting-Area-North", 20),
            vec!["Reception-Waiting-", "Area-North"]
        );
        let m = wrap_and_measure("Reception-Waiting-Area-North", 10.0, 20);
        assert_eq!(m.width, 18.0 * 10.0 * 0.6);
    }

    #[test]
    fn numeric_hyphens_do_not_break() {
        assert_eq!(
            wrap("Rooms 101-105 and 201-205", 12),
            vec!["Rooms", "101-105 and", "201-205"]
        );
    }

    #[test]
    fn dash_runs_separate_words() {
        assert_eq!(
            wrap("Lobby--Atrium and Hall", 10),
            vec!["Lobby--", "Atrium and", "Hall"]
        );
    }

    #[test]
    fn long_chunk_prefers_hyphen_split() {
        assert_eq!(wrap("x-abcdefgh", 6), vec!["x-", "abcdef", "gh"]);
    }

    #[test]
    fn hard_breaks_long_word() {
        assert_eq!(
            wrap("Supercalifragilisticexpialidocious", 20),
            vec!["Supercalifragilistic", "expialidocious"]
        );
    }

    #[test]
    fn long_word_fills_current_line_first() {
        assert_eq!(
            wrap("Hall Supercalifragilisticexpialidocious", 20),
            vec!["Hall Supercalifragil", "isticexpialidocious"]
        );
    }

    #[test]
    fn empty_label_yields_one_empty_line() {
        let m = wrap_and_measure("", 40.0, 20);
        assert_eq!(m.lines, vec![""]);
        assert_eq!(m.width, 0.0);
        assert_eq!(m.height, 40.0);

        assert_eq!(wrap("   ", 20), vec![""]);
    }

    #[test]
    fn width_uses_longest_line() {
        let m = wrap_and_measure("Master Bedroom With Ensuite", 10.0, 20);
        assert_eq!(m.lines.len(), 2);
        assert_eq!(m.width, 19.0 * 10.0 * 0.6);
    }

    #[test]
    fn height_matches_line_count() {
        let labels = [
            "",
            "a",
            "a b c d e f g h i j k l m n o p q r s t u v w x y z",
            "Supercalifragilisticexpialidocious and friends",
        ];
        for label in labels {
            for size in [12.0, 20.0, 40.0] {
                for max in [1, 5, 20] {
                    let m = wrap_and_measure(label, size, max);
                    assert_eq!(m.height, size * m.lines.len() as f64);
                    assert!(m.lines.iter().all(|l| l.chars().count() <= max));
                }
            }
        }
    }

    #[test]
    fn zero_width_is_treated_as_one() {
        assert_eq!(wrap("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn counts_characters_not_bytes() {
        let m = wrap_and_measure("Küche", 10.0, 20);
        assert_eq!(m.width, 5.0 * 10.0 * 0.6);
    }
}
