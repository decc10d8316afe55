//! Text statistics for the status bar
//!
//! Pure derivations from the document text and cursor: line count, the
//! cursor's offset within its line and a word count.

// ─────────────────────────────────────────────────────────────────────────────
// Helper Functions
// ─────────────────────────────────────────────────────────────────────────────

/// Count the number of lines in the given text.
///
/// Returns at least 1 for empty text (representing a single empty line).
pub fn count_lines(text: &str) -> usize {
    text.chars().filter(|&c| c == '\n').count() + 1
}

/// Convert a character index to (line, column) position.
///
/// Both line and column are 0-indexed. Indices past the end clamp to the end.
pub fn char_index_to_line_col(text: &str, char_index: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;

    for (i, ch) in text.chars().enumerate() {
        if i >= char_index {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }

    (line, col)
}

// ─────────────────────────────────────────────────────────────────────────────
// TextStats
// ─────────────────────────────────────────────────────────────────────────────

/// Status bar statistics for the document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    /// Number of lines (including empty lines)
    pub lines: usize,
    /// Characters between the start of the cursor's line and the cursor
    pub cursor_column: usize,
    /// Number of words (sequences of non-whitespace characters)
    pub words: usize,
}

impl TextStats {
    /// Calculate statistics for `text` with the cursor at character `cursor`.
    pub fn from_text(text: &str, cursor: usize) -> Self {
        let (_, col) = char_index_to_line_col(text, cursor);
        Self {
            lines: count_lines(text),
            cursor_column: col,
            words: text.split_whitespace().count(),
        }
    }

    /// Format the statistics for display in the status bar.
    ///
    /// Returns a compact string like "Lines: 25 Chars: 12 | 150 words"
    pub fn format_compact(&self) -> String {
        format!(
            "Lines: {} Chars: {} | {} words",
            self.lines, self.cursor_column, self.words
        )
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_count_lines() {
        assert_eq!(count_lines(""), 1);
        assert_eq!(count_lines("Hello, World!"), 1);
        assert_eq!(count_lines("Line 1\nLine 2\nLine 3"), 3);
        assert_eq!(count_lines("Line 1\n"), 2);
        assert_eq!(count_lines("\n\n\n"), 4);
    }

    #[test]
    fn test_char_index_to_line_col_multiline() {
        let text = "Hello\nWorld\n!";
        assert_eq!(char_index_to_line_col(text, 0), (0, 0)); // 'H'
        assert_eq!(char_index_to_line_col(text, 5), (0, 5)); // '\n'
        assert_eq!(char_index_to_line_col(text, 6), (1, 0)); // 'W'
        assert_eq!(char_index_to_line_col(text, 12), (2, 0)); // '!'
        assert_eq!(char_index_to_line_col(text, 99), (2, 1));
    }

    #[test]
    fn test_stats_empty_text() {
        let stats = TextStats::from_text("", 0);
        assert_eq!(stats.lines, 1);
        assert_eq!(stats.cursor_column, 0);
        assert_eq!(stats.words, 0);
    }

    #[test]
    fn test_stats_cursor_at_end() {
        let text = "first line\nsecond";
        let stats = TextStats::from_text(text, text.chars().count());
        assert_eq!(stats.lines, 2);
        assert_eq!(stats.cursor_column, 6);
        assert_eq!(stats.words, 3);
    }

    #[test]
    fn test_stats_unicode() {
        let stats = TextStats::from_text("Привет мир! 你好世界", 6);
        assert_eq!(stats.words, 3);
        assert_eq!(stats.cursor_column, 6);
    }

    #[test]
    fn test_stats_format_compact() {
        let stats = TextStats {
            lines: 25,
            cursor_column: 12,
            words: 150,
        };
        assert_eq!(stats.format_compact(), "Lines: 25 Chars: 12 | 150 words");
    }

    #[test]
    fn test_every_stat_is_displayed() {
        // Column 3 on the second of three lines, five words
        let text = "one two
three four
five";
        let stats = TextStats::from_text(text, 11);
        assert_eq!(
            stats,
            TextStats {
                lines: 3,
                cursor_column: 3,
                words: 5,
            }
        );
        assert_eq!(stats.format_compact(), "Lines: 3 Chars: 3 | 5 words");
    }
}
