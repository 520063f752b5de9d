//! Text edit types for splicing replacement text into host files.

use crate::OffsetRange;

/// A text edit representing a change to apply to source code.
///
/// Text edits use byte offsets into the original text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    /// Byte offset range to replace
    pub offset_range: OffsetRange,
    /// The text to replace the range with (empty string means deletion)
    pub new_text: String,
}

impl TextEdit {
    /// Create a new text edit that replaces a range with new text.
    #[must_use]
    pub fn new(start: usize, end: usize, new_text: impl Into<String>) -> Self {
        Self {
            offset_range: OffsetRange::new(start, end),
            new_text: new_text.into(),
        }
    }

    /// Create a text edit replacing an existing [`OffsetRange`].
    #[must_use]
    pub fn replace(offset_range: OffsetRange, new_text: impl Into<String>) -> Self {
        Self {
            offset_range,
            new_text: new_text.into(),
        }
    }

    /// Returns `true` if applying this edit to `text` leaves it unchanged.
    #[must_use]
    pub fn is_noop(&self, text: &str) -> bool {
        self.offset_range.slice(text) == Some(self.new_text.as_str())
    }
}

/// Apply a set of non-overlapping edits to `text`.
///
/// Edits may be given in any order. They are applied back to front so earlier
/// offsets stay valid. Edits whose range falls outside `text` or off a char
/// boundary are skipped.
#[must_use]
pub fn apply_edits(text: &str, edits: &[TextEdit]) -> String {
    let mut sorted: Vec<&TextEdit> = edits.iter().collect();
    sorted.sort_by_key(|edit| std::cmp::Reverse(edit.offset_range.start));

    let mut result = text.to_string();
    for edit in sorted {
        let OffsetRange { start, end } = edit.offset_range;
        if start > end || end > result.len() {
            continue;
        }
        if !result.is_char_boundary(start) || !result.is_char_boundary(end) {
            continue;
        }
        result.replace_range(start..end, &edit.new_text);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_edit_creation() {
        let edit = TextEdit::new(10, 20, "replacement");
        assert_eq!(edit.offset_range.start, 10);
        assert_eq!(edit.offset_range.end, 20);
        assert_eq!(edit.new_text, "replacement");
    }

    #[test]
    fn test_text_edit_is_noop() {
        let text = "gql`query { a }`";
        assert!(TextEdit::new(4, 15, "query { a }").is_noop(text));
        assert!(!TextEdit::new(4, 15, "query{a}").is_noop(text));
    }

    #[test]
    fn test_apply_edits_in_any_order() {
        let text = "a = gql`x  y`; b = gql`z`;";
        let edits = vec![
            TextEdit::new(23, 24, "w"),
            TextEdit::new(8, 12, "x y"),
        ];
        assert_eq!(apply_edits(text, &edits), "a = gql`x y`; b = gql`w`;");
    }

    #[test]
    fn test_apply_edits_skips_out_of_bounds() {
        let text = "short";
        let edits = vec![TextEdit::new(3, 100, "x")];
        assert_eq!(apply_edits(text, &edits), "short");
    }
}
