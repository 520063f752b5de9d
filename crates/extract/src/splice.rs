//! Splice context for extracted GraphQL.

use graphql_types::{OffsetRange, Range};

/// Where an extracted operation lives in its containing text.
///
/// Contains both byte offsets (for splicing replacement text back in) and a
/// line/column range (for display to users).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpliceContext {
    /// Byte range of the whole match, including the tag and both delimiters.
    /// Equal to `interior` for whole-file sources.
    pub literal: OffsetRange,
    /// Byte range of the text between the delimiters
    pub interior: OffsetRange,
    /// Line/column range of `interior`
    pub range: Range,
}

impl SpliceContext {
    /// Create a new splice context.
    #[must_use]
    pub const fn new(literal: OffsetRange, interior: OffsetRange, range: Range) -> Self {
        Self {
            literal,
            interior,
            range,
        }
    }

    /// Returns the text surrounding the interior within `source`, as a
    /// `(before, after)` pair.
    #[must_use]
    pub fn surrounding<'a>(&self, source: &'a str) -> (&'a str, &'a str) {
        let before = source.get(..self.interior.start).unwrap_or_default();
        let after = source.get(self.interior.end..).unwrap_or_default();
        (before, after)
    }
}
