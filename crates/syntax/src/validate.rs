use graphql_types::LineIndex;

/// A syntax error reported by the GraphQL parser, with position information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// Error message from the parser
    pub message: String,
    /// Byte offset where the error occurred
    pub offset: usize,
    /// Line of the error (1-based)
    pub line: usize,
    /// Column of the error (1-based, in bytes)
    pub column: usize,
}

impl ParseError {
    fn at(message: impl Into<String>, offset: usize, index: &LineIndex) -> Self {
        let (line, column) = index.line_col(offset);
        Self {
            message: message.into(),
            offset,
            line: line + 1,
            column: column + 1,
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (line {}, column {})",
            self.message, self.line, self.column
        )
    }
}

impl std::error::Error for ParseError {}

/// Check that `text` is a syntactically valid GraphQL document.
///
/// Returns the first syntax error. The parser rejects a document with no
/// definitions (empty, or only comments) as an unexpected end of input.
pub fn validate(text: &str) -> Result<(), ParseError> {
    match parse_errors(text).into_iter().next() {
        Some(error) => {
            tracing::debug!(%error, "GraphQL validation failed");
            Err(error)
        }
        None => Ok(()),
    }
}

/// Collect every syntax error in `text`, in source order.
#[must_use]
pub fn parse_errors(text: &str) -> Vec<ParseError> {
    let tree = apollo_parser::Parser::new(text).parse();
    let index = LineIndex::new(text);

    let mut errors: Vec<ParseError> = tree
        .errors()
        .map(|e| ParseError::at(e.message(), e.index(), &index))
        .collect();
    errors.sort_by_key(|e| e.offset);
    errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize;
    use graphql_config::NormalizationConfig;

    #[test]
    fn test_valid_query() {
        assert!(validate("query Q { a }").is_ok());
        assert!(validate("query GetUser($id: ID!) { user(id: $id) { id name email } }").is_ok());
    }

    #[test]
    fn test_valid_fragment_and_mutation() {
        let text = "fragment F on User { id }\nmutation M { createUser { ...F } }";
        assert!(validate(text).is_ok());
    }

    #[test]
    fn test_unclosed_selection_set() {
        let error = validate("query Q { a").unwrap_err();
        assert!(!error.message.is_empty());
        assert_eq!(error.line, 1);
    }

    #[test]
    fn test_error_position_on_later_line() {
        let error = validate("query Q {\n  a\n  b(\n}").unwrap_err();
        assert!(error.line > 1, "expected error past line 1, got {error}");
    }

    #[test]
    fn test_empty_document_is_error() {
        let error = validate("").unwrap_err();
        assert!(error.message.starts_with("Unexpected <EOF>"), "{error}");
        assert_eq!((error.line, error.column), (1, 1));
    }

    #[test]
    fn test_comment_only_document_is_error() {
        let error = validate("# nothing here\n").unwrap_err();
        assert!(error.message.starts_with("Unexpected <EOF>"), "{error}");
    }

    #[test]
    fn test_display_includes_position() {
        let error = validate("").unwrap_err();
        assert_eq!(error.to_string(), "Unexpected <EOF>. (line 1, column 1)");
    }

    #[test]
    fn test_normalized_valid_operation_stays_valid() {
        let text = "\n  # Fetch a user\n  query GetUser {\n    user { id } # id only\n  }\n";
        let normalized = normalize(text, &NormalizationConfig::default());
        assert!(validate(&normalized).is_ok());
    }
}
