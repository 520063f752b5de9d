use crate::{DocumentMetadata, DocumentNode, ParsedDocument, QueryType};
use graphql_syntax::ParseError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A document announced at build time from text alone.
///
/// The structural node always has empty `definitions`; the real parse is
/// deferred to [`PendingDocument::parse`] (or to the runtime parse performed by
/// generated code). Raw text, rendering and the query type hint live in
/// [`DocumentMetadata`], which equality and serialization ignore.
#[derive(Debug, Clone)]
pub struct PendingDocument {
    node: DocumentNode,
    metadata: DocumentMetadata,
}

/// Materialize a pending document from operation text.
///
/// The text is trimmed. When `query_type` is `None` it is detected from the
/// leading keyword of the text.
#[must_use]
pub fn materialize(text: &str, query_type: Option<QueryType>) -> PendingDocument {
    let raw_text = text.trim();
    let query_type = query_type.unwrap_or_else(|| QueryType::detect(raw_text));

    tracing::trace!(len = raw_text.len(), %query_type, "Materialized pending document");

    PendingDocument {
        node: DocumentNode::placeholder(),
        metadata: DocumentMetadata::new(raw_text, query_type),
    }
}

/// Join template literal parts with interpolated values.
///
/// `strings` has one more element than `values`, as in a tagged template
/// call: `strings[0] + values[0] + strings[1] + ...`. Extra parts on either
/// side are appended in order.
#[must_use]
pub fn interpolate(strings: &[&str], values: &[&dyn fmt::Display]) -> String {
    let mut text = String::new();
    let mut values = values.iter();

    for (i, part) in strings.iter().enumerate() {
        if i > 0 {
            if let Some(value) = values.next() {
                text.push_str(&value.to_string());
            }
        }
        text.push_str(part);
    }
    for value in values {
        text.push_str(&value.to_string());
    }

    text
}

impl PendingDocument {
    /// Materialize from operation text, detecting the query type.
    #[must_use]
    pub fn new(text: &str) -> Self {
        materialize(text, None)
    }

    /// Materialize from template literal parts.
    #[must_use]
    pub fn from_template(strings: &[&str], values: &[&dyn fmt::Display]) -> Self {
        Self::new(&interpolate(strings, values))
    }

    /// The structural node.
    #[must_use]
    pub const fn node(&self) -> &DocumentNode {
        &self.node
    }

    #[must_use]
    pub const fn metadata(&self) -> &DocumentMetadata {
        &self.metadata
    }

    /// Whether a metadata entry with this key is attached.
    #[must_use]
    pub fn has_metadata(&self, key: &str) -> bool {
        self.metadata.has(key)
    }

    /// The trimmed raw text this document was built from.
    #[must_use]
    pub fn render(&self) -> &str {
        self.metadata.raw_text()
    }

    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        self.metadata.query_type()
    }

    /// Perform the deferred parse.
    pub fn parse(&self) -> Result<ParsedDocument, ParseError> {
        ParsedDocument::parse(self.render())
    }
}

impl PartialEq for PendingDocument {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for PendingDocument {}

impl Serialize for PendingDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.node.serialize(serializer)
    }
}

impl fmt::Display for PendingDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DefinitionKind, NodeKind};
    use proptest::prelude::*;

    #[test]
    fn test_materialize_placeholder() {
        let doc = PendingDocument::new("\n  query GetUser { user { id } }\n");
        assert_eq!(doc.node().kind, NodeKind::Document);
        assert!(doc.node().definitions.is_empty());
        assert_eq!(doc.render(), "query GetUser { user { id } }");
        assert_eq!(doc.to_string(), "query GetUser { user { id } }");
    }

    #[test]
    fn test_materialize_detects_query_type() {
        assert_eq!(
            PendingDocument::new("mutation M { a }").query_type(),
            QueryType::Mutation
        );
        assert_eq!(
            materialize("mutation M { a }", Some(QueryType::Fragment)).query_type(),
            QueryType::Fragment
        );
    }

    #[test]
    fn test_render_is_stable() {
        let doc = PendingDocument::new("query Q { a }");
        let first = doc.render().to_string();
        assert_eq!(doc.render(), first);
        assert_eq!(doc.render(), first);
    }

    #[test]
    fn test_metadata_hidden_from_structure() {
        let doc = PendingDocument::new("query Q { a }");

        assert!(doc.has_metadata("rawText"));
        assert!(doc.has_metadata("render"));
        assert!(doc.has_metadata("queryType"));
        assert!(!doc.has_metadata("definitions"));

        let value = serde_json::to_value(&doc).unwrap();
        let mut keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        keys.sort_unstable();
        assert_eq!(keys, ["definitions", "kind"]);
    }

    #[test]
    fn test_equality_ignores_metadata() {
        let a = PendingDocument::new("query A { a }");
        let b = PendingDocument::new("mutation B { b }");
        assert_eq!(a, b);
        assert_ne!(a.render(), b.render());
    }

    #[test]
    fn test_empty_text() {
        let doc = PendingDocument::new("");
        assert_eq!(doc.render(), "");
        assert_eq!(doc.query_type(), QueryType::Query);
    }

    #[test]
    fn test_interpolate() {
        let fields = "id name email";
        let text = interpolate(&["query { user { ", " } }"], &[&fields]);
        assert_eq!(text, "query { user { id name email } }");

        let doc = PendingDocument::from_template(&["query($first: Int = ", ") { a }"], &[&10]);
        assert_eq!(doc.render(), "query($first: Int = 10) { a }");
    }

    #[test]
    fn test_interpolate_mismatched_lengths() {
        assert_eq!(interpolate(&["a"], &[&1, &2]), "a12");
        assert_eq!(interpolate(&["a", "b", "c"], &[&1]), "a1bc");
        assert_eq!(interpolate(&[], &[]), "");
    }

    #[test]
    fn test_parse_populates_definitions() {
        let doc = PendingDocument::new("query Q { a }\nfragment F on T { b }");
        let parsed = doc.parse().unwrap();

        assert_eq!(parsed.node().definitions.len(), 2);
        assert_eq!(
            parsed.node().definitions[0].kind,
            DefinitionKind::OperationDefinition
        );
        assert_eq!(parsed.node().definitions[0].name.as_deref(), Some("Q"));
        assert_eq!(
            parsed.node().definitions[1].kind,
            DefinitionKind::FragmentDefinition
        );
        // The pending document itself is unchanged
        assert!(doc.node().definitions.is_empty());
    }

    #[test]
    fn test_parse_rejects_malformed_text() {
        assert!(PendingDocument::new("query Q { a").parse().is_err());
    }

    proptest! {
        #[test]
        fn definitions_always_empty(text in "\\PC{0,64}") {
            let doc = PendingDocument::new(&text);
            prop_assert!(doc.node().definitions.is_empty());
            prop_assert_eq!(doc.render(), text.trim());
        }
    }
}
