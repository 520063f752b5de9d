use crate::pending::interpolate;
use crate::PendingDocument;
use graphql_config::NormalizationConfig;
use std::fmt;

/// The plain tag: materialize a pending document without normalization
/// (apart from trimming).
#[must_use]
pub fn gql(text: &str) -> PendingDocument {
    PendingDocument::new(text)
}

/// A configured tag: normalizes operation text before materializing it.
///
/// No validation happens here; tagged literals are only checked when the
/// document is parsed.
#[derive(Debug, Clone, Default)]
pub struct GraphQLTag {
    config: NormalizationConfig,
}

impl GraphQLTag {
    #[must_use]
    pub const fn new(config: NormalizationConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &NormalizationConfig {
        &self.config
    }

    /// Normalize `text` and materialize it.
    #[must_use]
    pub fn document(&self, text: &str) -> PendingDocument {
        PendingDocument::new(&graphql_syntax::normalize(text, &self.config))
    }

    /// Join template parts, normalize and materialize.
    #[must_use]
    pub fn template(&self, strings: &[&str], values: &[&dyn fmt::Display]) -> PendingDocument {
        self.document(&interpolate(strings, values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_config::Transform;
    use graphql_syntax::strip_comments;
    use proptest::prelude::*;

    #[test]
    fn test_plain_tag_keeps_comments() {
        let doc = gql("\n  # This is a comment\n  query GetUser { user { id } }\n");
        assert!(doc.render().starts_with("# This is a comment"));
        assert!(doc.node().definitions.is_empty());
    }

    #[test]
    fn test_configured_tag_strips_comments() {
        let tag = GraphQLTag::default();
        let doc = tag.document("\n  # This is a comment\n  query GetUser { user { id } }\n");
        assert_eq!(doc.render(), "query GetUser { user { id } }");
    }

    #[test]
    fn test_configured_tag_without_stripping() {
        let tag = GraphQLTag::new(NormalizationConfig::default().with_strip_comments(false));
        let doc = tag.document("# keep\nquery Q { a }");
        assert_eq!(doc.render(), "# keep\nquery Q { a }");
    }

    #[test]
    fn test_configured_tag_uppercase_transform() {
        let tag = GraphQLTag::new(
            NormalizationConfig::default().with_transform(Transform::new(str::to_uppercase)),
        );
        let doc = tag.document("query getUser { user { id } }");
        assert_eq!(doc.render(), "QUERY GETUSER { USER { ID } }");
    }

    #[test]
    fn test_configured_tag_template() {
        let tag = GraphQLTag::new(
            NormalizationConfig::default()
                .with_transform(Transform::new(graphql_syntax::collapse_whitespace)),
        );
        let doc = tag.template(
            &["\n  # fields\n  query GetUser {\n    user { ", " }\n  }\n"],
            &[&"id name"],
        );
        assert_eq!(doc.render(), "query GetUser { user { id name } }");
    }

    proptest! {
        #[test]
        fn render_matches_stripped_trimmed_text(text in "[ a-zA-Z{}()#$!:\\n]{0,80}") {
            let doc = GraphQLTag::default().document(&text);
            let stripped = strip_comments(&text);
            prop_assert_eq!(doc.render(), stripped.trim());
        }
    }
}
