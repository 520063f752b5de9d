use crate::QueryType;
use std::sync::Arc;

/// Raw-text metadata carried alongside a document's structural node.
///
/// Kept out of [`DocumentNode`](crate::DocumentNode) so that structural
/// comparison and serialization never see it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMetadata {
    raw_text: Arc<str>,
    query_type: QueryType,
}

impl DocumentMetadata {
    /// Metadata key for the raw operation text.
    pub const RAW_TEXT: &'static str = "rawText";
    /// Metadata key for the rendering.
    pub const RENDER: &'static str = "render";
    /// Metadata key for the query type hint.
    pub const QUERY_TYPE: &'static str = "queryType";

    pub(crate) fn new(raw_text: &str, query_type: QueryType) -> Self {
        Self {
            raw_text: Arc::from(raw_text),
            query_type,
        }
    }

    /// The trimmed operation text the document was built from.
    #[must_use]
    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    #[must_use]
    pub const fn query_type(&self) -> QueryType {
        self.query_type
    }

    /// Whether a metadata entry with this key is attached.
    #[must_use]
    pub fn has(&self, key: &str) -> bool {
        matches!(key, Self::RAW_TEXT | Self::RENDER | Self::QUERY_TYPE)
    }
}
