use serde::Serialize;

/// The kind of operation a document starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryType {
    #[default]
    Query,
    Mutation,
    Subscription,
    Fragment,
}

impl QueryType {
    const KEYWORDS: [Self; 4] = [
        Self::Query,
        Self::Mutation,
        Self::Subscription,
        Self::Fragment,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Query => "query",
            Self::Mutation => "mutation",
            Self::Subscription => "subscription",
            Self::Fragment => "fragment",
        }
    }

    /// Detect the query type from the leading keyword of `text`.
    ///
    /// Matching is case-insensitive and only looks at the start of the text
    /// (after whitespace). Anything else, including shorthand `{ ... }`
    /// queries, is [`QueryType::Query`].
    #[must_use]
    pub fn detect(text: &str) -> Self {
        let text = text.trim_start();
        Self::KEYWORDS
            .into_iter()
            .find(|kind| {
                let keyword = kind.as_str();
                text.get(..keyword.len())
                    .is_some_and(|prefix| prefix.eq_ignore_ascii_case(keyword))
            })
            .unwrap_or_default()
    }
}

impl std::fmt::Display for QueryType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_keywords() {
        assert_eq!(QueryType::detect("query Q { a }"), QueryType::Query);
        assert_eq!(QueryType::detect("  mutation M { a }"), QueryType::Mutation);
        assert_eq!(
            QueryType::detect("\nsubscription S { a }"),
            QueryType::Subscription
        );
        assert_eq!(QueryType::detect("fragment F on T { a }"), QueryType::Fragment);
    }

    #[test]
    fn test_detect_is_case_insensitive() {
        assert_eq!(QueryType::detect("MUTATION M { a }"), QueryType::Mutation);
        assert_eq!(QueryType::detect("Fragment F on T { a }"), QueryType::Fragment);
    }

    #[test]
    fn test_detect_defaults_to_query() {
        assert_eq!(QueryType::detect("{ a }"), QueryType::Query);
        assert_eq!(QueryType::detect(""), QueryType::Query);
        assert_eq!(QueryType::detect("type User { id: ID }"), QueryType::Query);
    }

    #[test]
    fn test_display() {
        assert_eq!(QueryType::Subscription.to_string(), "subscription");
    }
}
