//! Source routing types: [`Language`] and [`SourceMode`].

use std::path::Path;

/// Conventional GraphQL file suffixes routed to whole-file processing.
pub const DEFAULT_GRAPHQL_EXTENSIONS: &[&str] = &["graphql", "gql"];

/// Source language of a file (determines the transformation strategy).
///
/// This enum represents the syntactic format of a host file, which determines
/// HOW GraphQL is found in it (the whole file vs. tagged template literals).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    /// Raw GraphQL files (.graphql, .gql)
    GraphQL,
    /// TypeScript (.ts, .tsx)
    TypeScript,
    /// JavaScript (.js, .jsx, .mjs, .cjs)
    JavaScript,
}

impl Language {
    /// Detect language from a file path based on its extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?;

        match extension {
            "graphql" | "gql" => Some(Self::GraphQL),
            "ts" | "tsx" => Some(Self::TypeScript),
            "js" | "jsx" | "mjs" | "cjs" => Some(Self::JavaScript),
            _ => None,
        }
    }

    /// Check if this language carries GraphQL inside tagged template literals.
    #[must_use]
    pub const fn requires_extraction(self) -> bool {
        matches!(self, Self::TypeScript | Self::JavaScript)
    }
}

/// How a given input is processed by the transformation pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceMode {
    /// The entire input is one GraphQL source unit.
    WholeFile,
    /// GraphQL lives in tagged template literals inside a host-language file.
    EmbeddedLiteral,
}

impl SourceMode {
    /// Route a host identity to a processing mode.
    ///
    /// Identities ending in one of `graphql_extensions` are whole-file GraphQL.
    /// JavaScript and TypeScript identities are scanned for embedded literals.
    /// Anything else is not handled (`None`), including identities carrying a
    /// query string (`file.graphql?raw`), which belong to other host loaders.
    #[must_use]
    pub fn route<S: AsRef<str>>(id: &str, graphql_extensions: &[S]) -> Option<Self> {
        if id.contains('?') {
            return None;
        }

        let path = Path::new(id);
        let extension = path.extension().and_then(|ext| ext.to_str());

        if let Some(extension) = extension {
            if graphql_extensions
                .iter()
                .any(|candidate| candidate.as_ref().eq_ignore_ascii_case(extension))
            {
                return Some(Self::WholeFile);
            }
        }

        match Language::from_path(path) {
            Some(language) if language.requires_extraction() => Some(Self::EmbeddedLiteral),
            _ => None,
        }
    }

    /// Returns `true` for whole-file GraphQL processing.
    #[must_use]
    pub const fn is_whole_file(self) -> bool {
        matches!(self, Self::WholeFile)
    }
}
