use crate::{ExtractError, Result, SpliceContext};
use graphql_types::{LineIndex, OffsetRange, SourceMode};
use regex::Regex;

/// Configuration for embedded-literal extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractConfig {
    /// Identifiers that mark a template literal as GraphQL (default: `gql`)
    pub tag_identifiers: Vec<String>,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self {
            tag_identifiers: vec!["gql".to_string()],
        }
    }
}

impl ExtractConfig {
    #[must_use]
    pub fn with_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tag_identifiers: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// One GraphQL operation text found in a larger source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedGraphQL {
    /// The raw operation text.
    ///
    /// For embedded literals this is the literal's interior, untouched. For
    /// whole files it is the trimmed file content.
    pub source: String,
    /// The tag identifier that marked the literal (`None` for whole files)
    pub tag: Option<String>,
    /// Location of the text within the containing source
    pub splice: SpliceContext,
}

/// Scanner for tagged template literals.
///
/// The pattern is a tag identifier immediately followed by a backtick-delimited
/// block ending at the next backtick. Nested or escaped backticks are not
/// supported, and interpolations are captured as plain text.
#[derive(Debug, Clone)]
pub struct Extractor {
    pattern: Regex,
}

impl Extractor {
    pub fn new(config: &ExtractConfig) -> Result<Self> {
        if config.tag_identifiers.is_empty() {
            return Err(ExtractError::NoTags);
        }

        let alternation = config
            .tag_identifiers
            .iter()
            .map(|tag| regex::escape(tag))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!("(?P<tag>{alternation})`(?P<body>[^`]+)`"))?;

        Ok(Self { pattern })
    }

    /// Scan `source` for tagged literals, in source order.
    #[must_use]
    pub fn extract(&self, source: &str) -> Vec<ExtractedGraphQL> {
        let mut line_index = None;
        let mut blocks = Vec::new();

        for captures in self.pattern.captures_iter(source) {
            let (Some(whole), Some(tag), Some(body)) =
                (captures.get(0), captures.name("tag"), captures.name("body"))
            else {
                continue;
            };

            // `mygql` is a different identifier that merely ends in `gql`
            if source[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(is_identifier_char)
            {
                tracing::trace!(offset = whole.start(), "Skipping tag embedded in identifier");
                continue;
            }

            let index = line_index.get_or_insert_with(|| LineIndex::new(source));
            let interior = OffsetRange::new(body.start(), body.end());

            blocks.push(ExtractedGraphQL {
                source: body.as_str().to_string(),
                tag: Some(tag.as_str().to_string()),
                splice: SpliceContext::new(
                    OffsetRange::new(whole.start(), whole.end()),
                    interior,
                    index.range(interior),
                ),
            });
        }

        tracing::debug!(blocks = blocks.len(), "Scanned source for tagged literals");
        blocks
    }
}

/// Extract GraphQL operation text from a source.
///
/// In [`SourceMode::WholeFile`] the entire input is one operation. In
/// [`SourceMode::EmbeddedLiteral`] the input is scanned for tagged literals;
/// finding none is a valid empty result.
pub fn extract_from_source(
    source: &str,
    mode: SourceMode,
    config: &ExtractConfig,
) -> Result<Vec<ExtractedGraphQL>> {
    match mode {
        SourceMode::WholeFile => Ok(vec![whole_file(source)]),
        SourceMode::EmbeddedLiteral => Ok(Extractor::new(config)?.extract(source)),
    }
}

fn whole_file(source: &str) -> ExtractedGraphQL {
    let all = OffsetRange::new(0, source.len());
    ExtractedGraphQL {
        source: source.trim().to_string(),
        tag: None,
        splice: SpliceContext::new(all, all, LineIndex::new(source).range(all)),
    }
}

const fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}
