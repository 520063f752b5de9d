use crate::emit::{emit_module, splice_literals, EmitStyle};
use crate::{Result, TransformError};
use graphql_config::PluginOptions;
use graphql_extract::{extract_from_source, ExtractConfig, ExtractedGraphQL, Extractor};
use graphql_syntax::{collapse_whitespace, normalize, normalize_line_endings};
use graphql_types::SourceMode;

/// Replacement code handed back to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    pub code: String,
    /// Source map. Never produced; kept for the host contract.
    pub map: Option<String>,
}

impl TransformOutput {
    fn from_code(code: String) -> Self {
        Self { code, map: None }
    }
}

/// The build-time transformation pipeline.
///
/// Holds no mutable state, so one pipeline can serve any number of files
/// concurrently.
#[derive(Debug, Clone)]
pub struct Pipeline {
    options: PluginOptions,
    extract_config: ExtractConfig,
    extractor: Extractor,
    style: EmitStyle,
}

impl Pipeline {
    pub fn new(options: PluginOptions) -> Result<Self> {
        let extract_config = ExtractConfig::with_tags(options.tag_identifiers().iter().cloned());
        let extractor = Extractor::new(&extract_config)?;

        Ok(Self {
            options,
            extract_config,
            extractor,
            style: EmitStyle::default(),
        })
    }

    /// Select how whole-file sources are emitted.
    #[must_use]
    pub fn with_style(mut self, style: EmitStyle) -> Self {
        self.style = style;
        self
    }

    #[must_use]
    pub const fn options(&self) -> &PluginOptions {
        &self.options
    }

    #[must_use]
    pub const fn style(&self) -> EmitStyle {
        self.style
    }

    /// How `id` would be processed, if at all.
    #[must_use]
    pub fn route(&self, id: &str) -> Option<SourceMode> {
        SourceMode::route(id, self.options.graphql_extensions())
    }

    /// Transform `code` loaded from `id`.
    ///
    /// Returns `Ok(None)` when there is nothing to do: the identity is neither
    /// GraphQL nor JavaScript/TypeScript, or a host file has no tagged literal.
    #[tracing::instrument(skip(self, code), fields(len = code.len()))]
    pub fn transform(&self, code: &str, id: &str) -> Result<Option<TransformOutput>> {
        match self.route(id) {
            Some(SourceMode::WholeFile) => self.transform_file(code, id).map(Some),
            Some(SourceMode::EmbeddedLiteral) => Ok(self.transform_literals(code)),
            None => {
                tracing::trace!("Identity not handled");
                Ok(None)
            }
        }
    }

    /// Transform a whole GraphQL file into a module.
    ///
    /// The text is normalized, validated (unless disabled) and emitted. A
    /// syntax error is fatal and carries `id`.
    pub fn transform_file(&self, code: &str, id: &str) -> Result<TransformOutput> {
        let text = self.normalize_file(code)?;

        if self.options.validate() {
            graphql_syntax::validate(&text).map_err(|error| TransformError::Parse {
                id: id.to_string(),
                error,
            })?;
        }

        tracing::debug!(id, style = ?self.style, "Emitting GraphQL module");
        Ok(TransformOutput::from_code(emit_module(&text, self.style)))
    }

    /// Normalize a whole GraphQL file, without validating it.
    pub fn normalize_file(&self, code: &str) -> Result<String> {
        let code = normalize_line_endings(code);
        let text = extract_from_source(&code, SourceMode::WholeFile, &self.extract_config)?
            .into_iter()
            .map(|block| block.source)
            .next()
            .unwrap_or_default();

        Ok(normalize(&text, self.options.normalization()))
    }

    /// Rewrite every tagged literal in a host file in place.
    ///
    /// Each literal's interior is normalized and collapsed to single-line
    /// whitespace. A literal that normalizes to nothing (only comments) keeps
    /// its original text, so the output is still recognized as tagged. No
    /// validation is performed, so this never fails. Returns `None` when the
    /// file has no tagged literal.
    #[must_use]
    pub fn transform_literals(&self, code: &str) -> Option<TransformOutput> {
        let blocks = self.extractor.extract(code);
        if blocks.is_empty() {
            return None;
        }

        let replacements: Vec<(ExtractedGraphQL, String)> = blocks
            .into_iter()
            .filter_map(|block| {
                let text = self.normalize_literal(&block.source);
                if text.is_empty() {
                    tracing::trace!(
                        offset = block.splice.literal.start,
                        "Literal is empty once normalized"
                    );
                    return None;
                }
                Some((block, text))
            })
            .collect();

        tracing::debug!(literals = replacements.len(), "Rewriting tagged literals");
        Some(TransformOutput::from_code(splice_literals(code, &replacements)))
    }

    /// Normalize one literal interior.
    #[must_use]
    pub fn normalize_literal(&self, text: &str) -> String {
        collapse_whitespace(&normalize(text, self.options.normalization()))
    }

    /// Scan a host file for tagged literals.
    #[must_use]
    pub fn extract_literals(&self, code: &str) -> Vec<ExtractedGraphQL> {
        self.extractor.extract(code)
    }
}
