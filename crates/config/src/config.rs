use crate::{ConfigError, Result};
use graphql_types::DEFAULT_GRAPHQL_EXTENSIONS;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// The tag identifier recognized when none is configured.
pub const DEFAULT_TAG: &str = "gql";

/// A user-supplied rewrite applied to operation text after comment stripping.
///
/// The output is taken verbatim; it is not validated.
#[derive(Clone)]
pub struct Transform(Arc<dyn Fn(&str) -> String + Send + Sync>);

impl Transform {
    /// Wrap a rewrite function.
    pub fn new(f: impl Fn(&str) -> String + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// Apply the rewrite.
    #[must_use]
    pub fn apply(&self, text: &str) -> String {
        (self.0)(text)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Transform(<fn>)")
    }
}

impl From<TransformPreset> for Transform {
    fn from(preset: TransformPreset) -> Self {
        Self::new(move |text| preset.apply(text))
    }
}

/// Named rewrites that can be selected from a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformPreset {
    /// Leave the text unchanged
    Identity,
    /// Upper-case every character
    Uppercase,
    /// Lower-case every character
    Lowercase,
    /// Collapse every whitespace run to a single space
    CollapseWhitespace,
}

impl TransformPreset {
    const ALL: [Self; 4] = [
        Self::Identity,
        Self::Uppercase,
        Self::Lowercase,
        Self::CollapseWhitespace,
    ];

    /// The name used in config files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Uppercase => "uppercase",
            Self::Lowercase => "lowercase",
            Self::CollapseWhitespace => "collapseWhitespace",
        }
    }

    /// Apply the preset to `text`.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Identity => text.to_string(),
            Self::Uppercase => text.to_uppercase(),
            Self::Lowercase => text.to_lowercase(),
            Self::CollapseWhitespace => text.split_whitespace().collect::<Vec<_>>().join(" "),
        }
    }
}

impl FromStr for TransformPreset {
    type Err = ConfigError;

    fn from_str(name: &str) -> Result<Self> {
        if let Some(preset) = Self::ALL.into_iter().find(|p| p.name() == name) {
            return Ok(preset);
        }

        let suggestion = Self::ALL
            .into_iter()
            .map(|p| (p.name(), strsim::levenshtein(name, p.name())))
            .filter(|(_, distance)| *distance <= 3)
            .min_by_key(|(_, distance)| *distance)
            .map(|(candidate, _)| candidate.to_string());

        Err(ConfigError::UnknownTransform {
            name: name.to_string(),
            suggestion,
        })
    }
}

/// Options controlling how operation text is normalized.
#[derive(Debug, Clone)]
pub struct NormalizationConfig {
    /// Remove `#` line comments before anything else (default: true)
    pub strip_comments: bool,
    /// Custom rewrite applied after comment stripping
    pub transform: Option<Transform>,
}

impl Default for NormalizationConfig {
    fn default() -> Self {
        Self {
            strip_comments: true,
            transform: None,
        }
    }
}

impl NormalizationConfig {
    /// Normalization that leaves text as-is apart from trimming.
    #[must_use]
    pub const fn verbatim() -> Self {
        Self {
            strip_comments: false,
            transform: None,
        }
    }

    #[must_use]
    pub fn with_strip_comments(mut self, strip_comments: bool) -> Self {
        self.strip_comments = strip_comments;
        self
    }

    #[must_use]
    pub fn with_transform(mut self, transform: impl Into<Transform>) -> Self {
        self.transform = Some(transform.into());
        self
    }
}

/// Configuration surface exposed to embedding code and host adapters.
///
/// Construct through [`PluginOptions::builder`]; the builder validates tag
/// identifiers and file extensions so a bad configuration is rejected before
/// any file is transformed.
#[derive(Debug, Clone)]
pub struct PluginOptions {
    normalization: NormalizationConfig,
    include_location: bool,
    validate: bool,
    tag_identifiers: Vec<String>,
    graphql_extensions: Vec<String>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            normalization: NormalizationConfig::default(),
            include_location: false,
            validate: true,
            tag_identifiers: vec![DEFAULT_TAG.to_string()],
            graphql_extensions: DEFAULT_GRAPHQL_EXTENSIONS
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl PluginOptions {
    #[must_use]
    pub fn builder() -> PluginOptionsBuilder {
        PluginOptionsBuilder {
            options: Self::default(),
        }
    }

    #[must_use]
    pub const fn normalization(&self) -> &NormalizationConfig {
        &self.normalization
    }

    /// Reserved; accepted for compatibility but currently has no effect.
    #[must_use]
    pub const fn include_location(&self) -> bool {
        self.include_location
    }

    /// Whether whole-file sources are validated by the GraphQL parser.
    #[must_use]
    pub const fn validate(&self) -> bool {
        self.validate
    }

    #[must_use]
    pub fn tag_identifiers(&self) -> &[String] {
        &self.tag_identifiers
    }

    #[must_use]
    pub fn graphql_extensions(&self) -> &[String] {
        &self.graphql_extensions
    }
}

/// Builder for [`PluginOptions`].
#[derive(Debug, Clone)]
pub struct PluginOptionsBuilder {
    options: PluginOptions,
}

impl PluginOptionsBuilder {
    #[must_use]
    pub fn strip_comments(mut self, strip_comments: bool) -> Self {
        self.options.normalization.strip_comments = strip_comments;
        self
    }

    #[must_use]
    pub fn transform(mut self, transform: impl Into<Transform>) -> Self {
        self.options.normalization.transform = Some(transform.into());
        self
    }

    #[must_use]
    pub fn normalization(mut self, normalization: NormalizationConfig) -> Self {
        self.options.normalization = normalization;
        self
    }

    #[must_use]
    pub fn include_location(mut self, include_location: bool) -> Self {
        self.options.include_location = include_location;
        self
    }

    #[must_use]
    pub fn validate(mut self, validate: bool) -> Self {
        self.options.validate = validate;
        self
    }

    #[must_use]
    pub fn tag_identifiers<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.tag_identifiers = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn graphql_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.graphql_extensions = extensions
            .into_iter()
            .map(|ext| ext.into().trim_start_matches('.').to_string())
            .collect();
        self
    }

    /// Validate and build the options.
    pub fn build(self) -> Result<PluginOptions> {
        let options = self.options;

        if options.tag_identifiers.is_empty() {
            return Err(ConfigError::NoTags);
        }
        if let Some(tag) = options
            .tag_identifiers
            .iter()
            .find(|tag| !is_js_identifier(tag))
        {
            return Err(ConfigError::InvalidTag(tag.clone()));
        }

        if options.graphql_extensions.is_empty() {
            return Err(ConfigError::NoExtensions);
        }
        if let Some(ext) = options
            .graphql_extensions
            .iter()
            .find(|ext| ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(ConfigError::InvalidExtension(ext.clone()));
        }

        tracing::debug!(
            strip_comments = options.normalization.strip_comments,
            has_transform = options.normalization.transform.is_some(),
            validate = options.validate,
            tags = ?options.tag_identifiers,
            extensions = ?options.graphql_extensions,
            "Built plugin options"
        );

        Ok(options)
    }
}

fn is_js_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_' || c == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// On-disk configuration, as read from a `graphql-tag.config.*` file.
///
/// ```yaml
/// stripComments: true
/// transform: collapseWhitespace
/// tags: [gql, graphql]
/// extensions: [graphql, gql]
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct TagConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strip_comments: Option<bool>,

    /// Reserved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_location: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub validate: Option<bool>,

    /// Name of a [`TransformPreset`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transform: Option<String>,

    /// Tag identifiers marking embedded GraphQL literals
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,

    /// File extensions processed as whole GraphQL files
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,
}

impl TagConfig {
    /// Resolve this file config into validated [`PluginOptions`].
    pub fn into_options(self) -> Result<PluginOptions> {
        let mut builder = PluginOptions::builder();

        if let Some(strip_comments) = self.strip_comments {
            builder = builder.strip_comments(strip_comments);
        }
        if let Some(include_location) = self.include_location {
            builder = builder.include_location(include_location);
        }
        if let Some(validate) = self.validate {
            builder = builder.validate(validate);
        }
        if let Some(ref name) = self.transform {
            builder = builder.transform(name.parse::<TransformPreset>()?);
        }
        if let Some(tags) = self.tags {
            builder = builder.tag_identifiers(tags);
        }
        if let Some(extensions) = self.extensions {
            builder = builder.graphql_extensions(extensions);
        }

        builder.build()
    }
}
