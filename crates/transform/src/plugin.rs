//! Thin adapters between host build tools and the [`Pipeline`].

use crate::{Pipeline, Result, TransformOutput};
use graphql_config::PluginOptions;
use graphql_types::SourceMode;

/// Hook-based host plugin contract.
pub trait HostPlugin {
    /// Plugin name reported to the host.
    fn name(&self) -> &'static str;

    /// Claim an identity. `None` leaves resolution to the host.
    fn resolve_id(&self, id: &str) -> Option<String>;

    /// Load an identity. `None` defers to the host's default text loader.
    fn load(&self, id: &str) -> Option<String>;

    /// Transform loaded code. `Ok(None)` leaves the code unchanged.
    fn transform(&self, code: &str, id: &str) -> Result<Option<TransformOutput>>;
}

/// Loader contract: every source passing through the loader produces output
/// source, unchanged when there is nothing to do.
pub trait Loader {
    fn run(&self, source: &str, resource_path: &str) -> Result<String>;
}

/// Plugin for hook-based bundlers (resolveId / load / transform).
///
/// Claims GraphQL-suffixed identities, lets the host read them as text, and
/// transforms both GraphQL files and tagged literals in JS/TS files.
#[derive(Debug, Clone)]
pub struct VitePlugin {
    pipeline: Pipeline,
}

impl VitePlugin {
    pub fn new(options: PluginOptions) -> Result<Self> {
        Ok(Self::from_pipeline(Pipeline::new(options)?))
    }

    #[must_use]
    pub const fn from_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    #[must_use]
    pub const fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }
}

impl HostPlugin for VitePlugin {
    fn name(&self) -> &'static str {
        "graphql"
    }

    fn resolve_id(&self, id: &str) -> Option<String> {
        self.pipeline
            .route(id)
            .filter(|mode| mode.is_whole_file())
            .map(|_| id.to_string())
    }

    fn load(&self, _id: &str) -> Option<String> {
        None
    }

    fn transform(&self, code: &str, id: &str) -> Result<Option<TransformOutput>> {
        self.pipeline.transform(code, id)
    }
}

/// Loader for JS/TS modules: rewrites tagged literals in place.
///
/// Sources without a tagged literal pass through unchanged. Never fails.
#[derive(Debug, Clone)]
pub struct WebpackLoader {
    pipeline: Pipeline,
}

impl WebpackLoader {
    pub fn new(options: PluginOptions) -> Result<Self> {
        Ok(Self::from_pipeline(Pipeline::new(options)?))
    }

    #[must_use]
    pub const fn from_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }
}

impl Loader for WebpackLoader {
    fn run(&self, source: &str, resource_path: &str) -> Result<String> {
        tracing::trace!(resource_path, "Running literal loader");
        Ok(self
            .pipeline
            .transform_literals(source)
            .map_or_else(|| source.to_string(), |output| output.code))
    }
}

/// Loader for `.graphql`/`.gql` files: turns the file into a module.
#[derive(Debug, Clone)]
pub struct GraphQLFileLoader {
    pipeline: Pipeline,
}

impl GraphQLFileLoader {
    pub fn new(options: PluginOptions) -> Result<Self> {
        Ok(Self::from_pipeline(Pipeline::new(options)?))
    }

    #[must_use]
    pub const fn from_pipeline(pipeline: Pipeline) -> Self {
        Self { pipeline }
    }

    /// Whether this loader should be applied to `resource_path`.
    #[must_use]
    pub fn matches(&self, resource_path: &str) -> bool {
        self.pipeline.route(resource_path) == Some(SourceMode::WholeFile)
    }
}

impl Loader for GraphQLFileLoader {
    fn run(&self, source: &str, resource_path: &str) -> Result<String> {
        tracing::trace!(resource_path, "Running GraphQL file loader");
        Ok(self.pipeline.transform_file(source, resource_path)?.code)
    }
}
