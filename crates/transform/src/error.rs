use graphql_config::ConfigError;
use graphql_extract::ExtractError;
use graphql_syntax::ParseError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransformError>;

/// Pipeline-fatal errors.
///
/// None of these are retried; the host is expected to stop the build step and
/// show the message as-is.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A whole-file GraphQL source failed syntax validation
    #[error("GraphQL parsing error in file {id}: {error}")]
    Parse {
        id: String,
        #[source]
        error: ParseError,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Extract(#[from] ExtractError),
}

impl TransformError {
    /// The identity of the file that failed, for parse errors.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        match self {
            Self::Parse { id, .. } => Some(id),
            Self::Config(_) | Self::Extract(_) => None,
        }
    }
}
