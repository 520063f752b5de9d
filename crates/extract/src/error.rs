use thiserror::Error;

pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors building an extractor.
///
/// Scanning itself never fails: a source without tagged literals simply
/// yields no blocks.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("No tag identifiers configured")]
    NoTags,

    #[error("Invalid tag pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}
