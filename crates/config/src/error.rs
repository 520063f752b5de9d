use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Configuration errors.
///
/// All of these are raised while building or loading configuration, before
/// any source text is transformed.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config at {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Unsupported config file format: {0}")]
    UnsupportedFormat(PathBuf),

    #[error("Unknown transform '{name}'{}", did_you_mean(.suggestion.as_deref()))]
    UnknownTransform {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Invalid tag identifier '{0}': expected a JavaScript identifier")]
    InvalidTag(String),

    #[error("At least one tag identifier is required")]
    NoTags,

    #[error("Invalid GraphQL file extension '{0}'")]
    InvalidExtension(String),

    #[error("At least one GraphQL file extension is required")]
    NoExtensions,
}

fn did_you_mean(suggestion: Option<&str>) -> String {
    suggestion.map_or_else(String::new, |s| format!(" (did you mean '{s}'?)"))
}
