//! Exit codes for the `graphql-tag` CLI.
//!
//! Scripts and CI systems can tell a broken GraphQL document apart from a
//! broken configuration or an unreadable file.

use graphql_config::ConfigError;
use graphql_transform::TransformError;

/// Exit codes used by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// No errors
    Success = 0,
    /// Invalid GraphQL syntax in a whole-file source
    ParseError = 1,
    /// Invalid or unreadable configuration, or nothing to process
    ConfigError = 2,
    /// File read failure
    IoError = 4,
}

impl ExitCode {
    /// Exit the process with this exit code.
    pub fn exit(self) -> ! {
        std::process::exit(self.code())
    }

    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(_: &ConfigError) -> Self {
        Self::ConfigError
    }
}

impl From<&TransformError> for ExitCode {
    fn from(error: &TransformError) -> Self {
        match error {
            TransformError::Parse { .. } => Self::ParseError,
            TransformError::Config(_) | TransformError::Extract(_) => Self::ConfigError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Success => write!(f, "success"),
            Self::ParseError => write!(f, "parse error"),
            Self::ConfigError => write!(f, "configuration error"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}
