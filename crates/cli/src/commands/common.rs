use crate::ExitCode;
use colored::Colorize;
use graphql_config::{find_config, load_config, PluginOptions};
use std::path::{Path, PathBuf};

/// Options and config location shared by every command.
pub struct CommandContext {
    pub options: PluginOptions,
    pub config_path: Option<PathBuf>,
}

impl CommandContext {
    /// Load the command context from the working directory, reporting
    /// failures on stderr.
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ExitCode> {
        let base_dir = std::env::current_dir().map_err(|e| {
            eprintln!("{} {e}", "✗ Failed to read working directory:".red());
            ExitCode::IoError
        })?;

        Self::resolve(config_path, &base_dir).map_err(|e| {
            eprintln!("{} {e}", "✗ Invalid configuration:".red());
            ExitCode::from(&e)
        })
    }

    /// Resolve options from an explicit config path, or from the nearest
    /// config file above `base_dir`. Defaults apply when there is none.
    pub fn resolve(
        config_path: Option<PathBuf>,
        base_dir: &Path,
    ) -> graphql_config::Result<Self> {
        let config_path = match config_path {
            Some(path) => Some(path),
            None => find_config(base_dir)?,
        };

        let options = match &config_path {
            Some(path) => {
                tracing::debug!(path = %path.display(), "Using config file");
                load_config(path)?.into_options()?
            }
            None => PluginOptions::default(),
        };

        Ok(Self {
            options,
            config_path,
        })
    }
}

/// Read a source file, reporting failures on stderr.
pub fn read_source(path: &Path) -> Result<String, ExitCode> {
    std::fs::read_to_string(path).map_err(|e| {
        eprintln!("{} {}: {e}", "✗ Failed to read".red(), path.display());
        ExitCode::IoError
    })
}
