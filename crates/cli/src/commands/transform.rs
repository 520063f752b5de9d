use crate::commands::common::{read_source, CommandContext};
use crate::ExitCode;
use anyhow::Result;
use colored::Colorize;
use graphql_transform::{EmitStyle, Pipeline};
use std::path::{Path, PathBuf};

/// Transform one file and print the replacement code to stdout.
///
/// Files the pipeline leaves alone are echoed unchanged, the way a host
/// bundler would keep them.
#[tracing::instrument(skip(config_path), fields(file = %file.display()))]
pub fn run(config_path: Option<PathBuf>, file: &Path, style: EmitStyle) -> Result<ExitCode> {
    let ctx = match CommandContext::load(config_path) {
        Ok(ctx) => ctx,
        Err(exit_code) => return Ok(exit_code),
    };
    let code = match read_source(file) {
        Ok(code) => code,
        Err(exit_code) => return Ok(exit_code),
    };

    let pipeline = Pipeline::new(ctx.options)?.with_style(style);
    let id = file.to_string_lossy();

    match pipeline.transform(&code, &id) {
        Ok(Some(output)) => println!("{}", output.code),
        Ok(None) => {
            tracing::info!("Nothing to transform");
            print!("{code}");
        }
        Err(error) => {
            eprintln!("{} {}", "✗".red().bold(), error.to_string().red());
            return Ok(ExitCode::from(&error));
        }
    }

    Ok(ExitCode::Success)
}
