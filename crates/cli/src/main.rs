mod commands;
mod exit_code;

use clap::{Parser, Subcommand};
use graphql_transform::EmitStyle;
use std::path::PathBuf;

pub use exit_code::ExitCode;

#[derive(Parser)]
#[command(name = "graphql-tag")]
#[command(
    about = "Build-time transformer for GraphQL tagged templates and .graphql files",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to a graphql-tag config file (discovered from the working directory by default)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Force colored output even when not a TTY
    #[arg(long, global = true, conflicts_with = "no_color")]
    color: bool,

    /// Disable colored output
    #[arg(long, global = true, conflicts_with = "color")]
    no_color: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Output verbosity options
#[derive(Debug, Clone, Copy)]
pub struct OutputOptions {
    /// Whether to show informational output (success messages, summaries)
    pub show_info: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one file through the build-time pipeline and print the result
    ///
    /// GraphQL files become an importable module; JavaScript and TypeScript
    /// files get their tagged literals rewritten in place. Files with nothing
    /// to transform are printed unchanged.
    Transform {
        /// File to transform
        file: PathBuf,

        /// How whole GraphQL files are emitted
        #[arg(short, long, value_enum, default_value = "parse")]
        style: StyleArg,
    },

    /// Check that GraphQL files parse, the way the build would
    Check {
        /// Glob patterns to check (defaults to every GraphQL file below the working directory)
        patterns: Vec<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "human")]
        format: OutputFormat,
    },

    /// Print the documents a file materializes to, with their metadata
    Print {
        /// File to print
        file: PathBuf,

        /// Also run the deferred parse and print the populated definitions
        #[arg(long)]
        parse: bool,
    },
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Human,
    /// JSON output for tooling
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum StyleArg {
    /// Re-parse with `graphql` at runtime
    Parse,
    /// Export a placeholder document carrying the raw text
    Pending,
}

impl From<StyleArg> for EmitStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Parse => Self::Parse,
            StyleArg::Pending => Self::Pending,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();
    configure_colors(cli.color, cli.no_color);

    let output_opts = OutputOptions {
        show_info: !cli.quiet,
    };

    let exit_code = match cli.command {
        Commands::Transform { file, style } => {
            commands::transform::run(cli.config, &file, style.into())?
        }
        Commands::Check { patterns, format } => {
            commands::check::run(cli.config, &patterns, format, output_opts)?
        }
        Commands::Print { file, parse } => commands::print::run(cli.config, &file, parse)?,
    };

    if exit_code != ExitCode::Success {
        tracing::debug!(%exit_code, "Exiting with failure");
        exit_code.exit();
    }

    Ok(())
}

/// Initialize tracing to stderr, filtered by `RUST_LOG` (off by default)
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Configure colored output from flags and the `NO_COLOR` / `CLICOLOR_FORCE`
/// / `CLICOLOR` environment variables, in that order of priority.
///
/// Without any of them the `colored` crate decides based on TTY detection.
fn configure_colors(force_color: bool, no_color: bool) {
    use colored::control;

    if force_color {
        control::set_override(true);
    } else if no_color || std::env::var_os("NO_COLOR").is_some() {
        control::set_override(false);
    } else if let Ok(val) = std::env::var("CLICOLOR_FORCE") {
        if !val.is_empty() && val != "0" {
            control::set_override(true);
        }
    } else if std::env::var("CLICOLOR").is_ok_and(|val| val == "0") {
        control::set_override(false);
    }
}
