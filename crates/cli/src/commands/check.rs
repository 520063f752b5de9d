use crate::commands::common::CommandContext;
use crate::{ExitCode, OutputFormat, OutputOptions};
use anyhow::Result;
use colored::Colorize;
use graphql_syntax::ParseError;
use graphql_transform::Pipeline;
use graphql_types::SourceMode;
use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

/// Directories never descended into when no pattern is given
const SKIPPED_DIRS: &[&str] = &["node_modules", "target", "dist", "build"];

/// Result of checking a single file
#[derive(Debug)]
pub enum Outcome {
    Valid,
    Invalid(ParseError),
    Unreadable(String),
}

#[derive(Debug)]
pub struct CheckedFile {
    pub path: PathBuf,
    pub outcome: Outcome,
}

#[tracing::instrument(skip(config_path, format, output_opts))]
pub fn run(
    config_path: Option<PathBuf>,
    patterns: &[String],
    format: OutputFormat,
    output_opts: OutputOptions,
) -> Result<ExitCode> {
    let start_time = std::time::Instant::now();

    let ctx = match CommandContext::load(config_path) {
        Ok(ctx) => ctx,
        Err(exit_code) => return Ok(exit_code),
    };
    if let (Some(path), OutputFormat::Human, true) =
        (&ctx.config_path, format, output_opts.show_info)
    {
        println!("{} {}", "Using config".dimmed(), path.display());
    }

    let pipeline = Pipeline::new(ctx.options)?;
    let base_dir = std::env::current_dir()?;
    let files = collect_files(&pipeline, patterns, &base_dir)?;

    if files.is_empty() {
        match format {
            OutputFormat::Human => eprintln!(
                "{} {}",
                "✗".red().bold(),
                "No GraphQL files found.".red()
            ),
            OutputFormat::Json => eprintln!(
                "{}",
                serde_json::json!({ "error": "No GraphQL files found" })
            ),
        }
        return Ok(ExitCode::ConfigError);
    }

    let results = {
        let _check_span = tracing::info_span!("check_files", files = files.len()).entered();
        check_files(&pipeline, &files)
    };

    let total_errors = results
        .iter()
        .filter(|file| !matches!(file.outcome, Outcome::Valid))
        .count();
    tracing::info!(files = results.len(), total_errors, "Check completed");

    match format {
        OutputFormat::Human => print_human(&results, &base_dir),
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&json_report(&results, &base_dir))?
            );
        }
    }

    if matches!(format, OutputFormat::Human) && output_opts.show_info {
        println!();
        if total_errors == 0 {
            println!(
                "{}",
                format!("✓ All {} GraphQL file(s) parsed", results.len())
                    .green()
                    .bold()
            );
        } else {
            println!(
                "{}",
                format!("✗ Found {total_errors} error(s) in {} file(s)", results.len()).red()
            );
        }
        println!(
            "  {} total: {:.2}s",
            "⏱".dimmed(),
            start_time.elapsed().as_secs_f64()
        );
    }

    Ok(exit_code(&results))
}

/// Find GraphQL files to check, sorted and deduplicated.
///
/// Relative patterns are resolved against `base_dir`. Without patterns the
/// whole of `base_dir` is walked, skipping hidden and build directories.
pub fn collect_files(
    pipeline: &Pipeline,
    patterns: &[String],
    base_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let is_graphql =
        |path: &Path| pipeline.route(&path.to_string_lossy()) == Some(SourceMode::WholeFile);
    let mut files = BTreeSet::new();

    if patterns.is_empty() {
        let entries = WalkDir::new(base_dir)
            .into_iter()
            .filter_entry(|entry| !is_skipped_dir(entry))
            .filter_map(std::result::Result::ok);
        for entry in entries {
            if entry.file_type().is_file() && is_graphql(entry.path()) {
                files.insert(entry.into_path());
            }
        }
    }

    for pattern in patterns {
        let pattern = if Path::new(pattern).is_absolute() {
            pattern.clone()
        } else {
            base_dir.join(pattern).to_string_lossy().into_owned()
        };
        for entry in glob::glob(&pattern)? {
            match entry {
                Ok(path) if path.is_file() && is_graphql(&path) => {
                    files.insert(path);
                }
                Ok(_) => {}
                Err(e) => tracing::warn!(error = %e, "Skipping unreadable path"),
            }
        }
    }

    Ok(files.into_iter().collect())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}

/// Check every file in parallel, the way the whole-file build path would.
///
/// Validation always runs here, whatever the configured `validate` option.
pub fn check_files(pipeline: &Pipeline, files: &[PathBuf]) -> Vec<CheckedFile> {
    files
        .par_iter()
        .map(|path| CheckedFile {
            path: path.clone(),
            outcome: check_file(pipeline, path),
        })
        .collect()
}

fn check_file(pipeline: &Pipeline, path: &Path) -> Outcome {
    let code = match std::fs::read_to_string(path) {
        Ok(code) => code,
        Err(e) => return Outcome::Unreadable(e.to_string()),
    };
    match pipeline.normalize_file(&code) {
        Ok(text) => match graphql_syntax::validate(&text) {
            Ok(()) => Outcome::Valid,
            Err(error) => Outcome::Invalid(error),
        },
        Err(e) => Outcome::Unreadable(e.to_string()),
    }
}

/// Parse errors win over read failures.
pub fn exit_code(results: &[CheckedFile]) -> ExitCode {
    if results
        .iter()
        .any(|file| matches!(file.outcome, Outcome::Invalid(_)))
    {
        ExitCode::ParseError
    } else if results
        .iter()
        .any(|file| matches!(file.outcome, Outcome::Unreadable(_)))
    {
        ExitCode::IoError
    } else {
        ExitCode::Success
    }
}

fn display_path(path: &Path, base_dir: &Path) -> String {
    path.strip_prefix(base_dir)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn print_human(results: &[CheckedFile], base_dir: &Path) {
    for file in results {
        let path = display_path(&file.path, base_dir);
        match &file.outcome {
            Outcome::Valid => {}
            Outcome::Invalid(error) => println!(
                "\n{}:{}:{}: {} {}",
                path,
                error.line,
                error.column,
                "error:".red().bold(),
                error.message.red()
            ),
            Outcome::Unreadable(message) => {
                eprintln!("\n{} {path}: {message}", "✗ Failed to read".red());
            }
        }
    }
}

fn json_report(results: &[CheckedFile], base_dir: &Path) -> serde_json::Value {
    let files: Vec<serde_json::Value> = results
        .iter()
        .filter_map(|file| {
            let error = match &file.outcome {
                Outcome::Valid => return None,
                Outcome::Invalid(error) => serde_json::json!({
                    "message": error.message,
                    "severity": "error",
                    "location": {
                        "line": error.line,
                        "column": error.column
                    }
                }),
                Outcome::Unreadable(message) => serde_json::json!({
                    "message": message,
                    "severity": "error"
                }),
            };
            Some(serde_json::json!({
                "file": display_path(&file.path, base_dir),
                "errors": [error]
            }))
        })
        .collect();

    serde_json::json!({
        "success": files.is_empty(),
        "files": files,
        "stats": {
            "total_files": results.len(),
            "total_errors": files.len()
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_config::PluginOptions;
    use std::fs;
    use tempfile::tempdir;

    fn pipeline() -> Pipeline {
        Pipeline::new(PluginOptions::default()).unwrap()
    }

    fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_collect_files_walks_and_skips() {
        let dir = tempdir().unwrap();
        write(dir.path(), "src/a.graphql", "query A { a }");
        write(dir.path(), "src/b.gql", "query B { b }");
        write(dir.path(), "src/c.ts", "gql`{ c }`");
        write(dir.path(), "node_modules/pkg/d.graphql", "query D { d }");
        write(dir.path(), ".cache/e.graphql", "query E { e }");

        let files = collect_files(&pipeline(), &[], dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|path| display_path(path, dir.path()))
            .collect();
        assert_eq!(names, vec!["src/a.graphql", "src/b.gql"]);
    }

    #[test]
    fn test_collect_files_from_patterns() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a/one.graphql", "query One { a }");
        write(dir.path(), "b/two.graphql", "query Two { b }");
        write(dir.path(), "b/notes.txt", "not graphql");

        let patterns = vec!["b/*".to_string(), "b/two.graphql".to_string()];
        let files = collect_files(&pipeline(), &patterns, dir.path()).unwrap();
        assert_eq!(files, vec![dir.path().join("b/two.graphql")]);
    }

    #[test]
    fn test_check_files_reports_outcomes() {
        let dir = tempdir().unwrap();
        let files = vec![
            write(dir.path(), "ok.graphql", "# comment\nquery Ok { a }"),
            write(dir.path(), "broken.graphql", "query Broken { a"),
            write(dir.path(), "empty.gql", "# nothing here\n"),
            dir.path().join("missing.graphql"),
        ];

        let results = check_files(&pipeline(), &files);
        assert!(matches!(results[0].outcome, Outcome::Valid));
        assert!(matches!(results[1].outcome, Outcome::Invalid(_)));
        assert!(matches!(results[2].outcome, Outcome::Invalid(_)));
        assert!(matches!(results[3].outcome, Outcome::Unreadable(_)));
        assert_eq!(exit_code(&results), ExitCode::ParseError);

        let report = json_report(&results, dir.path());
        assert_eq!(report["success"], false);
        assert_eq!(report["stats"]["total_files"], 4);
        assert_eq!(report["stats"]["total_errors"], 3);
        assert_eq!(report["files"][0]["file"], "broken.graphql");
    }

    #[test]
    fn test_check_ignores_validate_option() {
        let dir = tempdir().unwrap();
        let files = vec![write(dir.path(), "broken.gql", "query {")];
        let options = PluginOptions::builder().validate(false).build().unwrap();

        let results = check_files(&Pipeline::new(options).unwrap(), &files);
        assert!(matches!(results[0].outcome, Outcome::Invalid(_)));
    }

    #[test]
    fn test_exit_code_precedence() {
        let unreadable = CheckedFile {
            path: PathBuf::from("a.graphql"),
            outcome: Outcome::Unreadable("denied".to_string()),
        };
        let valid = CheckedFile {
            path: PathBuf::from("b.graphql"),
            outcome: Outcome::Valid,
        };
        assert_eq!(exit_code(&[valid]), ExitCode::Success);
        assert_eq!(exit_code(&[unreadable]), ExitCode::IoError);
    }
}
