use crate::commands::common::{read_source, CommandContext};
use crate::ExitCode;
use anyhow::Result;
use colored::Colorize;
use graphql_document::PendingDocument;
use graphql_syntax::ParseError;
use graphql_transform::Pipeline;
use graphql_types::SourceMode;
use std::path::{Path, PathBuf};

/// Print the documents `file` materializes to as JSON.
///
/// A GraphQL file yields one document; a JavaScript/TypeScript file yields
/// one per tagged literal. With `parse`, the deferred parse runs and the
/// structural node carries its definitions.
#[tracing::instrument(skip(config_path), fields(file = %file.display()))]
pub fn run(config_path: Option<PathBuf>, file: &Path, parse: bool) -> Result<ExitCode> {
    let ctx = match CommandContext::load(config_path) {
        Ok(ctx) => ctx,
        Err(exit_code) => return Ok(exit_code),
    };
    let code = match read_source(file) {
        Ok(code) => code,
        Err(exit_code) => return Ok(exit_code),
    };

    let pipeline = Pipeline::new(ctx.options)?;
    let id = file.to_string_lossy();

    let Some(mode) = pipeline.route(&id) else {
        eprintln!(
            "{} {}",
            "✗".red().bold(),
            format!("{id} is neither a GraphQL file nor a JavaScript/TypeScript module").red()
        );
        return Ok(ExitCode::ConfigError);
    };

    let texts = document_texts(&pipeline, &code, mode)?;
    let mut documents = Vec::with_capacity(texts.len());
    for text in &texts {
        let document = PendingDocument::new(text);
        match describe(&document, parse) {
            Ok(value) => documents.push(value),
            Err(error) => {
                if let Some(error) = error.downcast_ref::<ParseError>() {
                    eprintln!(
                        "{}:{}:{}: {} {}",
                        id,
                        error.line,
                        error.column,
                        "error:".red().bold(),
                        error.message.red()
                    );
                    return Ok(ExitCode::ParseError);
                }
                return Err(error);
            }
        }
    }

    let output = match mode {
        SourceMode::WholeFile => documents
            .into_iter()
            .next()
            .unwrap_or(serde_json::Value::Null),
        SourceMode::EmbeddedLiteral => serde_json::Value::Array(documents),
    };
    println!("{}", serde_json::to_string_pretty(&output)?);

    Ok(ExitCode::Success)
}

/// The normalized texts a source contributes, in source order.
fn document_texts(pipeline: &Pipeline, code: &str, mode: SourceMode) -> Result<Vec<String>> {
    Ok(match mode {
        SourceMode::WholeFile => vec![pipeline.normalize_file(code)?],
        SourceMode::EmbeddedLiteral => pipeline
            .extract_literals(code)
            .iter()
            .map(|block| pipeline.normalize_literal(&block.source))
            .collect(),
    })
}

/// JSON description of a document: its structural node plus metadata.
///
/// A failed deferred parse surfaces as a [`ParseError`] inside the returned
/// error.
fn describe(document: &PendingDocument, parse: bool) -> Result<serde_json::Value> {
    let node = if parse {
        serde_json::to_value(document.parse()?)?
    } else {
        serde_json::to_value(document)?
    };

    let metadata = document.metadata();
    Ok(serde_json::json!({
        "document": node,
        "metadata": {
            "rawText": metadata.raw_text(),
            "queryType": metadata.query_type(),
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_config::PluginOptions;

    #[test]
    fn test_describe_pending_document() {
        let document = PendingDocument::new("  mutation M { a }  ");
        let value = describe(&document, false).unwrap();
        assert_eq!(value["document"]["kind"], "Document");
        assert_eq!(value["document"]["definitions"], serde_json::json!([]));
        assert_eq!(value["metadata"]["rawText"], "mutation M { a }");
        assert_eq!(value["metadata"]["queryType"], "mutation");
    }

    #[test]
    fn test_describe_parsed_document() {
        let document = PendingDocument::new("query A { a } fragment F on T { b }");
        let value = describe(&document, true).unwrap();
        let definitions = value["document"]["definitions"].as_array().unwrap();
        assert_eq!(definitions.len(), 2);
        assert_eq!(definitions[1]["name"], "F");
    }

    #[test]
    fn test_describe_parse_failure() {
        let document = PendingDocument::new("query {");
        let error = describe(&document, true).unwrap_err();
        assert!(error.downcast_ref::<ParseError>().is_some());
        assert!(describe(&document, false).is_ok());
    }

    #[test]
    fn test_document_texts_per_literal() {
        let pipeline = Pipeline::new(PluginOptions::default()).unwrap();
        let code = "const A = gql`\n  query A { a }\n`;\nconst B = gql`{ b }`;";
        let texts = document_texts(&pipeline, code, SourceMode::EmbeddedLiteral).unwrap();
        assert_eq!(texts, vec!["query A { a }".to_string(), "{ b }".to_string()]);
    }
}
