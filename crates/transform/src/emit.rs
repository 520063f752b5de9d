use graphql_document::PendingDocument;
use graphql_extract::ExtractedGraphQL;
use graphql_types::{apply_edits, TextEdit};

/// How a whole-file GraphQL source is turned into a module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EmitStyle {
    /// Re-parse the source with `graphql`'s `parse` at runtime, exporting the
    /// real document node.
    #[default]
    Parse,
    /// Export a placeholder document object carrying the raw text and query
    /// type as non-enumerable properties. No runtime parse.
    Pending,
}

/// Emit a module for validated whole-file text in the given style.
#[must_use]
pub fn emit_module(text: &str, style: EmitStyle) -> String {
    match style {
        EmitStyle::Parse => emit_parse_module(text),
        EmitStyle::Pending => emit_pending_module(&PendingDocument::new(text)),
    }
}

/// Emit a module that parses `text` at runtime and exports the document node
/// as both the default export and `documentNode`.
#[must_use]
pub fn emit_parse_module(text: &str) -> String {
    format!(
        r#"import {{ parse }} from "graphql";

const documentNode = parse({source});

export default documentNode;
export {{ documentNode }};"#,
        source = js_string(text),
    )
}

/// Emit a module exporting a placeholder document for `document`.
#[must_use]
pub fn emit_pending_module(document: &PendingDocument) -> String {
    let raw = js_string(document.render());
    let query_type = js_string(document.query_type().as_str());

    format!(
        r#"import {{ Kind }} from "graphql";

const documentNode = {{
  kind: Kind.DOCUMENT,
  definitions: [],
  loc: undefined,
}};

Object.defineProperty(documentNode, "__raw", {{ value: {raw}, enumerable: false, writable: false }});
Object.defineProperty(documentNode, "__queryType", {{ value: {query_type}, enumerable: false, writable: false }});
Object.defineProperty(documentNode, "toString", {{ value: () => {raw}, enumerable: false, writable: false }});

export default documentNode;
export {{ documentNode }};"#
    )
}

/// Replace the interior of each extracted literal with its new text.
///
/// Tags, delimiters and everything outside the literals are left untouched.
#[must_use]
pub fn splice_literals(source: &str, replacements: &[(ExtractedGraphQL, String)]) -> String {
    let edits: Vec<TextEdit> = replacements
        .iter()
        .map(|(block, text)| TextEdit::replace(block.splice.interior, text.as_str()))
        .filter(|edit| !edit.is_noop(source))
        .collect();

    tracing::trace!(
        literals = replacements.len(),
        edits = edits.len(),
        "Splicing literals"
    );

    apply_edits(source, &edits)
}

/// Encode `text` as a JavaScript string literal.
fn js_string(text: &str) -> String {
    serde_json::Value::String(text.to_string()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use graphql_extract::{extract_from_source, ExtractConfig};
    use graphql_types::SourceMode;

    #[test]
    fn test_parse_module_shape() {
        let module = emit_parse_module("query Q { a }");
        insta::assert_snapshot!(module, @r#"
        import { parse } from "graphql";

        const documentNode = parse("query Q { a }");

        export default documentNode;
        export { documentNode };
        "#);
    }

    #[test]
    fn test_parse_module_escapes_source() {
        let module = emit_parse_module("query Q {\n  a(s: \"x\")\n}");
        assert!(module.contains(r#"parse("query Q {\n  a(s: \"x\")\n}")"#));
    }

    #[test]
    fn test_parse_module_order() {
        let module = emit_parse_module("query Q { a }");
        let import = module.find("import { parse }").unwrap();
        let call = module.find("parse(\"query Q { a }\")").unwrap();
        let default_export = module.find("export default documentNode").unwrap();
        let named_export = module.find("export { documentNode }").unwrap();
        assert!(import < call && call < default_export && default_export < named_export);
    }

    #[test]
    fn test_pending_module() {
        let module = emit_module("mutation M { a }", EmitStyle::Pending);
        assert!(module.contains("kind: Kind.DOCUMENT"));
        assert!(module.contains("definitions: []"));
        assert!(module.contains(r#""__raw", { value: "mutation M { a }""#));
        assert!(module.contains(r#""__queryType", { value: "mutation""#));
        assert!(module.contains("export { documentNode };"));
    }

    #[test]
    fn test_splice_literals_only_touches_interiors() {
        let source = "const A = gql`\n  query A { a }\n`;\nconst B = gql`query B { b }`;\n";
        let blocks =
            extract_from_source(source, SourceMode::EmbeddedLiteral, &ExtractConfig::default())
                .unwrap();
        let replacements: Vec<_> = blocks
            .into_iter()
            .map(|block| {
                let text = graphql_syntax::collapse_whitespace(&block.source);
                (block, text)
            })
            .collect();

        assert_eq!(
            splice_literals(source, &replacements),
            "const A = gql`query A { a }`;\nconst B = gql`query B { b }`;\n"
        );
    }
}
