use crate::{DefinitionNode, DocumentNode, NodeKind};
use apollo_compiler::ast;
use graphql_syntax::ParseError;
use serde::{Serialize, Serializer};
use std::sync::Arc;

/// A fully parsed document with populated structural definitions.
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    node: DocumentNode,
    ast: Arc<ast::Document>,
    source: Arc<str>,
}

impl ParsedDocument {
    /// Parse operation text.
    ///
    /// Syntax is checked first so errors carry line and column information.
    pub fn parse(source: &str) -> Result<Self, ParseError> {
        graphql_syntax::validate(source)?;

        let ast = match ast::Document::parse(source, "document.graphql") {
            Ok(doc) => doc,
            Err(with_errors) => {
                // Only reachable for errors apollo-parser accepts; reported at the start
                let message = with_errors
                    .errors
                    .iter()
                    .next()
                    .map_or_else(|| "Invalid document".to_string(), |e| e.to_string());
                return Err(ParseError {
                    message,
                    offset: 0,
                    line: 1,
                    column: 1,
                });
            }
        };

        let node = DocumentNode {
            kind: NodeKind::Document,
            definitions: ast.definitions.iter().map(DefinitionNode::from).collect(),
        };

        tracing::debug!(definitions = node.definitions.len(), "Parsed document");

        Ok(Self {
            node,
            ast: Arc::new(ast),
            source: Arc::from(source),
        })
    }

    #[must_use]
    pub const fn node(&self) -> &DocumentNode {
        &self.node
    }

    /// The apollo-compiler AST.
    #[must_use]
    pub fn ast(&self) -> &ast::Document {
        &self.ast
    }

    /// The source text this document was parsed from.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Re-print the document from its AST.
    #[must_use]
    pub fn print(&self) -> String {
        self.ast.to_string()
    }
}

impl PartialEq for ParsedDocument {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Serialize for ParsedDocument {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.node.serialize(serializer)
    }
}
