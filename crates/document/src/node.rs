use crate::QueryType;
use apollo_compiler::ast;
use serde::Serialize;

/// Discriminant of a document node. There is only one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum NodeKind {
    #[default]
    Document,
}

/// The structural part of a GraphQL document.
///
/// This is everything that shows up in equality and serialization:
/// `{"kind":"Document","definitions":[...]}`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct DocumentNode {
    pub kind: NodeKind,
    pub definitions: Vec<DefinitionNode>,
}

impl DocumentNode {
    /// A document node with no definitions.
    #[must_use]
    pub const fn placeholder() -> Self {
        Self {
            kind: NodeKind::Document,
            definitions: Vec::new(),
        }
    }
}

/// What kind of top-level definition a [`DefinitionNode`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DefinitionKind {
    OperationDefinition,
    FragmentDefinition,
    /// Schema, type and directive definitions
    TypeSystemDefinition,
    /// Schema and type extensions
    TypeSystemExtension,
}

/// Summary of one top-level definition in a parsed document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefinitionNode {
    pub kind: DefinitionKind,
    /// Operation type, for operation definitions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation: Option<QueryType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl From<&ast::Definition> for DefinitionNode {
    fn from(definition: &ast::Definition) -> Self {
        let name = definition.name().map(ToString::to_string);

        let (kind, operation) = match definition {
            ast::Definition::OperationDefinition(op) => {
                let operation = match op.operation_type {
                    ast::OperationType::Query => QueryType::Query,
                    ast::OperationType::Mutation => QueryType::Mutation,
                    ast::OperationType::Subscription => QueryType::Subscription,
                };
                (DefinitionKind::OperationDefinition, Some(operation))
            }
            ast::Definition::FragmentDefinition(_) => (DefinitionKind::FragmentDefinition, None),
            ast::Definition::SchemaExtension(_)
            | ast::Definition::ScalarTypeExtension(_)
            | ast::Definition::ObjectTypeExtension(_)
            | ast::Definition::InterfaceTypeExtension(_)
            | ast::Definition::UnionTypeExtension(_)
            | ast::Definition::EnumTypeExtension(_)
            | ast::Definition::InputObjectTypeExtension(_) => {
                (DefinitionKind::TypeSystemExtension, None)
            }
            ast::Definition::SchemaDefinition(_)
            | ast::Definition::ScalarTypeDefinition(_)
            | ast::Definition::ObjectTypeDefinition(_)
            | ast::Definition::InterfaceTypeDefinition(_)
            | ast::Definition::UnionTypeDefinition(_)
            | ast::Definition::EnumTypeDefinition(_)
            | ast::Definition::InputObjectTypeDefinition(_)
            | ast::Definition::DirectiveDefinition(_) => {
                (DefinitionKind::TypeSystemDefinition, None)
            }
        };

        Self {
            kind,
            operation,
            name,
        }
    }
}
