//! # GraphQL Document Nodes
//!
//! Documents are built in two phases:
//!
//! - [`PendingDocument`]: created at build time from operation text alone. Its
//!   structural [`DocumentNode`] always has empty `definitions`; the raw text
//!   and rendering live in a separate [`DocumentMetadata`] sidecar.
//! - [`ParsedDocument`]: the real parse, with populated `definitions`. This is
//!   what generated modules produce at runtime, and what
//!   [`PendingDocument::parse`] produces here.
//!
//! Equality and serialization of a `PendingDocument` only see the structural
//! node. The metadata is reachable through [`PendingDocument::metadata`] and
//! [`PendingDocument::render`].

mod metadata;
mod node;
mod parsed;
mod pending;
mod query_type;
mod tag;

pub use metadata::DocumentMetadata;
pub use node::{DefinitionKind, DefinitionNode, DocumentNode, NodeKind};
pub use parsed::ParsedDocument;
pub use pending::{interpolate, materialize, PendingDocument};
pub use query_type::QueryType;
pub use tag::{gql, GraphQLTag};
