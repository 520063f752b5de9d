mod error;
mod extractor;
mod splice;

pub use error::{ExtractError, Result};
pub use extractor::{extract_from_source, ExtractConfig, ExtractedGraphQL, Extractor};
pub use splice::SpliceContext;

// Re-export types from graphql-types for convenience
pub use graphql_types::{OffsetRange, Position, Range, SourceMode};
