//! Foundation types for the GraphQL tag bundler.
//!
//! This crate provides shared types used across the transformation pipeline.
//! It has zero external dependencies, making it suitable as a foundation layer.
//!
//! # Type Categories
//!
//! - **Source routing**: [`Language`], [`SourceMode`]
//! - **Position types**: [`Position`], [`Range`], [`OffsetRange`], [`LineIndex`]
//! - **Edit types**: [`TextEdit`], [`apply_edits`]

mod edits;
mod file;
mod position;

pub use edits::{apply_edits, TextEdit};
pub use file::{Language, SourceMode, DEFAULT_GRAPHQL_EXTENSIONS};
pub use position::{LineIndex, OffsetRange, Position, Range};
