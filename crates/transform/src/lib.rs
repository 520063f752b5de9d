//! # GraphQL Build-Time Transformation
//!
//! One [`Pipeline`] turns host source text into replacement source text:
//!
//! ```text
//! source ─▶ extract ─▶ normalize ─▶ validate ─▶ emit ─▶ replacement
//! ```
//!
//! - GraphQL files (`.graphql`, `.gql`) are normalized, validated and replaced
//!   by a generated module exporting the parsed document.
//! - JavaScript/TypeScript files have each tagged literal normalized and
//!   collapsed to one line in place. Tagged literals are not validated.
//! - Anything else, or a host file without tagged literals, is left alone
//!   (`Ok(None)`).
//!
//! Host build tools plug in through thin adapters: [`VitePlugin`] implements
//! the [`HostPlugin`] hooks, [`WebpackLoader`] and [`GraphQLFileLoader`]
//! implement the [`Loader`] contract.

mod emit;
mod error;
mod pipeline;
mod plugin;

pub use emit::{emit_module, emit_parse_module, emit_pending_module, splice_literals, EmitStyle};
pub use error::{Result, TransformError};
pub use pipeline::{Pipeline, TransformOutput};
pub use plugin::{GraphQLFileLoader, HostPlugin, Loader, VitePlugin, WebpackLoader};
