//! # Operation Text Normalization and Validation
//!
//! Two steps of the build-time pipeline live here:
//!
//! - [`normalize`] applies comment stripping, the configured custom rewrite and
//!   trimming, in that order.
//! - [`validate`] checks normalized text with `apollo-parser` and reports the
//!   first syntax error with its line and column.
//!
//! ```rust,ignore
//! let text = normalize("# comment\nquery Q { a }", &NormalizationConfig::default());
//! assert_eq!(text, "query Q { a }");
//! validate(&text)?;
//! ```

mod normalize;
mod validate;

pub use normalize::{collapse_whitespace, normalize, normalize_line_endings, strip_comments};
pub use validate::{parse_errors, validate, ParseError};
