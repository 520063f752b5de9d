use graphql_config::NormalizationConfig;

/// Normalize operation text.
///
/// Steps, in order:
/// 1. strip `#` line comments (when `config.strip_comments`)
/// 2. apply `config.transform`, taking its output verbatim
/// 3. trim leading and trailing whitespace
///
/// The result depends only on `text` and `config`.
#[must_use]
pub fn normalize(text: &str, config: &NormalizationConfig) -> String {
    let mut result = if config.strip_comments {
        strip_comments(text)
    } else {
        text.to_string()
    };

    if let Some(ref transform) = config.transform {
        result = transform.apply(&result);
    }

    tracing::trace!(
        input_len = text.len(),
        output_len = result.trim().len(),
        "Normalized operation text"
    );

    result.trim().to_string()
}

/// Remove every line comment: from an unescaped `#` to the end of its line.
///
/// This is a single linear scan with no knowledge of GraphQL structure, so a
/// `#` inside a quoted string value is treated as a comment start as well.
/// Line terminators are kept.
#[must_use]
pub fn strip_comments(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut in_comment = false;
    let mut prev = None;

    for c in text.chars() {
        if in_comment {
            if c == '\n' || c == '\r' {
                in_comment = false;
                result.push(c);
            }
        } else if c == '#' && prev != Some('\\') {
            in_comment = true;
        } else {
            result.push(c);
        }
        prev = Some(c);
    }

    result
}

/// Collapse every whitespace run (including newlines) to a single space and trim.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert CRLF line endings to LF.
#[must_use]
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n")
}
