//! JSON re-indentation.

use serde_json::Value;

use crate::ArticleError;

/// Parses `raw` as JSON and re-serializes it with two-space indentation.
///
/// Object keys keep the order in which they appeared in `raw`.
pub fn pretty_print(raw: &str) -> Result<String, ArticleError> {
    let value: Value = serde_json::from_str(raw)?;
    Ok(serde_json::to_string_pretty(&value)?)
}
