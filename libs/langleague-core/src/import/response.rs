//! Parsing of AI response text into drafts.

use crate::error::{ImportError, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Remove Markdown code fence markers (```` ```json ```` and ```` ``` ````) and trim.
pub fn strip_code_fences(text: &str) -> String {
    text.replace("```json", "").replace("```", "").trim().to_string()
}

fn parse_value(text: &str) -> Result<Value> {
    let cleaned = strip_code_fences(text);
    if cleaned.is_empty() {
        return Err(ImportError::EmptyResponse);
    }
    serde_json::from_str(&cleaned).map_err(|e| ImportError::Parse(e.to_string()))
}

/// Parse a JSON array of drafts.
///
/// Fails with `NoArray` for any other JSON value and `EmptyArray` for `[]`,
/// so an unusable reply is never mistaken for "nothing found".
pub fn parse_drafts<T: DeserializeOwned>(text: &str) -> Result<Vec<T>> {
    let items = match parse_value(text)? {
        Value::Array(items) => items,
        _ => return Err(ImportError::NoArray),
    };
    if items.is_empty() {
        return Err(ImportError::EmptyArray);
    }

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            serde_json::from_value(item)
                .map_err(|e| ImportError::Parse(format!("item {}: {}", index, e)))
        })
        .collect()
}

/// Parse a single JSON object draft.
pub fn parse_single_draft<T: DeserializeOwned>(text: &str) -> Result<T> {
    match parse_value(text)? {
        value @ Value::Object(_) => {
            serde_json::from_value(value).map_err(|e| ImportError::Parse(e.to_string()))
        }
        _ => Err(ImportError::Parse("expected a JSON object".to_string())),
    }
}
