//! Blob encoding
//!
//! All lists are stored as one JSON array under a single key.

use serde_json::Value;
use thiserror::Error;

use crate::model::TodoList;

#[derive(Debug, Error)]
pub enum BlobError {
    #[error("blob is not valid list data: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("blob is not an array (found {0})")]
    NotASequence(&'static str),
}

pub fn encode(lists: &[TodoList]) -> Result<String, BlobError> {
    Ok(serde_json::to_string(lists)?)
}

/// Parse a blob. Anything other than a JSON array of lists is an error.
pub fn decode(text: &str) -> Result<Vec<TodoList>, BlobError> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_array() {
        return Err(BlobError::NotASequence(kind_of(&value)));
    }
    Ok(serde_json::from_value(value)?)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
