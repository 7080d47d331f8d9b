//! Neighbor payload decoding: `{"neighbors": ["a", "b", ...]}` → node ids.

use serde_json::Value;
use thiserror::Error;

use crate::NodeId;

/// Field holding the neighbor array in a service payload.
pub const NEIGHBORS_FIELD: &str = "neighbors";

/// Payload was not a document of the expected shape. Distinct from "zero neighbors".
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("malformed JSON: {0}")]
    Syntax(#[from] serde_json::Error),
    #[error("expected a JSON object, got {0}")]
    NotAnObject(&'static str),
    #[error("`neighbors` is not an array")]
    NeighborsNotArray,
    #[error("neighbor #{index} is not a string")]
    NeighborNotString { index: usize },
}

fn kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Decode a raw payload into neighbor ids, in payload order.
/// A missing `neighbors` field yields an empty list, not an error.
pub fn decode_neighbors(raw: &[u8]) -> Result<Vec<NodeId>, DecodeError> {
    let doc: Value = serde_json::from_slice(raw)?;
    let obj = match &doc {
        Value::Object(obj) => obj,
        other => return Err(DecodeError::NotAnObject(kind(other))),
    };
    let Some(neighbors) = obj.get(NEIGHBORS_FIELD) else {
        return Ok(Vec::new());
    };
    let arr = neighbors.as_array().ok_or(DecodeError::NeighborsNotArray)?;
    arr.iter()
        .enumerate()
        .map(|(index, v)| {
            v.as_str()
                .map(str::to_string)
                .ok_or(DecodeError::NeighborNotString { index })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_in_order() {
        let got = decode_neighbors(br#"{"node":"A","neighbors":["B","C","B"]}"#).unwrap();
        assert_eq!(got, vec!["B", "C", "B"]);
    }

    #[test]
    fn missing_field_is_empty() {
        assert!(decode_neighbors(b"{}").unwrap().is_empty());
    }

    #[test]
    fn empty_array_is_empty() {
        assert!(decode_neighbors(br#"{"neighbors":[]}"#).unwrap().is_empty());
    }

    #[test]
    fn syntax_error() {
        assert!(matches!(
            decode_neighbors(b"{\"neighbors\": [").unwrap_err(),
            DecodeError::Syntax(_)
        ));
        assert!(matches!(
            decode_neighbors(b"").unwrap_err(),
            DecodeError::Syntax(_)
        ));
    }

    #[test]
    fn shape_errors() {
        assert!(matches!(
            decode_neighbors(b"[\"A\"]").unwrap_err(),
            DecodeError::NotAnObject("an array")
        ));
        assert!(matches!(
            decode_neighbors(br#"{"neighbors":"A"}"#).unwrap_err(),
            DecodeError::NeighborsNotArray
        ));
        assert!(matches!(
            decode_neighbors(br#"{"neighbors":["A",3]}"#).unwrap_err(),
            DecodeError::NeighborNotString { index: 1 }
        ));
    }

    #[test]
    fn keeps_spaces_and_unicode() {
        let got = decode_neighbors(r#"{"neighbors":["Kevin Bacon","Zoë"]}"#.as_bytes()).unwrap();
        assert_eq!(got, vec!["Kevin Bacon", "Zoë"]);
    }
}
