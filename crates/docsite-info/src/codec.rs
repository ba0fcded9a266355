//! Encoding of module info for embedding in generated JavaScript.
//!
//! The payload is the UTF-8 JSON serialization written as decimal byte values
//! separated by commas. It contains only digits and commas, so it can sit
//! inside a single-quoted string literal without any escaping.

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::error::Result;
use crate::model::SubmoduleInfo;

/// Browser-side decoder emitted into generated entries.
///
/// Any failure yields an empty object.
pub const DECODER_SOURCE: &str = r#"function decodeInfo(infoStr) {
  try {
    const decoder = new TextDecoder();
    const jsonStr = decoder.decode(new Uint8Array(infoStr.split(',')));
    return JSON.parse(jsonStr);
  } catch (e) {}

  return {};
}"#;

/// Encode any serializable value.
pub fn encode_info<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value)?;
    let mut encoded = String::with_capacity(json.len() * 4);
    for (index, byte) in json.iter().enumerate() {
        if index > 0 {
            encoded.push(',');
        }
        encoded.push_str(&byte.to_string());
    }
    Ok(encoded)
}

/// Decode an encoded string back to JSON; malformed input yields `{}`.
pub fn decode_info(encoded: &str) -> Value {
    decode_bytes(encoded)
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_else(|| Value::Object(Default::default()))
}

/// Decode an encoded chunk tree; malformed input yields an empty list.
pub fn decode_entries(encoded: &str) -> Vec<SubmoduleInfo> {
    decode_bytes(encoded)
        .and_then(|bytes| serde_json::from_slice(&bytes).ok())
        .unwrap_or_default()
}

fn decode_bytes(encoded: &str) -> Option<Vec<u8>> {
    if encoded.is_empty() {
        return Some(Vec::new());
    }
    encoded
        .split(',')
        .map(|part| part.trim().parse::<u8>().ok())
        .collect::<Option<Vec<_>>>()
        .or_else(|| {
            debug!(len = encoded.len(), "module info is not a byte list");
            None
        })
}
