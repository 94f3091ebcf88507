use crate::error::{ClientError, ClientResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

const PREFIX: &str = "data:";

pub fn encode(mime: &str, bytes: &[u8]) -> String {
    format!("{PREFIX}{mime};base64,{}", BASE64.encode(bytes))
}

pub fn is_data_url(text: &str) -> bool {
    text.trim_start().starts_with(PREFIX)
}

/// Splits a base64 `data:` URL into its media type and payload.
pub fn decode(text: &str) -> ClientResult<(String, Vec<u8>)> {
    let rest = text
        .trim()
        .strip_prefix(PREFIX)
        .ok_or_else(|| ClientError::Validation("not a data URL".to_string()))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| ClientError::Validation("data URL has no payload".to_string()))?;
    let mime = meta
        .strip_suffix(";base64")
        .ok_or_else(|| ClientError::Validation("only base64 data URLs are supported".to_string()))?;
    let mime = if mime.is_empty() {
        "text/plain"
    } else {
        mime
    };
    let bytes = BASE64
        .decode(payload)
        .map_err(|e| ClientError::Validation(format!("invalid base64 payload: {e}")))?;
    Ok((mime.to_string(), bytes))
}
