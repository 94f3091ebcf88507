use serde::Serialize;
use serde_json::Value;

/// Uploaded logos must stay below this many bytes.
pub const MAX_LOGO_BYTES: u64 = 5 * 1024 * 1024;

pub fn is_image_type(mime: &str) -> bool {
    mime.trim().to_ascii_lowercase().starts_with("image/")
}

pub fn exceeds_logo_limit(size: u64) -> bool {
    size >= MAX_LOGO_BYTES
}

/// Parses editor text, keeping serde's message for display.
pub fn parse_json(text: &str) -> Result<Value, String> {
    serde_json::from_str(text).map_err(|e| e.to_string())
}

/// Re-indents JSON text with four spaces.
pub fn format_json(text: &str) -> Result<String, String> {
    let value = parse_json(text)?;
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    value.serialize(&mut serializer).map_err(|e| e.to_string())?;
    String::from_utf8(out).map_err(|e| e.to_string())
}

/// Company name used for logo lookups.
pub fn customer_name(value: &Value) -> Option<&str> {
    value
        .get("customer")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_types_are_recognised() {
        assert!(is_image_type("image/png"));
        assert!(is_image_type("IMAGE/SVG+XML"));
        assert!(!is_image_type("application/pdf"));
        assert!(!is_image_type(""));
    }

    #[test]
    fn logo_limit_is_five_mebibytes() {
        assert!(!exceeds_logo_limit(MAX_LOGO_BYTES - 1));
        assert!(exceeds_logo_limit(MAX_LOGO_BYTES));
    }

    #[test]
    fn format_uses_four_space_indent() {
        let formatted = format_json(r#"{"customer":"Acme"}"#).unwrap();
        assert_eq!(formatted, "{\n    \"customer\": \"Acme\"\n}");
    }

    #[test]
    fn parse_errors_keep_serde_message() {
        let err = parse_json("{\"customer\":").unwrap_err();
        assert!(err.contains("line 1"), "{err}");
    }

    #[test]
    fn customer_name_ignores_blank_values() {
        let value = parse_json(r#"{"customer":"  "}"#).unwrap();
        assert_eq!(customer_name(&value), None);
        let value = parse_json(r#"{"customer":"Acme"}"#).unwrap();
        assert_eq!(customer_name(&value), Some("Acme"));
    }
}
