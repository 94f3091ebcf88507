use regex::Regex;
use std::sync::OnceLock;

pub const DEFAULT_FILENAME: &str = "agenda.docx";

fn filename_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r#"(?i)filename="(.+?)""#).unwrap())
}

/// Extracts `filename="<name>"` from a `Content-Disposition` header value.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    filename_pattern()
        .captures(header)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

pub fn filename_or_default(header: Option<&str>) -> String {
    header
        .and_then(filename_from_disposition)
        .unwrap_or_else(|| DEFAULT_FILENAME.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_quoted_filename() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="agenda-2024.docx""#).as_deref(),
            Some("agenda-2024.docx")
        );
    }

    #[test]
    fn matching_is_case_insensitive_and_stops_at_first_quote() {
        assert_eq!(
            filename_from_disposition(r#"attachment; FILENAME="a.docx"; x="b""#).as_deref(),
            Some("a.docx")
        );
    }

    #[test]
    fn unquoted_or_missing_names_fall_back() {
        assert_eq!(filename_or_default(Some("attachment; filename=a.docx")), DEFAULT_FILENAME);
        assert_eq!(filename_or_default(Some("inline")), DEFAULT_FILENAME);
        assert_eq!(filename_or_default(None), DEFAULT_FILENAME);
    }
}
