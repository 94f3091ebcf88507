use crate::error::ClientResult;
use crate::types::{LogoFile, LogoSource};
use reqwest::multipart::{Form, Part};

pub const FIELD_JSON: &str = "json_data";
pub const FIELD_LOGO: &str = "logo";
pub const FIELD_LOGO_URL: &str = "logoUrl";
pub const FIELD_LOGO_SOURCE: &str = "logoSource";

/// The logo travels either as the file itself or as the URL of a suggestion.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoPart {
    Uploaded(LogoFile),
    Suggested { url: String },
}

impl LogoPart {
    pub fn source(&self) -> LogoSource {
        match self {
            LogoPart::Uploaded(_) => LogoSource::Uploaded,
            LogoPart::Suggested { .. } => LogoSource::Suggested,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    File { name: String, mime: String, len: usize },
}

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratePayload {
    pub json_data: String,
    pub logo: Option<LogoPart>,
}

impl GeneratePayload {
    pub fn new(json_data: impl Into<String>, logo: Option<LogoPart>) -> Self {
        Self {
            json_data: json_data.into(),
            logo,
        }
    }

    /// Field listing in send order, without the file bytes.
    pub fn fields(&self) -> Vec<(&'static str, FieldValue)> {
        let mut fields = vec![(FIELD_JSON, FieldValue::Text(self.json_data.clone()))];
        match &self.logo {
            Some(LogoPart::Uploaded(file)) => {
                fields.push((
                    FIELD_LOGO,
                    FieldValue::File {
                        name: file.name.clone(),
                        mime: file.mime.clone(),
                        len: file.bytes.len(),
                    },
                ));
                fields.push((
                    FIELD_LOGO_SOURCE,
                    FieldValue::Text(LogoSource::Uploaded.as_str().to_string()),
                ));
            }
            Some(LogoPart::Suggested { url }) => {
                fields.push((FIELD_LOGO_URL, FieldValue::Text(url.clone())));
                fields.push((
                    FIELD_LOGO_SOURCE,
                    FieldValue::Text(LogoSource::Suggested.as_str().to_string()),
                ));
            }
            None => {}
        }
        fields
    }

    pub fn into_form(self) -> ClientResult<Form> {
        let mut form = Form::new().text(FIELD_JSON, self.json_data);
        match self.logo {
            Some(LogoPart::Uploaded(file)) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str(&file.mime)?;
                form = form
                    .part(FIELD_LOGO, part)
                    .text(FIELD_LOGO_SOURCE, LogoSource::Uploaded.as_str());
            }
            Some(LogoPart::Suggested { url }) => {
                form = form
                    .text(FIELD_LOGO_URL, url)
                    .text(FIELD_LOGO_SOURCE, LogoSource::Suggested.as_str());
            }
            None => {}
        }
        Ok(form)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(payload: &GeneratePayload) -> Vec<&'static str> {
        payload.fields().into_iter().map(|(name, _)| name).collect()
    }

    #[test]
    fn json_only_payload_has_single_field() {
        let payload = GeneratePayload::new("{}", None);
        assert_eq!(names(&payload), vec![FIELD_JSON]);
    }

    #[test]
    fn uploaded_logo_is_sent_as_file_without_url() {
        let logo = LogoFile::new("acme.png", "image/png", vec![1, 2, 3]);
        let payload = GeneratePayload::new("{}", Some(LogoPart::Uploaded(logo)));
        let fields = payload.fields();

        assert_eq!(names(&payload), vec![FIELD_JSON, FIELD_LOGO, FIELD_LOGO_SOURCE]);
        assert_eq!(
            fields[1].1,
            FieldValue::File {
                name: "acme.png".to_string(),
                mime: "image/png".to_string(),
                len: 3
            }
        );
        assert_eq!(fields[2].1, FieldValue::Text("uploaded".to_string()));
    }

    #[test]
    fn suggested_logo_is_sent_as_url_without_file() {
        let payload = GeneratePayload::new(
            "{}",
            Some(LogoPart::Suggested {
                url: "https://logos.example/acme.svg".to_string(),
            }),
        );
        let fields = payload.fields();

        assert_eq!(names(&payload), vec![FIELD_JSON, FIELD_LOGO_URL, FIELD_LOGO_SOURCE]);
        assert_eq!(fields[2].1, FieldValue::Text("suggested".to_string()));
    }
}
