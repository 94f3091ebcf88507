use crate::data_url;
use crate::error::ClientResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoSource {
    Uploaded,
    Suggested,
}

impl LogoSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogoSource::Uploaded => "uploaded",
            LogoSource::Suggested => "suggested",
        }
    }
}

/// A logo picked from the local filesystem.
#[derive(Debug, Clone, PartialEq)]
pub struct LogoFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl LogoFile {
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes,
        }
    }

    pub async fn read(path: &Path) -> ClientResult<Self> {
        let bytes = tokio::fs::read(path).await?;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("logo")
            .to_string();
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        tracing::debug!(%name, %mime, size = bytes.len(), "Read logo file");
        Ok(Self { name, mime, bytes })
    }

    /// Builds a logo from a pasted base64 `data:` URL.
    pub fn from_data_url(text: &str) -> ClientResult<Self> {
        let (mime, bytes) = data_url::decode(text)?;
        let ext = mime_guess::get_mime_extensions_str(&mime)
            .and_then(|exts| exts.first().copied())
            .unwrap_or("bin");
        Ok(Self::new(format!("logo.{ext}"), mime, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_image(&self) -> bool {
        crate::validate::is_image_type(&self.mime)
    }

    pub fn data_url(&self) -> String {
        data_url::encode(&self.mime, &self.bytes)
    }
}

/// Body of `GET /find-logo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoLookup {
    #[serde(default)]
    pub success: bool,
    pub logo_url: Option<String>,
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub additional_results: Vec<String>,
    pub error: Option<String>,
}

/// JSON answer of `/generate` when the document is hosted elsewhere.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileLink {
    #[serde(rename = "fileUrl", alias = "downloadUrl")]
    pub file_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgendaItem {
    pub time: String,
    pub owner: String,
    pub topic: String,
    pub description: String,
}

/// Shape of the document the generator renders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agenda {
    pub customer: String,
    pub date: String,
    pub title: String,
    pub summary: String,
    #[serde(default)]
    pub primaries: Vec<Person>,
    #[serde(default)]
    pub supporting: Vec<Person>,
    #[serde(default)]
    pub agenda_items: Vec<AgendaItem>,
}

impl Agenda {
    pub fn sample() -> Self {
        Self {
            customer: "Contoso".to_string(),
            date: "2024-10-01".to_string(),
            title: "Quarterly Planning".to_string(),
            summary: "Review of last quarter and goals for the next one.".to_string(),
            primaries: vec![
                Person {
                    name: "Primary One".to_string(),
                    role: "Account Lead".to_string(),
                },
                Person {
                    name: "Primary Two".to_string(),
                    role: "Solution Architect".to_string(),
                },
            ],
            supporting: vec![Person {
                name: "Supporting One".to_string(),
                role: "Program Manager".to_string(),
            }],
            agenda_items: vec![
                AgendaItem {
                    time: "10:00 AM".to_string(),
                    owner: "Primary One".to_string(),
                    topic: "Welcome".to_string(),
                    description: "Introductions and goals for the day.".to_string(),
                },
                AgendaItem {
                    time: "11:00 AM".to_string(),
                    owner: "Primary Two".to_string(),
                    topic: "Roadmap".to_string(),
                    description: "Walkthrough of the upcoming roadmap.".to_string(),
                },
            ],
        }
    }
}
