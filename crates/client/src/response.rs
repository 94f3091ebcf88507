use crate::disposition;
use crate::error::{ClientError, ClientResult};
use crate::types::FileLink;
use reqwest::header::{HeaderName, CONTENT_DISPOSITION, CONTENT_TYPE};

/// A fully read HTTP response, detached from the connection.
#[derive(Debug, Clone, Default)]
pub struct RawResponse {
    pub status: u16,
    pub reason: Option<String>,
    pub content_type: Option<String>,
    pub content_disposition: Option<String>,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub async fn read(response: reqwest::Response) -> ClientResult<Self> {
        let status = response.status();
        let (content_type, content_disposition) = {
            let headers = response.headers();
            let header = |name: HeaderName| {
                headers
                    .get(name)
                    .and_then(|v| v.to_str().ok())
                    .map(String::from)
            };
            (header(CONTENT_TYPE), header(CONTENT_DISPOSITION))
        };
        let body = response.bytes().await?.to_vec();

        Ok(Self {
            status: status.as_u16(),
            reason: status.canonical_reason().map(String::from),
            content_type,
            content_disposition,
            body,
        })
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_json(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .map(|essence| essence.trim().eq_ignore_ascii_case("application/json"))
            .unwrap_or(false)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// What a successful `/generate` call produced.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateResponse {
    Redirect { file_url: String },
    File { filename: String, bytes: Vec<u8> },
}

pub fn classify(raw: RawResponse) -> ClientResult<GenerateResponse> {
    if !raw.is_success() {
        let text = raw.text();
        let message = if text.trim().is_empty() {
            format!(
                "Server returned {}: {}",
                raw.status,
                raw.reason.as_deref().unwrap_or("")
            )
            .trim_end()
            .to_string()
        } else {
            text.trim().to_string()
        };
        return Err(ClientError::Server {
            status: raw.status,
            message,
        });
    }

    if raw.is_json() {
        let link: FileLink = serde_json::from_slice(&raw.body)?;
        return Ok(GenerateResponse::Redirect {
            file_url: link.file_url,
        });
    }

    let filename = disposition::filename_or_default(raw.content_disposition.as_deref());
    tracing::debug!(%filename, size = raw.body.len(), "Received document");
    Ok(GenerateResponse::File {
        filename,
        bytes: raw.body,
    })
}
