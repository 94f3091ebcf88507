use crate::error::{ClientError, ClientResult};
use crate::payload::GeneratePayload;
use crate::response::RawResponse;
use crate::types::LogoLookup;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use url::Url;

const USER_AGENT: &str = "agenda-gen/0.1";

/// The two backend calls the page makes.
pub trait Transport: Send + Sync {
    fn generate(
        &self,
        payload: GeneratePayload,
    ) -> impl Future<Output = ClientResult<RawResponse>> + Send;

    fn find_logo(&self, company: &str) -> impl Future<Output = ClientResult<LogoLookup>> + Send;
}

#[derive(Clone)]
pub struct AgendaApi {
    client: Client,
    base_url: Url,
}

impl AgendaApi {
    /// `timeout` of `None` leaves requests bounded only by the transport.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> ClientResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidUrl(format!("{base_url}: {e}")))?;
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(5));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().unwrap_or_else(|_| Client::new());
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolves absolute or server-relative links against the base URL.
    pub fn resolve(&self, link: &str) -> ClientResult<Url> {
        self.base_url
            .join(link)
            .map_err(|e| ClientError::InvalidUrl(format!("{link}: {e}")))
    }

    pub async fn fetch(&self, url: &Url) -> ClientResult<RawResponse> {
        tracing::debug!(%url, "Fetching");
        let response = self.client.get(url.clone()).send().await?;
        RawResponse::read(response).await
    }
}

impl Transport for AgendaApi {
    async fn generate(&self, payload: GeneratePayload) -> ClientResult<RawResponse> {
        let url = self.resolve("/generate")?;
        let logo = payload.logo.as_ref().map(|l| l.source().as_str());
        tracing::info!(%url, logo = ?logo, "Sending generate request");

        let form = payload.into_form()?;
        let response = self.client.post(url).multipart(form).send().await?;
        let raw = RawResponse::read(response).await?;
        tracing::debug!(status = raw.status, content_type = ?raw.content_type, "Generate responded");
        Ok(raw)
    }

    async fn find_logo(&self, company: &str) -> ClientResult<LogoLookup> {
        let company = company.trim();
        if company.is_empty() {
            return Err(ClientError::Validation("Company name is required".to_string()));
        }

        let url = self.resolve("/find-logo")?;
        let response = self
            .client
            .get(url)
            .query(&[("company", company)])
            .send()
            .await?;
        let raw = RawResponse::read(response).await?;

        // The lookup answers JSON even on failure; fall back to the status when it doesn't.
        match serde_json::from_slice::<LogoLookup>(&raw.body) {
            Ok(lookup) => Ok(lookup),
            Err(_) if !raw.is_success() => Err(ClientError::Server {
                status: raw.status,
                message: format!("Logo lookup failed with status {}", raw.status),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::LogoPart;
    use crate::response::{classify, GenerateResponse};
    use crate::types::LogoFile;
    use axum::extract::{Multipart, Query};
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::collections::HashMap;
    use tokio::net::TcpListener;

    async fn generate_stub(mut multipart: Multipart) -> impl IntoResponse {
        let mut fields = Vec::new();
        while let Ok(Some(field)) = multipart.next_field().await {
            let name = field.name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(String::from);
            let data = field.bytes().await.unwrap_or_default();
            fields.push((name, content_type, data));
        }

        let json = fields.iter().find(|(name, _, _)| name == "json_data");
        let Some((_, _, json)) = json else {
            return (StatusCode::BAD_REQUEST, "Invalid JSON data").into_response();
        };
        if serde_json::from_slice::<serde_json::Value>(json).is_err() {
            return (StatusCode::BAD_REQUEST, "Error decoding JSON").into_response();
        }

        let summary = fields
            .iter()
            .map(|(name, ct, data)| format!("{name}:{}:{}", ct.as_deref().unwrap_or("-"), data.len()))
            .collect::<Vec<_>>()
            .join(",");
        (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
                ),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"2024-10-01-AcmeAgenda.docx\"",
                ),
            ],
            summary,
        )
            .into_response()
    }

    async fn find_logo_stub(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
        match params.get("company").map(String::as_str) {
            Some("Acme Corp") => Json(serde_json::json!({
                "success": true,
                "logoUrl": "https://logos.example/acme.svg"
            }))
            .into_response(),
            _ => (
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({ "success": false, "error": "lookup failed" })),
            )
                .into_response(),
        }
    }

    async fn spawn_stub() -> String {
        let app = Router::new()
            .route("/generate", post(generate_stub))
            .route("/find-logo", get(find_logo_stub))
            .route("/empty", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn generate_posts_multipart_and_returns_document() {
        let base = spawn_stub().await;
        let api = AgendaApi::new(&base, None).unwrap();
        let logo = LogoFile::new("acme.png", "image/png", vec![0u8; 16]);
        let payload = GeneratePayload::new(r#"{"customer":"Acme"}"#, Some(LogoPart::Uploaded(logo)));

        let raw = api.generate(payload).await.unwrap();
        let summary = raw.text();
        match classify(raw).unwrap() {
            GenerateResponse::File { filename, .. } => {
                assert_eq!(filename, "2024-10-01-AcmeAgenda.docx")
            }
            other => panic!("expected file, got {other:?}"),
        }
        assert_eq!(
            summary,
            "json_data:-:19,logo:image/png:16,logoSource:-:8"
        );
    }

    #[tokio::test]
    async fn generate_surfaces_server_text_on_failure() {
        let base = spawn_stub().await;
        let api = AgendaApi::new(&base, None).unwrap();

        let raw = api
            .generate(GeneratePayload::new("not json", None))
            .await
            .unwrap();
        let err = classify(raw).unwrap_err();
        assert_eq!(err.to_string(), "Error decoding JSON");
    }

    #[tokio::test]
    async fn find_logo_returns_suggestion() {
        let base = spawn_stub().await;
        let api = AgendaApi::new(&base, None).unwrap();

        let lookup = api.find_logo("Acme Corp").await.unwrap();
        assert!(lookup.success);
        assert_eq!(lookup.logo_url.as_deref(), Some("https://logos.example/acme.svg"));
    }

    #[tokio::test]
    async fn find_logo_reads_json_error_body() {
        let base = spawn_stub().await;
        let api = AgendaApi::new(&base, None).unwrap();

        let lookup = api.find_logo("unknown").await.unwrap();
        assert!(!lookup.success);
        assert_eq!(lookup.error.as_deref(), Some("lookup failed"));
    }

    #[tokio::test]
    async fn find_logo_requires_company() {
        let api = AgendaApi::new("http://127.0.0.1:9", None).unwrap();
        let err = api.find_logo("   ").await.unwrap_err();
        assert!(matches!(err, ClientError::Validation(_)));
    }

    #[tokio::test]
    async fn fetch_keeps_status_of_empty_response() {
        let base = spawn_stub().await;
        let api = AgendaApi::new(&base, None).unwrap();
        let raw = api.fetch(&api.resolve("/empty").unwrap()).await.unwrap();
        assert_eq!(raw.status, 503);
        assert!(raw.body.is_empty());
    }

    #[test]
    fn resolve_handles_relative_and_absolute_links() {
        let api = AgendaApi::new("http://localhost:5000/app/", None).unwrap();
        assert_eq!(
            api.resolve("/files/out.docx").unwrap().as_str(),
            "http://localhost:5000/files/out.docx"
        );
        assert_eq!(
            api.resolve("https://blob.example/out.docx?sig=1").unwrap().as_str(),
            "https://blob.example/out.docx?sig=1"
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(matches!(
            AgendaApi::new("not a url", None),
            Err(ClientError::InvalidUrl(_))
        ));
    }
}
