use crate::download;
use crate::state::{ControllerState, LogoSelection, SubmitState};
use crate::surface::{LogoPreview, Notice, PageSurface};
use agenda_client::response::{classify, GenerateResponse};
use agenda_client::validate::{self, MAX_LOGO_BYTES};
use agenda_client::{ClientError, ClientResult, GeneratePayload, LogoFile, Transport};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, error, info, warn};

const NOT_AN_IMAGE_PROMPT: &str = "The selected logo file may not be an image. Continue anyway?";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter JSON data")]
    MissingInput,

    #[error("Invalid JSON format: {0}")]
    InvalidJson(String),

    #[error("Logo file is too large. Please select an image under {}MB.", MAX_LOGO_BYTES / (1024 * 1024))]
    LogoTooLarge,
}

/// How a call to [`DocumentController::submit`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Stopped before any request was sent.
    Rejected(ValidationError),
    /// The user declined to send a logo that does not look like an image.
    Declined,
    Downloaded(PathBuf),
    Redirected(String),
    /// The server or the connection reported an error.
    Failed(String),
    Unexpected(String),
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Downloaded(_) | SubmitOutcome::Redirected(_))
    }
}

enum Delivery {
    Saved(PathBuf),
    Navigated(String),
}

/// Turns "generate the document now" into one request and folds the result
/// back into page state.
pub struct DocumentController<T> {
    transport: T,
    downloads: PathBuf,
    state: ControllerState,
}

impl<T: Transport> DocumentController<T> {
    pub fn new(transport: T, downloads: impl Into<PathBuf>) -> Self {
        Self {
            transport,
            downloads: downloads.into(),
            state: ControllerState::default(),
        }
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn downloads_dir(&self) -> &Path {
        &self.downloads
    }

    pub async fn submit<S: PageSurface>(&mut self, surface: &mut S) -> SubmitOutcome {
        let payload = match self.prepare(surface).await {
            Ok(payload) => payload,
            Err(outcome) => return outcome,
        };

        self.state.in_flight = true;
        surface.set_submit_state(SubmitState::Busy);

        let settled = AssertUnwindSafe(self.dispatch(payload, surface))
            .catch_unwind()
            .await;

        self.state.in_flight = false;
        surface.set_submit_state(SubmitState::Idle);

        match settled {
            Ok(Ok(delivery)) => {
                self.forget_logo(surface);
                match delivery {
                    Delivery::Saved(path) => SubmitOutcome::Downloaded(path),
                    Delivery::Navigated(url) => SubmitOutcome::Redirected(url),
                }
            }
            Ok(Err(e)) if e.is_server_error() => {
                warn!("Error generating document: {e}");
                surface.notify(Notice::error(format!("Error generating document: {e}")));
                SubmitOutcome::Failed(e.to_string())
            }
            Ok(Err(e)) => {
                error!("Unexpected error while generating document: {e}");
                surface.notify(Notice::error(format!("An unexpected error occurred: {e}")));
                SubmitOutcome::Unexpected(e.to_string())
            }
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!("Generate request panicked: {message}");
                surface.notify(Notice::error(format!(
                    "An unexpected error occurred: {message}"
                )));
                SubmitOutcome::Unexpected(message)
            }
        }
    }

    async fn prepare<S: PageSurface>(
        &mut self,
        surface: &mut S,
    ) -> Result<GeneratePayload, SubmitOutcome> {
        let json_data = surface.editor_text();
        if json_data.trim().is_empty() {
            return Err(self.reject(surface, ValidationError::MissingInput));
        }
        if let Err(message) = validate::parse_json(&json_data) {
            return Err(self.reject(surface, ValidationError::InvalidJson(message)));
        }

        if let Some(LogoSelection::Uploaded(file)) = &self.state.logo {
            if !file.is_image() {
                warn!(mime = %file.mime, "Logo file does not appear to be an image");
                if !surface.confirm(NOT_AN_IMAGE_PROMPT).await {
                    debug!("Submission declined at the logo type check");
                    return Err(SubmitOutcome::Declined);
                }
            }
            if validate::exceeds_logo_limit(file.size()) {
                self.forget_logo(surface);
                return Err(self.reject(surface, ValidationError::LogoTooLarge));
            }
        }

        let logo = self.state.logo.as_ref().map(LogoSelection::to_part);
        Ok(GeneratePayload::new(json_data, logo))
    }

    async fn dispatch<S: PageSurface>(
        &self,
        payload: GeneratePayload,
        surface: &mut S,
    ) -> ClientResult<Delivery> {
        let raw = self.transport.generate(payload).await?;
        match classify(raw)? {
            GenerateResponse::Redirect { file_url } => {
                info!(%file_url, "Document hosted remotely, navigating");
                surface.navigate(&file_url);
                Ok(Delivery::Navigated(file_url))
            }
            GenerateResponse::File { filename, bytes } => {
                let path = download::save(&self.downloads, &filename, &bytes).await?;
                surface.show_download_ready(&path);
                Ok(Delivery::Saved(path))
            }
        }
    }

    fn reject<S: PageSurface>(&self, surface: &mut S, err: ValidationError) -> SubmitOutcome {
        debug!("Submission rejected: {err}");
        surface.notify(Notice::error(err.to_string()));
        SubmitOutcome::Rejected(err)
    }

    fn forget_logo<S: PageSurface>(&mut self, surface: &mut S) {
        self.state.logo = None;
        surface.clear_file_input();
        surface.show_logo(LogoPreview::Empty);
    }

    /// Handles a file picked in the logo input.
    pub fn select_logo_file<S: PageSurface>(
        &mut self,
        file: LogoFile,
        surface: &mut S,
    ) -> Result<(), ValidationError> {
        if validate::exceeds_logo_limit(file.size()) {
            warn!(size = file.size(), "Logo rejected, too large");
            if matches!(self.state.logo, Some(LogoSelection::Uploaded(_))) {
                self.forget_logo(surface);
            } else {
                surface.clear_file_input();
            }
            let err = ValidationError::LogoTooLarge;
            surface.notify(Notice::error(err.to_string()));
            return Err(err);
        }
        if !file.is_image() {
            surface.notify(Notice::warning(format!(
                "{} does not look like an image ({}). You will be asked to confirm before generating.",
                file.name, file.mime
            )));
        }

        info!(name = %file.name, size = file.size(), "Logo selected");
        self.state.suggestion = None;
        surface.show_suggestion(None);
        self.state.logo = Some(LogoSelection::Uploaded(file));
        surface.show_logo(LogoPreview::of(self.state.logo.as_ref()));
        Ok(())
    }

    /// Handles the user emptying the logo input.
    pub fn clear_logo<S: PageSurface>(&mut self, surface: &mut S) {
        self.forget_logo(surface);
    }

    /// Looks up a logo for `company`, or for the editor's `customer` when none is given.
    pub async fn suggest_logo<S: PageSurface>(
        &mut self,
        company: Option<&str>,
        surface: &mut S,
    ) -> Option<String> {
        let company = match company.map(str::trim).filter(|c| !c.is_empty()) {
            Some(company) => company.to_string(),
            None => {
                let text = surface.editor_text();
                let from_editor = validate::parse_json(&text)
                    .ok()
                    .and_then(|value| validate::customer_name(&value).map(String::from));
                match from_editor {
                    Some(company) => company,
                    None => {
                        surface.notify(Notice::warning("Please enter a company name"));
                        return None;
                    }
                }
            }
        };

        debug!(%company, "Looking up logo");
        match self.transport.find_logo(&company).await {
            Ok(lookup) => match lookup.logo_url.filter(|_| lookup.success) {
                Some(url) => {
                    self.state.suggestion = Some(url.clone());
                    surface.show_suggestion(Some(&url));
                    Some(url)
                }
                None => {
                    let reason = lookup
                        .error
                        .unwrap_or_else(|| "no logo found".to_string());
                    surface.notify(Notice::warning(format!(
                        "No logo found for {company}: {reason}"
                    )));
                    None
                }
            },
            Err(ClientError::Validation(message)) => {
                surface.notify(Notice::warning(message));
                None
            }
            Err(e) => {
                warn!("Logo lookup failed: {e}");
                surface.notify(Notice::error(format!("Error finding logo: {e}")));
                None
            }
        }
    }

    /// Makes the pending suggestion the logo; drops any uploaded file.
    pub fn accept_suggestion<S: PageSurface>(&mut self, surface: &mut S) -> bool {
        let Some(url) = self.state.suggestion.take() else {
            return false;
        };
        surface.show_suggestion(None);
        surface.clear_file_input();
        self.state.logo = Some(LogoSelection::Suggested { url });
        surface.show_logo(LogoPreview::of(self.state.logo.as_ref()));
        true
    }

    pub fn reject_suggestion<S: PageSurface>(&mut self, surface: &mut S) {
        self.state.suggestion = None;
        surface.show_suggestion(None);
        if matches!(self.state.logo, Some(LogoSelection::Suggested { .. })) {
            self.state.logo = None;
            surface.show_logo(LogoPreview::Empty);
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown error".to_string()
    }
}
