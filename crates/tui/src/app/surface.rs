use super::types::PageEvent;
use agenda_page::{LogoPreview, Notice, PageSurface, SubmitState};
use std::path::Path;
use tokio::sync::{mpsc, oneshot};

/// Forwards controller requests to the UI loop.
///
/// The editor text is captured when the surface is created, which is the
/// moment the user triggered the action.
pub struct ChannelSurface {
    editor_text: String,
    tx: mpsc::UnboundedSender<PageEvent>,
}

impl ChannelSurface {
    pub fn new(editor_text: String, tx: mpsc::UnboundedSender<PageEvent>) -> Self {
        Self { editor_text, tx }
    }

    fn send(&self, event: PageEvent) {
        if self.tx.send(event).is_err() {
            tracing::debug!("Page closed, dropping update");
        }
    }
}

impl PageSurface for ChannelSurface {
    fn editor_text(&self) -> String {
        self.editor_text.clone()
    }

    fn notify(&mut self, notice: Notice) {
        self.send(PageEvent::Notice(notice));
    }

    async fn confirm(&mut self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        self.send(PageEvent::Confirm {
            prompt: prompt.to_string(),
            reply,
        });
        answer.await.unwrap_or(false)
    }

    fn set_submit_state(&mut self, state: SubmitState) {
        self.send(PageEvent::SubmitState(state));
    }

    fn show_logo(&mut self, preview: LogoPreview) {
        self.send(PageEvent::Logo(preview));
    }

    fn show_suggestion(&mut self, url: Option<&str>) {
        self.send(PageEvent::Suggestion(url.map(String::from)));
    }

    fn clear_file_input(&mut self) {
        self.send(PageEvent::ClearFileInput);
    }

    fn navigate(&mut self, url: &str) {
        self.send(PageEvent::Navigate(url.to_string()));
    }

    fn show_download_ready(&mut self, path: &Path) {
        self.send(PageEvent::DownloadReady(path.to_path_buf()));
    }
}
