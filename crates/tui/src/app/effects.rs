use super::*;
use agenda_client::{ClientError, LogoFile};
use agenda_page::download;
use agenda_page::SubmitOutcome;
use std::path::PathBuf;

impl App {
    /// Hands the controller to a background task for one submission.
    pub(super) fn start_submit(&mut self) {
        if self.submit_state.is_disabled() {
            return;
        }
        let Some(mut controller) = self.controller.take() else {
            self.push_notice(Notice::info("A request is already in progress"));
            return;
        };

        self.clear_error();
        self.download = None;
        self.busy = Some(BusyTask::Submitting);
        let mut surface = self.surface();
        self.spawn_app_task(async move {
            let outcome = controller.submit(&mut surface).await;
            AppAsyncEvent::ControllerReturned {
                controller,
                result: TaskResult::Submitted(outcome),
            }
        });
    }

    pub(super) fn start_lookup(&mut self, company: Option<String>) {
        let Some(mut controller) = self.controller.take() else {
            self.push_notice(Notice::info("A request is already in progress"));
            return;
        };

        self.busy = Some(BusyTask::LookingUpLogo(company.clone().unwrap_or_default()));
        let mut surface = self.surface();
        self.spawn_app_task(async move {
            let url = controller
                .suggest_logo(company.as_deref(), &mut surface)
                .await;
            AppAsyncEvent::ControllerReturned {
                controller,
                result: TaskResult::LogoSuggested(url),
            }
        });
    }

    pub(super) fn load_logo_path(&mut self, path: String) {
        self.busy = Some(BusyTask::LoadingLogo(path.clone()));
        self.spawn_app_task(async move {
            match LogoFile::read(std::path::Path::new(&path)).await {
                Ok(file) => AppAsyncEvent::LogoFileRead {
                    path,
                    file: Some(file),
                    error: None,
                },
                Err(e) => AppAsyncEvent::LogoFileRead {
                    path,
                    file: None,
                    error: Some(e.to_string()),
                },
            }
        });
    }

    /// Fetches the document behind a link returned by the server.
    pub(super) fn follow_link(&mut self, link: String) {
        let api = self.api.clone();
        let dir = self.config.downloads.resolve_dir();
        self.spawn_app_task(async move {
            let result: Result<PathBuf, ClientError> = async {
                let url = api.resolve(&link)?;
                let raw = api.fetch(&url).await?;
                if !raw.is_success() {
                    return Err(ClientError::Server {
                        status: raw.status,
                        message: format!("Download failed with status {}", raw.status),
                    });
                }
                let name = download::filename_from_url(&url);
                Ok(download::save(&dir, &name, &raw.body).await?)
            }
            .await;

            match result {
                Ok(path) => AppAsyncEvent::LinkFollowed {
                    url: link,
                    path: Some(path),
                    error: None,
                },
                Err(e) => AppAsyncEvent::LinkFollowed {
                    url: link,
                    path: None,
                    error: Some(e.to_string()),
                },
            }
        });
    }

    /// Drains controller updates and finished tasks. Called once per frame.
    pub fn process_events(&mut self) {
        while let Ok(event) = self.page_rx.try_recv() {
            self.apply_page_event(event);
        }
        while let Ok(event) = self.app_async_rx.try_recv() {
            self.apply_async_event(event);
        }
    }

    fn apply_page_event(&mut self, event: PageEvent) {
        match event {
            PageEvent::Notice(notice) => self.push_notice(notice),
            PageEvent::Confirm { prompt, reply } => {
                self.pending_confirm = Some(PendingConfirm { prompt, reply });
            }
            PageEvent::SubmitState(state) => self.submit_state = state,
            PageEvent::Logo(preview) => self.logo_preview = preview,
            PageEvent::Suggestion(url) => self.suggestion = url,
            PageEvent::ClearFileInput => self.logo_input.clear(),
            PageEvent::Navigate(url) => {
                tracing::info!(%url, "Server returned a document link");
                self.push_notice(Notice::info(format!("Document ready at {url}, downloading...")));
                self.follow_link(url);
            }
            PageEvent::DownloadReady(path) => self.note_download(&path),
        }
    }

    fn apply_async_event(&mut self, event: AppAsyncEvent) {
        match event {
            AppAsyncEvent::ControllerReturned { controller, result } => {
                self.controller = Some(controller);
                self.busy = None;
                match result {
                    TaskResult::Submitted(outcome) => self.finish_submit(outcome),
                    TaskResult::LogoSuggested(Some(_)) => {
                        self.push_notice(Notice::info(
                            "Logo found. Ctrl+Y to use it, Ctrl+N to dismiss.",
                        ));
                    }
                    TaskResult::LogoSuggested(None) => {}
                }
                if let Some(file) = self.pending_logo.take() {
                    self.select_logo(file);
                }
            }
            AppAsyncEvent::LogoFileRead { path, file, error } => {
                if matches!(self.busy, Some(BusyTask::LoadingLogo(_))) {
                    self.busy = None;
                }
                match (file, error) {
                    (Some(file), _) => self.select_logo(file),
                    (None, error) => {
                        let reason = error.unwrap_or_else(|| "unknown error".to_string());
                        self.report_error(&format!("Could not read {path}"), &reason);
                        self.push_notice(Notice::error(format!("Could not read {path}: {reason}")));
                    }
                }
            }
            AppAsyncEvent::LinkFollowed { url, path, error } => match (path, error) {
                (Some(path), _) => self.note_download(&path),
                (None, error) => {
                    let reason = error.unwrap_or_else(|| "unknown error".to_string());
                    self.push_notice(Notice::error(format!(
                        "Could not download {url}: {reason}"
                    )));
                }
            },
        }
    }

    fn finish_submit(&mut self, outcome: SubmitOutcome) {
        match &outcome {
            SubmitOutcome::Declined => self.push_notice(Notice::info("Generation cancelled")),
            SubmitOutcome::Downloaded(_) | SubmitOutcome::Redirected(_) => self.clear_error(),
            SubmitOutcome::Rejected(_) | SubmitOutcome::Failed(_) | SubmitOutcome::Unexpected(_) => {
                tracing::debug!(?outcome, "Submission did not produce a document");
            }
        }
    }

    fn note_download(&mut self, path: &std::path::Path) {
        self.download = Some(DownloadNote {
            label: path.display().to_string(),
            at: chrono::Local::now(),
        });
        self.push_notice(Notice::info(format!("Saved {}", path.display())));
    }
}
