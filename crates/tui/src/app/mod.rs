use crate::config::Config;
use crate::editor::EditorState;
use crate::input::InputState;
use crate::keybinds::Keybinds;
use crate::ui::layout::LayoutState;
use crate::ui::panel::PanelType;
use agenda_client::{Agenda, AgendaApi};
use agenda_page::{DocumentController, LogoPreview, Notice, NoticeLevel, SubmitState};
use anyhow::Result;
use ratatui::crossterm::event::{
    Event, KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;
use ratatui::Frame;
use std::collections::VecDeque;
use std::future::Future;
use tokio::sync::mpsc;

mod actions;
mod effects;
mod input;
mod render;
mod state;
mod surface;
mod types;

pub use state::App;
pub use surface::ChannelSurface;
pub use types::{
    AppAsyncEvent, BusyTask, Controller, DownloadNote, Focus, PageEvent, PendingConfirm,
    TaskResult,
};

const MAX_NOTICES: usize = 5;

impl App {
    pub(super) fn report_error(&mut self, context: &str, error: impl std::fmt::Display) {
        let message = format!("{context}: {error}");
        self.last_error = Some(message.clone());
        tracing::warn!("{message}");
    }

    pub(super) fn clear_error(&mut self) {
        self.last_error = None;
        self.show_error_details = false;
    }

    pub(super) fn push_notice(&mut self, notice: Notice) {
        if notice.level == NoticeLevel::Error {
            self.last_error = Some(notice.message.clone());
        }
        self.notices.push_back(notice);
        while self.notices.len() > MAX_NOTICES {
            self.notices.pop_front();
        }
    }

    pub(super) fn spawn_app_task<F>(&self, future: F)
    where
        F: Future<Output = AppAsyncEvent> + Send + 'static,
    {
        let tx = self.app_async_tx.clone();
        tokio::spawn(async move {
            let event = future.await;
            let _ = tx.send(event);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agenda_client::LogoFile;
    use agenda_page::SubmitOutcome;

    fn test_app() -> App {
        let dir = std::env::temp_dir().join("agenda-tui-tests");
        let mut config = Config::default();
        config.downloads.dir = dir.to_string_lossy().into_owned();
        App::new(config).unwrap()
    }

    #[test]
    fn starts_with_sample_agenda_and_idle_button() {
        let app = test_app();
        assert!(app.editor.text().contains("\"customer\": \"Contoso\""));
        assert!(app.can_submit());
        assert_eq!(app.submit_state.label(), "Generate Agenda");
    }

    #[test]
    fn page_events_update_the_screen() {
        let mut app = test_app();
        app.page_tx
            .send(PageEvent::SubmitState(SubmitState::Busy))
            .unwrap();
        app.page_tx
            .send(PageEvent::Notice(Notice::error("Error generating document: boom")))
            .unwrap();
        app.page_tx
            .send(PageEvent::Suggestion(Some("https://logo.example/a.png".to_string())))
            .unwrap();

        app.process_events();

        assert!(!app.can_submit());
        assert_eq!(app.notices.len(), 1);
        assert_eq!(
            app.last_error.as_deref(),
            Some("Error generating document: boom")
        );
        assert_eq!(app.suggestion.as_deref(), Some("https://logo.example/a.png"));
    }

    #[test]
    fn clear_file_input_empties_logo_field() {
        let mut app = test_app();
        app.logo_input.handle_paste("/tmp/logo.png");
        app.page_tx.send(PageEvent::ClearFileInput).unwrap();
        app.process_events();
        assert_eq!(app.logo_input.value(), "");
    }

    #[test]
    fn confirm_request_becomes_pending_and_answers() {
        let mut app = test_app();
        let (reply, mut answer) = tokio::sync::oneshot::channel();
        app.page_tx
            .send(PageEvent::Confirm {
                prompt: "Continue anyway?".to_string(),
                reply,
            })
            .unwrap();
        app.process_events();
        assert!(app.pending_confirm.is_some());

        app.handle_event(Event::Key(KeyEvent::new(
            KeyCode::Char('y'),
            KeyModifiers::NONE,
        )))
        .unwrap();
        assert!(app.pending_confirm.is_none());
        assert_eq!(answer.try_recv(), Ok(true));
    }

    #[test]
    fn returned_controller_reenables_generate() {
        let mut app = test_app();
        let controller = app.controller.take().unwrap();
        app.busy = Some(BusyTask::Submitting);
        assert!(!app.can_submit());

        app.app_async_tx
            .send(AppAsyncEvent::ControllerReturned {
                controller,
                result: TaskResult::Submitted(SubmitOutcome::Failed("boom".to_string())),
            })
            .unwrap();
        app.process_events();

        assert!(app.busy.is_none());
        assert!(app.can_submit());
    }

    #[test]
    fn data_url_in_logo_field_selects_logo() {
        let mut app = test_app();
        let file = LogoFile::new("logo.png", "image/png", vec![1, 2, 3]);
        app.logo_input.handle_paste(&file.data_url());
        app.commit_logo_input();
        app.process_events();

        assert!(matches!(app.logo_preview, LogoPreview::Uploaded { .. }));
        assert!(app
            .controller
            .as_ref()
            .and_then(|c| c.state().logo())
            .is_some());
    }

    #[test]
    fn logo_field_is_locked_while_a_task_holds_the_controller() {
        let mut app = test_app();
        let _held = app.controller.take();
        app.logo_input.handle_paste("/tmp/logo.png");

        app.commit_logo_input();

        assert!(app.busy.is_none());
        assert_eq!(app.logo_input.value(), "/tmp/logo.png");
        assert!(app
            .notices
            .back()
            .is_some_and(|n| n.message.contains("in progress")));
    }

    #[test]
    fn file_read_during_submit_is_applied_when_controller_returns() {
        let mut app = test_app();
        let controller = app.controller.take().unwrap();
        app.busy = Some(BusyTask::Submitting);

        app.app_async_tx
            .send(AppAsyncEvent::LogoFileRead {
                path: "/tmp/logo.png".to_string(),
                file: Some(LogoFile::new("logo.png", "image/png", vec![1, 2, 3])),
                error: None,
            })
            .unwrap();
        app.process_events();
        assert_eq!(app.busy, Some(BusyTask::Submitting));
        assert!(app.pending_logo.is_some());

        app.app_async_tx
            .send(AppAsyncEvent::ControllerReturned {
                controller,
                result: TaskResult::Submitted(SubmitOutcome::Failed("boom".to_string())),
            })
            .unwrap();
        app.process_events();
        app.process_events();

        assert!(app.pending_logo.is_none());
        assert!(matches!(app.logo_preview, LogoPreview::Uploaded { .. }));
        assert!(app
            .controller
            .as_ref()
            .and_then(|c| c.state().logo())
            .is_some());
    }

    #[test]
    fn format_reports_invalid_json() {
        let mut app = test_app();
        app.editor.set_text("{\"a\":");
        app.format_editor();
        assert_eq!(app.editor.text(), "{\"a\":");
        assert!(app
            .notices
            .back()
            .is_some_and(|n| n.message.starts_with("Invalid JSON:")));
    }

    #[test]
    fn format_uses_four_space_indent() {
        let mut app = test_app();
        app.editor.set_text("{\"a\":1}");
        app.format_editor();
        assert_eq!(app.editor.text(), "{\n    \"a\": 1\n}");
    }

    #[test]
    fn generate_is_ignored_while_busy() {
        let mut app = test_app();
        let _held = app.controller.take();
        app.start_submit();
        assert!(app.busy.is_none());
        assert!(app
            .notices
            .back()
            .is_some_and(|n| n.message.contains("in progress")));
    }
}
