use crate::state::{LogoSelection, SubmitState};
use std::future::Future;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LogoPreview {
    Empty,
    Uploaded {
        name: String,
        mime: String,
        size: u64,
        data_url: String,
    },
    Suggested {
        url: String,
    },
}

impl LogoPreview {
    pub fn of(selection: Option<&LogoSelection>) -> Self {
        match selection {
            None => LogoPreview::Empty,
            Some(LogoSelection::Uploaded(file)) => LogoPreview::Uploaded {
                name: file.name.clone(),
                mime: file.mime.clone(),
                size: file.size(),
                data_url: file.data_url(),
            },
            Some(LogoSelection::Suggested { url }) => LogoPreview::Suggested { url: url.clone() },
        }
    }
}

/// Everything the controller needs from the screen it drives.
pub trait PageSurface: Send {
    /// Current editor content, read at the moment of the call.
    fn editor_text(&self) -> String;

    fn notify(&mut self, notice: Notice);

    /// Asks a yes/no question and waits for the answer.
    fn confirm(&mut self, prompt: &str) -> impl Future<Output = bool> + Send;

    fn set_submit_state(&mut self, state: SubmitState);

    fn show_logo(&mut self, preview: LogoPreview);

    fn show_suggestion(&mut self, url: Option<&str>);

    fn clear_file_input(&mut self);

    fn navigate(&mut self, url: &str);

    fn show_download_ready(&mut self, path: &Path);
}
