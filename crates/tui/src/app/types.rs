use agenda_client::{AgendaApi, LogoFile};
use agenda_page::{DocumentController, LogoPreview, Notice, SubmitOutcome, SubmitState};
use std::path::PathBuf;
use tokio::sync::oneshot;

pub type Controller = DocumentController<AgendaApi>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Editor,
    Logo,
    Company,
    Generate,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Editor => Focus::Logo,
            Focus::Logo => Focus::Company,
            Focus::Company => Focus::Generate,
            Focus::Generate => Focus::Editor,
        }
    }

    pub fn previous(self) -> Self {
        match self {
            Focus::Editor => Focus::Generate,
            Focus::Logo => Focus::Editor,
            Focus::Company => Focus::Logo,
            Focus::Generate => Focus::Company,
        }
    }
}

/// Long-running work that currently holds the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BusyTask {
    Submitting,
    LookingUpLogo(String),
    LoadingLogo(String),
}

impl BusyTask {
    pub fn status_text(&self) -> String {
        match self {
            BusyTask::Submitting => "Generating document...".to_string(),
            BusyTask::LookingUpLogo(company) if company.is_empty() => {
                "Looking up logo...".to_string()
            }
            BusyTask::LookingUpLogo(company) => format!("Looking up logo for {company}..."),
            BusyTask::LoadingLogo(path) => format!("Reading {path}..."),
        }
    }
}

/// Screen updates requested by the controller while it runs.
#[derive(Debug)]
pub enum PageEvent {
    Notice(Notice),
    Confirm {
        prompt: String,
        reply: oneshot::Sender<bool>,
    },
    SubmitState(SubmitState),
    Logo(LogoPreview),
    Suggestion(Option<String>),
    ClearFileInput,
    Navigate(String),
    DownloadReady(PathBuf),
}

pub struct PendingConfirm {
    pub prompt: String,
    pub reply: oneshot::Sender<bool>,
}

pub enum TaskResult {
    Submitted(SubmitOutcome),
    LogoSuggested(Option<String>),
}

pub enum AppAsyncEvent {
    ControllerReturned {
        controller: Box<Controller>,
        result: TaskResult,
    },
    LogoFileRead {
        path: String,
        file: Option<LogoFile>,
        error: Option<String>,
    },
    LinkFollowed {
        url: String,
        path: Option<PathBuf>,
        error: Option<String>,
    },
}

#[derive(Debug, Clone)]
pub struct DownloadNote {
    pub label: String,
    pub at: chrono::DateTime<chrono::Local>,
}
