use agenda_client::{LogoFile, LogoPart, LogoSource};

pub const IDLE_LABEL: &str = "Generate Agenda";
pub const BUSY_LABEL: &str = "Generating...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitState {
    Idle,
    Busy,
}

impl SubmitState {
    pub fn label(&self) -> &'static str {
        match self {
            SubmitState::Idle => IDLE_LABEL,
            SubmitState::Busy => BUSY_LABEL,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, SubmitState::Busy)
    }
}

/// The logo that will accompany the next submission. The variant is its source.
#[derive(Debug, Clone, PartialEq)]
pub enum LogoSelection {
    Uploaded(LogoFile),
    Suggested { url: String },
}

impl LogoSelection {
    pub fn source(&self) -> LogoSource {
        match self {
            LogoSelection::Uploaded(_) => LogoSource::Uploaded,
            LogoSelection::Suggested { .. } => LogoSource::Suggested,
        }
    }

    pub fn to_part(&self) -> LogoPart {
        match self {
            LogoSelection::Uploaded(file) => LogoPart::Uploaded(file.clone()),
            LogoSelection::Suggested { url } => LogoPart::Suggested { url: url.clone() },
        }
    }
}

/// Page-lifetime state owned by the controller.
#[derive(Debug, Default)]
pub struct ControllerState {
    pub(crate) logo: Option<LogoSelection>,
    pub(crate) suggestion: Option<String>,
    pub(crate) in_flight: bool,
}

impl ControllerState {
    pub fn logo(&self) -> Option<&LogoSelection> {
        self.logo.as_ref()
    }

    pub fn logo_source(&self) -> Option<LogoSource> {
        self.logo.as_ref().map(LogoSelection::source)
    }

    /// A looked-up logo URL the user has not accepted or rejected yet.
    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    pub fn in_flight(&self) -> bool {
        self.in_flight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_state() {
        assert_eq!(SubmitState::Idle.label(), "Generate Agenda");
        assert!(!SubmitState::Idle.is_disabled());
        assert_eq!(SubmitState::Busy.label(), "Generating...");
        assert!(SubmitState::Busy.is_disabled());
    }

    #[test]
    fn source_is_derived_from_selection() {
        let mut state = ControllerState::default();
        assert_eq!(state.logo_source(), None);

        state.logo = Some(LogoSelection::Suggested {
            url: "https://logos.example/a.svg".to_string(),
        });
        assert_eq!(state.logo_source(), Some(LogoSource::Suggested));

        state.logo = Some(LogoSelection::Uploaded(LogoFile::new(
            "a.png",
            "image/png",
            vec![1],
        )));
        assert_eq!(state.logo_source(), Some(LogoSource::Uploaded));
    }
}
