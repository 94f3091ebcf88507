pub mod controller;
pub mod download;
pub mod state;
pub mod surface;

pub use controller::{DocumentController, SubmitOutcome, ValidationError};
pub use state::{ControllerState, LogoSelection, SubmitState};
pub use surface::{LogoPreview, Notice, NoticeLevel, PageSurface};
