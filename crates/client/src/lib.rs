pub mod api;
pub mod data_url;
pub mod disposition;
pub mod error;
pub mod payload;
pub mod response;
pub mod types;
pub mod validate;

pub use api::{AgendaApi, Transport};
pub use error::{ClientError, ClientResult};
pub use payload::{GeneratePayload, LogoPart};
pub use response::{GenerateResponse, RawResponse};
pub use types::*;
