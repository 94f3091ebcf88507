use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Malformed response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl ClientError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ClientError::Validation(_) => "Invalid input. Please check the agenda data.",
            ClientError::Network(_) => "Network error. Check that the server is reachable.",
            ClientError::Server { .. } => "The server could not generate the document.",
            ClientError::Decode(_) => "The server sent a response that could not be read.",
            ClientError::Io(_) => "Could not write the file to disk.",
            ClientError::InvalidUrl(_) => "The server returned an invalid link.",
        }
    }

    /// Server-side failures carry their own text; everything else is unexpected
    /// from the page's point of view.
    pub fn is_server_error(&self) -> bool {
        matches!(self, ClientError::Server { .. } | ClientError::Network(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(e: serde_json::Error) -> Self {
        ClientError::Decode(e.to_string())
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
