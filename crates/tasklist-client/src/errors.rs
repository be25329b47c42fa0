use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("title must not be empty")]
    EmptyTitle,

    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server responded with {status}: {body}")]
    Status { status: u16, body: String },

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("invalid client config: {0}")]
    InvalidConfig(String),
}

impl ClientError {
    /// `true` when the request completed but the server rejected it.
    pub fn is_status(&self) -> bool {
        matches!(self, ClientError::Status { .. })
    }

    /// HTTP status code of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
