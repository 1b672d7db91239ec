use thiserror::Error;

/// Failures raised while talking to the admin API.
///
/// `Rejected` carries the business-rule message returned by the API
/// verbatim; callers pattern-match on it to produce friendlier text.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("{message}")]
    Rejected {
        status: Option<u16>,
        message: String,
    },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn rejected(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::Rejected {
            status,
            message: message.into(),
        }
    }

    /// The remote business message, if the API answered with one.
    /// Authentication failures are not business rejections and carry none.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ApiError::Rejected { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Transport("request timed out".into())
        } else if err.is_decode() {
            ApiError::InvalidResponse(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidResponse(err.to_string())
    }
}
