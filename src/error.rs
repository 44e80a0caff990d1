use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, StatsError>;

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("GitHub API error: {0}")]
    Api(ApiError),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// An error response returned by the GitHub API.
///
/// `status` is the HTTP status code; `message` and `documentation_url` come from the
/// JSON error payload when one was sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub documentation_url: Option<String>,
}

impl ApiError {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            documentation_url: None,
        }
    }

    pub fn with_documentation_url(mut self, url: impl Into<String>) -> Self {
        self.documentation_url = Some(url.into());
        self
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, self.message)?;
        if let Some(url) = &self.documentation_url {
            write!(f, " ({url})")?;
        }
        Ok(())
    }
}

impl From<ApiError> for StatsError {
    fn from(err: ApiError) -> Self {
        StatsError::Api(err)
    }
}
