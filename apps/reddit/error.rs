use thiserror::Error;

pub type Result<T> = std::result::Result<T, RedditError>;

/// Errors surfaced by [`crate::reddit_api::RedditApi`].
#[derive(Debug, Error)]
pub enum RedditError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Authentication failed: {0}")]
    Auth(String),
}

impl From<reqwest::Error> for RedditError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RedditError::Parse(err.to_string())
        } else {
            RedditError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for RedditError {
    fn from(err: serde_json::Error) -> Self {
        RedditError::Parse(err.to_string())
    }
}

/// Why a hot or search fetch produced no records.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Input validation error: {0}")]
    InvalidInput(String),

    #[error("Reddit API error: {0}")]
    Api(#[from] RedditError),
}

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("File error: {0}")]
    Io(#[from] std::io::Error),
}
