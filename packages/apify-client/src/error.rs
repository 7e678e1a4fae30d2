use thiserror::Error;

/// Errors returned by the Apify client.
#[derive(Debug, Error)]
pub enum ApifyError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Apify API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The actor run reached a terminal status other than `SUCCEEDED`.
    #[error("Actor run {status}: {}", message.as_deref().unwrap_or("no status message"))]
    RunFailed {
        status: String,
        message: Option<String>,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ApifyError>;
