//! Crate error types.

use thiserror::Error;

/// Errors raised by the fetch engine.
///
/// Non-200 HTTP statuses are not errors: they produce a fully-formed
/// [`Response`](crate::response::Response) with empty content.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Method outside the supported set. Raised before any network call,
    /// never retried.
    #[error("unsupported request method: {0}")]
    UnsupportedMethod(String),

    /// Network-level failure from a single attempt. Retried.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// A 200 body could not be decoded as requested. Retried.
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// Every attempt for one fetch failed.
    #[error("retries exhausted after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: Box<FetchError>,
    },

    /// Operation attempted after the shared client was closed.
    #[error("client is closed")]
    ClientClosed,

    /// Invalid construction-time configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl FetchError {
    /// Whether the retry wrapper should re-attempt after this error.
    ///
    /// Transport and decode failures are transient; everything else
    /// propagates on the first occurrence.
    pub fn is_retryable(&self) -> bool {
        matches!(self, FetchError::Transport(_) | FetchError::Decode(_))
    }
}

/// Errors from the HTML query wrapper.
#[derive(Error, Debug)]
pub enum HtmlError {
    #[error("invalid CSS selector: {0}")]
    InvalidSelector(String),

    /// The response carried no textual content to parse (non-200 status,
    /// or a body already decoded as JSON).
    #[error("response content is not HTML: {0}")]
    NotHtml(&'static str),

    /// The offloaded query task was cancelled or panicked.
    #[error("html query task failed: {0}")]
    TaskFailed(String),
}
