use thiserror::Error;

/// Why a fragment could not be fetched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("no such fragment")]
    NotFound,
    #[error("path escapes the site root")]
    OutsideRoot,
    #[error("{0}")]
    Transport(String),
}

/// The single error kind of the fragment pipeline: a failed fetch of `url`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Failed to load {url}: {reason}")]
pub struct FetchError {
    pub url: String,
    pub reason: FetchFailure,
}

impl FetchError {
    pub fn new(url: impl Into<String>, reason: FetchFailure) -> Self {
        Self {
            url: url.into(),
            reason,
        }
    }

    pub fn status(url: impl Into<String>, code: u16) -> Self {
        Self::new(url, FetchFailure::Status(code))
    }

    pub fn transport(url: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::new(url, FetchFailure::Transport(err.to_string()))
    }
}
