use std::{borrow::Cow, path::PathBuf};

use reqwest::StatusCode;

/// A required setting was missing or unusable. Only raised at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is missing from the environment")]
    Missing(&'static str),

    #[error("{key} has an invalid value: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("Failed to build the HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// A release date that is not in `YYYY-MM-DD` form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("release date {input:?} is not a YYYY-MM-DD date")]
pub struct FormatError {
    pub input: String,
}

/// The TMDB payload did not have the shape we expect.
#[derive(Debug, thiserror::Error)]
pub enum MappingError {
    #[error("response body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("response body is not a JSON object")]
    NotAnObject,

    #[error("\"results\" is not an array")]
    ResultsNotAnArray,

    #[error("result {index} could not be decoded: {source}")]
    InvalidResult {
        index: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("TMDB responded with {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Connection failures and timeouts. The URL is stripped so the API key never shows up in
    /// a reply.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    #[error(transparent)]
    Format(#[from] FormatError),

    #[error(transparent)]
    Mapping(#[from] MappingError),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.without_url())
    }
}

/// Longest stretch of an upstream error body quoted back to the user. Discord rejects
/// messages over 2000 characters.
pub const MAX_QUOTED_BODY: usize = 1500;

impl FetchError {
    /// The text shown to whoever invoked the command.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { status, body } => format!(
                "Error: Failed to fetch data: TMDB responded with {}: {}",
                status,
                truncate_chars(body, MAX_QUOTED_BODY)
            ),
            Self::Transport(_) => format!("Error: Failed to fetch data: {}", self),
            Self::Format(_) | Self::Mapping(_) => {
                "Error: TMDB returned data that could not be read.".to_owned()
            }
        }
    }
}

fn truncate_chars(text: &str, max: usize) -> Cow<'_, str> {
    match text.char_indices().nth(max) {
        Some((end, _)) => Cow::Owned(format!("{}…", &text[..end])),
        None => Cow::Borrowed(text),
    }
}

/// Delivering a single message to the channel failed.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("failed to read asset {}: {source}", .path.display())]
    Asset {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Discord rejected the message: {0}")]
    Discord(#[from] serenity::Error),
}
