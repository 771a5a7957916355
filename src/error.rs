use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("failed to fetch calendar feed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The feed carries an event whose role has no bucket.
    #[error("event {summary:?} starting {start:?} has unknown role {role:?}")]
    UnknownRole {
        role: String,
        summary: String,
        start: String,
    },

    #[error("event {summary:?} has no usable start date (got {value:?})")]
    InvalidStart { value: String, summary: String },

    #[error("date key {0:?} is not a calendar date")]
    DateFormat(String),

    #[error("failed to serialize events: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
