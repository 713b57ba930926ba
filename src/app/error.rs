use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] rusqlite_migration::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Mail parsing error: {0}")]
    Mail(#[from] mailparse::MailParseError),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The message was not sent by the arXiv mailing service.
    #[error("Not a newsletter from arXiv (sender: {0})")]
    NotADigest(String),

    #[error("Store does not exist: {}", .0.display())]
    StoreMissing(PathBuf),

    #[error("No versions found at {0}")]
    NoVersions(String),

    #[error("Entry has no {0}")]
    MissingField(&'static str),
}

impl DigestError {
    /// Short form used on the one-line status bar.
    pub fn status_text(&self) -> String {
        match self {
            DigestError::Http(e) if e.is_timeout() => "request timed out".to_string(),
            DigestError::Http(e) => match e.status() {
                Some(status) => format!("HTTP {}", status),
                None => "connection failed".to_string(),
            },
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;
