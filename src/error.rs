//! Error types for attachment-fetcher

use thiserror::Error;

/// Fatal failure classes surfaced to the caller.
///
/// Per-part extraction problems and filesystem problems during
/// persistence are deliberately *not* represented here; they
/// accumulate as warnings in [`crate::ExtractionResult`] so a single
/// bad attachment or unwritable path never aborts the batch.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("IMAP error: {0}")]
    Imap(String),

    /// The unseen/sender/subject predicate matched zero messages.
    ///
    /// A distinguished terminal outcome: no fetch is issued, and a
    /// scheduled run that found nothing to pick up exits non-zero.
    #[error("no unread messages matched the search criteria")]
    NoMatch,

    #[error("Message parsing error: {0}")]
    Parse(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, Error>;
