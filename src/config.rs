//! Fetcher configuration
//!
//! Every field is required. In particular the destination directory
//! has no implicit default: a run that does not know where to put
//! files must fail at startup, not write into a surprise location.

use crate::error::{Error, Result};
use std::env;
use std::path::PathBuf;

/// Connection, filter, and output settings for one fetcher run.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,
    /// Only messages whose `From` header matches this address qualify.
    pub sender: String,
    /// Only messages whose `Subject` header matches this text qualify.
    pub subject: String,
    /// Directory attachments are written into (created if absent).
    pub output_dir: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Reads from a `.env` file if present. All variables are
    /// required:
    /// - `IMAP_HOST`
    /// - `IMAP_PORT`
    /// - `IMAP_USERNAME`
    /// - `IMAP_PASSWORD`
    /// - `FROM_EMAIL`
    /// - `SUBJECT_FILTER`
    /// - `OUTPUT_DIR`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when a variable is missing or the
    /// port is not a number.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Self {
            host: require("IMAP_HOST")?,
            port: require("IMAP_PORT")?
                .parse()
                .map_err(|e| Error::Config(format!("Invalid IMAP_PORT: {e}")))?,
            username: require("IMAP_USERNAME")?,
            password: require("IMAP_PASSWORD")?,
            sender: require("FROM_EMAIL")?,
            subject: require("SUBJECT_FILTER")?,
            output_dir: PathBuf::from(require("OUTPUT_DIR")?),
        })
    }
}

fn require(name: &str) -> Result<String> {
    env::var(name).map_err(|_| Error::Config(format!("{name} not set")))
}
