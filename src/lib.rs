//! IMAP attachment fetcher
//!
//! Connects to a remote mailbox over STARTTLS, locates unread
//! messages matching a sender address and subject text, parses their
//! MIME bodies, and writes every file attachment into a configured
//! directory.
//!
//! The protocol side ([`ImapClient`]) is a thin collaborator; the
//! substance lives in the extraction core: [`mime`] (entity tree
//! parsing), [`extract`] (attachment classification and filename
//! resolution), and [`persist`] (writing files, collecting
//! [`ExtractionResult`]). [`pipeline::run`] glues them together.

mod client;
mod config;
mod connection;
mod error;
mod folder;
pub mod locator;
pub mod mime;
pub mod pipeline;

pub mod extract;
pub mod persist;

pub use client::{ImapClient, RawMessage};
pub use config::Config;
pub use error::{Error, Result};
pub use extract::{AttachmentCandidate, Extraction, extract_attachments};
pub use folder::Folder;
pub use locator::SearchQuery;
pub use persist::{ExtractionResult, store_attachments};
