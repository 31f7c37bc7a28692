//! End-to-end fetch pipeline
//!
//! Ties the collaborators together: locate unread messages matching
//! the configured sender and subject, fetch their raw bodies, parse
//! each into a MIME entity tree, extract attachment candidates, and
//! persist them to the output directory.
//!
//! Failure policy follows the per-message skip-and-continue rule: an
//! unparseable message is recorded and the rest of the batch still
//! runs. Only connection-level failures and the zero-match outcome
//! propagate as errors.

use crate::client::ImapClient;
use crate::config::Config;
use crate::error::Result;
use crate::extract::extract_attachments;
use crate::folder::Folder;
use crate::locator::SearchQuery;
use crate::mime::parse_entity;
use crate::persist::{ExtractionResult, store_attachments};
use tracing::{info, warn};

/// Run one fetch pass over INBOX with the configured filters.
///
/// # Errors
///
/// Propagates connection/SELECT/SEARCH failures and the
/// distinguished [`crate::Error::NoMatch`] outcome when no unread
/// message matches; per-message parse failures and filesystem
/// problems are recorded as warnings instead.
pub async fn run(client: &ImapClient, config: &Config) -> Result<ExtractionResult> {
    let query = SearchQuery::unread_from(&config.sender, &config.subject);
    let messages = client.fetch_matching(&Folder::Inbox, &query).await?;

    let mut result = ExtractionResult::default();

    for message in &messages {
        let entity = match parse_entity(&message.bytes) {
            Ok(entity) => entity,
            Err(e) => {
                warn!(uid = message.uid, error = %e, "skipping unparseable message");
                result
                    .warnings
                    .push(format!("message {}: {e}", message.uid));
                continue;
            }
        };

        let extraction = extract_attachments(&entity);
        result.warnings.extend(
            extraction
                .warnings
                .into_iter()
                .map(|w| format!("message {}: {w}", message.uid)),
        );

        if extraction.candidates.is_empty() {
            info!(uid = message.uid, "message has no attachments");
            continue;
        }

        let stored = store_attachments(&config.output_dir, &extraction.candidates);
        result.merge(stored);
    }

    info!(
        messages = messages.len(),
        files = result.written.len(),
        warnings = result.warnings.len(),
        "fetch pass complete"
    );
    Ok(result)
}
