//! Production IMAP mailbox client
//!
//! Speaks the protocol so the extraction core never has to: list
//! mailboxes, select a folder, run the unread/sender/subject search,
//! and fetch raw message bodies. async-imap streams results as they
//! arrive; the stream is drained into a plain `Vec` here so the
//! downstream pipeline consumes a simple synchronous sequence.

use crate::config::Config;
use crate::connection::{ImapSession, connect, select};
use crate::error::{Error, Result};
use crate::folder::Folder;
use crate::locator::SearchQuery;
use futures::StreamExt;
use tracing::{info, warn};

/// One fetched message: its UID and the complete RFC 2822 bytes
/// (headers + body) as returned by `BODY.PEEK[]`.
#[derive(Debug, Clone)]
pub struct RawMessage {
    pub uid: u32,
    pub bytes: Vec<u8>,
}

/// Read-only IMAP client. Each operation opens and closes its own
/// session.
pub struct ImapClient {
    config: Config,
}

impl ImapClient {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config }
    }

    /// List all available IMAP folders.
    ///
    /// # Errors
    ///
    /// Returns an error if the connection or LIST command fails.
    pub async fn list_folders(&self) -> Result<Vec<String>> {
        let mut session = connect(&self.config).await?;

        let mut folder_stream = session
            .list(Some(""), Some("*"))
            .await
            .map_err(|e| Error::Imap(format!("List folders failed: {e}")))?;

        let mut names = Vec::new();
        while let Some(item) = folder_stream.next().await {
            if let Ok(name) = item {
                names.push(name.name().to_string());
            }
        }
        drop(folder_stream);

        session.logout().await.ok();
        Ok(names)
    }

    /// Search `folder` with the given predicate and fetch the raw
    /// bodies of every match, in ascending UID order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoMatch`] when the search finds nothing — the
    /// distinguished "no unread messages" outcome, raised *before*
    /// any FETCH is issued. Connection, SELECT, and SEARCH failures
    /// are fatal. A FETCH failure for one UID is logged and skipped.
    pub async fn fetch_matching(
        &self,
        folder: &Folder,
        query: &SearchQuery,
    ) -> Result<Vec<RawMessage>> {
        let mut session = connect(&self.config).await?;
        select(&mut session, folder.as_str()).await?;

        let uids = session
            .uid_search(query.to_imap_query())
            .await
            .map_err(|e| Error::Imap(format!("Search failed: {e}")))?;

        let mut uid_list: Vec<u32> = uids.into_iter().collect();
        uid_list.sort_unstable();

        if uid_list.is_empty() {
            session.logout().await.ok();
            return Err(Error::NoMatch);
        }

        info!("Found {} messages matching '{}'", uid_list.len(), query);

        let messages = fetch_by_uids(&mut session, &uid_list).await;

        session.logout().await.ok();
        Ok(messages)
    }
}

/// Fetch each UID individually, skipping ones that fail.
async fn fetch_by_uids(session: &mut ImapSession, uids: &[u32]) -> Vec<RawMessage> {
    let mut messages = Vec::with_capacity(uids.len());

    for uid in uids {
        match fetch_single(session, *uid).await {
            Ok(message) => messages.push(message),
            Err(e) => {
                warn!("Failed to fetch UID {}: {}", uid, e);
            }
        }
    }

    messages
}

/// Fetch one message body with `BODY.PEEK[]` (PEEK leaves the
/// `\Seen` flag untouched).
async fn fetch_single(session: &mut ImapSession, uid: u32) -> Result<RawMessage> {
    let uid_set = format!("{uid}");
    let mut messages = session
        .uid_fetch(&uid_set, "(BODY.PEEK[])")
        .await
        .map_err(|e| Error::Imap(format!("Fetch failed: {e}")))?;

    if let Some(msg_result) = messages.next().await {
        let msg = msg_result.map_err(|e| Error::Imap(format!("Fetch error: {e}")))?;
        if let Some(body) = msg.body() {
            return Ok(RawMessage {
                uid,
                bytes: body.to_vec(),
            });
        }
    }

    Err(Error::Imap(format!("No body found for UID {uid}")))
}
