//! Search predicate construction
//!
//! Builds the IMAP SEARCH query that locates the messages worth
//! fetching: unread, from a known sender, carrying a known subject.

use std::fmt;

/// The unseen/sender/subject predicate for one fetcher run.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub unseen: bool,
    pub from: String,
    pub subject: String,
}

impl SearchQuery {
    /// Predicate for unread messages matching a sender address and a
    /// subject text.
    #[must_use]
    pub fn unread_from(from: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            unseen: true,
            from: from.into(),
            subject: subject.into(),
        }
    }

    /// Render the predicate as an IMAP SEARCH argument string,
    /// e.g. `UNSEEN FROM "reports@example.com" SUBJECT "Daily export"`.
    #[must_use]
    pub fn to_imap_query(&self) -> String {
        let mut parts = Vec::with_capacity(3);
        if self.unseen {
            parts.push("UNSEEN".to_string());
        }
        parts.push(format!("FROM {}", quote(&self.from)));
        parts.push(format!("SUBJECT {}", quote(&self.subject)));
        parts.join(" ")
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_imap_query())
    }
}

/// Quote a search value, escaping backslashes and double quotes per
/// the IMAP quoted-string grammar.
fn quote(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}
