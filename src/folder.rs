//! IMAP folder names
//!
//! A small strongly-typed wrapper so callers pass folders instead of
//! raw strings. Well-known folders map to their conventional IMAP
//! names; anything else goes through the `Custom` variant.

use std::fmt;

/// An IMAP mailbox folder.
///
/// # Examples
///
/// ```
/// use attachment_fetcher::Folder;
///
/// assert_eq!(Folder::Inbox.as_str(), "INBOX");
/// assert_eq!(Folder::custom("Reports").as_str(), "Reports");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Folder {
    /// The INBOX folder (RFC 3501 required, case-insensitive).
    Inbox,
    /// Sent messages.
    Sent,
    /// Archived messages.
    Archive,
    /// A user-defined or server-specific folder.
    Custom(String),
}

impl Folder {
    /// Create a folder for a user-defined or non-standard mailbox.
    #[must_use]
    pub fn custom(name: impl Into<String>) -> Self {
        Self::Custom(name.into())
    }

    /// The IMAP folder name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Inbox => "INBOX",
            Self::Sent => "Sent",
            Self::Archive => "Archive",
            Self::Custom(name) => name,
        }
    }
}

impl fmt::Display for Folder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Folder {
    fn from(s: &str) -> Self {
        if s.eq_ignore_ascii_case("inbox") {
            Self::Inbox
        } else {
            match s {
                "Sent" => Self::Sent,
                "Archive" => Self::Archive,
                other => Self::Custom(other.to_string()),
            }
        }
    }
}

impl From<String> for Folder {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}
