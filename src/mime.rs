//! MIME entity parsing
//!
//! Turns the raw RFC 2822 bytes of one fetched message into a tree of
//! [`Entity`] values: decoded headers plus either a transfer-decoded
//! leaf body or an ordered list of child entities for multipart
//! containers.
//!
//! Parsing is built on [mailparse](https://crates.io/crates/mailparse),
//! which handles header folding, RFC 2047 encoded-words, boundary
//! splitting, and base64 / quoted-printable transfer decoding. This
//! module owns the tree shape and the degradation policy: a broken
//! part degrades to an empty leaf with a warning instead of failing
//! the whole message, so one malformed attachment cannot take down
//! its siblings.

use crate::error::{Error, Result};
use mailparse::{DispositionType, MailHeaderMap, ParsedMail};
use std::collections::BTreeMap;
use tracing::warn;

/// A single decoded header line.
///
/// `value` has RFC 2047 encoded-words already decoded, so anything
/// surfaced from here (subjects, filenames) is full Unicode text.
#[derive(Debug, Clone)]
pub struct Header {
    pub name: String,
    pub value: String,
}

/// Parsed `Content-Type`: lowercased `type/subtype` plus parameters
/// (`boundary`, `charset`, `name`, ...) with lowercased keys.
#[derive(Debug, Clone)]
pub struct ContentType {
    pub mimetype: String,
    pub params: BTreeMap<String, String>,
}

impl ContentType {
    #[must_use]
    pub fn is_multipart(&self) -> bool {
        self.mimetype.starts_with("multipart/")
    }

    /// True for the plain `text/plain` / `text/html` bodies that make
    /// up an ordinary message with no attachments.
    #[must_use]
    pub fn is_body_text(&self) -> bool {
        self.mimetype == "text/plain" || self.mimetype == "text/html"
    }
}

/// The `Content-Disposition` token of a part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispositionKind {
    Inline,
    Attachment,
    Other(String),
}

impl DispositionKind {
    /// Whether this disposition marks the part as downloadable
    /// content (both `attachment` and `inline` qualify).
    #[must_use]
    pub const fn is_attachment_like(&self) -> bool {
        matches!(self, Self::Inline | Self::Attachment)
    }
}

impl From<DispositionType> for DispositionKind {
    fn from(value: DispositionType) -> Self {
        match value {
            DispositionType::Inline => Self::Inline,
            DispositionType::Attachment => Self::Attachment,
            DispositionType::FormData => Self::Other("form-data".to_string()),
            DispositionType::Extension(token) => Self::Other(token),
        }
    }
}

/// Parsed `Content-Disposition` header: the token plus its parameters
/// (notably `filename`).
#[derive(Debug, Clone)]
pub struct ContentDisposition {
    pub kind: DispositionKind,
    pub params: BTreeMap<String, String>,
}

/// Entity body: a decoded leaf payload or an ordered multipart tree.
/// The two are mutually exclusive.
#[derive(Debug, Clone)]
pub enum Body {
    Leaf(Vec<u8>),
    Multipart(Vec<Entity>),
}

/// One node of a parsed MIME message.
#[derive(Debug, Clone)]
pub struct Entity {
    headers: Vec<Header>,
    pub content_type: ContentType,
    /// `None` when the part carries no `Content-Disposition` header
    /// at all, which is how plain body parts look.
    pub disposition: Option<ContentDisposition>,
    pub body: Body,
}

impl Entity {
    /// First value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// All values of a header, in source order.
    pub fn header_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Child entities, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Entity] {
        match &self.body {
            Body::Multipart(children) => children,
            Body::Leaf(_) => &[],
        }
    }

    /// Decoded leaf payload, `None` for multipart containers.
    #[must_use]
    pub fn leaf_data(&self) -> Option<&[u8]> {
        match &self.body {
            Body::Leaf(data) => Some(data),
            Body::Multipart(_) => None,
        }
    }
}

/// Parse raw message bytes into an [`Entity`] tree.
///
/// # Errors
///
/// Returns [`Error::Parse`] when the bytes do not start with a
/// well-formed header block. Structural problems *below* the top
/// level (bad boundary, undecodable part) degrade to empty leaves
/// instead of erroring, so sibling parts survive.
pub fn parse_entity(raw: &[u8]) -> Result<Entity> {
    let parsed = mailparse::parse_mail(raw).map_err(|e| Error::Parse(e.to_string()))?;
    if parsed.headers.is_empty() {
        return Err(Error::Parse("message has no header block".to_string()));
    }
    Ok(build_entity(&parsed))
}

fn build_entity(part: &ParsedMail<'_>) -> Entity {
    let headers = part
        .headers
        .iter()
        .map(|h| Header {
            name: h.get_key(),
            value: h.get_value(),
        })
        .collect();

    let content_type = ContentType {
        mimetype: part.ctype.mimetype.clone(),
        params: part.ctype.params.clone(),
    };

    // mailparse defaults a missing Content-Disposition to `inline`,
    // but the extractor must distinguish "no header" from an explicit
    // inline part, so only parse the header when it is present.
    let disposition = part
        .headers
        .get_first_value("Content-Disposition")
        .map(|value| {
            let parsed = mailparse::parse_content_disposition(&value);
            ContentDisposition {
                kind: DispositionKind::from(parsed.disposition),
                params: parsed.params,
            }
        });

    if let Some(encoding) = part.headers.get_first_value("Content-Transfer-Encoding") {
        let token = encoding.trim().to_ascii_lowercase();
        if !is_known_transfer_encoding(&token) {
            warn!(encoding = %token, "unknown transfer encoding, passing body through raw");
        }
    }

    let body = if content_type.is_multipart() {
        if part.subparts.is_empty() {
            // Declared multipart but no child could be delimited:
            // the boundary is missing or never matches the body.
            warn!(
                mimetype = %content_type.mimetype,
                "multipart entity without parseable children, treating as empty leaf"
            );
            Body::Leaf(Vec::new())
        } else {
            Body::Multipart(part.subparts.iter().map(build_entity).collect())
        }
    } else {
        match part.get_body_raw() {
            Ok(data) => Body::Leaf(data),
            Err(e) => {
                warn!(error = %e, "failed to decode part body, treating as empty leaf");
                Body::Leaf(Vec::new())
            }
        }
    };

    Entity {
        headers,
        content_type,
        disposition,
        body,
    }
}

/// The transfer encodings that decode (or pass through) without
/// complaint. Anything else reaches the caller raw, with a warning.
fn is_known_transfer_encoding(token: &str) -> bool {
    matches!(
        token,
        "base64" | "quoted-printable" | "7bit" | "8bit" | "binary"
    )
}
