//! Attachment extraction
//!
//! Walks a parsed [`Entity`] tree depth-first in source order and
//! collects every part that is marked as downloadable content,
//! resolving a filename for each. Per-part problems become warnings,
//! never errors: a part that cannot be classified is skipped and its
//! siblings are still extracted.

use crate::mime::{Body, DispositionKind, Entity};
use crate::persist::sanitize_filename;
use tracing::debug;

/// Fallback stem used when a qualifying part carries no usable name.
/// A 1-based counter is appended so several unnamed attachments in
/// one message cannot silently overwrite each other.
const FALLBACK_STEM: &str = "attachment";

/// One extractable part: a resolved filename (never empty, reduced to
/// a single path component), the transfer-decoded payload, and the
/// disposition token that qualified it.
#[derive(Debug, Clone)]
pub struct AttachmentCandidate {
    pub filename: String,
    pub data: Vec<u8>,
    pub disposition: DispositionKind,
}

/// Result of one extraction pass over a message.
#[derive(Debug, Default)]
pub struct Extraction {
    /// Candidates in the order their parts appear in the source.
    pub candidates: Vec<AttachmentCandidate>,
    /// Non-fatal conditions encountered along the way.
    pub warnings: Vec<String>,
}

/// Collect every attachment candidate under `root`.
///
/// A message with no multipart structure has no attachments unless
/// its lone body part explicitly declares an `attachment` or `inline`
/// disposition and is not ordinary `text/plain` / `text/html` body
/// text. Multipart containers contribute the union of their
/// descendants' candidates, not themselves. Leaves without a
/// `Content-Disposition` header are plain body parts and are skipped
/// without comment.
#[must_use]
pub fn extract_attachments(root: &Entity) -> Extraction {
    let mut extraction = Extraction::default();
    let mut unnamed = 0usize;

    match &root.body {
        Body::Multipart(_) => walk(root, &mut extraction, &mut unnamed),
        Body::Leaf(_) => {
            // Single-part message: only an explicitly-marked non-text
            // leaf counts. The common case (a bare text body) yields
            // nothing.
            if !root.content_type.is_body_text() {
                collect_leaf(root, &mut extraction, &mut unnamed);
            }
        }
    }

    debug!(
        candidates = extraction.candidates.len(),
        warnings = extraction.warnings.len(),
        "extraction pass complete"
    );
    extraction
}

fn walk(entity: &Entity, extraction: &mut Extraction, unnamed: &mut usize) {
    match &entity.body {
        Body::Multipart(children) => {
            for child in children {
                walk(child, extraction, unnamed);
            }
        }
        Body::Leaf(_) => collect_leaf(entity, extraction, unnamed),
    }
}

fn collect_leaf(entity: &Entity, extraction: &mut Extraction, unnamed: &mut usize) {
    // A multipart entity that ended up as a leaf had no parseable
    // children; record that the message structure was degraded.
    if entity.content_type.is_multipart() {
        extraction.warnings.push(format!(
            "multipart part ({}) had no parseable children",
            entity.content_type.mimetype
        ));
        return;
    }

    let Some(disposition) = &entity.disposition else {
        return;
    };

    if !disposition.kind.is_attachment_like() {
        extraction.warnings.push(format!(
            "skipping part with unrecognized disposition {:?}",
            disposition.kind
        ));
        return;
    }

    let Some(data) = entity.leaf_data() else {
        return;
    };

    let filename = resolve_filename(entity, unnamed, &mut extraction.warnings);
    extraction.candidates.push(AttachmentCandidate {
        filename,
        data: data.to_vec(),
        disposition: disposition.kind.clone(),
    });
}

/// Resolve the filename for a qualifying leaf.
///
/// Precedence: the `filename` parameter of Content-Disposition, then
/// the `name` parameter of Content-Type, then an indexed fallback.
/// Encoded-word names are already decoded by the header layer. The
/// resolved name is sanitized here, so a name that reduces to nothing
/// usable shares the same counter as genuinely unnamed parts and can
/// never collide with them.
fn resolve_filename(entity: &Entity, unnamed: &mut usize, warnings: &mut Vec<String>) -> String {
    let from_disposition = entity
        .disposition
        .as_ref()
        .and_then(|d| d.params.get("filename"))
        .map(|name| name.trim())
        .filter(|name| !name.is_empty());

    let from_content_type = entity
        .content_type
        .params
        .get("name")
        .map(|name| name.trim())
        .filter(|name| !name.is_empty());

    if let Some(name) = from_disposition.or(from_content_type) {
        if let Some(safe) = sanitize_filename(name) {
            return safe;
        }
        warnings.push(format!(
            "unsafe attachment name {name:?} replaced with an indexed fallback"
        ));
    }

    *unnamed += 1;
    format!("{FALLBACK_STEM}-{unnamed}")
}
