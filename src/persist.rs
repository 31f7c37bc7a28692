//! Attachment persistence
//!
//! Writes extracted candidates into the destination directory. Every
//! filesystem problem is recorded and the batch continues: a failed
//! directory creation or file write never blocks the remaining
//! candidates or messages. Same-named attachments across runs
//! overwrite silently.

use crate::extract::AttachmentCandidate;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of one persistence batch (and, via the pipeline, of a
/// whole run): the paths written in candidate order plus every
/// non-fatal problem encountered on the way.
#[derive(Debug, Default, Serialize)]
pub struct ExtractionResult {
    pub written: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

impl ExtractionResult {
    /// Fold another result into this one, preserving order.
    pub fn merge(&mut self, other: Self) {
        self.written.extend(other.written);
        self.warnings.extend(other.warnings);
    }
}

/// Write each candidate to `<dir>/<sanitized filename>`.
///
/// Resolved filenames come from remote mail headers and are never
/// trusted as paths: only the final path component is kept, and a
/// name that sanitizes away entirely is replaced by an indexed
/// placeholder that is checked against the rest of the batch, so a
/// replacement can never clobber a sibling. Directory creation and
/// individual write failures are recorded as warnings and the
/// remaining candidates are still attempted.
#[must_use]
pub fn store_attachments(dir: &Path, candidates: &[AttachmentCandidate]) -> ExtractionResult {
    let mut result = ExtractionResult::default();

    if let Err(e) = fs::create_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "failed to create destination directory");
        result
            .warnings
            .push(format!("failed to create {}: {e}", dir.display()));
    }

    let sanitized: Vec<Option<String>> = candidates
        .iter()
        .map(|c| sanitize_filename(&c.filename))
        .collect();
    let mut taken: BTreeSet<String> = sanitized.iter().flatten().cloned().collect();

    for (index, candidate) in candidates.iter().enumerate() {
        let filename = sanitized[index].clone().unwrap_or_else(|| {
            let mut n = index + 1;
            let mut fallback = format!("attachment-{n}");
            while taken.contains(&fallback) {
                n += 1;
                fallback = format!("attachment-{n}");
            }
            taken.insert(fallback.clone());
            result.warnings.push(format!(
                "unsafe attachment name {:?} replaced with {fallback}",
                candidate.filename
            ));
            fallback
        });

        let path = dir.join(&filename);
        match fs::write(&path, &candidate.data) {
            Ok(()) => {
                info!(path = %path.display(), bytes = candidate.data.len(), "wrote attachment");
                result.written.push(path);
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to write attachment");
                result
                    .warnings
                    .push(format!("failed to write {}: {e}", path.display()));
            }
        }
    }

    result
}

/// Reduce an untrusted filename to a single safe path component.
///
/// Path separators (both kinds) are treated as delimiters and only
/// the last component survives; `.`/`..` and empty results are
/// rejected, as are names containing NUL.
pub(crate) fn sanitize_filename(name: &str) -> Option<String> {
    if name.contains('\0') {
        return None;
    }

    let component = name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if component.is_empty() || component == "." || component == ".." {
        return None;
    }

    Some(component.to_string())
}
