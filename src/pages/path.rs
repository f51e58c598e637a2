//! Reference sanitization
//!
//! Caller-supplied references become path fragments under the image root,
//! so they are reduced to plain relative segments before any filesystem
//! access.

use std::path::PathBuf;

use crate::config::PathRewrite;

use super::error::{PageError, Result};

/// Validate a relative, `/`-separated reference and turn it into a path.
///
/// Rejects empty references, absolute paths, drive prefixes, `.` and `..`
/// segments, backslashes and NUL bytes. Repeated slashes collapse.
pub fn sanitize_reference(reference: &str) -> Result<PathBuf> {
    let invalid = || PageError::InvalidReference(reference.to_string());

    if reference.trim().is_empty()
        || reference.starts_with('/')
        || reference.contains('\\')
        || reference.contains('\0')
    {
        return Err(invalid());
    }

    let mut path = PathBuf::new();
    for (index, segment) in reference.split('/').filter(|s| !s.is_empty()).enumerate() {
        if segment == "." || segment == ".." {
            return Err(invalid());
        }
        if index == 0 && is_drive_prefix(segment) {
            return Err(invalid());
        }
        path.push(segment);
    }

    if path.as_os_str().is_empty() {
        return Err(invalid());
    }
    Ok(path)
}

/// Like `sanitize_reference`, but the reference must be a single segment
pub fn sanitize_segment(reference: &str) -> Result<PathBuf> {
    let path = sanitize_reference(reference)?;
    if path.components().count() != 1 {
        return Err(PageError::InvalidReference(reference.to_string()));
    }
    Ok(path)
}

/// Map a book file reference to the directory of its converted images
pub fn rewrite_legacy(reference: &str, rewrite: &PathRewrite) -> String {
    let replaced = if rewrite.from.is_empty() {
        reference.to_string()
    } else {
        reference.replace(&rewrite.from, &rewrite.to)
    };

    if rewrite.strip_suffix.is_empty() {
        return replaced;
    }
    match replaced.strip_suffix(&rewrite.strip_suffix) {
        Some(stripped) => stripped.to_string(),
        None => replaced,
    }
}

fn is_drive_prefix(segment: &str) -> bool {
    let bytes = segment.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}
