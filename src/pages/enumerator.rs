//! Directory enumeration
//!
//! `FileEnumerator` is the seam between the resolver and the filesystem.
//! `FsEnumerator` is the production implementation.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use regex::Regex;

/// Files found in one directory
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Listing {
    /// Matching files, in enumeration order
    pub files: Vec<PathBuf>,
    /// Set when more files matched than the limit allowed
    pub truncated: bool,
}

/// Lists the files directly inside a directory
pub trait FileEnumerator: Send + Sync {
    /// Whether `dir` exists and is a directory
    fn is_dir(&self, dir: &Path) -> bool;

    /// List regular, non-hidden files in `dir` whose names match `pattern`
    /// (every such file when `pattern` is `None`), keeping at most `limit`
    /// of them.
    fn list(&self, dir: &Path, pattern: Option<&Regex>, limit: usize) -> io::Result<Listing>;
}

/// Lists files from the local filesystem, sorted by file name.
///
/// Past `limit` matches the listing keeps the `limit` lexically smallest
/// names, so a truncated result does not depend on directory order.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsEnumerator;

impl FileEnumerator for FsEnumerator {
    fn is_dir(&self, dir: &Path) -> bool {
        dir.is_dir()
    }

    fn list(&self, dir: &Path, pattern: Option<&Regex>, limit: usize) -> io::Result<Listing> {
        let mut names = BTreeSet::new();
        let mut truncated = false;

        for entry in fs::read_dir(dir)? {
            let entry = entry?;

            // Skip names that are not valid UTF-8; they can't match a page pattern
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            if name.starts_with('.') {
                continue;
            }
            if let Some(pattern) = pattern {
                if !pattern.is_match(&name) {
                    continue;
                }
            }
            // Follows symlinks, so a link to an image counts as a file
            if !entry.path().is_file() {
                continue;
            }

            names.insert(name);
            if names.len() > limit {
                names.pop_last();
                truncated = true;
            }
        }

        Ok(Listing {
            files: names.into_iter().map(|name| dir.join(name)).collect(),
            truncated,
        })
    }
}
