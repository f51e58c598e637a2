//! Filesystem path to public URL mapping

use std::path::{Component, Path, PathBuf};

/// Maps a file under the image root to a client-reachable URL
pub trait UrlBuilder: Send + Sync {
    /// URL for `path`, or `None` if it lies outside the served root
    fn url_for(&self, path: &Path) -> Option<String>;
}

/// Serves `root` under a fixed URL prefix.
///
/// Segments are percent-encoded and joined with `/` whatever the host
/// separator is.
#[derive(Debug, Clone)]
pub struct PublicUrlBuilder {
    root: PathBuf,
    base_url: String,
}

impl PublicUrlBuilder {
    pub fn new(root: impl Into<PathBuf>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            root: root.into(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

impl UrlBuilder for PublicUrlBuilder {
    fn url_for(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(&self.root).ok()?;

        let mut segments = Vec::new();
        for component in relative.components() {
            match component {
                Component::Normal(name) => {
                    let name = name.to_str()?;
                    // A backslash inside a name is a separator on the host that wrote it
                    segments.extend(
                        name.split('\\')
                            .filter(|s| !s.is_empty())
                            .map(|s| urlencoding::encode(s).into_owned()),
                    );
                }
                Component::CurDir => {}
                _ => return None,
            }
        }

        if segments.is_empty() {
            return None;
        }
        Some(format!("{}/{}", self.base_url, segments.join("/")))
    }
}
