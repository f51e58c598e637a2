//! Page resolver
//!
//! Resolves a document reference to its image directory, enumerates the
//! page images and slices the requested window. Two modes are exposed:
//!
//! - `list_quality`: index pagination over a quality tier directory, in
//!   enumeration order. An empty tier is a valid result.
//! - `list_range`: range pagination over the page-number order of a
//!   legacy book directory. An empty directory is `NoImages`.
//!
//! Every call re-reads the filesystem; nothing is cached between requests.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use regex::Regex;

use crate::config::ImageConfig;

use super::enumerator::{FileEnumerator, FsEnumerator};
use super::error::{PageError, Result};
use super::path::{rewrite_legacy, sanitize_reference, sanitize_segment};
use super::types::{
    EmptyPolicy, ImagePage, PageCollection, PageEntry, PageLink, PageRange, PaginationMode,
    QualityTier,
};
use super::url::{PublicUrlBuilder, UrlBuilder};

/// Resolves and paginates page images for documents under the image root
#[derive(Clone)]
pub struct PageResolver {
    config: ImageConfig,
    pattern: Regex,
    enumerator: Arc<dyn FileEnumerator>,
    urls: Arc<dyn UrlBuilder>,
}

impl PageResolver {
    /// Create a resolver reading the local filesystem and serving URLs
    /// under `config.base_url`
    pub fn new(config: ImageConfig) -> Result<Self> {
        let urls = PublicUrlBuilder::new(config.root.clone(), config.base_url.clone());
        Self::with_collaborators(config, Arc::new(FsEnumerator), Arc::new(urls))
    }

    /// Create a resolver with explicit enumeration and URL collaborators
    pub fn with_collaborators(
        config: ImageConfig,
        enumerator: Arc<dyn FileEnumerator>,
        urls: Arc<dyn UrlBuilder>,
    ) -> Result<Self> {
        let pattern = Regex::new(&config.page_pattern)
            .map_err(|e| PageError::InvalidPattern(e.to_string()))?;
        if pattern.captures_len() < 2 {
            return Err(PageError::InvalidPattern(format!(
                "{} has no capture group for the page number",
                config.page_pattern
            )));
        }

        Ok(Self {
            config,
            pattern,
            enumerator,
            urls,
        })
    }

    /// Directory holding every quality tier of a document
    pub fn document_dir(&self, document: &str) -> Result<PathBuf> {
        let document = sanitize_segment(document)?;
        Ok(self
            .config
            .root
            .join(&self.config.documents_dir)
            .join(document))
    }

    /// `<root>/<documents_dir>/<document>/<tier dir>`
    pub fn quality_dir(&self, document: &str, tier: QualityTier) -> Result<PathBuf> {
        Ok(self
            .document_dir(document)?
            .join(tier.dir_name(&self.config.quality_dirs)))
    }

    /// Directory of converted images for a (possibly percent-encoded)
    /// book file reference
    pub fn legacy_dir(&self, reference: &str) -> Result<PathBuf> {
        let decoded = urlencoding::decode(reference)
            .map_err(|_| PageError::InvalidReference(reference.to_string()))?;
        sanitize_reference(&decoded)?;

        let rewritten = rewrite_legacy(&decoded, &self.config.legacy_rewrite);
        let relative = sanitize_reference(&rewritten)?;
        Ok(self.config.root.join(relative))
    }

    /// Page number encoded in a filename, if it follows the page pattern
    pub fn parse_page_number(&self, file_name: &str) -> Option<u32> {
        let captures = self.pattern.captures(file_name)?;
        captures.get(1)?.as_str().parse().ok()
    }

    /// Build the page-number ordered collection for a directory.
    ///
    /// Files whose page token does not parse are skipped. When two files
    /// carry the same page number the later one in enumeration order wins.
    pub fn collect_pages(&self, dir: &Path) -> Result<PageCollection> {
        let files = self.list_files(dir, Some(&self.pattern))?;

        let mut pages = PageCollection::new();
        for path in files {
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            let Some(number) = self.parse_page_number(file_name) else {
                tracing::debug!("Skipping file with malformed page number: {}", path.display());
                continue;
            };
            let Some(url) = self.urls.url_for(&path) else {
                tracing::warn!("No public URL for page image: {}", path.display());
                continue;
            };

            if let Some(previous) = pages.insert(PageEntry { number, path, url }) {
                tracing::warn!(
                    "Duplicate page {} in {}: {} replaced by a later file",
                    number,
                    dir.display(),
                    previous.path.display()
                );
            }
        }

        Ok(pages)
    }

    /// Index-paginated listing of one quality tier of a document.
    ///
    /// A missing document directory is `DirectoryNotFound`; a missing or
    /// empty tier directory yields an empty page.
    pub fn list_quality(
        &self,
        document: &str,
        tier: QualityTier,
        page: usize,
    ) -> Result<ImagePage> {
        self.ensure_dir(&self.document_dir(document)?)?;

        let tier_dir = self.quality_dir(document, tier)?;
        let files = match self.list_files(&tier_dir, None) {
            Ok(files) => files,
            Err(PageError::Io(e)) if e.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(e),
        };

        let mode = PaginationMode::index(page, self.config.index_per_page);
        self.check_empty(mode, files.len(), &tier_dir)?;

        let images: Vec<String> = mode
            .window(&files)
            .iter()
            .filter_map(|path| self.urls.url_for(path))
            .collect();

        tracing::debug!(
            "Resolved {} of {} images for {} ({})",
            images.len(),
            files.len(),
            document,
            tier.as_str()
        );

        Ok(ImagePage {
            images,
            page: page.max(1),
            has_more: mode.has_more(files.len()),
        })
    }

    /// Range-paginated listing of a legacy book reference, in page-number
    /// order. `count` defaults to `range_default_count`.
    pub fn list_range(
        &self,
        reference: &str,
        start: usize,
        count: Option<usize>,
    ) -> Result<PageRange> {
        let dir = self.legacy_dir(reference)?;
        self.ensure_dir(&dir)?;

        let pages = self.collect_pages(&dir)?;
        let mode = PaginationMode::range(start, count.unwrap_or(self.config.range_default_count));
        self.check_empty(mode, pages.len(), &dir)?;

        let ordered: Vec<&PageEntry> = pages.iter().collect();
        let window: Vec<PageLink> = mode
            .window(&ordered)
            .iter()
            .map(|entry| PageLink {
                number: entry.number,
                url: entry.url.clone(),
            })
            .collect();

        tracing::debug!(
            "Resolved pages {}..+{} of {} for {}",
            mode.offset() + 1,
            window.len(),
            pages.len(),
            dir.display()
        );

        Ok(PageRange {
            pages: window,
            total_pages: pages.len(),
        })
    }

    fn ensure_dir(&self, dir: &Path) -> Result<()> {
        if self.enumerator.is_dir(dir) {
            return Ok(());
        }
        tracing::error!("Directory not found: {}", dir.display());
        Err(PageError::DirectoryNotFound(dir.to_path_buf()))
    }

    fn check_empty(&self, mode: PaginationMode, total: usize, dir: &Path) -> Result<()> {
        if total == 0 && mode.empty_policy() == EmptyPolicy::Reject {
            tracing::error!("No images found in directory: {}", dir.display());
            return Err(PageError::NoImages(dir.to_path_buf()));
        }
        Ok(())
    }

    fn list_files(&self, dir: &Path, pattern: Option<&Regex>) -> Result<Vec<PathBuf>> {
        let listing = self.enumerator.list(dir, pattern, self.config.max_files)?;
        if listing.truncated {
            tracing::warn!(
                "Listing of {} stopped at {} files",
                dir.display(),
                self.config.max_files
            );
        }
        Ok(listing.files)
    }
}
