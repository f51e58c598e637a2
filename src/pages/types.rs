//! Page resolution types

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::QualityDirs;

/// Image quality tier, stored on disk as a subdirectory per document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QualityTier {
    Low,
    #[default]
    Medium,
    High,
}

impl QualityTier {
    /// Parse a tier name. Anything other than exactly `low` or `medium`,
    /// including other casings, is `High`.
    pub fn parse(value: &str) -> Self {
        match value {
            "low" => QualityTier::Low,
            "medium" => QualityTier::Medium,
            _ => QualityTier::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityTier::Low => "low",
            QualityTier::Medium => "medium",
            QualityTier::High => "high",
        }
    }

    /// Subdirectory holding this tier's images
    pub fn dir_name<'a>(&self, dirs: &'a QualityDirs) -> &'a str {
        match self {
            QualityTier::Low => &dirs.low,
            QualityTier::Medium => &dirs.medium,
            QualityTier::High => &dirs.high,
        }
    }
}

/// One page image, keyed by the page number parsed from its filename
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub number: u32,
    pub path: PathBuf,
    pub url: String,
}

/// All pages of one document, ordered by page number.
///
/// Built per request and dropped with it.
#[derive(Debug, Clone, Default)]
pub struct PageCollection {
    pages: BTreeMap<u32, PageEntry>,
}

impl PageCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a page, returning the entry it replaced on a number collision
    pub fn insert(&mut self, entry: PageEntry) -> Option<PageEntry> {
        self.pages.insert(entry.number, entry)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Pages in ascending page-number order
    pub fn iter(&self) -> impl Iterator<Item = &PageEntry> {
        self.pages.values()
    }
}

/// What an empty listing means for a pagination mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyPolicy {
    /// Empty directory is a valid, empty result
    Allow,
    /// Empty directory is reported as `NoImages`
    Reject,
}

/// The two windowing schemes exposed over HTTP.
///
/// They are deliberately not unified: index pagination slices raw
/// enumeration order, range pagination slices the page-number order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// Fixed-size pages of results, `page` is 1-based
    IndexPaginated { page: usize, per_page: usize },
    /// Explicit window, `start` is a 1-based position in the ordered pages
    RangePaginated { start: usize, count: usize },
}

impl PaginationMode {
    /// Index mode; a `page` of 0 is treated as 1
    pub fn index(page: usize, per_page: usize) -> Self {
        PaginationMode::IndexPaginated {
            page: page.max(1),
            per_page,
        }
    }

    /// Range mode; a `start` of 0 is treated as 1
    pub fn range(start: usize, count: usize) -> Self {
        PaginationMode::RangePaginated {
            start: start.max(1),
            count,
        }
    }

    /// 0-based offset of the first item in the window
    pub fn offset(&self) -> usize {
        match *self {
            PaginationMode::IndexPaginated { page, per_page } => {
                page.saturating_sub(1).saturating_mul(per_page)
            }
            PaginationMode::RangePaginated { start, .. } => start.saturating_sub(1),
        }
    }

    /// Maximum number of items in the window
    pub fn limit(&self) -> usize {
        match *self {
            PaginationMode::IndexPaginated { per_page, .. } => per_page,
            PaginationMode::RangePaginated { count, .. } => count,
        }
    }

    /// Slice the window out of `items`, empty when the offset is past the end
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset().min(items.len());
        let end = start.saturating_add(self.limit()).min(items.len());
        &items[start..end]
    }

    /// Whether items remain after this window
    pub fn has_more(&self, total: usize) -> bool {
        match *self {
            PaginationMode::IndexPaginated { page, per_page } => {
                total > page.saturating_mul(per_page)
            }
            PaginationMode::RangePaginated { .. } => {
                total > self.offset().saturating_add(self.limit())
            }
        }
    }

    pub fn empty_policy(&self) -> EmptyPolicy {
        match self {
            PaginationMode::IndexPaginated { .. } => EmptyPolicy::Allow,
            PaginationMode::RangePaginated { .. } => EmptyPolicy::Reject,
        }
    }
}

/// Index-paginated response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImagePage {
    pub images: Vec<String>,
    pub page: usize,
    pub has_more: bool,
}

/// Page number and URL pair in a range response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub number: u32,
    pub url: String,
}

/// Range-paginated response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRange {
    pub pages: Vec<PageLink>,
    /// Size of the whole document, independent of the window
    pub total_pages: usize,
}
