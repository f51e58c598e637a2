//! Page image resolution
//!
//! Turns a document reference into an ordered, paginated list of page
//! image URLs:
//! - `path`: reference sanitization and legacy path rewriting
//! - `enumerator`: directory listing behind the `FileEnumerator` seam
//! - `url`: filesystem path to public URL mapping
//! - `resolver`: the two pagination modes

mod enumerator;
mod error;
mod path;
mod resolver;
mod types;
mod url;

pub use enumerator::{FileEnumerator, FsEnumerator, Listing};
pub use error::{PageError, Result};
pub use path::{rewrite_legacy, sanitize_reference, sanitize_segment};
pub use resolver::PageResolver;
pub use types::{
    EmptyPolicy, ImagePage, PageCollection, PageEntry, PageLink, PageRange, PaginationMode,
    QualityTier,
};
pub use url::{PublicUrlBuilder, UrlBuilder};
