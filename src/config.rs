//! Configuration management for Page Server

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub images: ImageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where page images live and how their directories and filenames are laid out
#[derive(Debug, Clone, Deserialize)]
pub struct ImageConfig {
    /// Filesystem root every resolved directory must stay inside
    pub root: PathBuf,
    /// URL prefix that maps to `root` (served by `/files` by default)
    pub base_url: String,
    /// Subdirectory of `root` holding per-document quality tiers
    pub documents_dir: String,
    pub quality_dirs: QualityDirs,
    /// Regex with one capture group holding the page number
    pub page_pattern: String,
    /// Fixed page size of the index-paginated mode
    pub index_per_page: usize,
    /// Default `count` of the range-paginated mode
    pub range_default_count: usize,
    pub legacy_rewrite: PathRewrite,
    /// Upper bound on directory entries read per request
    pub max_files: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QualityDirs {
    pub low: String,
    pub medium: String,
    pub high: String,
}

/// Rewrite applied to legacy book references to find their converted images.
///
/// `Book/PDF/novel.pdf` becomes `Book/compressed/novel`.
#[derive(Debug, Clone, Deserialize)]
pub struct PathRewrite {
    pub from: String,
    pub to: String,
    pub strip_suffix: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        ImageConfig {
            root: PathBuf::from("./public"),
            base_url: "/files".to_string(),
            documents_dir: "pdfs".to_string(),
            quality_dirs: QualityDirs::default(),
            page_pattern: r"^p_(\d+)\.webp$".to_string(),
            index_per_page: 10,
            range_default_count: 20,
            legacy_rewrite: PathRewrite::default(),
            max_files: 10_000,
        }
    }
}

impl Default for QualityDirs {
    fn default() -> Self {
        QualityDirs {
            low: "low_quality".to_string(),
            medium: "medium_quality".to_string(),
            high: "high_quality".to_string(),
        }
    }
}

impl Default for PathRewrite {
    fn default() -> Self {
        PathRewrite {
            from: "Book/PDF".to_string(),
            to: "Book/compressed".to_string(),
            strip_suffix: ".pdf".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 3000,
            },
            images: ImageConfig::default(),
        }
    }
}

impl Config {
    /// Build the configuration from environment variables.
    ///
    /// Every variable is optional. Unset values use the defaults and
    /// unparseable numbers are logged and replaced by their default.
    pub fn from_env() -> Self {
        let defaults = ImageConfig::default();

        Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
                port: parse_var("SERVER_PORT", 3000),
            },
            images: ImageConfig {
                root: env::var("IMAGE_ROOT").map(PathBuf::from).unwrap_or(defaults.root),
                base_url: env::var("PUBLIC_BASE_URL").unwrap_or(defaults.base_url),
                documents_dir: env::var("DOCUMENTS_DIR").unwrap_or(defaults.documents_dir),
                quality_dirs: QualityDirs {
                    low: env::var("QUALITY_DIR_LOW").unwrap_or(defaults.quality_dirs.low),
                    medium: env::var("QUALITY_DIR_MEDIUM").unwrap_or(defaults.quality_dirs.medium),
                    high: env::var("QUALITY_DIR_HIGH").unwrap_or(defaults.quality_dirs.high),
                },
                page_pattern: env::var("PAGE_PATTERN").unwrap_or(defaults.page_pattern),
                index_per_page: parse_var("INDEX_PER_PAGE", defaults.index_per_page),
                range_default_count: parse_var("RANGE_DEFAULT_COUNT", defaults.range_default_count),
                legacy_rewrite: PathRewrite {
                    from: env::var("LEGACY_REWRITE_FROM").unwrap_or(defaults.legacy_rewrite.from),
                    to: env::var("LEGACY_REWRITE_TO").unwrap_or(defaults.legacy_rewrite.to),
                    strip_suffix: env::var("LEGACY_STRIP_SUFFIX")
                        .unwrap_or(defaults.legacy_rewrite.strip_suffix),
                },
                max_files: parse_var("MAX_FILES", defaults.max_files),
            },
        }
    }
}

fn parse_var<T: FromStr>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid value for {}: {:?}, using default", key, raw);
            default
        }),
        Err(_) => default,
    }
}
