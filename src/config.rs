//! Site configuration module.
//!
//! Handles loading and validating `config.toml`. Every key is optional; a
//! missing file or key falls back to the empty default.
//!
//! ## Config File Location
//!
//! ```text
//! content/
//! ├── config.toml              # Category map + series definitions
//! ├── posts/
//! │   └── ...
//! └── ...
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # Category name → URL slug. Names missing here produce broken
//! # `/categories/.../undefined` links; `check` lists them.
//! [category_map]
//! Notes = "notes"
//! Frontend = "frontend"
//!
//! # A series is a top-level category with its own route.
//! [[series]]
//! slug = "weekly"              # Route: /weekly (must not be a reserved route)
//! category_name = "Weekly"     # Posts whose top-level category is this name
//! enabled = true
//! highlight_on_home = true     # Newest post shown once on the home page
//! description = "Things I read this week"
//! ```
//!
//! ## Validation
//!
//! A series slug that collides with a reserved top-level route (see
//! [`RESERVED_ROUTES`]) would shadow that route or be shadowed by it. This is
//! reported as [`ConfigError::ReservedSlug`] before anything else is built.
//! Unknown keys are rejected to catch typos early.

use crate::category::CategoryMap;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Top-level routes owned by the page layer. Series slugs may not use them.
pub const RESERVED_ROUTES: &[&str] = &[
    "categories",
    "tags",
    "archives",
    "posts",
    "page",
    "about",
    "search",
    "friends",
    "rss.xml",
    "404",
];

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error(
        "series slug \"{slug}\" collides with a reserved route (reserved: {})",
        .reserved.join(", ")
    )]
    ReservedSlug { slug: String, reserved: Vec<String> },
    #[error("series slug \"{0}\" is used by more than one series")]
    DuplicateSeriesSlug(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Category name → URL slug.
    pub category_map: CategoryMap,
    /// Series definitions, in display order.
    pub series: Vec<SeriesDefinition>,
}

/// A category promoted to its own route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeriesDefinition {
    /// Route under the site root. Unique across series, never a reserved route.
    pub slug: String,
    /// Top-level category name that makes a post part of this series.
    pub category_name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Show the newest post of the series on the home page.
    #[serde(default)]
    pub highlight_on_home: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_enabled() -> bool {
    true
}

impl SeriesDefinition {
    pub fn new(slug: impl Into<String>, category_name: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            category_name: category_name.into(),
            enabled: true,
            highlight_on_home: false,
            description: None,
        }
    }
}

impl SiteConfig {
    /// Validate the category map and series definitions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, slug) in self.category_map.iter() {
            if slug.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "category_map: slug for \"{name}\" must not be empty"
                )));
            }
            if slug.contains('/') {
                return Err(ConfigError::Validation(format!(
                    "category_map: slug \"{slug}\" for \"{name}\" must not contain '/'"
                )));
            }
        }

        let mut seen = HashSet::new();
        for series in &self.series {
            if series.slug.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "series.slug must not be empty".into(),
                ));
            }
            if series.category_name.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "series \"{}\": category_name must not be empty",
                    series.slug
                )));
            }
            check_reserved(&series.slug)?;
            if !seen.insert(series.slug.as_str()) {
                return Err(ConfigError::DuplicateSeriesSlug(series.slug.clone()));
            }
        }
        Ok(())
    }

    /// Series that are switched on.
    pub fn enabled_series(&self) -> impl Iterator<Item = &SeriesDefinition> {
        self.series.iter().filter(|s| s.enabled)
    }
}

/// Reject a route slug that collides with a reserved top-level route.
///
/// Matching ignores ASCII case and surrounding slashes, since `/Tags/` and
/// `tags` end up at the same place on case-insensitive hosts.
pub fn check_reserved(slug: &str) -> Result<(), ConfigError> {
    let normalized = slug.trim_matches('/');
    if RESERVED_ROUTES
        .iter()
        .any(|r| r.eq_ignore_ascii_case(normalized))
    {
        return Err(ConfigError::ReservedSlug {
            slug: slug.to_string(),
            reserved: RESERVED_ROUTES.iter().map(|r| r.to_string()).collect(),
        });
    }
    Ok(())
}

// =============================================================================
// Config loading and validation
// =============================================================================

/// Load and validate `config.toml` from the content root.
///
/// A missing file gives the empty default config. Keys left out of the file
/// fall back to their field defaults through `#[serde(default)]`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let config_path = root.join("config.toml");
    if !config_path.exists() {
        return Ok(SiteConfig::default());
    }
    let content = fs::read_to_string(&config_path)?;
    let config: SiteConfig = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Blog taxonomy configuration
# ===========================
# Place this file at the root of the content directory.
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Category slugs
# ---------------------------------------------------------------------------
# Maps the category names used in post frontmatter to URL slugs:
#   categories: [[Notes, Frontend]]  ->  /categories/notes/frontend
# A name without an entry here produces an "undefined" URL segment.
[category_map]
# Notes = "notes"
# Frontend = "frontend"

# ---------------------------------------------------------------------------
# Series
# ---------------------------------------------------------------------------
# A series is a top-level category with its own route. Posts of an enabled
# series are kept out of the home feed; with highlight_on_home the newest one
# is shown there once. The slug must not be a reserved route:
#   categories, tags, archives, posts, page, about, search, friends, rss.xml, 404
#
# [[series]]
# slug = "weekly"
# category_name = "Weekly"
# enabled = true
# highlight_on_home = true
# description = "Things I read this week"
"##
}
