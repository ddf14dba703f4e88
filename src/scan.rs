//! Content scanning and manifest generation.
//!
//! Walks the content directory, reads every post's frontmatter, and builds
//! the category tree and home feed from it. The result is a [`Site`] held in
//! memory plus a serializable [`Manifest`] for inspection.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Category map + series (optional)
//! ├── posts/
//! │   ├── hooks.md                 # Post (slug = file stem)
//! │   ├── weekly-12/
//! │   │   └── index.md             # Post (slug = directory name)
//! │   └── ...
//! └── .drafts/                     # Hidden entries are skipped
//! ```
//!
//! Any `.md` or `.mdx` file below the root is a post and must open with a
//! YAML frontmatter block.
//!
//! ## Order
//!
//! Posts are sorted newest-first; undated posts go last, ties break on slug.
//! Files are parsed in parallel, so this sort is what makes the output
//! deterministic.
//!
//! ## Validation
//!
//! - `config.toml` is loaded and validated before any post is read
//! - Every post needs frontmatter
//! - No two posts may share a slug

use crate::category::{
    self, CategoryEntry, CategoryList, CategoryMap, CountMap, normalize, node_url,
};
use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontmatterError};
use crate::series::{self, HomeFeed};
use crate::types::Post;
use rayon::prelude::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid frontmatter in {path}: {source}")]
    Frontmatter {
        path: PathBuf,
        source: FrontmatterError,
    },
    #[error("No frontmatter found in post: {0}")]
    MissingFrontmatter(PathBuf),
    #[error("Duplicate post slug \"{0}\": {1} and {2}")]
    DuplicateSlug(String, PathBuf, PathBuf),
}

const POST_EXTENSIONS: &[&str] = &["md", "mdx"];

#[derive(Debug, Clone, Default)]
pub struct ScanOptions {
    /// Keep posts marked `draft: true`.
    pub include_drafts: bool,
}

/// Everything the page layer needs, built once per scan.
#[derive(Debug)]
pub struct Site {
    pub config: SiteConfig,
    /// Newest first.
    pub posts: Vec<Post>,
    pub categories: CategoryList,
}

impl Site {
    /// Build a site from posts already in memory. Posts are re-sorted newest-first.
    pub fn from_posts(config: SiteConfig, mut posts: Vec<Post>) -> Self {
        sort_newest_first(&mut posts);
        let categories = category::category_list(&posts);
        Site {
            config,
            posts,
            categories,
        }
    }

    pub fn category_map(&self) -> &CategoryMap {
        &self.config.category_map
    }

    pub fn home_feed(&self) -> HomeFeed<'_> {
        series::home_page_posts(&self.posts, &self.config.series)
    }

    /// Category names in the tree with no slug mapping, in pre-order, once each.
    pub fn unmapped_categories(&self) -> Vec<&str> {
        let map = self.category_map();
        let mut seen = HashSet::new();
        self.categories
            .tree
            .preorder()
            .map(|n| n.name.as_str())
            .filter(|name| !map.contains_name(name))
            .filter(|name| seen.insert(*name))
            .collect()
    }

    pub fn manifest(&self) -> Manifest {
        let feed = self.home_feed();
        let map = self.category_map();
        let tree = &self.categories.tree;

        let posts = self
            .posts
            .iter()
            .map(|p| {
                let path = normalize(p.categories.as_ref());
                let category_url = (p.catalog && !path.is_empty())
                    .then(|| tree.find_path(path.as_slice()))
                    .flatten()
                    .map(|node| node_url(tree, map, node.id));
                PostSummary {
                    slug: p.slug.clone(),
                    title: p.title.clone(),
                    date: p.date.map(|d| d.to_string()),
                    source_path: p.source_path.clone(),
                    category_path: path,
                    category_url,
                    catalog: p.catalog,
                    sticky: p.sticky,
                }
            })
            .collect();

        let series_summaries = self
            .config
            .series
            .iter()
            .map(|def| SeriesSummary {
                slug: def.slug.clone(),
                category_name: def.category_name.clone(),
                enabled: def.enabled,
                highlight_on_home: def.highlight_on_home,
                posts: series::series_posts(&self.posts, def)
                    .iter()
                    .map(|p| p.slug.clone())
                    .collect(),
            })
            .collect();

        Manifest {
            categories: tree.to_entries(&self.categories.counts),
            counts: self.categories.counts.clone(),
            home: HomeSummary {
                highlighted: post_slugs(&feed.highlighted),
                sticky: post_slugs(&feed.sticky),
                regular: post_slugs(&feed.regular),
            },
            series: series_summaries,
            unmapped: self
                .unmapped_categories()
                .into_iter()
                .map(String::from)
                .collect(),
            posts,
            config: self.config.clone(),
        }
    }
}

/// Serializable snapshot of a scan.
#[derive(Debug, Serialize)]
pub struct Manifest {
    pub categories: Vec<CategoryEntry>,
    pub counts: CountMap,
    pub home: HomeSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub series: Vec<SeriesSummary>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unmapped: Vec<String>,
    pub posts: Vec<PostSummary>,
    pub config: SiteConfig,
}

/// Home feed lists, as post slugs.
#[derive(Debug, Serialize)]
pub struct HomeSummary {
    pub highlighted: Vec<String>,
    pub sticky: Vec<String>,
    pub regular: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SeriesSummary {
    pub slug: String,
    pub category_name: String,
    pub enabled: bool,
    pub highlight_on_home: bool,
    pub posts: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    pub source_path: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub category_path: Vec<String>,
    /// Only set for posts that made it into the tree.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_url: Option<String>,
    pub catalog: bool,
    pub sticky: bool,
}

fn post_slugs(posts: &[&Post]) -> Vec<String> {
    posts.iter().map(|p| p.slug.clone()).collect()
}

pub fn scan(root: &Path) -> Result<Site, ScanError> {
    scan_with(root, &ScanOptions::default())
}

pub fn scan_with(root: &Path, options: &ScanOptions) -> Result<Site, ScanError> {
    // Config first: a bad series slug must stop the build before any work.
    let config = config::load_config(root)?;

    let paths = collect_post_paths(root)?;
    debug!(files = paths.len(), "collected post files");

    let loaded: Vec<Post> = paths
        .par_iter()
        .map(|path| load_post(root, path))
        .collect::<Result<Vec<Post>, ScanError>>()?;

    let mut posts = Vec::with_capacity(loaded.len());
    for post in loaded {
        if post.draft && !options.include_drafts {
            debug!(slug = %post.slug, "skipping draft");
            continue;
        }
        posts.push(post);
    }
    check_duplicate_slugs(root, &posts)?;

    let site = Site::from_posts(config, posts);
    info!(
        posts = site.posts.len(),
        categories = site.categories.tree.len(),
        "scanned content"
    );
    for name in site.unmapped_categories() {
        warn!(category = name, "category has no entry in [category_map]");
    }
    Ok(site)
}

fn collect_post_paths(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut paths = Vec::new();
    let walker = WalkDir::new(root)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !e.file_name().to_string_lossy().starts_with('.'));
    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && is_post(entry.path()) {
            paths.push(entry.into_path());
        }
    }
    paths.sort();
    Ok(paths)
}

fn is_post(path: &Path) -> bool {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();
    POST_EXTENSIONS.contains(&ext.as_str())
}

fn load_post(root: &Path, path: &Path) -> Result<Post, ScanError> {
    let content = fs::read_to_string(path)?;
    let mut post = frontmatter::parse_post(&content)
        .map_err(|source| ScanError::Frontmatter {
            path: path.to_path_buf(),
            source,
        })?
        .ok_or_else(|| ScanError::MissingFrontmatter(path.to_path_buf()))?;

    let rel = path.strip_prefix(root).unwrap_or(path);
    post.source_path = rel.to_string_lossy().replace('\\', "/");
    if post.slug.is_empty() {
        post.slug = slug_from_path(rel);
    }
    if post.title.is_empty() {
        post.title = post.slug.replace('-', " ");
    }
    Ok(post)
}

/// `posts/hooks.md` → `hooks`; `posts/weekly-12/index.md` → `weekly-12`.
fn slug_from_path(rel: &Path) -> String {
    let stem = rel
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_default();
    if stem == "index"
        && let Some(dir) = rel.parent().and_then(|p| p.file_name())
    {
        return dir.to_string_lossy().to_string();
    }
    stem
}

fn check_duplicate_slugs(root: &Path, posts: &[Post]) -> Result<(), ScanError> {
    let mut seen: HashMap<&str, &str> = HashMap::new();
    for post in posts {
        if let Some(first) = seen.insert(post.slug.as_str(), post.source_path.as_str()) {
            return Err(ScanError::DuplicateSlug(
                post.slug.clone(),
                root.join(first),
                root.join(&post.source_path),
            ));
        }
    }
    Ok(())
}

fn sort_newest_first(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug)));
}
