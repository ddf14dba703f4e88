//! # Blog Taxonomy
//!
//! Category hierarchy and home feed grouping for a markdown blog. Posts
//! declare their categories in YAML frontmatter; this crate turns those
//! declarations into a browsable category tree, stable category page URLs,
//! and the three lists shown on the home page.
//!
//! ```text
//! content/  ──scan──▶  Site { posts, CategoryList }  ──manifest──▶  manifest.json
//!                          │
//!                          ├── category ──▶ tree, counts, /categories/... URLs
//!                          └── series ────▶ HomeFeed { highlighted, sticky, regular }
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content directory, parses frontmatter, builds the [`scan::Site`] and its manifest |
//! | [`category`] | Category normalization, tree building, name ⇄ slug map, URL resolution |
//! | [`series`] | Series membership and the home feed partition |
//! | [`config`] | `config.toml` loading and validation |
//! | [`frontmatter`] | `---` YAML block extraction |
//! | [`types`] | Post record, raw category field shapes, post dates |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Arena Tree
//!
//! Category nodes live in a single `Vec` and refer to each other by
//! [`category::NodeId`]. Parent links make breadcrumbs and parent lookup a walk
//! up the arena instead of a search from the roots. The tree is built once
//! per scan and never mutated afterwards.
//!
//! ## Lenient Frontmatter
//!
//! The `categories` field is accepted in every shape authors actually write:
//! a bare string, a list of strings, a list holding a nested path. Anything
//! else deserializes to a catch-all variant and the post is simply
//! uncategorized, so a typo in one post never breaks the build.
//!
//! ## Fatal Config
//!
//! The opposite holds for `config.toml`: a series slug that collides with a
//! reserved route would shadow a real page, so it stops the scan before any
//! post is read.

pub mod category;
pub mod config;
pub mod frontmatter;
pub mod output;
pub mod scan;
pub mod series;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use category::{build_category_path, category_by_link, category_list, parent_category};
pub use series::home_page_posts;
