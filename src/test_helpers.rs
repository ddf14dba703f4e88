//! Shared test utilities for the blog-taxonomy test suite.
//!
//! Provides a post builder, a fixture copier, and tree shape assertions.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let posts = vec![
//!     post("hooks").path(&["Notes", "Frontend"]).cataloged().build(),
//!     post("weekly-1").category("Weekly").build(),
//! ];
//! let list = crate::category::category_list(&posts);
//!
//! assert_tree_shape(&list.tree, &["Notes", "  Frontend"]);
//! ```

use std::path::Path;
use tempfile::TempDir;

use crate::category::CategoryTree;
use crate::config::SeriesDefinition;
use crate::types::{Post, PostDate, RawCategoryEntry, RawCategoryField};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

// =========================================================================
// Builders
// =========================================================================

pub struct PostBuilder {
    post: Post,
}

/// Start building a post with the given slug.
pub fn post(slug: &str) -> PostBuilder {
    PostBuilder {
        post: Post {
            slug: slug.to_string(),
            title: slug.to_string(),
            ..Post::default()
        },
    }
}

impl PostBuilder {
    /// `categories: <name>`
    pub fn category(mut self, name: &str) -> Self {
        self.post.categories = Some(RawCategoryField::Name(name.to_string()));
        self
    }

    /// `categories: [[a, b, ...]]`
    pub fn path(mut self, names: &[&str]) -> Self {
        let names = names.iter().map(|s| s.to_string()).collect();
        self.post.categories = Some(RawCategoryField::List(vec![RawCategoryEntry::Path(names)]));
        self
    }

    pub fn cataloged(mut self) -> Self {
        self.post.catalog = true;
        self
    }

    pub fn sticky(mut self) -> Self {
        self.post.sticky = true;
        self
    }

    pub fn date(mut self, date: &str) -> Self {
        self.post.date = Some(PostDate::parse(date).unwrap());
        self
    }

    pub fn build(self) -> Post {
        self.post
    }
}

/// An enabled, non-highlighting series.
pub fn series(slug: &str, category_name: &str) -> SeriesDefinition {
    SeriesDefinition::new(slug, category_name)
}

pub trait SeriesExt {
    fn highlighted(self) -> Self;
}

impl SeriesExt for SeriesDefinition {
    fn highlighted(mut self) -> Self {
        self.highlight_on_home = true;
        self
    }
}

// =========================================================================
// Extractors and assertions
// =========================================================================

/// Slugs of a list of posts, in order.
pub fn slugs<'a>(posts: &[&'a Post]) -> Vec<&'a str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}

/// Render a tree as indented lines, two spaces per level.
pub fn tree_lines(tree: &CategoryTree) -> Vec<String> {
    tree.preorder()
        .map(|n| format!("{}{}", "  ".repeat(tree.depth(n.id)), n.name))
        .collect()
}

/// Assert the whole tree, in pre-order, matches an indented outline.
///
/// ```rust
/// assert_tree_shape(&tree, &[
///     "Tools",
///     "Notes",
///     "  Frontend",
///     "    React",
/// ]);
/// ```
pub fn assert_tree_shape(tree: &CategoryTree, expected: &[&str]) {
    let actual = tree_lines(tree);
    let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
    assert_eq!(actual, expected, "category tree shape mismatch");
}
