//! Hierarchical categories.
//!
//! | Step | Module |
//! |---|---|
//! | **Normalize** raw frontmatter field → root → leaf names | [`normalize`] |
//! | **Build** the tree + per-name counts from cataloged posts | [`tree`] |
//! | **Resolve** names ⇄ URLs, parents, breadcrumbs | [`path`] |
//! | **Map** names ⇄ slugs | [`map`] |
//!
//! The tree is built once per scan and only read afterwards.

pub mod map;
pub mod normalize;
pub mod path;
pub mod tree;

pub use map::CategoryMap;
pub use normalize::{Category, classify, normalize};
pub use path::{
    Breadcrumb, CATEGORIES_ROUTE, UNMAPPED_SEGMENT, breadcrumbs, build_category_path,
    category_by_link, node_url, parent_category,
};
pub use tree::{
    CategoryEntry, CategoryList, CategoryNode, CategoryTree, CategoryTreeBuilder, CountMap, NodeId,
};

use crate::types::Post;

/// Category tree and counts for every cataloged post.
pub fn category_list(posts: &[Post]) -> CategoryList {
    tree::build(posts)
}

/// Cataloged posts filed under `prefix` (at any depth below it), in input order.
pub fn posts_in_category<'a, S: AsRef<str>>(posts: &'a [Post], prefix: &[S]) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| p.catalog)
        .filter(|p| {
            let path = normalize(p.categories.as_ref());
            path.len() >= prefix.len()
                && path.iter().zip(prefix).all(|(a, b)| a == b.as_ref())
        })
        .collect()
}
