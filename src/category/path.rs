//! Translation between category paths and category page URLs.
//!
//! ```text
//! ["Notes", "Frontend"]  ──build_category_path──▶  /categories/notes/frontend
//! /categories/notes/frontend/  ──category_by_link──▶  node "Frontend"
//! ```
//!
//! Reverse lookup only looks at the last URL segment and then searches the
//! whole tree by name, so the URL prefix is not checked against the node's
//! ancestry. A name present at two depths resolves to the first pre-order hit.

use super::map::CategoryMap;
use super::tree::{CategoryNode, CategoryTree, NodeId};
use serde::Serialize;
use tracing::warn;

/// Top-level route under which category pages live.
pub const CATEGORIES_ROUTE: &str = "categories";

/// Segment emitted for a category name that has no slug in the map.
///
/// Kept as-is so existing links stay byte-identical; `check` reports the
/// offending names instead.
pub const UNMAPPED_SEGMENT: &str = "undefined";

/// URL of the category page for a root → leaf list of names.
pub fn build_category_path<S: AsRef<str>>(map: &CategoryMap, names: &[S]) -> String {
    let mut url = format!("/{CATEGORIES_ROUTE}");
    for name in names {
        let name = name.as_ref();
        let slug = map.slug(name).unwrap_or_else(|| {
            warn!(category = name, "category has no slug mapping");
            UNMAPPED_SEGMENT
        });
        url.push('/');
        url.push_str(slug);
    }
    url
}

/// Node addressed by a category page URL, if any.
pub fn category_by_link<'a>(
    tree: &'a CategoryTree,
    map: &CategoryMap,
    url: &str,
) -> Option<&'a CategoryNode> {
    let last = url.trim_matches('/').rsplit('/').next()?;
    if last.is_empty() {
        return None;
    }
    let name = map.name(last)?;
    tree.find_by_name(name)
}

/// The node whose children include `node`.
///
/// `None` for a root, and for a node that is not part of `tree`.
pub fn parent_category<'a>(
    tree: &'a CategoryTree,
    node: &CategoryNode,
) -> Option<&'a CategoryNode> {
    if tree.get(node.id) != Some(node) {
        return None;
    }
    tree.parent(node.id)
}

/// URL for an existing tree node.
pub fn node_url(tree: &CategoryTree, map: &CategoryMap, id: NodeId) -> String {
    build_category_path(map, tree.path_of(id).as_slice())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
}

/// One crumb per ancestor of `id`, root first, ending with `id` itself.
pub fn breadcrumbs(tree: &CategoryTree, map: &CategoryMap, id: NodeId) -> Vec<Breadcrumb> {
    let path = tree.path_of(id);
    (1..=path.len())
        .map(|len| Breadcrumb {
            name: path[len - 1].to_string(),
            url: build_category_path(map, &path[..len]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::tree::CategoryTreeBuilder;

    fn map() -> CategoryMap {
        [
            ("Tools", "tools"),
            ("Notes", "notes"),
            ("Frontend", "frontend"),
            ("React", "react"),
            ("Algorithm", "algorithm"),
        ]
        .into_iter()
        .collect()
    }

    fn tree() -> CategoryTree {
        let mut builder = CategoryTreeBuilder::new();
        builder.insert_path(&["Tools"]);
        builder.insert_path(&["Notes", "Frontend", "React"]);
        builder.insert_path(&["Notes", "Algorithm"]);
        builder.finish().tree
    }

    // =========================================================================
    // build_category_path
    // =========================================================================

    #[test]
    fn joins_slugs_under_route() {
        assert_eq!(
            build_category_path(&map(), &["Notes", "Frontend"]),
            "/categories/notes/frontend"
        );
    }

    #[test]
    fn empty_path_is_route_root() {
        assert_eq!(build_category_path::<&str>(&map(), &[]), "/categories");
    }

    #[test]
    fn unmapped_name_emits_undefined_segment() {
        assert_eq!(
            build_category_path(&map(), &["Notes", "Rust"]),
            "/categories/notes/undefined"
        );
    }

    // =========================================================================
    // category_by_link
    // =========================================================================

    #[test]
    fn resolves_last_segment() {
        let tree = tree();
        let node = category_by_link(&tree, &map(), "/categories/notes/frontend/").unwrap();
        assert_eq!(node.name, "Frontend");
    }

    #[test]
    fn prefix_segments_are_not_checked() {
        let tree = tree();
        let node = category_by_link(&tree, &map(), "/categories/tools/react").unwrap();
        assert_eq!(tree.path_of(node.id), vec!["Notes", "Frontend", "React"]);
    }

    #[test]
    fn unknown_slug_is_none() {
        let tree = tree();
        assert!(category_by_link(&tree, &map(), "/categories/nope").is_none());
        assert!(category_by_link(&tree, &map(), "/categories/notes/undefined").is_none());
    }

    #[test]
    fn bare_route_and_empty_url_are_none() {
        let tree = tree();
        assert!(category_by_link(&tree, &map(), "/categories/").is_none());
        assert!(category_by_link(&tree, &map(), "").is_none());
        assert!(category_by_link(&tree, &map(), "///").is_none());
    }

    #[test]
    fn mapped_slug_missing_from_tree_is_none() {
        let mut map = map();
        map.insert("Life", "life");
        assert!(category_by_link(&tree(), &map, "/categories/life").is_none());
    }

    #[test]
    fn duplicate_name_resolves_to_first_preorder_match() {
        let mut builder = CategoryTreeBuilder::new();
        builder.insert_path(&["Notes", "React"]);
        builder.insert_path(&["React"]);
        let tree = builder.finish().tree;

        let node = category_by_link(&tree, &map(), "/categories/react").unwrap();
        assert_eq!(tree.path_of(node.id), vec!["Notes", "React"]);

        let mut builder = CategoryTreeBuilder::new();
        builder.insert_path(&["React"]);
        builder.insert_path(&["Notes", "React"]);
        let tree = builder.finish().tree;

        let node = category_by_link(&tree, &map(), "/categories/notes/react").unwrap();
        assert_eq!(tree.path_of(node.id), vec!["React"]);
    }

    #[test]
    fn round_trip_every_mapped_node() {
        let tree = tree();
        let map = map();
        for node in tree.preorder() {
            let url = node_url(&tree, &map, node.id);
            let found = category_by_link(&tree, &map, &url).unwrap();
            assert_eq!(found.id, node.id, "round trip through {url}");
        }
    }

    // =========================================================================
    // parent_category / breadcrumbs
    // =========================================================================

    #[test]
    fn parent_of_nested_node() {
        let tree = tree();
        let react = tree.find_by_name("React").unwrap();
        let parent = parent_category(&tree, react).unwrap();
        assert_eq!(parent.name, "Frontend");
        let grandparent = parent_category(&tree, parent).unwrap();
        assert_eq!(grandparent.name, "Notes");
        assert!(parent_category(&tree, grandparent).is_none());
    }

    #[test]
    fn parent_of_node_from_another_tree_is_none() {
        let tree = tree();
        let react = tree.find_by_name("React").unwrap();

        let mut builder = CategoryTreeBuilder::new();
        builder.insert_path(&["Tools"]);
        let small = builder.finish().tree;
        assert!(parent_category(&small, react).is_none());

        // Same id, different node.
        let mut builder = CategoryTreeBuilder::new();
        builder.insert_path(&["A", "B", "C", "D"]);
        let deep = builder.finish().tree;
        assert!(deep.find_by_name("D").is_some());
        assert!(parent_category(&deep, react).is_none());
    }

    #[test]
    fn breadcrumbs_from_root() {
        let tree = tree();
        let react = tree.find_by_name("React").unwrap();
        let crumbs = breadcrumbs(&tree, &map(), react.id);
        let urls: Vec<&str> = crumbs.iter().map(|c| c.url.as_str()).collect();
        assert_eq!(
            urls,
            vec![
                "/categories/notes",
                "/categories/notes/frontend",
                "/categories/notes/frontend/react",
            ]
        );
        assert_eq!(crumbs[0].name, "Notes");
    }
}
