//! CLI output formatting.
//!
//! Each command has a `format_*` function returning lines (pure, testable)
//! and a `print_*` wrapper that writes them to stdout.
//!
//! Entities lead with a positional index and their name; URLs and source
//! paths follow as context.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Categories
//! 001 Weekly (2 posts) → /categories/weekly-notes
//! 002 Notes (3 posts) → /categories/notes
//!     001 Frontend (2 posts) → /categories/notes/frontend
//!         001 React (1 post) → /categories/notes/frontend/react
//!
//! Series
//! 001 weekly → Weekly (2 posts, highlighted on home)
//!
//! Unmapped
//!     Rust
//!
//! Scanned 8 posts, 6 categories
//! ```
//!
//! ## Home
//!
//! ```text
//! Highlighted
//! 001 Weekly 12 (2024-06-10 00:00:00)
//!     Source: posts/weekly-12/index.md
//! Sticky
//! ...
//! ```
//!
//! ## Resolve
//!
//! ```text
//! Frontend → /categories/notes/frontend
//!     Path: Notes / Frontend
//!     Parent: Notes
//!     Children: React
//!     Breadcrumbs: Notes › Frontend
//!     Posts: 2
//! ```

use crate::category::{self, CategoryNode, CategoryTree, NodeId, breadcrumbs, category_by_link};
use crate::scan::Site;
use crate::series::{self, HomeFeed};
use crate::types::Post;

// ============================================================================
// Shared entity display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn post_count(n: usize) -> String {
    if n == 1 {
        "1 post".to_string()
    } else {
        format!("{} posts", n)
    }
}

/// ```text
/// 001 Notes (3 posts)
/// 001 Notes
/// ```
fn entity_header(index: usize, name: &str, count: Option<usize>) -> String {
    match count {
        Some(n) => format!("{} {} ({})", format_index(index), name, post_count(n)),
        None => format!("{} {}", format_index(index), name),
    }
}

fn post_line(index: usize, post: &Post) -> String {
    match post.date {
        Some(date) => format!("{} {} ({})", format_index(index), post.title, date),
        None => format!("{} {}", format_index(index), post.title),
    }
}

fn post_lines(title: &str, posts: &[&Post]) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    if posts.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    for (i, post) in posts.iter().enumerate() {
        lines.push(post_line(i + 1, post));
        lines.push(format!("{}Source: {}", indent(1), post.source_path));
    }
    lines
}

// ============================================================================
// Scan
// ============================================================================

fn walk_category_nodes<'a>(
    site: &Site,
    nodes: impl Iterator<Item = &'a CategoryNode>,
    depth: usize,
    lines: &mut Vec<String>,
) {
    let tree = &site.categories.tree;
    for (i, node) in nodes.enumerate() {
        let header = entity_header(i + 1, &node.name, Some(site.categories.count(&node.name)));
        let url = category::node_url(tree, site.category_map(), node.id);
        lines.push(format!("{}{} \u{2192} {}", indent(depth), header, url));
        walk_category_nodes(site, tree.children(node.id), depth + 1, lines);
    }
}

/// Format the category tree, series, and unmapped names of a scan.
pub fn format_scan_output(site: &Site) -> Vec<String> {
    let mut lines = Vec::new();
    let tree = &site.categories.tree;

    lines.push("Categories".to_string());
    if tree.is_empty() {
        lines.push(format!("{}(none)", indent(1)));
    }
    walk_category_nodes(site, tree.roots(), 0, &mut lines);

    if !site.config.series.is_empty() {
        lines.push(String::new());
        lines.push("Series".to_string());
        for (i, def) in site.config.series.iter().enumerate() {
            let count = series::series_posts(&site.posts, def).len();
            let mut detail = post_count(count);
            if !def.enabled {
                detail.push_str(", disabled");
            } else if def.highlight_on_home {
                detail.push_str(", highlighted on home");
            }
            lines.push(format!(
                "{} {} \u{2192} {} ({})",
                format_index(i + 1),
                def.slug,
                def.category_name,
                detail
            ));
            if let Some(desc) = &def.description {
                lines.push(format!("{}{}", indent(1), desc));
            }
        }
    }

    let unmapped = site.unmapped_categories();
    if !unmapped.is_empty() {
        lines.push(String::new());
        lines.push("Unmapped".to_string());
        for name in unmapped {
            lines.push(format!("{}{}", indent(1), name));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "Scanned {}, {} categories",
        post_count(site.posts.len()),
        tree.len()
    ));
    lines
}

pub fn print_scan_output(site: &Site) {
    for line in format_scan_output(site) {
        println!("{}", line);
    }
}

// ============================================================================
// Home
// ============================================================================

/// Format the three home feed lists.
pub fn format_home_output(feed: &HomeFeed<'_>) -> Vec<String> {
    let mut lines = post_lines("Highlighted", &feed.highlighted);
    lines.extend(post_lines("Sticky", &feed.sticky));
    lines.extend(post_lines("Regular", &feed.regular));
    lines
}

pub fn print_home_output(feed: &HomeFeed<'_>) {
    for line in format_home_output(feed) {
        println!("{}", line);
    }
}

// ============================================================================
// Resolve
// ============================================================================

fn names<'a>(tree: &'a CategoryTree, ids: &[NodeId]) -> Vec<&'a str> {
    ids.iter().map(|id| tree.node(*id).name.as_str()).collect()
}

/// Format what a category URL resolves to.
pub fn format_resolve_output(site: &Site, url: &str) -> Vec<String> {
    let tree = &site.categories.tree;
    let map = site.category_map();
    let Some(node) = category_by_link(tree, map, url) else {
        return vec![format!("No category matches {}", url)];
    };

    let path = tree.path_of(node.id);
    let mut lines = vec![format!(
        "{} \u{2192} {}",
        node.name,
        category::node_url(tree, map, node.id)
    )];
    lines.push(format!("{}Path: {}", indent(1), path.join(" / ")));
    match category::parent_category(tree, node) {
        Some(parent) => lines.push(format!("{}Parent: {}", indent(1), parent.name)),
        None => lines.push(format!("{}Parent: (top level)", indent(1))),
    }
    if !node.is_leaf() {
        lines.push(format!(
            "{}Children: {}",
            indent(1),
            names(tree, &node.children).join(", ")
        ));
    }
    let crumbs: Vec<String> = breadcrumbs(tree, map, node.id)
        .into_iter()
        .map(|c| c.name)
        .collect();
    lines.push(format!("{}Breadcrumbs: {}", indent(1), crumbs.join(" \u{203a} ")));

    let posts = category::posts_in_category(&site.posts, path.as_slice());
    lines.push(format!("{}Posts: {}", indent(1), posts.len()));
    for (i, post) in posts.iter().enumerate() {
        lines.push(format!("{}{}", indent(2), post_line(i + 1, post)));
    }
    lines
}

pub fn print_resolve_output(site: &Site, url: &str) {
    for line in format_resolve_output(site, url) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
