//! Category tree construction.
//!
//! Nodes live in a flat arena inside [`CategoryTree`] and refer to each other by
//! [`NodeId`]. The builder keeps an explicit `(parent, name) → node` index, so
//! inserting `[A, B, C]` after `[A, B]` finds the existing `B` under `A` and
//! hangs `C` off it instead of creating a second `A` chain.
//!
//! Sibling order is first-seen order. Nothing is re-sorted.

use super::normalize::normalize;
use crate::types::Post;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Index of a node inside its [`CategoryTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct NodeId(usize);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryNode {
    pub id: NodeId,
    /// Unique among siblings, not across the tree.
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
}

impl CategoryNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Occurrences per category name.
pub type CountMap = BTreeMap<String, usize>;

/// Immutable N-ary category tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTree {
    nodes: Vec<CategoryNode>,
    roots: Vec<NodeId>,
}

impl CategoryTree {
    pub fn node(&self, id: NodeId) -> &CategoryNode {
        &self.nodes[id.0]
    }

    pub fn get(&self, id: NodeId) -> Option<&CategoryNode> {
        self.nodes.get(id.0)
    }

    /// Top-level categories in first-seen order.
    pub fn roots(&self) -> impl Iterator<Item = &CategoryNode> {
        self.roots.iter().map(|&id| self.node(id))
    }

    pub fn children(&self, id: NodeId) -> impl Iterator<Item = &CategoryNode> {
        self.node(id).children.iter().map(|&c| self.node(c))
    }

    pub fn parent(&self, id: NodeId) -> Option<&CategoryNode> {
        self.node(id).parent.map(|p| self.node(p))
    }

    /// Child of `parent` (or a root when `parent` is `None`) with the given name.
    pub fn child_named(&self, parent: Option<NodeId>, name: &str) -> Option<&CategoryNode> {
        let siblings = match parent {
            Some(p) => &self.node(p).children,
            None => &self.roots,
        };
        siblings
            .iter()
            .map(|&id| self.node(id))
            .find(|n| n.name == name)
    }

    /// Node reached by following `names` from the roots.
    pub fn find_path<S: AsRef<str>>(&self, names: &[S]) -> Option<&CategoryNode> {
        let mut current: Option<&CategoryNode> = None;
        for name in names {
            current = Some(self.child_named(current.map(|n| n.id), name.as_ref())?);
        }
        current
    }

    /// First node named `name` in pre-order.
    ///
    /// A name used at two depths (`Notes → React` and a root `React`) resolves
    /// to whichever comes first in a depth-first, parent-before-children walk
    /// over roots in order.
    pub fn find_by_name(&self, name: &str) -> Option<&CategoryNode> {
        self.preorder().find(|n| n.name == name)
    }

    /// Names from the root down to `id`, inclusive.
    pub fn path_of(&self, id: NodeId) -> Vec<&str> {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(c) = current {
            let node = self.node(c);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names
    }

    pub fn depth(&self, id: NodeId) -> usize {
        self.path_of(id).len() - 1
    }

    /// Depth-first, parent-before-children traversal.
    pub fn preorder(&self) -> Preorder<'_> {
        Preorder {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nested, serializable view of the tree with counts attached.
    pub fn to_entries(&self, counts: &CountMap) -> Vec<CategoryEntry> {
        self.roots
            .iter()
            .map(|&id| self.entry(id, counts))
            .collect()
    }

    fn entry(&self, id: NodeId, counts: &CountMap) -> CategoryEntry {
        let node = self.node(id);
        CategoryEntry {
            name: node.name.clone(),
            count: counts.get(&node.name).copied().unwrap_or(0),
            children: node
                .children
                .iter()
                .map(|&c| self.entry(c, counts))
                .collect(),
        }
    }
}

pub struct Preorder<'a> {
    tree: &'a CategoryTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a CategoryNode;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack.extend(node.children.iter().rev().copied());
        Some(node)
    }
}

/// Nested tree item as written to the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryEntry {
    pub name: String,
    pub count: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CategoryEntry>,
}

/// The built tree plus per-name counts, as handed to page rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryList {
    pub tree: CategoryTree,
    pub counts: CountMap,
}

impl CategoryList {
    pub fn count(&self, name: &str) -> usize {
        self.counts.get(name).copied().unwrap_or(0)
    }
}

/// Incremental tree builder. Never fails.
#[derive(Debug, Default)]
pub struct CategoryTreeBuilder {
    tree: CategoryTree,
    index: HashMap<(Option<NodeId>, String), NodeId>,
    counts: CountMap,
}

impl CategoryTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one record's normalized path, creating missing nodes and
    /// counting each distinct name once.
    pub fn insert_path<S: AsRef<str>>(&mut self, path: &[S]) -> Option<NodeId> {
        let mut parent = None;
        for name in path {
            parent = Some(self.child(parent, name.as_ref()));
        }

        let distinct: BTreeSet<&str> = path.iter().map(|s| s.as_ref()).collect();
        for name in distinct {
            *self.counts.entry(name.to_string()).or_insert(0) += 1;
        }
        parent
    }

    /// Insert a post if it is cataloged and has a usable category.
    pub fn insert_post(&mut self, post: &Post) -> Option<NodeId> {
        if !post.catalog {
            return None;
        }
        let path = normalize(post.categories.as_ref());
        if path.is_empty() {
            debug!(slug = %post.slug, "cataloged post has no category");
            return None;
        }
        self.insert_path(path.as_slice())
    }

    pub fn finish(self) -> CategoryList {
        CategoryList {
            tree: self.tree,
            counts: self.counts,
        }
    }

    fn child(&mut self, parent: Option<NodeId>, name: &str) -> NodeId {
        if let Some(&id) = self.index.get(&(parent, name.to_string())) {
            return id;
        }
        let id = NodeId(self.tree.nodes.len());
        self.tree.nodes.push(CategoryNode {
            id,
            name: name.to_string(),
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.tree.nodes[p.0].children.push(id),
            None => self.tree.roots.push(id),
        }
        self.index.insert((parent, name.to_string()), id);
        id
    }
}

/// Build the category tree and counts from every cataloged post.
pub fn build<'a>(posts: impl IntoIterator<Item = &'a Post>) -> CategoryList {
    let mut builder = CategoryTreeBuilder::new();
    for post in posts {
        builder.insert_post(post);
    }
    builder.finish()
}
