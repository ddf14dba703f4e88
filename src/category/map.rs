//! Name ⇄ slug lookup for categories.
//!
//! Category names are what authors write in frontmatter ("Frontend", "随笔");
//! slugs are what appears in URLs ("frontend", "essays"). The mapping comes
//! from `[category_map]` in `config.toml` and is pure data.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bidirectional category name ⇄ slug mapping.
///
/// Serializes as a plain `name = "slug"` table. The reverse index is rebuilt
/// on deserialization; when two names share a slug, the name that sorts first
/// wins the reverse lookup.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, String>", into = "BTreeMap<String, String>")]
pub struct CategoryMap {
    slugs: BTreeMap<String, String>,
    names: BTreeMap<String, String>,
}

impl CategoryMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slug for a category name.
    pub fn slug(&self, name: &str) -> Option<&str> {
        self.slugs.get(name).map(String::as_str)
    }

    /// Category name for a slug.
    pub fn name(&self, slug: &str) -> Option<&str> {
        self.names.get(slug).map(String::as_str)
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.slugs.contains_key(name)
    }

    pub fn insert(&mut self, name: impl Into<String>, slug: impl Into<String>) {
        let name = name.into();
        let slug = slug.into();
        if let Some(old) = self.slugs.insert(name.clone(), slug.clone())
            && self.names.get(&old) == Some(&name)
        {
            self.names.remove(&old);
            if let Some((other, _)) = self.slugs.iter().find(|(_, s)| **s == old) {
                self.names.insert(old.clone(), other.clone());
            }
        }
        match self.names.get(&slug) {
            Some(existing) if *existing <= name => {}
            _ => {
                self.names.insert(slug, name);
            }
        }
    }

    /// `(name, slug)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.slugs.iter().map(|(n, s)| (n.as_str(), s.as_str()))
    }

    pub fn len(&self) -> usize {
        self.slugs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slugs.is_empty()
    }
}

impl From<BTreeMap<String, String>> for CategoryMap {
    fn from(slugs: BTreeMap<String, String>) -> Self {
        let mut map = CategoryMap::new();
        for (name, slug) in slugs {
            map.insert(name, slug);
        }
        map
    }
}

impl From<CategoryMap> for BTreeMap<String, String> {
    fn from(map: CategoryMap) -> Self {
        map.slugs
    }
}

impl<N: Into<String>, S: Into<String>> FromIterator<(N, S)> for CategoryMap {
    fn from_iter<I: IntoIterator<Item = (N, S)>>(iter: I) -> Self {
        let mut map = CategoryMap::new();
        for (name, slug) in iter {
            map.insert(name, slug);
        }
        map
    }
}
