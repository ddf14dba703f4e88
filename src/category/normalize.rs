//! Decoding the polymorphic `categories` field into a canonical path.
//!
//! Only the first entry of a list-shaped field is authoritative. Later entries
//! are ignored; themes built on this layout rely on that.

use crate::types::{RawCategoryEntry, RawCategoryField};
use tracing::debug;

/// A category field decoded once at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Category {
    /// Single-level category.
    Flat(String),
    /// Full root → leaf path.
    Path(Vec<String>),
}

impl Category {
    /// Root → leaf names.
    pub fn into_names(self) -> Vec<String> {
        match self {
            Category::Flat(name) => vec![name],
            Category::Path(names) => names,
        }
    }

    /// The top-level category name.
    pub fn root(&self) -> &str {
        match self {
            Category::Flat(name) => name,
            Category::Path(names) => names.first().map(String::as_str).unwrap_or_default(),
        }
    }
}

/// Classify a raw field. `None` means the record has no usable category.
pub fn classify(raw: Option<&RawCategoryField>) -> Option<Category> {
    let category = match raw? {
        RawCategoryField::Name(name) => Category::Flat(name.clone()),
        RawCategoryField::List(entries) => match entries.first()? {
            RawCategoryEntry::Name(name) => Category::Flat(name.clone()),
            RawCategoryEntry::Path(names) => Category::Path(names.clone()),
            RawCategoryEntry::Malformed(_) => {
                debug!("ignoring categories entry of unsupported shape");
                return None;
            }
        },
        RawCategoryField::Malformed(_) => {
            debug!("ignoring categories field of unsupported shape");
            return None;
        }
    };

    match &category {
        Category::Flat(name) if name.is_empty() => None,
        Category::Path(names) if names.is_empty() => None,
        _ => Some(category),
    }
}

/// Normalize a raw field to its root → leaf list of names (possibly empty).
pub fn normalize(raw: Option<&RawCategoryField>) -> Vec<String> {
    classify(raw).map(Category::into_names).unwrap_or_default()
}
