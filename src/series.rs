//! Series and the home feed.
//!
//! A series is a top-level category that gets its own route (`/weekly`) and is
//! pulled out of the general home feed. With `highlight_on_home`, the newest
//! post of the series is shown once on the home page as its representative;
//! every other post of an enabled series only appears on the series page.
//!
//! ## Partition
//!
//! Posts must already be sorted newest-first. One pass routes each post:
//!
//! ```text
//! top-level category matches an enabled series?
//! ├── yes ─ series highlights and has no representative yet → highlighted
//! │       └ otherwise                                        → dropped
//! └── no ── sticky → sticky, else → regular
//! ```

use crate::category::normalize::classify;
use crate::config::SeriesDefinition;
use crate::types::Post;
use std::collections::{HashMap, HashSet};

/// The three home page lists. Each post appears in at most one of them.
#[derive(Debug, Default)]
pub struct HomeFeed<'a> {
    pub highlighted: Vec<&'a Post>,
    pub sticky: Vec<&'a Post>,
    pub regular: Vec<&'a Post>,
}

impl HomeFeed<'_> {
    pub fn len(&self) -> usize {
        self.highlighted.len() + self.sticky.len() + self.regular.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Top-level category name of a post, if it has one.
pub fn top_category(post: &Post) -> Option<String> {
    classify(post.categories.as_ref()).map(|c| c.root().to_string())
}

/// Split newest-first posts into highlighted, sticky and regular lists.
pub fn partition<'a>(posts: &'a [Post], series: &[SeriesDefinition]) -> HomeFeed<'a> {
    let enabled: HashMap<&str, &SeriesDefinition> = series
        .iter()
        .filter(|s| s.enabled)
        .map(|s| (s.category_name.as_str(), s))
        .collect();
    let mut claimed: HashSet<&str> = HashSet::new();
    let mut feed = HomeFeed::default();

    for post in posts {
        let featured = top_category(post).and_then(|name| enabled.get(name.as_str()).copied());
        match featured {
            Some(def) => {
                if def.highlight_on_home && claimed.insert(def.slug.as_str()) {
                    feed.highlighted.push(post);
                }
            }
            None if post.sticky => feed.sticky.push(post),
            None => feed.regular.push(post),
        }
    }
    feed
}

/// Home page lists for the configured series.
pub fn home_page_posts<'a>(posts: &'a [Post], series: &[SeriesDefinition]) -> HomeFeed<'a> {
    partition(posts, series)
}

/// Every post of a series, in input order, for the series page.
pub fn series_posts<'a>(posts: &'a [Post], def: &SeriesDefinition) -> Vec<&'a Post> {
    posts
        .iter()
        .filter(|p| top_category(p).as_deref() == Some(def.category_name.as_str()))
        .collect()
}
