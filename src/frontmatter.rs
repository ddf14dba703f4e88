//! YAML frontmatter extraction from markdown posts.
//!
//! A post starts with a `---` fenced YAML block:
//!
//! ```text
//! ---
//! title: Hooks in depth
//! categories: [[Notes, Frontend, React]]
//! catalog: true
//! ---
//!
//! Body text...
//! ```
//!
//! Only the fields [`Post`] knows about are read; anything else in the block
//! (tags, description, cover images) belongs to the page layer and is ignored.

use crate::types::Post;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

const FENCE: &str = "---";

/// Split a document into its frontmatter block and the remaining body.
///
/// Returns `None` when the document does not open with a `---` line or the
/// block is never closed.
pub fn split(content: &str) -> Option<(&str, &str)> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != FENCE {
        return None;
    }

    let start = first.len();
    let mut offset = start;
    for line in lines {
        if line.trim_end() == FENCE {
            let yaml = &content[start..offset];
            let body = &content[offset + line.len()..];
            return Some((yaml, body));
        }
        offset += line.len();
    }
    None
}

/// Parse the frontmatter of a post. `Ok(None)` means there is no frontmatter.
pub fn parse_post(content: &str) -> Result<Option<Post>, FrontmatterError> {
    let Some((yaml, _body)) = split(content) else {
        return Ok(None);
    };
    if yaml.trim().is_empty() {
        return Ok(Some(Post::default()));
    }
    Ok(Some(serde_yaml::from_str(yaml)?))
}
