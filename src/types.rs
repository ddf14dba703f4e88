//! Shared record types.
//!
//! These are the already-deserialized content records every other module
//! consumes. [`Post`] is filled straight from a markdown file's YAML
//! frontmatter by [`crate::scan`], so field names follow the frontmatter keys.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A blog post as seen by the category subsystem.
///
/// ```yaml
/// ---
/// title: Hooks in depth
/// date: 2024-03-02
/// categories:
///   - [Notes, Frontend, React]
/// catalog: true
/// sticky: false
/// ---
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Post {
    /// URL slug. Taken from frontmatter `slug` or, when absent, the file stem.
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub date: Option<PostDate>,
    /// Raw category field in whatever shape the author wrote it.
    #[serde(default)]
    pub categories: Option<RawCategoryField>,
    /// Whether the post is listed in the category tree and counted.
    #[serde(default)]
    pub catalog: bool,
    /// Pinned to the top of the home feed.
    #[serde(default)]
    pub sticky: bool,
    #[serde(default)]
    pub draft: bool,
    /// Path relative to the content root. Set by the scanner, never by frontmatter.
    #[serde(skip)]
    pub source_path: String,
}

/// The `categories` frontmatter field before normalization.
///
/// Accepted shapes:
/// - `categories: Tools` → [`RawCategoryField::Name`]
/// - `categories: [Tools]` → [`RawCategoryField::List`] with one name
/// - `categories: [[Notes, Frontend]]` → [`RawCategoryField::List`] with one path
///
/// Anything else decodes to [`RawCategoryField::Malformed`] instead of failing
/// the whole post, since the field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCategoryField {
    Name(String),
    List(Vec<RawCategoryEntry>),
    Malformed(IgnoredAny),
}

/// One element of a list-shaped `categories` field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCategoryEntry {
    Name(String),
    Path(Vec<String>),
    Malformed(IgnoredAny),
}

/// Publication timestamp of a post.
///
/// Frontmatter dates come in several spellings; all of them are accepted and
/// normalized to a naive UTC timestamp so posts can be ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PostDate(pub NaiveDateTime);

impl PostDate {
    /// Parse any supported date spelling.
    ///
    /// - `2024-03-02`
    /// - `2024-03-02 10:30` / `2024-03-02 10:30:15`
    /// - `2024-03-02T10:30:15`
    /// - `2024-03-02T10:30:15+08:00` (RFC 3339, converted to UTC)
    pub fn parse(input: &str) -> Option<Self> {
        let input = input.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
            return Some(Self(dt.with_timezone(&Utc).naive_utc()));
        }
        for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
            if let Ok(dt) = NaiveDateTime::parse_from_str(input, fmt) {
                return Some(Self(dt));
            }
        }
        NaiveDate::parse_from_str(input, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(Self)
    }
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d %H:%M:%S"))
    }
}

impl<'de> Deserialize<'de> for PostDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        PostDate::parse(&raw).ok_or_else(|| de::Error::custom(format!("invalid date: {raw}")))
    }
}

impl Serialize for PostDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(yaml: &str) -> Post {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn categories_single_string() {
        let p = post("categories: Tools");
        assert_eq!(p.categories, Some(RawCategoryField::Name("Tools".into())));
    }

    #[test]
    fn categories_flat_list() {
        let p = post("categories: [Tools, Life]");
        assert_eq!(
            p.categories,
            Some(RawCategoryField::List(vec![
                RawCategoryEntry::Name("Tools".into()),
                RawCategoryEntry::Name("Life".into()),
            ]))
        );
    }

    #[test]
    fn categories_nested_path() {
        let p = post("categories:\n  - [Notes, Frontend]\n");
        assert_eq!(
            p.categories,
            Some(RawCategoryField::List(vec![RawCategoryEntry::Path(vec![
                "Notes".into(),
                "Frontend".into(),
            ])]))
        );
    }

    #[test]
    fn categories_wrong_shape_does_not_fail_the_post() {
        let p = post("title: Odd\ncategories: {a: 1}");
        assert_eq!(p.title, "Odd");
        assert!(matches!(p.categories, Some(RawCategoryField::Malformed(_))));
    }

    #[test]
    fn flags_default_to_false() {
        let p = post("title: Plain");
        assert!(!p.catalog);
        assert!(!p.sticky);
        assert!(!p.draft);
        assert!(p.categories.is_none());
    }

    // =========================================================================
    // PostDate
    // =========================================================================

    #[test]
    fn date_only() {
        let d = PostDate::parse("2024-03-02").unwrap();
        assert_eq!(d.to_string(), "2024-03-02 00:00:00");
    }

    #[test]
    fn date_with_minutes() {
        let d = PostDate::parse("2024-03-02 10:30").unwrap();
        assert_eq!(d.to_string(), "2024-03-02 10:30:00");
    }

    #[test]
    fn rfc3339_converted_to_utc() {
        let d = PostDate::parse("2024-03-02T10:30:00+08:00").unwrap();
        assert_eq!(d.to_string(), "2024-03-02 02:30:00");
    }

    #[test]
    fn garbage_date_rejected() {
        assert!(PostDate::parse("yesterday").is_none());
    }

    #[test]
    fn date_deserialized_from_yaml() {
        let p = post("date: 2023-12-31 23:59:59");
        assert_eq!(p.date.unwrap().to_string(), "2023-12-31 23:59:59");
    }

    #[test]
    fn dates_order_chronologically() {
        let older = PostDate::parse("2023-01-01").unwrap();
        let newer = PostDate::parse("2023-01-01 00:00:01").unwrap();
        assert!(older < newer);
    }
}
