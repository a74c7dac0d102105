//! YAML front-matter parsing.
//!
//! Content files may start with a front-matter block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! slug: introducing-refract
//! title: Introducing Refract
//! tags: [release, refractions]
//! ---
//!
//! Body text.
//! ```
//!
//! Absence of the block is not an error. All recognized keys are optional;
//! unrecognized keys are ignored so content authored for richer generators
//! still parses.

use serde::{Deserialize, Serialize};

/// Front-matter fields recognized by the build.
///
/// All fields are optional. When a field is `None`, the corpus loader derives
/// a default from the file path or content.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontMatter {
    /// Stable document identifier (defaults to the relative path).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// URL slug (defaults to the id). A leading slash makes the slug
    /// absolute: it is mounted at the site root instead of the section base.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Page title (overrides H1 extraction).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description for listings and meta tags.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Ordering hint within an auto-generated sidebar category.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<u32>,

    /// Tags for blog listings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    /// Post authors (blog content).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,

    /// Drafts are parsed but excluded from the generated route table.
    pub draft: bool,

    /// Unlisted pages get a route but are hidden from navigation.
    pub unlisted: bool,
}

impl FrontMatter {
    /// Parse front-matter from a YAML block.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_yaml` error for malformed YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Check if front-matter has any non-default values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A blog post author.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    /// Author display name.
    pub name: String,
    /// Role or byline shown under the name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Link target for the author name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Avatar image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Split a content file into its front-matter block and body.
///
/// Returns `(yaml, body)` where `yaml` is `None` when the file has no
/// front-matter block. The opening `---` must be the first line; the block
/// ends at the next line consisting of `---`.
#[must_use]
pub fn split_front_matter(source: &str) -> (Option<&str>, &str) {
    let Some(rest) = source.strip_prefix("---\n").or_else(|| {
        source
            .strip_prefix("---\r\n")
            .or_else(|| source.strip_prefix("---").filter(|r| r.is_empty()))
    }) else {
        return (None, source);
    };

    // Find the closing delimiter line.
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    // Unterminated block: treat the whole file as body.
    (None, source)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_no_front_matter() {
        let (yaml, body) = split_front_matter("# Title\n\nBody.");
        assert!(yaml.is_none());
        assert_eq!(body, "# Title\n\nBody.");
    }

    #[test]
    fn test_split_with_front_matter() {
        let source = "---\ntitle: Hello\n---\n\n# Heading\n";
        let (yaml, body) = split_front_matter(source);
        assert_eq!(yaml, Some("title: Hello\n"));
        assert_eq!(body, "\n# Heading\n");
    }

    #[test]
    fn test_split_unterminated_block_is_body() {
        let source = "---\ntitle: Hello\n\n# Heading\n";
        let (yaml, body) = split_front_matter(source);
        assert!(yaml.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn test_split_delimiter_not_on_first_line() {
        let source = "intro\n---\ntitle: Hello\n---\n";
        let (yaml, body) = split_front_matter(source);
        assert!(yaml.is_none());
        assert_eq!(body, source);
    }

    #[test]
    fn test_split_crlf_delimiters() {
        let source = "---\r\ntitle: Hello\r\n---\r\nBody.";
        let (yaml, body) = split_front_matter(source);
        assert_eq!(yaml, Some("title: Hello\r\n"));
        assert_eq!(body, "Body.");
    }

    #[test]
    fn test_parse_recognized_keys() {
        let fm = FrontMatter::from_yaml(
            r#"
id: api/createApp
slug: /api/create-app
title: createApp
description: Application factory
sidebar_position: 2
tags: [api, core]
draft: true
"#,
        )
        .unwrap();

        assert_eq!(fm.id.as_deref(), Some("api/createApp"));
        assert_eq!(fm.slug.as_deref(), Some("/api/create-app"));
        assert_eq!(fm.title.as_deref(), Some("createApp"));
        assert_eq!(fm.description.as_deref(), Some("Application factory"));
        assert_eq!(fm.sidebar_position, Some(2));
        assert_eq!(fm.tags, vec!["api".to_owned(), "core".to_owned()]);
        assert!(fm.draft);
        assert!(!fm.unlisted);
    }

    #[test]
    fn test_parse_authors() {
        let fm = FrontMatter::from_yaml(
            r"
authors:
  - name: Ada Prism
    title: Core maintainer
    url: https://github.com/adaprism
    image_url: https://github.com/adaprism.png
  - name: Sol Lentes
",
        )
        .unwrap();

        assert_eq!(fm.authors.len(), 2);
        assert_eq!(fm.authors[0].name, "Ada Prism");
        assert_eq!(fm.authors[0].title.as_deref(), Some("Core maintainer"));
        assert_eq!(fm.authors[1].name, "Sol Lentes");
        assert!(fm.authors[1].url.is_none());
    }

    #[test]
    fn test_parse_ignores_unknown_keys() {
        let fm = FrontMatter::from_yaml("custom_key: anything\ntitle: Known\n").unwrap();
        assert_eq!(fm.title.as_deref(), Some("Known"));
    }

    #[test]
    fn test_parse_malformed_yaml_is_error() {
        assert!(FrontMatter::from_yaml("title: [unclosed\n").is_err());
    }

    #[test]
    fn test_is_empty() {
        assert!(FrontMatter::default().is_empty());
        let fm = FrontMatter {
            title: Some("T".to_owned()),
            ..Default::default()
        };
        assert!(!fm.is_empty());
    }
}
