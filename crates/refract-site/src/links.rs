//! Internal link extraction and verification.
//!
//! Links are pulled from the pulldown-cmark event stream (inline and
//! reference links both surface as `Tag::Link`) plus raw HTML `href`
//! attributes that MDX bodies embed. External targets are skipped; internal
//! targets are verified against the generated route table, and
//! source-file references (`./sibling.md`) against the scanned corpus.
//!
//! The sweep itself is data-parallel over pages; results are re-sorted so
//! reports stay deterministic.

use std::collections::HashSet;
use std::sync::LazyLock;

use pulldown_cmark::{Event, Parser, Tag};
use rayon::prelude::*;
use regex::Regex;

use refract_routes::{RouteTable, normalize_path};

/// `href` attributes inside raw HTML fragments.
static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)href\s*=\s*"([^"]+)""#).unwrap_or_else(|e| unreachable!("{e}"))
});

/// Category of a broken link, matched to its configured policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// A site path with no generated route.
    Internal,
    /// A markdown file reference with no matching source file.
    MarkdownFile,
}

/// One broken link finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrokenLink {
    /// Section-prefixed source path (e.g., `docs/concepts/lenses.md`).
    pub source: String,
    /// The link target as written.
    pub link: String,
    /// Finding category.
    pub kind: LinkKind,
}

/// A page submitted to the link sweep.
pub(crate) struct PageToCheck<'a> {
    /// Section-prefixed source path for reports.
    pub label: String,
    /// Section-prefixed directory of the source file.
    pub dir: String,
    /// Generated route path.
    pub route: String,
    /// Markdown body.
    pub body: &'a str,
}

/// Extract link targets from a markdown body.
///
/// Includes targets from inline links, reference links and raw HTML `href`
/// attributes, in document order.
#[must_use]
pub fn extract_links(markdown: &str) -> Vec<String> {
    let mut links = Vec::new();
    for event in Parser::new(markdown) {
        match event {
            Event::Start(Tag::Link { dest_url, .. }) => links.push(dest_url.into_string()),
            Event::Html(html) | Event::InlineHtml(html) => {
                for capture in HREF_RE.captures_iter(&html) {
                    links.push(capture[1].to_owned());
                }
            }
            _ => {}
        }
    }
    links
}

/// Verify all internal links across the given pages.
///
/// `known_sources` holds section-prefixed source paths of every scanned
/// content file. Findings are sorted by source then link.
pub(crate) fn check_links(
    pages: &[PageToCheck<'_>],
    table: &RouteTable,
    known_sources: &HashSet<String>,
) -> Vec<BrokenLink> {
    let mut broken: Vec<BrokenLink> = pages
        .par_iter()
        .flat_map_iter(|page| check_page(page, table, known_sources))
        .collect();
    broken.sort_by(|a, b| (&a.source, &a.link).cmp(&(&b.source, &b.link)));
    broken
}

/// Check one page's links.
fn check_page(
    page: &PageToCheck<'_>,
    table: &RouteTable,
    known_sources: &HashSet<String>,
) -> Vec<BrokenLink> {
    let mut broken = Vec::new();

    for link in extract_links(page.body) {
        let Some(target) = strip_suffixes(&link) else {
            continue;
        };
        if is_external(target) || target.is_empty() {
            continue;
        }

        if target.ends_with(".md") || target.ends_with(".mdx") {
            if !source_exists(target, &page.dir, known_sources) {
                broken.push(BrokenLink {
                    source: page.label.clone(),
                    link,
                    kind: LinkKind::MarkdownFile,
                });
            }
        } else if !route_exists(target, &page.route, table) {
            broken.push(BrokenLink {
                source: page.label.clone(),
                link,
                kind: LinkKind::Internal,
            });
        }
    }

    broken
}

/// Drop query and fragment. Returns `None` for pure-anchor links.
fn strip_suffixes(link: &str) -> Option<&str> {
    if link.starts_with('#') {
        return None;
    }
    Some(
        link.split_once(['?', '#'])
            .map_or(link, |(before, _)| before),
    )
}

/// External targets are out of scope for the sweep.
fn is_external(target: &str) -> bool {
    target.contains("://")
        || target.starts_with("//")
        || target.starts_with("mailto:")
        || target.starts_with("tel:")
}

/// Check a markdown-file reference against the scanned sources.
fn source_exists(target: &str, dir: &str, known_sources: &HashSet<String>) -> bool {
    let resolved = if let Some(absolute) = target.strip_prefix('/') {
        normalize_segments("", absolute)
    } else {
        normalize_segments(dir, target)
    };
    resolved.is_some_and(|path| known_sources.contains(&path))
}

/// Check a site path against the route table.
///
/// Relative targets resolve against the page's route directory. The
/// wildcard record never counts as a match here.
fn route_exists(target: &str, page_route: &str, table: &RouteTable) -> bool {
    let path = if target.starts_with('/') {
        normalize_path(target)
    } else {
        let route_dir = page_route.rsplit_once('/').map_or("", |(dir, _)| dir);
        match normalize_segments(route_dir.trim_start_matches('/'), target) {
            Some(resolved) => normalize_path(&resolved),
            None => return false,
        }
    };
    table.record(&path).is_some()
}

/// Join a base directory with a relative reference, resolving `.` and `..`.
///
/// Returns `None` when the reference escapes the root.
fn normalize_segments(base: &str, reference: &str) -> Option<String> {
    let mut segments: Vec<&str> = base.split('/').filter(|s| !s.is_empty()).collect();
    for segment in reference.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}
