//! Loaded content corpus with resolved identities.
//!
//! A [`Corpus`] is the parsed form of one content root (docs or blog). Each
//! file gets a stable id, a slug and a title, with front-matter values taking
//! precedence over path- and content-derived defaults:
//!
//! - `id`: front-matter `id` > relative path without extension
//!   (`guides/index.md` collapses to `guides`)
//! - `slug`: front-matter `slug` > id (blog posts drop the date prefix)
//! - `title`: front-matter `title` > first H1 heading > title-cased file stem

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::front_matter::{Author, FrontMatter, split_front_matter};
use crate::markdown::{extract_first_heading, title_from_stem};
use crate::scanner::Scanner;

/// Which section of the site a corpus belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// Documentation pages (sidebar-driven).
    Doc,
    /// Blog posts (date-ordered).
    Blog,
}

/// Publication date parsed from a blog filename prefix (`YYYY-MM-DD-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct PostDate {
    /// Four-digit year.
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day (1-31).
    pub day: u8,
}

impl fmt::Display for PostDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl PostDate {
    /// Split a file stem into a date prefix and the remaining slug.
    ///
    /// `"2026-03-14-introducing-refract"` ->
    /// `Some((2026-03-14, "introducing-refract"))`. Stems without a valid
    /// date prefix return `None`.
    #[must_use]
    pub fn split_stem(stem: &str) -> Option<(Self, &str)> {
        let mut parts = stem.splitn(4, '-');
        let year: u16 = parts.next()?.parse().ok()?;
        let month: u8 = parts.next()?.parse().ok()?;
        let day: u8 = parts.next()?.parse().ok()?;
        let rest = parts.next()?;

        if !(1..=12).contains(&month) || !(1..=31).contains(&day) || rest.is_empty() {
            return None;
        }

        Some((Self { year, month, day }, rest))
    }
}

/// A parsed content file with resolved identity.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentFile {
    /// Corpus section.
    pub kind: ContentKind,
    /// Path relative to the corpus root.
    pub source_path: PathBuf,
    /// Stable document identifier, unique within the corpus.
    pub id: String,
    /// URL slug. Relative slugs mount under the section route base; a
    /// leading slash mounts at the site root.
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Description from front-matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sidebar ordering hint from front-matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_position: Option<u32>,
    /// Tags from front-matter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Authors from front-matter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
    /// Drafts are excluded from the generated route table.
    pub draft: bool,
    /// Unlisted pages are routed but hidden from navigation.
    pub unlisted: bool,
    /// Publication date (blog posts with a dated filename).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PostDate>,
    /// Markdown body after the front-matter block.
    #[serde(skip)]
    pub body: String,
}

/// Error loading a content corpus.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    /// I/O error reading a content file.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed front-matter block.
    #[error("Invalid front-matter in {}: {source}", .path.display())]
    FrontMatter {
        /// File with the malformed block.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
    /// Two files resolved to the same id.
    #[error("Duplicate id '{id}': {} and {}", .first.display(), .second.display())]
    DuplicateId {
        /// The colliding id.
        id: String,
        /// File that claimed the id first.
        first: PathBuf,
        /// File that collided.
        second: PathBuf,
    },
}

/// A loaded content corpus with id lookups.
///
/// Files are stored in scan order (sorted by source path) so iteration is
/// deterministic. Ids are unique by construction; [`Corpus::load`] rejects
/// collisions.
#[derive(Debug)]
pub struct Corpus {
    kind: ContentKind,
    files: Vec<ContentFile>,
    id_index: HashMap<String, usize>,
}

impl Corpus {
    /// Load a corpus from a content root.
    ///
    /// Missing roots yield an empty corpus, matching the behavior of an
    /// optional blog section.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] on unreadable files, malformed front-matter
    /// or duplicate ids.
    pub fn load(root: &Path, kind: ContentKind) -> Result<Self, ContentError> {
        let scanner = Scanner::new(root);
        let mut sources = Vec::new();
        for rel_path in scanner.scan() {
            let abs = root.join(&rel_path);
            let text = std::fs::read_to_string(&abs).map_err(|source| ContentError::Io {
                path: abs.clone(),
                source,
            })?;
            sources.push((rel_path, text));
        }
        Self::from_sources(kind, sources)
    }

    /// Build a corpus from in-memory sources.
    ///
    /// Sources must already be ordered; this is the seam used by tests and by
    /// callers that do not read from a filesystem.
    ///
    /// # Errors
    ///
    /// Returns [`ContentError`] on malformed front-matter or duplicate ids.
    pub fn from_sources(
        kind: ContentKind,
        sources: Vec<(PathBuf, String)>,
    ) -> Result<Self, ContentError> {
        let mut files: Vec<ContentFile> = Vec::with_capacity(sources.len());
        let mut id_index: HashMap<String, usize> = HashMap::new();

        for (rel_path, text) in sources {
            let file = build_file(kind, rel_path, &text)?;
            if let Some(&existing) = id_index.get(&file.id) {
                return Err(ContentError::DuplicateId {
                    id: file.id,
                    first: files[existing].source_path.clone(),
                    second: file.source_path,
                });
            }
            id_index.insert(file.id.clone(), files.len());
            files.push(file);
        }

        Ok(Self {
            kind,
            files,
            id_index,
        })
    }

    /// Corpus section.
    #[must_use]
    pub fn kind(&self) -> ContentKind {
        self.kind
    }

    /// All files in scan order.
    #[must_use]
    pub fn files(&self) -> &[ContentFile] {
        &self.files
    }

    /// Look up a file by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&ContentFile> {
        self.id_index.get(id).map(|&i| &self.files[i])
    }

    /// Number of files.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// True when the corpus has no files.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Parse one source file into a [`ContentFile`].
fn build_file(
    kind: ContentKind,
    rel_path: PathBuf,
    text: &str,
) -> Result<ContentFile, ContentError> {
    let (yaml, body) = split_front_matter(text);
    let front_matter = match yaml {
        Some(yaml) => {
            FrontMatter::from_yaml(yaml).map_err(|source| ContentError::FrontMatter {
                path: rel_path.clone(),
                source,
            })?
        }
        None => FrontMatter::default(),
    };

    let (default_id, date) = derive_identity(kind, &rel_path);

    let id = front_matter.id.unwrap_or_else(|| default_id.clone());
    let slug = front_matter.slug.unwrap_or_else(|| id.clone());
    let title = front_matter
        .title
        .or_else(|| extract_first_heading(body))
        .unwrap_or_else(|| {
            let stem = id.rsplit('/').next().unwrap_or(&id);
            title_from_stem(stem)
        });

    if kind == ContentKind::Blog && date.is_none() {
        tracing::debug!(path = %rel_path.display(), "Blog post without dated filename");
    }

    Ok(ContentFile {
        kind,
        source_path: rel_path,
        id,
        slug,
        title,
        description: front_matter.description,
        sidebar_position: front_matter.sidebar_position,
        tags: front_matter.tags,
        authors: front_matter.authors,
        draft: front_matter.draft,
        unlisted: front_matter.unlisted,
        date,
        body: body.to_owned(),
    })
}

/// Derive the default id (and blog date) from a relative path.
///
/// - extension is dropped
/// - path separators normalize to `/`
/// - `index` / `README` stems collapse to the parent directory
///   (root-level `index.md` keeps the id `index`)
/// - blog stems drop a valid `YYYY-MM-DD-` prefix into the date
fn derive_identity(kind: ContentKind, rel_path: &Path) -> (String, Option<PostDate>) {
    let mut segments: Vec<String> = rel_path
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    // Drop the extension from the final segment.
    if let Some(last) = segments.last_mut()
        && let Some(dot) = last.rfind('.')
    {
        last.truncate(dot);
    }

    let mut date = None;
    if let Some(stem) = segments.pop() {
        if stem == "index" || stem == "README" {
            if segments.is_empty() {
                segments.push("index".to_owned());
            }
        } else if kind == ContentKind::Blog
            && let Some((parsed, rest)) = PostDate::split_stem(&stem)
        {
            date = Some(parsed);
            segments.push(rest.to_owned());
        } else {
            segments.push(stem);
        }
    }

    (segments.join("/"), date)
}
