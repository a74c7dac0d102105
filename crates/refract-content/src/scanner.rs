//! Content discovery by filesystem walking.
//!
//! This module separates the discovery phase (finding files) from the loading
//! phase (parsing front-matter and building [`ContentFile`]s). The Scanner
//! only identifies candidate files, returning relative paths for
//! [`Corpus::load`] to process.
//!
//! [`ContentFile`]: crate::ContentFile
//! [`Corpus::load`]: crate::Corpus::load

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

/// Discovers content files under a corpus root.
///
/// - `.md` and `.mdx` files are candidates
/// - hidden files and directories are skipped (walker default)
/// - `_`-prefixed files and directories are partials, skipped by convention
///
/// Results are sorted by relative path so builds are deterministic.
pub struct Scanner {
    root: PathBuf,
}

impl Scanner {
    /// Create a new Scanner.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Scan the content root and return relative paths of content files.
    ///
    /// Returns an empty Vec if the root doesn't exist.
    #[must_use]
    pub fn scan(&self) -> Vec<PathBuf> {
        if !self.root.exists() {
            return Vec::new();
        }

        // The root itself is exempt so scans of dot- or underscore-named
        // directories still work.
        let walker = WalkBuilder::new(&self.root)
            .filter_entry(|entry| {
                entry.depth() == 0 || !entry.file_name().to_string_lossy().starts_with('_')
            })
            .build();

        let mut files: Vec<PathBuf> = walker
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
            .filter(|entry| is_content_file(entry.path()))
            .filter_map(|entry| {
                entry
                    .path()
                    .strip_prefix(&self.root)
                    .map(Path::to_path_buf)
                    .ok()
            })
            .collect();

        files.sort();
        files
    }

    /// Content root this scanner walks.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Check whether a path has a recognized content extension.
fn is_content_file(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext == "md" || ext == "mdx")
}
