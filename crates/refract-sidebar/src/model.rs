//! Sidebar definition model.
//!
//! A sidebar file maps sidebar names to ordered item lists. Items mix bare
//! doc ids and category objects, matching the authored format:
//!
//! ```yaml
//! tutorialSidebar:
//!   - intro
//!   - type: category
//!     label: Concepts
//!     items:
//!       - concepts/refractions
//!       - concepts/lenses
//! ```
//!
//! The tree is owned `Vec` nesting, so cycles are unrepresentable. Item order
//! is significant and preserved.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// A sidebar entry: either a doc reference or a labeled category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SidebarItem {
    /// Bare content-file identifier.
    Doc(String),
    /// Labeled grouping of nested items.
    Category(SidebarCategory),
}

impl SidebarItem {
    /// Convenience constructor for a doc reference.
    #[must_use]
    pub fn doc(id: impl Into<String>) -> Self {
        Self::Doc(id.into())
    }
}

/// Marker enforcing the `type: category` tag in sidebar files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum CategoryTag {
    Category,
}

/// A labeled category grouping nested sidebar items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SidebarCategory {
    #[serde(rename = "type")]
    tag: CategoryTag,
    /// Display label.
    pub label: String,
    /// Render collapsed by default.
    #[serde(default)]
    pub collapsed: bool,
    /// Nested items in display order.
    pub items: Vec<SidebarItem>,
}

impl SidebarCategory {
    /// Create a category with the given label and items.
    #[must_use]
    pub fn new(label: impl Into<String>, items: Vec<SidebarItem>) -> Self {
        Self {
            tag: CategoryTag::Category,
            label: label.into(),
            collapsed: false,
            items,
        }
    }
}

/// Error loading or validating sidebar definitions.
#[derive(Debug, thiserror::Error)]
pub enum SidebarError {
    /// I/O error reading the sidebar file.
    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        /// File that failed to read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Malformed YAML.
    #[error("Sidebar parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A category with no items.
    #[error("Sidebar '{sidebar}': category '{label}' has no items")]
    EmptyCategory {
        /// Sidebar name.
        sidebar: String,
        /// Offending category label.
        label: String,
    },
    /// The same doc id referenced twice within one sidebar.
    #[error("Sidebar '{sidebar}': duplicate doc id '{id}'")]
    DuplicateDoc {
        /// Sidebar name.
        sidebar: String,
        /// The colliding doc id.
        id: String,
    },
}

/// Named sidebar definitions.
///
/// The `BTreeMap` keeps sidebar names in a stable order for emitted
/// artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Sidebars {
    sidebars: BTreeMap<String, Vec<SidebarItem>>,
}

impl Sidebars {
    /// Parse sidebar definitions from YAML.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError::Parse`] for malformed YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, SidebarError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Load sidebar definitions from a file.
    ///
    /// A missing file yields an empty definition set, matching a site that
    /// relies purely on generated routes.
    ///
    /// # Errors
    ///
    /// Returns [`SidebarError`] on unreadable files or malformed YAML.
    pub fn load(path: &Path) -> Result<Self, SidebarError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(path).map_err(|source| SidebarError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&text)
    }

    /// Get a sidebar's items by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[SidebarItem]> {
        self.sidebars.get(name).map(Vec::as_slice)
    }

    /// Iterate over `(name, items)` pairs in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[SidebarItem])> {
        self.sidebars
            .iter()
            .map(|(name, items)| (name.as_str(), items.as_slice()))
    }

    /// Sidebar names in stable order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.sidebars.keys().map(String::as_str)
    }

    /// Number of sidebars.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sidebars.len()
    }

    /// True when no sidebars are defined.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sidebars.is_empty()
    }

    /// Validate well-formedness of every sidebar.
    ///
    /// Checks that categories are non-empty and that no doc id appears twice
    /// within the same sidebar. Duplicates across differently-named sidebars
    /// are allowed.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> Result<(), SidebarError> {
        for (name, items) in &self.sidebars {
            let mut seen = HashSet::new();
            validate_items(name, items, &mut seen)?;
        }
        Ok(())
    }
}

/// Recursive validation walk over one sidebar's items.
fn validate_items<'a>(
    sidebar: &str,
    items: &'a [SidebarItem],
    seen: &mut HashSet<&'a str>,
) -> Result<(), SidebarError> {
    for item in items {
        match item {
            SidebarItem::Doc(id) => {
                if !seen.insert(id) {
                    return Err(SidebarError::DuplicateDoc {
                        sidebar: sidebar.to_owned(),
                        id: id.clone(),
                    });
                }
            }
            SidebarItem::Category(category) => {
                if category.items.is_empty() {
                    return Err(SidebarError::EmptyCategory {
                        sidebar: sidebar.to_owned(),
                        label: category.label.clone(),
                    });
                }
                validate_items(sidebar, &category.items, seen)?;
            }
        }
    }
    Ok(())
}
