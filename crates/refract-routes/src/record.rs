//! Route record and route tree types.
//!
//! Two views of the same generated data:
//! - [`PageRecord`]: flat, ordered path-to-component records consumed by
//!   lookups and the emitted artifact
//! - [`RouteNode`]: the recursive tree where non-exact intermediates model
//!   shared layout wrapping around their children
//!
//! Tree invariant: leaf nodes carry `exact: true` and no children;
//! intermediate nodes carry children and no exact flag.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Opaque identifier correlating a route to a bundled content renderer.
///
/// Carries no semantic meaning beyond identity. Generated page refs are
/// derived from the source path so the same source always gets the same ref.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComponentRef(String);

impl ComponentRef {
    /// Wrap an explicit component identifier (e.g., `@theme/DocRoot`).
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive a stable ref for a generated content page.
    ///
    /// The ref is `@content/` followed by the first eight hex digits of the
    /// SHA-256 of the source path.
    #[must_use]
    pub fn from_source(source_path: &str) -> Self {
        let digest = Sha256::digest(source_path.as_bytes());
        let short: String = digest.iter().take(4).map(|b| format!("{b:02x}")).collect();
        Self(format!("@content/{short}"))
    }

    /// The identifier string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ComponentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A single path-to-renderer mapping in the generated table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    /// URL path with leading slash; `*` for the wildcard record.
    pub path: String,
    /// Renderer reference.
    pub component: ComponentRef,
    /// Whether the path matches only exactly.
    pub exact: bool,
    /// Sidebar this page belongs to, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sidebar_id: Option<String>,
}

fn is_false(value: &bool) -> bool {
    !*value
}

/// A node in the generated route tree.
///
/// Nesting models shared layout wrapping: every leaf under a node renders
/// inside that node's component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteNode {
    /// URL path prefix (intermediates) or full path (leaves).
    pub path: String,
    /// Renderer reference.
    pub component: ComponentRef,
    /// True on leaves only; intermediates omit the flag.
    #[serde(default, skip_serializing_if = "is_false")]
    pub exact: bool,
    /// Child routes (empty on leaves).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<RouteNode>,
}

impl RouteNode {
    /// True when this node is a leaf record.
    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.routes.is_empty()
    }
}
