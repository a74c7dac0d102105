//! Route table construction and resolution.
//!
//! The builder assembles the route tree (layout scopes plus exact leaves)
//! and `build()` flattens it into the ordered record list, enforcing the
//! path-uniqueness invariant. Resolution is a pure lookup over the immutable
//! table: exact-match nodes match only identical paths, non-exact nodes
//! match on path-segment boundaries and descend to the deepest matching
//! leaf, and the `*` wildcard record catches everything else, making
//! resolution total.

use std::collections::HashMap;

use serde::Serialize;

use crate::record::{ComponentRef, PageRecord, RouteNode};

/// Error building or resolving a route table.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    /// Two leaf records share an identical path.
    #[error("Duplicate route path '{0}'")]
    DuplicatePath(String),
    /// A layout route with no children.
    #[error("Layout route '{0}' has no child routes")]
    EmptyLayout(String),
    /// An exact route with children.
    #[error("Exact route '{0}' cannot have child routes")]
    ExactWithChildren(String),
    /// A child route placed outside its layout's path prefix.
    #[error("Route '{path}' does not nest under layout '{layout}'")]
    OutsideLayout {
        /// Offending child path.
        path: String,
        /// Enclosing layout path.
        layout: String,
    },
    /// No record matched and the table has no wildcard.
    #[error("No route matches '{0}' and the table has no wildcard record")]
    NoMatch(String),
}

/// Result of resolving a path.
#[derive(Debug)]
pub struct RouteMatch<'a> {
    /// Matched leaf record (or the wildcard record).
    pub record: &'a PageRecord,
    /// Ancestor layout nodes wrapping the leaf, outermost first. Empty for
    /// top-level and wildcard matches.
    pub layouts: Vec<&'a RouteNode>,
}

/// Normalize a request path for resolution.
///
/// Strips query and fragment, ensures a leading slash and drops a trailing
/// slash (except for the root path).
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let path = path
        .split_once(['?', '#'])
        .map_or(path, |(before, _)| before);

    let mut normalized = if path.starts_with('/') {
        path.to_owned()
    } else {
        format!("/{path}")
    };

    while normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }

    normalized
}

/// Check that `path` equals `prefix` or nests under it at a segment boundary.
fn nests_under(path: &str, prefix: &str) -> bool {
    path == prefix
        || (path.starts_with(prefix)
            && (prefix.ends_with('/') || path[prefix.len()..].starts_with('/')))
}

/// Node under construction.
struct BuilderNode {
    path: String,
    component: ComponentRef,
    exact: bool,
    sidebar_id: Option<String>,
    children: Vec<usize>,
}

/// Builder for [`RouteTable`] instances.
///
/// Layouts are added first and child routes reference them by index,
/// mirroring how the site assembles one layout chain per section.
#[derive(Default)]
pub struct RouteTableBuilder {
    nodes: Vec<BuilderNode>,
    roots: Vec<usize>,
    wildcard: Option<ComponentRef>,
}

impl RouteTableBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layout route (non-exact, wraps its children).
    ///
    /// Returns the node index for use as a parent.
    pub fn add_layout(
        &mut self,
        path: impl Into<String>,
        component: ComponentRef,
        parent: Option<usize>,
    ) -> usize {
        self.add_node(path.into(), component, false, None, parent)
    }

    /// Add an exact page route.
    ///
    /// Returns the node index.
    pub fn add_page(
        &mut self,
        path: impl Into<String>,
        component: ComponentRef,
        sidebar_id: Option<String>,
        parent: Option<usize>,
    ) -> usize {
        self.add_node(path.into(), component, true, sidebar_id, parent)
    }

    /// Set the wildcard (not-found) component.
    pub fn add_wildcard(&mut self, component: ComponentRef) {
        self.wildcard = Some(component);
    }

    fn add_node(
        &mut self,
        path: String,
        component: ComponentRef,
        exact: bool,
        sidebar_id: Option<String>,
        parent: Option<usize>,
    ) -> usize {
        let idx = self.nodes.len();
        self.nodes.push(BuilderNode {
            path,
            component,
            exact,
            sidebar_id,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(idx),
            None => self.roots.push(idx),
        }
        idx
    }

    /// Build the immutable [`RouteTable`].
    ///
    /// # Errors
    ///
    /// - [`RouteError::DuplicatePath`] when two leaf records share a path
    /// - [`RouteError::EmptyLayout`] for a layout with no children
    /// - [`RouteError::OutsideLayout`] when a child does not nest under its
    ///   layout's path prefix
    pub fn build(self) -> Result<RouteTable, RouteError> {
        // Structural validation before flattening: leaves are exact and
        // childless, intermediates are non-exact with children.
        for node in &self.nodes {
            if !node.exact && node.children.is_empty() {
                return Err(RouteError::EmptyLayout(node.path.clone()));
            }
            if node.exact && !node.children.is_empty() {
                return Err(RouteError::ExactWithChildren(node.path.clone()));
            }
            for &child in &node.children {
                let child_path = &self.nodes[child].path;
                if !nests_under(child_path, &node.path) {
                    return Err(RouteError::OutsideLayout {
                        path: child_path.clone(),
                        layout: node.path.clone(),
                    });
                }
            }
        }

        let mut records = Vec::new();
        let mut path_index: HashMap<String, usize> = HashMap::new();
        let mut tree = Vec::with_capacity(self.roots.len());

        for &root in &self.roots {
            tree.push(self.flatten(root, &mut records, &mut path_index)?);
        }

        let wildcard = self.wildcard.map(|component| {
            records.push(PageRecord {
                path: "*".to_owned(),
                component,
                exact: false,
                sidebar_id: None,
            });
            records.len() - 1
        });

        Ok(RouteTable {
            records,
            tree,
            path_index,
            wildcard,
        })
    }

    /// Convert a builder node to a [`RouteNode`], collecting leaf records.
    fn flatten(
        &self,
        idx: usize,
        records: &mut Vec<PageRecord>,
        path_index: &mut HashMap<String, usize>,
    ) -> Result<RouteNode, RouteError> {
        let node = &self.nodes[idx];

        if node.exact {
            if path_index.contains_key(&node.path) {
                return Err(RouteError::DuplicatePath(node.path.clone()));
            }
            path_index.insert(node.path.clone(), records.len());
            records.push(PageRecord {
                path: node.path.clone(),
                component: node.component.clone(),
                exact: true,
                sidebar_id: node.sidebar_id.clone(),
            });
        }

        let mut routes = Vec::with_capacity(node.children.len());
        for &child in &node.children {
            routes.push(self.flatten(child, records, path_index)?);
        }

        Ok(RouteNode {
            path: node.path.clone(),
            component: node.component.clone(),
            exact: node.exact,
            routes,
        })
    }
}

/// The generated route table.
///
/// Produced once per build and immutable thereafter. Holds both views of the
/// generated data: the ordered record list and the nested route tree, plus a
/// path index for exact lookups.
#[derive(Debug, Serialize)]
pub struct RouteTable {
    /// Ordered leaf records; the wildcard record, when present, is last.
    records: Vec<PageRecord>,
    /// Nested route tree with layout wrapping.
    #[serde(rename = "routes")]
    tree: Vec<RouteNode>,
    #[serde(skip)]
    path_index: HashMap<String, usize>,
    #[serde(skip)]
    wildcard: Option<usize>,
}

impl RouteTable {
    /// Ordered leaf records (wildcard last, when present).
    #[must_use]
    pub fn records(&self) -> &[PageRecord] {
        &self.records
    }

    /// Nested route tree.
    #[must_use]
    pub fn tree(&self) -> &[RouteNode] {
        &self.tree
    }

    /// The wildcard record, if the table has one.
    #[must_use]
    pub fn wildcard(&self) -> Option<&PageRecord> {
        self.wildcard.map(|i| &self.records[i])
    }

    /// Exact record lookup by path (no normalization, no wildcard).
    #[must_use]
    pub fn record(&self, path: &str) -> Option<&PageRecord> {
        self.path_index.get(path).map(|&i| &self.records[i])
    }

    /// Number of leaf records, excluding the wildcard.
    #[must_use]
    pub fn page_count(&self) -> usize {
        self.records.len() - usize::from(self.wildcard.is_some())
    }

    /// Resolve a request path to its record and layout chain.
    ///
    /// The path is normalized (query/fragment stripped, trailing slash
    /// dropped) before matching. Resolution is total once a wildcard record
    /// is present.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::NoMatch`] only for tables without a wildcard.
    pub fn resolve(&self, path: &str) -> Result<RouteMatch<'_>, RouteError> {
        let normalized = normalize_path(path);

        let mut layouts = Vec::new();
        if let Some(leaf) = Self::descend(&self.tree, &normalized, &mut layouts) {
            let record = self
                .record(&leaf.path)
                .unwrap_or_else(|| unreachable!("leaf {} missing from path index", leaf.path));
            return Ok(RouteMatch { record, layouts });
        }

        match self.wildcard() {
            Some(record) => Ok(RouteMatch {
                record,
                layouts: Vec::new(),
            }),
            None => Err(RouteError::NoMatch(normalized)),
        }
    }

    /// Depth-first descent to the deepest matching leaf.
    ///
    /// Exact nodes match only identical paths. Non-exact nodes match any
    /// path sharing their prefix up to a segment boundary and recurse into
    /// children. On a successful match `layouts` holds the ancestor chain,
    /// outermost first.
    fn descend<'a>(
        nodes: &'a [RouteNode],
        path: &str,
        layouts: &mut Vec<&'a RouteNode>,
    ) -> Option<&'a RouteNode> {
        for node in nodes {
            if node.exact {
                if node.path == path {
                    return Some(node);
                }
            } else if nests_under(path, &node.path) {
                layouts.push(node);
                if let Some(leaf) = Self::descend(&node.routes, path, layouts) {
                    return Some(leaf);
                }
                layouts.pop();
            }
        }
        None
    }

    /// Serialize the table (records + tree) as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying `serde_json` error.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
