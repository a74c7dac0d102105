//! Position lookups over a sidebar tree.
//!
//! The index flattens one sidebar into depth-first document order and
//! records each doc's ancestor category labels. Lookups drive breadcrumbs
//! (ancestor chain) and pagination (previous/next in document order).

use std::collections::HashMap;

use serde::Serialize;

use crate::model::SidebarItem;

/// A doc's position within a sidebar tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocPosition {
    /// Category labels from the root to the doc's parent.
    pub ancestors: Vec<String>,
    /// Previous doc id in depth-first order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<String>,
    /// Next doc id in depth-first order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
}

/// Prebuilt lookup over one sidebar's tree.
///
/// Ids are unique within a validated sidebar, so lookups are unambiguous.
/// The index holds owned data and is cheap to build once per sidebar at
/// build time.
pub struct SidebarIndex {
    /// Doc ids in depth-first document order.
    order: Vec<String>,
    /// Doc id to position in `order`.
    by_id: HashMap<String, usize>,
    /// Doc id to ancestor category labels (root first).
    ancestors: HashMap<String, Vec<String>>,
}

impl SidebarIndex {
    /// Build an index from a sidebar's items.
    #[must_use]
    pub fn build(items: &[SidebarItem]) -> Self {
        let mut index = Self {
            order: Vec::new(),
            by_id: HashMap::new(),
            ancestors: HashMap::new(),
        };
        let mut trail = Vec::new();
        index.walk(items, &mut trail);
        index
    }

    /// Depth-first collection of doc ids and ancestor trails.
    fn walk(&mut self, items: &[SidebarItem], trail: &mut Vec<String>) {
        for item in items {
            match item {
                SidebarItem::Doc(id) => {
                    self.by_id.insert(id.clone(), self.order.len());
                    self.ancestors.insert(id.clone(), trail.clone());
                    self.order.push(id.clone());
                }
                SidebarItem::Category(category) => {
                    trail.push(category.label.clone());
                    self.walk(&category.items, trail);
                    trail.pop();
                }
            }
        }
    }

    /// Locate a doc within the tree.
    ///
    /// Returns the ancestor label chain plus previous/next doc ids, or
    /// `None` when the id is not in this sidebar. Deterministic for a given
    /// tree.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<DocPosition> {
        let &idx = self.by_id.get(id)?;
        Some(DocPosition {
            ancestors: self.ancestors.get(id).cloned().unwrap_or_default(),
            previous: idx.checked_sub(1).map(|i| self.order[i].clone()),
            next: self.order.get(idx + 1).cloned(),
        })
    }

    /// Doc ids in depth-first document order.
    #[must_use]
    pub fn flatten(&self) -> &[String] {
        &self.order
    }

    /// Check whether a doc id appears in this sidebar.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }
}
