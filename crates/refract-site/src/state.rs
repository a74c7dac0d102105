//! Immutable site state produced by a build.
//!
//! [`SiteState`] is the pure data representation of the generated site:
//! page summaries, the route table and the sidebar indexes. It is produced
//! once per build by [`Site::build`](crate::Site::build) and shared as an
//! `Arc` snapshot; all queries are lookups over immutable data.

use std::collections::HashMap;

use serde::Serialize;

use refract_content::{Author, ContentKind, PostDate};
use refract_routes::RouteTable;
use refract_sidebar::{SidebarIndex, Sidebars};

/// Summary of one generated page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    /// Stable document identifier.
    pub id: String,
    /// Corpus section.
    pub kind: ContentKind,
    /// Display title.
    pub title: String,
    /// Generated route path.
    pub route: String,
    /// Description from front-matter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Sidebar this page belongs to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_id: Option<String>,
    /// Hidden from navigation but still routed.
    pub unlisted: bool,
    /// Publication date (blog posts).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<PostDate>,
    /// Tags from front-matter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Authors from front-matter.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub authors: Vec<Author>,
}

/// A resolved link to a neighboring page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageLink {
    /// Display title.
    pub title: String,
    /// Route path.
    pub route: String,
}

/// Navigation context for a doc page: breadcrumbs and pagination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DocNavigation {
    /// Category labels from the sidebar root to the page's parent.
    pub ancestors: Vec<String>,
    /// Previous page in sidebar order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<PageLink>,
    /// Next page in sidebar order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<PageLink>,
}

/// Immutable generated site state.
///
/// Pages are stored in generation order; id lookups go through `id_index`.
pub struct SiteState {
    pages: Vec<Page>,
    routes: RouteTable,
    sidebars: Sidebars,
    sidebar_indexes: HashMap<String, SidebarIndex>,
    id_index: HashMap<String, usize>,
}

impl SiteState {
    pub(crate) fn new(
        pages: Vec<Page>,
        routes: RouteTable,
        sidebars: Sidebars,
        sidebar_indexes: HashMap<String, SidebarIndex>,
    ) -> Self {
        let id_index = pages
            .iter()
            .enumerate()
            .map(|(i, page)| (page.id.clone(), i))
            .collect();
        Self {
            pages,
            routes,
            sidebars,
            sidebar_indexes,
            id_index,
        }
    }

    /// All generated pages in generation order.
    #[must_use]
    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    /// The generated route table.
    #[must_use]
    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// The sidebar definitions the build consumed.
    #[must_use]
    pub fn sidebars(&self) -> &Sidebars {
        &self.sidebars
    }

    /// Look up a page by doc id.
    #[must_use]
    pub fn page(&self, id: &str) -> Option<&Page> {
        self.id_index.get(id).map(|&i| &self.pages[i])
    }

    /// Route path for a doc id.
    #[must_use]
    pub fn route_for(&self, id: &str) -> Option<&str> {
        self.page(id).map(|p| p.route.as_str())
    }

    /// Prebuilt index for a named sidebar.
    #[must_use]
    pub fn sidebar_index(&self, name: &str) -> Option<&SidebarIndex> {
        self.sidebar_indexes.get(name)
    }

    /// Navigation context for a doc page.
    ///
    /// Returns the sidebar ancestor chain plus resolved previous/next links,
    /// or `None` when the page is not part of any sidebar. Deterministic for
    /// a given build.
    #[must_use]
    pub fn doc_navigation(&self, id: &str) -> Option<DocNavigation> {
        let page = self.page(id)?;
        let sidebar_id = page.sidebar_id.as_deref()?;
        let index = self.sidebar_indexes.get(sidebar_id)?;
        let position = index.position(id)?;

        Some(DocNavigation {
            ancestors: position.ancestors,
            previous: position.previous.as_deref().and_then(|p| self.link_for(p)),
            next: position.next.as_deref().and_then(|n| self.link_for(n)),
        })
    }

    /// Build a [`PageLink`] for a doc id.
    fn link_for(&self, id: &str) -> Option<PageLink> {
        self.page(id).map(|page| PageLink {
            title: page.title.clone(),
            route: page.route.clone(),
        })
    }
}
