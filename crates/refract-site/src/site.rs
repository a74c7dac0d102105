//! Site assembly: content + sidebars + config to generated state.
//!
//! The build is a one-directional transformation run once per invocation:
//!
//! 1. scan and parse the docs and blog corpora
//! 2. load and validate sidebar definitions
//! 3. assign routes and wrap section pages in their layout chains
//! 4. verify internal links per the configured policies
//! 5. snapshot everything into an immutable [`SiteState`]

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use refract_config::{LinkPolicy, SiteConfig};
use refract_content::{ContentError, ContentFile, ContentKind, Corpus};
use refract_routes::{ComponentRef, RouteError, RouteTableBuilder, normalize_path};
use refract_sidebar::{SidebarError, SidebarIndex, Sidebars};

use crate::links::{self, BrokenLink, LinkKind, PageToCheck};
use crate::state::{Page, SiteState};

/// Layout component wrapping every docs route.
const DOC_ROOT_COMPONENT: &str = "@theme/DocRoot";
/// Inner layout component for docs pages (version/sidebar frame).
const DOC_PAGE_COMPONENT: &str = "@theme/DocPage";
/// Layout component wrapping every blog route.
const BLOG_LAYOUT_COMPONENT: &str = "@theme/BlogLayout";
/// Generated blog index page.
const BLOG_LIST_COMPONENT: &str = "@theme/BlogListPage";
/// Wildcard not-found page.
const NOT_FOUND_COMPONENT: &str = "@theme/NotFound";

/// Error building the site.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// Content corpus failed to load.
    #[error("{0}")]
    Content(#[from] ContentError),
    /// Sidebar definitions failed to load or validate.
    #[error("{0}")]
    Sidebar(#[from] SidebarError),
    /// Route table construction failed.
    #[error("{0}")]
    Route(#[from] RouteError),
    /// A sidebar references a doc id that no content file provides.
    #[error("Sidebar '{sidebar}' references unknown doc '{id}'")]
    UnknownSidebarDoc {
        /// Sidebar name.
        sidebar: String,
        /// The unresolved doc id.
        id: String,
    },
    /// Broken links under a `throw` policy.
    #[error("{} broken internal link(s)", .0.len())]
    BrokenLinks(Vec<BrokenLink>),
    /// I/O error writing artifacts.
    #[error("I/O error writing {}: {source}", .path.display())]
    Io {
        /// Target path.
        path: std::path::PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
    /// Artifact serialization failed.
    #[error("Artifact serialization error: {0}")]
    Artifact(#[from] serde_json::Error),
}

/// The site build pipeline.
///
/// Owns the loaded configuration; [`Site::build`] produces an immutable
/// [`SiteState`] snapshot.
pub struct Site {
    config: SiteConfig,
}

impl Site {
    /// Create a site from a loaded configuration.
    #[must_use]
    pub fn new(config: SiteConfig) -> Self {
        Self { config }
    }

    /// The site configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Run the full build from the configured content roots.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] on corpus, sidebar, route or link failures.
    pub fn build(&self) -> Result<Arc<SiteState>, BuildError> {
        let docs = Corpus::load(&self.config.docs_resolved.path, ContentKind::Doc)?;
        let blog = Corpus::load(&self.config.blog_resolved.path, ContentKind::Blog)?;
        let sidebars = Sidebars::load(&self.config.docs_resolved.sidebar_file)?;
        self.assemble(&docs, &blog, sidebars)
    }

    /// Assemble site state from loaded inputs.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError`] on sidebar, route or link failures.
    pub fn assemble(
        &self,
        docs: &Corpus,
        blog: &Corpus,
        sidebars: Sidebars,
    ) -> Result<Arc<SiteState>, BuildError> {
        sidebars.validate()?;

        // Index sidebars and resolve each doc's owning sidebar.
        let mut sidebar_indexes = HashMap::new();
        let mut doc_sidebar: HashMap<String, String> = HashMap::new();
        for (name, items) in sidebars.iter() {
            let index = SidebarIndex::build(items);
            for id in index.flatten() {
                if docs.get(id).is_none() {
                    return Err(BuildError::UnknownSidebarDoc {
                        sidebar: name.to_owned(),
                        id: id.clone(),
                    });
                }
                doc_sidebar
                    .entry(id.clone())
                    .or_insert_with(|| name.to_owned());
            }
            sidebar_indexes.insert(name.to_owned(), index);
        }

        let (routes, pages) = self.assign_routes(docs, blog, &doc_sidebar)?;

        self.check_links(docs, blog, &pages, &routes)?;

        tracing::debug!(
            pages = pages.len(),
            routes = routes.page_count(),
            sidebars = sidebars.len(),
            "Site assembled"
        );

        Ok(Arc::new(SiteState::new(
            pages,
            routes,
            sidebars,
            sidebar_indexes,
        )))
    }

    /// Build the route table and page summaries.
    fn assign_routes(
        &self,
        docs: &Corpus,
        blog: &Corpus,
        doc_sidebar: &HashMap<String, String>,
    ) -> Result<(refract_routes::RouteTable, Vec<Page>), BuildError> {
        let base_url = &self.config.base_url;
        let docs_base = section_route(base_url, &self.config.docs_resolved.route_base);
        let blog_base = section_route(base_url, &self.config.blog_resolved.route_base);

        let mut builder = RouteTableBuilder::new();
        let mut pages = Vec::new();

        // Routes are assigned before layouts so empty sections get no
        // layout chain.
        let doc_routes: Vec<(&ContentFile, String)> = docs
            .files()
            .iter()
            .filter(|f| !f.draft)
            .map(|f| (f, page_route(base_url, &docs_base, &f.slug)))
            .collect();
        let blog_routes: Vec<(&ContentFile, String)> = blog
            .files()
            .iter()
            .filter(|f| !f.draft)
            .map(|f| (f, page_route(base_url, &blog_base, &f.slug)))
            .collect();

        // Docs nest inside a two-level layout chain.
        let docs_parent = if doc_routes.iter().any(|(_, r)| in_section(r, &docs_base)) {
            let outer = builder.add_layout(
                docs_base.clone(),
                ComponentRef::new(DOC_ROOT_COMPONENT),
                None,
            );
            Some(builder.add_layout(
                docs_base.clone(),
                ComponentRef::new(DOC_PAGE_COMPONENT),
                Some(outer),
            ))
        } else {
            None
        };

        for (file, route) in doc_routes {
            let parent = docs_parent.filter(|_| in_section(&route, &docs_base));
            let component =
                ComponentRef::from_source(&format!("docs/{}", file.source_path.display()));
            let sidebar_id = doc_sidebar.get(&file.id).cloned();
            builder.add_page(route.clone(), component, sidebar_id.clone(), parent);
            pages.push(page_summary(file, route, sidebar_id));
        }

        // Blog gets one layout plus a generated index page.
        if !blog_routes.is_empty() {
            let layout = builder.add_layout(
                blog_base.clone(),
                ComponentRef::new(BLOG_LAYOUT_COMPONENT),
                None,
            );
            builder.add_page(
                blog_base.clone(),
                ComponentRef::new(BLOG_LIST_COMPONENT),
                None,
                Some(layout),
            );

            for (file, route) in blog_routes {
                let parent = Some(layout).filter(|_| in_section(&route, &blog_base));
                let component =
                    ComponentRef::from_source(&format!("blog/{}", file.source_path.display()));
                builder.add_page(route.clone(), component, None, parent);
                pages.push(page_summary(file, route, None));
            }
        }

        builder.add_wildcard(ComponentRef::new(NOT_FOUND_COMPONENT));

        Ok((builder.build()?, pages))
    }

    /// Run the link sweep and apply the configured policies.
    fn check_links(
        &self,
        docs: &Corpus,
        blog: &Corpus,
        pages: &[Page],
        routes: &refract_routes::RouteTable,
    ) -> Result<(), BuildError> {
        let internal_policy = self.config.on_broken_links;
        let markdown_policy = self.config.on_broken_markdown_links;
        if internal_policy == LinkPolicy::Ignore && markdown_policy == LinkPolicy::Ignore {
            return Ok(());
        }

        let route_of: HashMap<&str, &str> = pages
            .iter()
            .map(|p| (p.id.as_str(), p.route.as_str()))
            .collect();

        let mut known_sources = HashSet::new();
        let mut to_check = Vec::new();
        for (corpus, section) in [(docs, "docs"), (blog, "blog")] {
            for file in corpus.files() {
                let label = format!("{section}/{}", file.source_path.display());
                known_sources.insert(label.clone());
                // Drafts keep their sources known but are not swept.
                if file.draft {
                    continue;
                }
                let Some(&route) = route_of.get(file.id.as_str()) else {
                    continue;
                };
                let dir = label.rsplit_once('/').map_or("", |(d, _)| d).to_owned();
                to_check.push(PageToCheck {
                    label,
                    dir,
                    route: route.to_owned(),
                    body: &file.body,
                });
            }
        }

        let findings = links::check_links(&to_check, routes, &known_sources);

        let mut fatal = Vec::new();
        for finding in findings {
            let policy = match finding.kind {
                LinkKind::Internal => internal_policy,
                LinkKind::MarkdownFile => markdown_policy,
            };
            match policy {
                LinkPolicy::Throw => fatal.push(finding),
                LinkPolicy::Warn => {
                    tracing::warn!(
                        source = %finding.source,
                        link = %finding.link,
                        "Broken link"
                    );
                }
                LinkPolicy::Ignore => {}
            }
        }

        if fatal.is_empty() {
            Ok(())
        } else {
            Err(BuildError::BrokenLinks(fatal))
        }
    }
}

/// Route path for a section root (e.g., `/docs`, `/refract/blog`).
fn section_route(base_url: &str, section_base: &str) -> String {
    normalize_path(&format!("{base_url}{section_base}"))
}

/// Route path for a page slug within a section.
///
/// Relative slugs mount under the section base; a leading slash mounts the
/// page at the site root; the `index` slug collapses to the section root.
fn page_route(base_url: &str, section_base: &str, slug: &str) -> String {
    if let Some(absolute) = slug.strip_prefix('/') {
        normalize_path(&format!("{base_url}{absolute}"))
    } else if slug.is_empty() || slug == "index" {
        section_base.to_owned()
    } else {
        normalize_path(&format!("{section_base}/{slug}"))
    }
}

/// True when a route nests under a section base at a segment boundary.
fn in_section(route: &str, section_base: &str) -> bool {
    route == section_base
        || (route.starts_with(section_base) && route[section_base.len()..].starts_with('/'))
}

/// Page summary for the state snapshot.
fn page_summary(file: &ContentFile, route: String, sidebar_id: Option<String>) -> Page {
    Page {
        id: file.id.clone(),
        kind: file.kind,
        title: file.title.clone(),
        route,
        description: file.description.clone(),
        sidebar_id,
        unlisted: file.unlisted,
        date: file.date,
        tags: file.tags.clone(),
        authors: file.authors.clone(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn test_config() -> SiteConfig {
        let mut config = SiteConfig::default();
        config.title = "Refract".to_owned();
        config
    }

    fn docs_corpus(sources: &[(&str, &str)]) -> Corpus {
        Corpus::from_sources(
            ContentKind::Doc,
            sources
                .iter()
                .map(|(p, t)| (PathBuf::from(p), (*t).to_owned()))
                .collect(),
        )
        .unwrap()
    }

    fn blog_corpus(sources: &[(&str, &str)]) -> Corpus {
        Corpus::from_sources(
            ContentKind::Blog,
            sources
                .iter()
                .map(|(p, t)| (PathBuf::from(p), (*t).to_owned()))
                .collect(),
        )
        .unwrap()
    }

    fn empty_blog() -> Corpus {
        blog_corpus(&[])
    }

    const TUTORIAL_SIDEBAR: &str = r"
tutorialSidebar:
  - intro
  - type: category
    label: API Reference
    items:
      - api/overview
      - api/createApp
";

    fn tutorial_docs() -> Corpus {
        docs_corpus(&[
            ("intro.md", "# Introduction"),
            ("api/overview.md", "# API Overview"),
            (
                "api/create-app.md",
                "---\nid: api/createApp\ntitle: createApp\n---\nFactory.",
            ),
        ])
    }

    // Route assignment

    #[test]
    fn test_docs_routes_nest_under_two_layouts() {
        let site = Site::new(test_config());
        let state = site
            .assemble(
                &tutorial_docs(),
                &empty_blog(),
                Sidebars::from_yaml(TUTORIAL_SIDEBAR).unwrap(),
            )
            .unwrap();

        let matched = state.routes().resolve("/docs/intro").unwrap();
        assert_eq!(matched.record.path, "/docs/intro");
        let chain: Vec<_> = matched
            .layouts
            .iter()
            .map(|n| n.component.as_str())
            .collect();
        assert_eq!(chain, vec!["@theme/DocRoot", "@theme/DocPage"]);
    }

    #[test]
    fn test_front_matter_slug_round_trip() {
        let site = Site::new(test_config());
        let docs = docs_corpus(&[("page.md", "---\nslug: /x/y\n---\n# Page")]);
        let state = site
            .assemble(&docs, &empty_blog(), Sidebars::default())
            .unwrap();

        let record = state.routes().record("/x/y").unwrap();
        assert!(record.exact);
        // Absolute slugs mount outside the docs layout chain.
        let matched = state.routes().resolve("/x/y").unwrap();
        assert!(matched.layouts.is_empty());
    }

    #[test]
    fn test_blog_post_route_from_front_matter_slug() {
        let site = Site::new(test_config());
        let blog = blog_corpus(&[(
            "2026-03-14-hello.md",
            "---\nslug: introducing-refract\n---\n# Introducing Refract",
        )]);
        let state = site
            .assemble(&docs_corpus(&[]), &blog, Sidebars::default())
            .unwrap();

        let record = state.routes().record("/blog/introducing-refract").unwrap();
        assert!(record.exact);
    }

    #[test]
    fn test_blog_gets_generated_index_page() {
        let site = Site::new(test_config());
        let blog = blog_corpus(&[("2026-03-14-hello.md", "# Hello")]);
        let state = site
            .assemble(&docs_corpus(&[]), &blog, Sidebars::default())
            .unwrap();

        let record = state.routes().record("/blog").unwrap();
        assert_eq!(record.component.as_str(), BLOG_LIST_COMPONENT);
    }

    #[test]
    fn test_empty_sections_emit_no_layouts() {
        let site = Site::new(test_config());
        let state = site
            .assemble(&docs_corpus(&[]), &empty_blog(), Sidebars::default())
            .unwrap();

        // Only the wildcard record remains.
        assert_eq!(state.routes().page_count(), 0);
        assert_eq!(
            state.routes().resolve("/docs/anything").unwrap().record.path,
            "*"
        );
    }

    #[test]
    fn test_drafts_are_excluded_from_routes() {
        let site = Site::new(test_config());
        let docs = docs_corpus(&[
            ("intro.md", "# Intro"),
            ("wip.md", "---\ndraft: true\n---\n# WIP"),
        ]);
        let state = site
            .assemble(&docs, &empty_blog(), Sidebars::default())
            .unwrap();

        assert!(state.routes().record("/docs/intro").is_some());
        assert!(state.routes().record("/docs/wip").is_none());
        assert!(state.page("wip").is_none());
    }

    #[test]
    fn test_unmatched_path_falls_to_wildcard() {
        let site = Site::new(test_config());
        let state = site
            .assemble(
                &tutorial_docs(),
                &empty_blog(),
                Sidebars::from_yaml(TUTORIAL_SIDEBAR).unwrap(),
            )
            .unwrap();

        let matched = state.routes().resolve("/docs/nonexistent").unwrap();
        assert_eq!(matched.record.path, "*");
        assert_eq!(matched.record.component.as_str(), NOT_FOUND_COMPONENT);
    }

    #[test]
    fn test_base_url_prefixes_routes() {
        let mut config = test_config();
        config.base_url = "/refract/".to_owned();
        let site = Site::new(config);
        let state = site
            .assemble(&tutorial_docs(), &empty_blog(), Sidebars::default())
            .unwrap();

        assert!(state.routes().record("/refract/docs/intro").is_some());
    }

    #[test]
    fn test_duplicate_slugs_fail_the_build() {
        let site = Site::new(test_config());
        let docs = docs_corpus(&[
            ("a.md", "---\nslug: same\n---\n# A"),
            ("b.md", "---\nslug: same\n---\n# B"),
        ]);
        let result = site.assemble(&docs, &empty_blog(), Sidebars::default());

        assert!(matches!(
            result,
            Err(BuildError::Route(RouteError::DuplicatePath(_)))
        ));
    }

    // Sidebar wiring

    #[test]
    fn test_sidebar_id_attached_to_records() {
        let site = Site::new(test_config());
        let state = site
            .assemble(
                &tutorial_docs(),
                &empty_blog(),
                Sidebars::from_yaml(TUTORIAL_SIDEBAR).unwrap(),
            )
            .unwrap();

        let record = state.routes().record("/docs/intro").unwrap();
        assert_eq!(record.sidebar_id.as_deref(), Some("tutorialSidebar"));
    }

    #[test]
    fn test_unknown_sidebar_doc_fails_the_build() {
        let site = Site::new(test_config());
        let sidebars = Sidebars::from_yaml("mainSidebar: [ghost]").unwrap();
        let result = site.assemble(&tutorial_docs(), &empty_blog(), sidebars);

        assert!(matches!(
            result,
            Err(BuildError::UnknownSidebarDoc { ref id, .. }) if id == "ghost"
        ));
    }

    #[test]
    fn test_doc_navigation_walks_sidebar_tree() {
        let site = Site::new(test_config());
        let state = site
            .assemble(
                &tutorial_docs(),
                &empty_blog(),
                Sidebars::from_yaml(TUTORIAL_SIDEBAR).unwrap(),
            )
            .unwrap();

        let nav = state.doc_navigation("api/createApp").unwrap();
        assert_eq!(nav.ancestors, vec!["API Reference".to_owned()]);
        let previous = nav.previous.unwrap();
        assert_eq!(previous.title, "API Overview");
        assert_eq!(previous.route, "/docs/api/overview");
        assert!(nav.next.is_none());
    }

    #[test]
    fn test_doc_navigation_none_without_sidebar() {
        let site = Site::new(test_config());
        let state = site
            .assemble(&tutorial_docs(), &empty_blog(), Sidebars::default())
            .unwrap();

        assert!(state.doc_navigation("intro").is_none());
    }

    // Link policies

    #[test]
    fn test_broken_link_throw_fails_the_build() {
        let site = Site::new(test_config());
        let docs = docs_corpus(&[("intro.md", "# Intro\n\n[gone](/docs/missing)")]);
        let result = site.assemble(&docs, &empty_blog(), Sidebars::default());

        match result {
            Err(BuildError::BrokenLinks(findings)) => {
                assert_eq!(findings.len(), 1);
                assert_eq!(findings[0].link, "/docs/missing");
            }
            other => panic!("expected BrokenLinks, got {other:?}", other = other.err()),
        }
    }

    #[test]
    fn test_broken_link_warn_continues() {
        let mut config = test_config();
        config.on_broken_links = LinkPolicy::Warn;
        let site = Site::new(config);
        let docs = docs_corpus(&[("intro.md", "# Intro\n\n[gone](/docs/missing)")]);

        let state = site
            .assemble(&docs, &empty_blog(), Sidebars::default())
            .unwrap();
        assert!(state.routes().record("/docs/intro").is_some());
    }

    #[test]
    fn test_broken_link_ignore_skips_sweep() {
        let mut config = test_config();
        config.on_broken_links = LinkPolicy::Ignore;
        config.on_broken_markdown_links = LinkPolicy::Ignore;
        let site = Site::new(config);
        let docs = docs_corpus(&[("intro.md", "[gone](/nope) [also](./nope.md)")]);

        assert!(
            site.assemble(&docs, &empty_blog(), Sidebars::default())
                .is_ok()
        );
    }

    #[test]
    fn test_markdown_file_links_use_their_own_policy() {
        // Default config: markdown links warn, internal links throw.
        let site = Site::new(test_config());
        let docs = docs_corpus(&[("intro.md", "# Intro\n\n[sibling](./missing.md)")]);

        assert!(
            site.assemble(&docs, &empty_blog(), Sidebars::default())
                .is_ok()
        );
    }

    #[test]
    fn test_valid_cross_references_pass() {
        let site = Site::new(test_config());
        let docs = docs_corpus(&[
            ("intro.md", "# Intro\n\n[api](/docs/api/overview) [file](./api/overview.md)"),
            ("api/overview.md", "# API Overview\n\n[up](../intro.md)"),
        ]);

        assert!(
            site.assemble(&docs, &empty_blog(), Sidebars::default())
                .is_ok()
        );
    }

    // Filesystem build

    #[test]
    fn test_build_from_directories() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("docs/api")).unwrap();
        std::fs::create_dir_all(dir.path().join("blog")).unwrap();
        std::fs::write(dir.path().join("docs/intro.md"), "# Introduction").unwrap();
        std::fs::write(dir.path().join("docs/api/overview.md"), "# API Overview").unwrap();
        std::fs::write(
            dir.path().join("blog/2026-03-14-introducing-refract.md"),
            "---\ntags: [release]\n---\n# Introducing Refract",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("sidebars.yaml"),
            "tutorialSidebar:\n  - intro\n  - api/overview\n",
        )
        .unwrap();
        std::fs::write(
            dir.path().join("refract.toml"),
            "title = \"Refract\"\nurl = \"https://refract.dev\"\n",
        )
        .unwrap();

        let config =
            SiteConfig::load(Some(&dir.path().join("refract.toml")), None).unwrap();
        let site = Site::new(config);
        let state = site.build().unwrap();

        assert_eq!(state.routes().page_count(), 4);
        assert!(state.routes().record("/docs/intro").is_some());
        assert!(state.routes().record("/blog/introducing-refract").is_some());
        assert!(state.routes().record("/blog").is_some());

        let post = state.page("introducing-refract").unwrap();
        assert_eq!(post.date.unwrap().to_string(), "2026-03-14");
        assert_eq!(post.tags, vec!["release".to_owned()]);
    }
}
