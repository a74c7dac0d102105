//! Site build pipeline for Refract Docs.
//!
//! This crate ties the engine together: content corpus + sidebar definitions
//! + site configuration go in, the generated route table and navigation
//! artifacts come out. The transformation is one-directional and build-time;
//! the produced [`SiteState`] is immutable and regenerated wholesale on the
//! next build.
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use refract_config::SiteConfig;
//! use refract_site::Site;
//!
//! let config = SiteConfig::load(Some(Path::new("refract.toml")), None)?;
//! let site = Site::new(config);
//! let state = site.build()?;
//!
//! let matched = state.routes().resolve("/docs/intro")?;
//! println!("{}", matched.record.component);
//! # Ok(())
//! # }
//! ```

pub(crate) mod artifacts;
pub(crate) mod links;
pub(crate) mod site;
pub(crate) mod state;

pub use artifacts::write_artifacts;
pub use links::{BrokenLink, LinkKind, extract_links};
pub use site::{BuildError, Site};
pub use state::{DocNavigation, Page, PageLink, SiteState};
