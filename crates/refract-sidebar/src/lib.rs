//! Sidebar trees for Refract Docs.
//!
//! This crate provides:
//! - [`Sidebars`]: the named sidebar definitions loaded from `sidebars.yaml`
//! - [`SidebarItem`]: the tree of doc references and labeled categories
//! - [`SidebarIndex`]: position lookups for breadcrumbs and pagination
//!
//! # Quick Start
//!
//! ```
//! use refract_sidebar::{SidebarIndex, Sidebars};
//!
//! let sidebars = Sidebars::from_yaml(r"
//! tutorialSidebar:
//!   - intro
//!   - type: category
//!     label: API Reference
//!     items: [api/overview, api/createApp]
//! ").unwrap();
//! sidebars.validate().unwrap();
//!
//! let index = SidebarIndex::build(sidebars.get("tutorialSidebar").unwrap());
//! let pos = index.position("api/createApp").unwrap();
//! assert_eq!(pos.ancestors, vec!["API Reference".to_owned()]);
//! assert_eq!(pos.previous.as_deref(), Some("api/overview"));
//! ```

pub(crate) mod index;
pub(crate) mod model;

pub use index::{DocPosition, SidebarIndex};
pub use model::{SidebarCategory, SidebarError, SidebarItem, Sidebars};
