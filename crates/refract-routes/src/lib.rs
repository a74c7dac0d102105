//! Route table and resolver for Refract Docs.
//!
//! This crate provides:
//! - [`RouteNode`]: the recursive route tree with layout wrapping
//! - [`PageRecord`]: the flat path-to-component records
//! - [`RouteTable`]: the generated table with total path resolution
//!
//! # Quick Start
//!
//! ```
//! use refract_routes::{ComponentRef, RouteTableBuilder};
//!
//! let mut builder = RouteTableBuilder::new();
//! let docs = builder.add_layout("/docs", ComponentRef::new("@theme/DocRoot"), None);
//! builder.add_page("/docs/intro", ComponentRef::new("@content/intro"), None, Some(docs));
//! builder.add_wildcard(ComponentRef::new("@theme/NotFound"));
//! let table = builder.build().unwrap();
//!
//! let matched = table.resolve("/docs/intro").unwrap();
//! assert_eq!(matched.record.path, "/docs/intro");
//! assert_eq!(matched.layouts.len(), 1);
//! ```

pub(crate) mod record;
pub(crate) mod table;

pub use record::{ComponentRef, PageRecord, RouteNode};
pub use table::{RouteError, RouteMatch, RouteTable, RouteTableBuilder, normalize_path};
