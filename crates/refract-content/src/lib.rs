//! Content corpus for Refract Docs.
//!
//! This crate provides:
//! - [`FrontMatter`]: YAML front-matter parsing for Markdown/MDX files
//! - [`Scanner`]: content-tree discovery
//! - [`Corpus`]: the loaded content set with resolved ids, slugs and titles
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use refract_content::{ContentKind, Corpus};
//!
//! let docs = Corpus::load(Path::new("docs"), ContentKind::Doc)?;
//! for file in docs.files() {
//!     println!("{} -> {}", file.id, file.slug);
//! }
//! # Ok(())
//! # }
//! ```

pub(crate) mod corpus;
pub(crate) mod front_matter;
pub(crate) mod markdown;
pub(crate) mod scanner;

pub use corpus::{ContentError, ContentFile, ContentKind, Corpus, PostDate};
pub use front_matter::{Author, FrontMatter, split_front_matter};
pub use markdown::{extract_first_heading, title_from_stem};
pub use scanner::Scanner;
