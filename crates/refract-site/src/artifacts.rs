//! Generated artifact emission.
//!
//! A build produces two JSON artifacts consumed by the client-side router
//! and navigation components:
//!
//! - `routes.json`: the ordered record list plus the nested route tree
//! - `sidebars.json`: the sidebar definitions as consumed by the build

use std::path::{Path, PathBuf};

use crate::site::BuildError;
use crate::state::SiteState;

/// Write the generated artifacts into `out_dir`.
///
/// The directory is created if needed. Returns the written file paths.
///
/// # Errors
///
/// Returns [`BuildError::Io`] on filesystem failures and
/// [`BuildError::Artifact`] on serialization failures.
pub fn write_artifacts(state: &SiteState, out_dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    std::fs::create_dir_all(out_dir).map_err(|source| BuildError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let mut written = Vec::new();

    let routes_path = out_dir.join("routes.json");
    write_file(&routes_path, &state.routes().to_json_pretty()?)?;
    written.push(routes_path);

    let sidebars_path = out_dir.join("sidebars.json");
    write_file(&sidebars_path, &serde_json::to_string_pretty(state.sidebars())?)?;
    written.push(sidebars_path);

    Ok(written)
}

/// Write one artifact file with a trailing newline.
fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    let mut content = content.to_owned();
    content.push('\n');
    std::fs::write(path, content).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}
