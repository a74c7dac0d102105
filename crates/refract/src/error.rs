//! CLI error types.

use refract_config::ConfigError;
use refract_routes::RouteError;
use refract_site::BuildError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Route(#[from] RouteError),

    #[error("{0}")]
    Artifact(#[from] serde_json::Error),

    #[error("{0}")]
    Validation(String),
}
