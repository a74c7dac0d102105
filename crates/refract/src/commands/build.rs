//! `refract build` command implementation.

use std::path::PathBuf;

use clap::Args;
use refract_config::{CliSettings, LinkPolicy, SiteConfig};
use refract_site::{Site, write_artifacts};

use crate::error::CliError;
use crate::output::Output;

/// Default output directory for generated artifacts.
const DEFAULT_OUT_DIR: &str = ".refract/generated";

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover refract.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs content directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Blog content directory (overrides config).
    #[arg(long)]
    blog_dir: Option<PathBuf>,

    /// Output directory for generated artifacts.
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Broken internal link policy (overrides config).
    #[arg(long)]
    on_broken_links: Option<LinkPolicy>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl BuildArgs {
    /// Execute the build command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, assembly or artifact writing fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            docs_dir: self.docs_dir,
            blog_dir: self.blog_dir,
            on_broken_links: self.on_broken_links,
        };
        let config = SiteConfig::load(self.config.as_deref(), Some(&cli_settings))?;

        output.highlight(&format!("Building {}", config.title));
        output.info(&format!(
            "Docs directory: {}",
            config.docs_resolved.path.display()
        ));
        output.info(&format!(
            "Blog directory: {}",
            config.blog_resolved.path.display()
        ));

        let out_dir = self
            .out
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));

        let site = Site::new(config);
        let state = site.build()?;

        let written = write_artifacts(&state, &out_dir)?;

        output.info(&format!(
            "{} pages, {} route records, {} sidebar(s)",
            state.pages().len(),
            state.routes().records().len(),
            state.sidebars().len(),
        ));
        for path in &written {
            output.info(&format!("Wrote {}", path.display()));
        }
        output.success("Build complete");

        Ok(())
    }
}
