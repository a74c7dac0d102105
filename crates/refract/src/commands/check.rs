//! `refract check` command implementation.

use std::path::PathBuf;

use clap::Args;
use refract_config::{CliSettings, LinkPolicy, SiteConfig};
use refract_site::{BuildError, Site};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args)]
pub(crate) struct CheckArgs {
    /// Path to configuration file (default: auto-discover refract.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Docs content directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Blog content directory (overrides config).
    #[arg(long)]
    blog_dir: Option<PathBuf>,

    /// Broken internal link policy (overrides config).
    #[arg(long)]
    on_broken_links: Option<LinkPolicy>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl CheckArgs {
    /// Execute the check command.
    ///
    /// Runs the full assembly (corpus parsing, sidebar validation, route
    /// generation, link sweep) without writing artifacts.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails; broken-link findings are
    /// listed individually before the command exits non-zero.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            docs_dir: self.docs_dir,
            blog_dir: self.blog_dir,
            on_broken_links: self.on_broken_links,
        };
        let config = SiteConfig::load(self.config.as_deref(), Some(&cli_settings))?;

        let site = Site::new(config);
        match site.build() {
            Ok(state) => {
                output.info(&format!(
                    "{} pages, {} route records, {} sidebar(s)",
                    state.pages().len(),
                    state.routes().records().len(),
                    state.sidebars().len(),
                ));
                output.success("No issues found");
                Ok(())
            }
            Err(BuildError::BrokenLinks(findings)) => {
                for finding in &findings {
                    output.warning(&format!("{}: broken link '{}'", finding.source, finding.link));
                }
                Err(CliError::Validation(format!(
                    "{} broken internal link(s)",
                    findings.len()
                )))
            }
            Err(err) => Err(err.into()),
        }
    }
}
