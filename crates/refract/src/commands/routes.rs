//! `refract routes` command implementation.

use std::path::PathBuf;

use clap::Args;
use refract_config::SiteConfig;
use refract_routes::RouteMatch;
use refract_site::Site;

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the routes command.
#[derive(Args)]
pub(crate) struct RoutesArgs {
    /// Path to configuration file (default: auto-discover refract.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Resolve this path instead of listing the whole table.
    #[arg(short, long)]
    path: Option<String>,

    /// Emit the result as JSON.
    #[arg(long)]
    json: bool,
}

impl RoutesArgs {
    /// Execute the routes command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration or assembly fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let config = SiteConfig::load(self.config.as_deref(), None)?;
        let site = Site::new(config);
        let state = site.build()?;

        if let Some(path) = self.path {
            let matched = state.routes().resolve(&path)?;
            if self.json {
                output.info(&serde_json::to_string_pretty(matched.record)?);
            } else {
                for line in format_match(&matched) {
                    output.info(&line);
                }
            }
        } else if self.json {
            output.info(&serde_json::to_string_pretty(state.routes().records())?);
        } else {
            for record in state.routes().records() {
                output.info(&format!("{} -> {}", record.path, record.component));
            }
        }

        Ok(())
    }
}

/// Render a resolved match: layout chain first, leaf record last.
fn format_match(matched: &RouteMatch<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    for (depth, layout) in matched.layouts.iter().enumerate() {
        lines.push(format!(
            "{}{} -> {}",
            "  ".repeat(depth),
            layout.path,
            layout.component
        ));
    }
    lines.push(format!(
        "{}{} -> {} (exact: {})",
        "  ".repeat(matched.layouts.len()),
        matched.record.path,
        matched.record.component,
        matched.record.exact
    ));
    lines
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use refract_routes::{ComponentRef, RouteTableBuilder};

    use super::*;

    #[test]
    fn test_format_match_shows_layout_chain() {
        let mut builder = RouteTableBuilder::new();
        let docs = builder.add_layout("/docs", ComponentRef::new("@theme/DocRoot"), None);
        builder.add_page(
            "/docs/intro",
            ComponentRef::new("@content/12345678"),
            None,
            Some(docs),
        );
        let table = builder.build().unwrap();

        let matched = table.resolve("/docs/intro").unwrap();
        let lines = format_match(&matched);

        assert_eq!(
            lines,
            vec![
                "/docs -> @theme/DocRoot".to_owned(),
                "  /docs/intro -> @content/12345678 (exact: true)".to_owned(),
            ]
        );
    }

    #[test]
    fn test_format_match_wildcard() {
        let mut builder = RouteTableBuilder::new();
        builder.add_page("/", ComponentRef::new("@content/home"), None, None);
        builder.add_wildcard(ComponentRef::new("@theme/NotFound"));
        let table = builder.build().unwrap();

        let matched = table.resolve("/missing").unwrap();
        let lines = format_match(&matched);

        assert_eq!(lines, vec!["* -> @theme/NotFound (exact: false)".to_owned()]);
    }
}
