//! Configuration management for Refract Docs.
//!
//! Parses `refract.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Sections
//!
//! - `[site]`-level keys: `title`, `tagline`, `url`, `base_url`,
//!   `organization_name`, `project_name`
//! - `[docs]` / `[blog]`: content roots and route bases (paths are resolved
//!   relative to the config file after loading)
//! - `[i18n]`: default locale and locale list
//! - `[theme]`: navbar, footer, prism and search settings (passed through to
//!   the emitted artifacts, not interpreted by the build)
//! - Broken-link policies: `on_broken_links`, `on_broken_markdown_links`

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override docs content directory.
    pub docs_dir: Option<PathBuf>,
    /// Override blog content directory.
    pub blog_dir: Option<PathBuf>,
    /// Override the broken internal link policy.
    pub on_broken_links: Option<LinkPolicy>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "refract.toml";

/// Policy for handling broken links discovered at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkPolicy {
    /// Fail the build.
    Throw,
    /// Log a warning and continue.
    Warn,
    /// Skip the check entirely.
    Ignore,
}

impl std::str::FromStr for LinkPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "throw" => Ok(Self::Throw),
            "warn" => Ok(Self::Warn),
            "ignore" => Ok(Self::Ignore),
            other => Err(format!(
                "unknown link policy '{other}' (expected throw, warn or ignore)"
            )),
        }
    }
}

/// Site configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title shown in the navbar and page titles.
    pub title: String,
    /// Short tagline for the landing page.
    pub tagline: String,
    /// Canonical site URL (scheme + host, no path).
    pub url: String,
    /// URL path prefix the site is served under. Normalized to have a
    /// leading and trailing slash.
    pub base_url: String,
    /// Organization name (used for edit links and deployment).
    pub organization_name: String,
    /// Project name (used for edit links and deployment).
    pub project_name: String,
    /// Policy for links that resolve to no generated route.
    pub on_broken_links: LinkPolicy,
    /// Policy for markdown links that cannot be parsed or resolved to a file.
    pub on_broken_markdown_links: LinkPolicy,
    /// Localization settings.
    pub i18n: I18nConfig,
    /// Theme settings (navbar/footer/prism/search).
    pub theme: ThemeConfig,
    /// Docs content configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Blog content configuration (paths are relative strings from TOML).
    blog: BlogConfigRaw,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Resolved blog configuration (set after loading).
    #[serde(skip)]
    pub blog_resolved: BlogConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    path: Option<String>,
    sidebar_file: Option<String>,
    route_base: Option<String>,
}

/// Resolved docs configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Docs content root.
    pub path: PathBuf,
    /// Sidebar definition file.
    pub sidebar_file: PathBuf,
    /// Route segment docs pages are mounted under (e.g., "docs").
    pub route_base: String,
}

/// Raw blog configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BlogConfigRaw {
    path: Option<String>,
    route_base: Option<String>,
}

/// Resolved blog configuration with absolute paths.
#[derive(Debug, Default)]
pub struct BlogConfig {
    /// Blog content root.
    pub path: PathBuf,
    /// Route segment blog posts are mounted under (e.g., "blog").
    pub route_base: String,
}

/// Localization settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    /// Locale content is authored in.
    pub default_locale: String,
    /// All locales the site is published for.
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "en".to_owned(),
            locales: vec!["en".to_owned()],
        }
    }
}

/// Theme settings, carried through to the emitted artifacts.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Navbar settings.
    pub navbar: NavbarConfig,
    /// Footer settings.
    pub footer: FooterConfig,
    /// Syntax highlighting settings.
    pub prism: PrismConfig,
    /// Search settings (absent disables search).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<SearchConfig>,
}

/// Navbar settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Navbar title (falls back to the site title when empty).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Logo image path.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    /// Navbar entries in display order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavbarItem>,
}

/// A single navbar entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavbarItem {
    /// Display label.
    pub label: String,
    /// Link target (site-relative path or external URL).
    pub to: String,
    /// Alignment: "left" or "right".
    #[serde(default = "default_position")]
    pub position: String,
}

fn default_position() -> String {
    "left".to_owned()
}

/// Footer settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    /// Footer style ("light" or "dark").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
    /// Copyright line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub copyright: Option<String>,
}

/// Syntax highlighting settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    /// Light theme name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    /// Dark theme name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dark_theme: Option<String>,
    /// Languages loaded in addition to the defaults.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub additional_languages: Vec<String>,
}

/// Search settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Index docs pages.
    pub index_docs: bool,
    /// Index blog posts.
    pub index_blog: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            index_docs: true,
            index_blog: true,
        }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

/// Require a URL field to use http:// or https:// scheme.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

/// Require a route base segment: non-empty, no slashes.
fn require_route_segment(value: &str, field: &str) -> Result<(), ConfigError> {
    require_non_empty(value, field)?;
    if value.contains('/') {
        return Err(ConfigError::Validation(format!(
            "{field} must be a single path segment without slashes"
        )));
    }
    Ok(())
}

impl SiteConfig {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `refract.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(docs_dir) = &settings.docs_dir {
            self.docs_resolved.path.clone_from(docs_dir);
        }
        if let Some(blog_dir) = &settings.blog_dir {
            self.blog_resolved.path.clone_from(blog_dir);
        }
        if let Some(policy) = settings.on_broken_links {
            self.on_broken_links = policy;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            title: String::new(),
            tagline: String::new(),
            url: "http://localhost".to_owned(),
            base_url: "/".to_owned(),
            organization_name: String::new(),
            project_name: String::new(),
            on_broken_links: LinkPolicy::Throw,
            on_broken_markdown_links: LinkPolicy::Warn,
            i18n: I18nConfig::default(),
            theme: ThemeConfig::default(),
            docs: DocsConfigRaw::default(),
            blog: BlogConfigRaw::default(),
            docs_resolved: DocsConfig {
                path: base.join("docs"),
                sidebar_file: base.join("sidebars.yaml"),
                route_base: "docs".to_owned(),
            },
            blog_resolved: BlogConfig {
                path: base.join("blog"),
                route_base: "blog".to_owned(),
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        // Validate configuration after loading and resolution
        config.normalize();
        config.validate()?;

        Ok(config)
    }

    /// Normalize the base URL to carry a leading and trailing slash.
    fn normalize(&mut self) {
        if !self.base_url.starts_with('/') {
            self.base_url.insert(0, '/');
        }
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are properly set and contain valid
    /// values. Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.title, "title")?;
        require_non_empty(&self.url, "url")?;
        require_http_url(&self.url, "url")?;
        require_route_segment(&self.docs_resolved.route_base, "docs.route_base")?;
        require_route_segment(&self.blog_resolved.route_base, "blog.route_base")?;
        self.validate_i18n()?;
        Ok(())
    }

    /// Validate localization settings.
    fn validate_i18n(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.i18n.default_locale, "i18n.default_locale")?;
        if self.i18n.locales.is_empty() {
            return Err(ConfigError::Validation(
                "i18n.locales cannot be empty".to_owned(),
            ));
        }
        if !self.i18n.locales.contains(&self.i18n.default_locale) {
            return Err(ConfigError::Validation(format!(
                "i18n.locales must include the default locale '{}'",
                self.i18n.default_locale
            )));
        }
        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.docs_resolved = DocsConfig {
            path: resolve(self.docs.path.as_deref(), "docs"),
            sidebar_file: resolve(self.docs.sidebar_file.as_deref(), "sidebars.yaml"),
            route_base: self
                .docs
                .route_base
                .clone()
                .unwrap_or_else(|| "docs".to_owned()),
        };

        self.blog_resolved = BlogConfig {
            path: resolve(self.blog.path.as_deref(), "blog"),
            route_base: self
                .blog
                .route_base
                .clone()
                .unwrap_or_else(|| "blog".to_owned()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default_with_base(Path::new("/test"));
        assert_eq!(config.base_url, "/");
        assert_eq!(config.docs_resolved.path, PathBuf::from("/test/docs"));
        assert_eq!(
            config.docs_resolved.sidebar_file,
            PathBuf::from("/test/sidebars.yaml")
        );
        assert_eq!(config.docs_resolved.route_base, "docs");
        assert_eq!(config.blog_resolved.path, PathBuf::from("/test/blog"));
        assert_eq!(config.blog_resolved.route_base, "blog");
        assert_eq!(config.on_broken_links, LinkPolicy::Throw);
        assert_eq!(config.on_broken_markdown_links, LinkPolicy::Warn);
        assert_eq!(config.i18n.default_locale, "en");
    }

    #[test]
    fn test_parse_minimal_config() {
        let toml = "";
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.on_broken_links, LinkPolicy::Throw);
    }

    #[test]
    fn test_parse_site_fields() {
        let toml = r#"
title = "Refract"
tagline = "UI as a function of intent"
url = "https://refract.dev"
base_url = "/"
organization_name = "refract"
project_name = "refract-docs"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.title, "Refract");
        assert_eq!(config.tagline, "UI as a function of intent");
        assert_eq!(config.url, "https://refract.dev");
        assert_eq!(config.organization_name, "refract");
        assert_eq!(config.project_name, "refract-docs");
    }

    #[test]
    fn test_parse_link_policies() {
        let toml = r#"
on_broken_links = "warn"
on_broken_markdown_links = "ignore"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.on_broken_links, LinkPolicy::Warn);
        assert_eq!(config.on_broken_markdown_links, LinkPolicy::Ignore);
    }

    #[test]
    fn test_parse_i18n() {
        let toml = r#"
[i18n]
default_locale = "en"
locales = ["en", "de"]
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.i18n.default_locale, "en");
        assert_eq!(config.i18n.locales, vec!["en".to_owned(), "de".to_owned()]);
    }

    #[test]
    fn test_parse_theme() {
        let toml = r#"
[theme.navbar]
title = "Refract"

[[theme.navbar.items]]
label = "Docs"
to = "/docs/intro"

[[theme.navbar.items]]
label = "Blog"
to = "/blog"
position = "right"

[theme.footer]
style = "dark"
copyright = "Copyright Refract"

[theme.prism]
theme = "github"
dark_theme = "dracula"
additional_languages = ["rust", "toml"]

[theme.search]
index_blog = false
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.theme.navbar.title.as_deref(), Some("Refract"));
        assert_eq!(config.theme.navbar.items.len(), 2);
        assert_eq!(config.theme.navbar.items[0].position, "left");
        assert_eq!(config.theme.navbar.items[1].position, "right");
        assert_eq!(config.theme.footer.style.as_deref(), Some("dark"));
        assert_eq!(
            config.theme.prism.additional_languages,
            vec!["rust".to_owned(), "toml".to_owned()]
        );
        let search = config.theme.search.unwrap();
        assert!(search.index_docs);
        assert!(!search.index_blog);
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
[docs]
path = "documentation"
sidebar_file = "nav/sidebars.yaml"
route_base = "guide"

[blog]
path = "posts"
route_base = "news"
"#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(
            config.docs_resolved.path,
            PathBuf::from("/project/documentation")
        );
        assert_eq!(
            config.docs_resolved.sidebar_file,
            PathBuf::from("/project/nav/sidebars.yaml")
        );
        assert_eq!(config.docs_resolved.route_base, "guide");
        assert_eq!(config.blog_resolved.path, PathBuf::from("/project/posts"));
        assert_eq!(config.blog_resolved.route_base, "news");
    }

    #[test]
    fn test_normalize_base_url() {
        let toml = r#"base_url = "refract""#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        config.normalize();
        assert_eq!(config.base_url, "/refract/");
    }

    #[test]
    fn test_validate_rejects_empty_title() {
        let config = SiteConfig::default_with_base(Path::new("/test"));
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("title"));
    }

    #[test]
    fn test_validate_rejects_non_http_url() {
        let toml = r#"
title = "Refract"
url = "ftp://refract.dev"
"#;
        let config: SiteConfig = toml::from_str(toml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("url"));
    }

    #[test]
    fn test_validate_rejects_slash_in_route_base() {
        let toml = r#"
title = "Refract"
url = "https://refract.dev"

[docs]
route_base = "docs/v2"
"#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs.route_base"));
    }

    #[test]
    fn test_validate_rejects_default_locale_not_in_locales() {
        let toml = r#"
title = "Refract"
url = "https://refract.dev"

[i18n]
default_locale = "fr"
locales = ["en"]
"#;
        let mut config: SiteConfig = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default locale"));
    }

    #[test]
    fn test_load_explicit_path_not_found() {
        let result = SiteConfig::load(Some(Path::new("/nonexistent/refract.toml")), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("refract.toml");
        std::fs::write(
            &config_path,
            r#"
title = "Refract"
url = "https://refract.dev"
base_url = "/refract"

[docs]
path = "content/docs"
"#,
        )
        .unwrap();

        let config = SiteConfig::load(Some(&config_path), None).unwrap();

        assert_eq!(config.docs_resolved.path, dir.path().join("content/docs"));
        assert_eq!(config.base_url, "/refract/");
        assert_eq!(config.config_path, Some(config_path));
    }

    #[test]
    fn test_cli_settings_override_config() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("refract.toml");
        std::fs::write(
            &config_path,
            r#"
title = "Refract"
url = "https://refract.dev"
on_broken_links = "throw"
"#,
        )
        .unwrap();

        let settings = CliSettings {
            docs_dir: Some(PathBuf::from("/elsewhere/docs")),
            blog_dir: None,
            on_broken_links: Some(LinkPolicy::Warn),
        };
        let config = SiteConfig::load(Some(&config_path), Some(&settings)).unwrap();

        assert_eq!(config.docs_resolved.path, PathBuf::from("/elsewhere/docs"));
        assert_eq!(config.on_broken_links, LinkPolicy::Warn);
    }

    #[test]
    fn test_link_policy_from_str() {
        assert_eq!("throw".parse::<LinkPolicy>().unwrap(), LinkPolicy::Throw);
        assert_eq!("warn".parse::<LinkPolicy>().unwrap(), LinkPolicy::Warn);
        assert_eq!("ignore".parse::<LinkPolicy>().unwrap(), LinkPolicy::Ignore);
        assert!("explode".parse::<LinkPolicy>().is_err());
    }
}
