//! Menu configuration: css class roles, rendering behavior, and the
//! security allow-lists.
//!
//! Every field carries a shipped default; deserializing a partial TOML
//! document merges the named fields over those defaults, recursively.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CSS class name for each semantic role in the rendered markup.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CssClasses {
    pub menu: String,
    pub section: String,
    pub section_title: String,
    pub list: String,
    pub item: String,
    pub link: String,
    pub active: String,
    pub text: String,
    pub badge: String,
    pub chevron: String,
    pub icon: String,
    pub sub_list: String,
}

impl Default for CssClasses {
    fn default() -> Self {
        Self {
            menu: "nav-menu".to_string(),
            section: "nav-section".to_string(),
            section_title: "nav-section-title".to_string(),
            list: "nav-list".to_string(),
            item: "nav-item".to_string(),
            link: "nav-link".to_string(),
            active: "active".to_string(),
            text: "nav-text".to_string(),
            badge: "nav-badge".to_string(),
            chevron: "nav-chevron".to_string(),
            icon: "nav-icon".to_string(),
            sub_list: "nav-sub-list".to_string(),
        }
    }
}

/// Renderer and security configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuConfig {
    /// Class names per semantic role.
    pub css_classes: CssClasses,

    /// Markup fragment for the children indicator. Trusted configuration,
    /// inserted unescaped.
    pub chevron_icon: String,

    /// Maximum nesting depth rendered; deeper items are silently dropped.
    pub max_depth: usize,

    /// Force icon content through escaping even when already markup-safe.
    pub escape_all: bool,

    /// Attribute keys accepted on items. Matches the model allow-list.
    pub allowed_attributes: Vec<String>,

    /// URL schemes accepted on routes when `sanitize_urls` is on.
    pub allowed_protocols: Vec<String>,

    /// Replace routes with disallowed schemes by `#` at render time.
    pub sanitize_urls: bool,
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            css_classes: CssClasses::default(),
            chevron_icon: r#"<svg fill="none" stroke="currentColor" viewBox="0 0 24 24"><path stroke-linecap="round" stroke-linejoin="round" stroke-width="2" d="M9 5l7 7-7 7"/></svg>"#.to_string(),
            max_depth: 10,
            escape_all: true,
            allowed_attributes: vec![
                "icon".to_string(),
                "badge".to_string(),
                "active".to_string(),
                "class".to_string(),
                "id".to_string(),
                "target".to_string(),
                "title".to_string(),
                "rel".to_string(),
            ],
            allowed_protocols: vec![
                "http".to_string(),
                "https".to_string(),
                "mailto".to_string(),
                "tel".to_string(),
                "ftp".to_string(),
            ],
            sanitize_urls: true,
        }
    }
}

impl MenuConfig {
    /// Parse configuration from a TOML document. Missing fields keep
    /// their defaults.
    pub fn from_toml_str(input: &str) -> Result<Self> {
        toml::from_str(input).context("failed to parse menu configuration")
    }

    /// Load configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read menu configuration from {}", path.display()))?;
        Self::from_toml_str(&input)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_equals_defaults() {
        let config = MenuConfig::from_toml_str("").unwrap();
        assert_eq!(config.max_depth, 10);
        assert!(config.escape_all);
        assert_eq!(config.css_classes.menu, "nav-menu");
        assert_eq!(config.allowed_protocols.len(), 5);
    }

    #[test]
    fn partial_document_merges_over_defaults() {
        let config = MenuConfig::from_toml_str(
            r#"
max_depth = 3

[css_classes]
menu = "sidebar"
"#,
        )
        .unwrap();

        assert_eq!(config.max_depth, 3);
        assert_eq!(config.css_classes.menu, "sidebar");
        // Untouched nested fields keep defaults.
        assert_eq!(config.css_classes.link, "nav-link");
        assert!(config.sanitize_urls);
    }

    #[test]
    fn invalid_document_is_an_error() {
        assert!(MenuConfig::from_toml_str("max_depth = \"deep\"").is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.toml");
        std::fs::write(&path, "escape_all = false\n").unwrap();

        let config = MenuConfig::from_file(&path).unwrap();
        assert!(!config.escape_all);

        assert!(MenuConfig::from_file(dir.path().join("missing.toml")).is_err());
    }
}
