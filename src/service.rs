//! Thin orchestration over builder, registry, and renderer.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::builder::{BuilderOptions, MenuBuilder};
use crate::config::MenuConfig;
use crate::error::MenuResult;
use crate::models::Menu;
use crate::registry::{MenuRegistry, MenuStats, ValidationReport};
use crate::render::MenuRenderer;

/// Plain data record for [`MenuService::simple`]. Records with an empty
/// label are skipped.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimpleItem {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub route: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub badge: Option<String>,
    #[serde(default)]
    pub active: Option<bool>,
}

/// Entry point for external callers: builds menus, keeps them registered,
/// and renders them on demand.
///
/// Construct one instance at the application root and pass it by
/// reference; there is no process-wide hidden state.
pub struct MenuService {
    registry: MenuRegistry,
    renderer: MenuRenderer,
}

impl MenuService {
    /// Service with default renderer configuration.
    pub fn new() -> Self {
        Self {
            registry: MenuRegistry::new(),
            renderer: MenuRenderer::new(),
        }
    }

    /// Service rendering with the given configuration.
    pub fn with_config(config: MenuConfig) -> Self {
        Self {
            registry: MenuRegistry::new(),
            renderer: MenuRenderer::with_config(config),
        }
    }

    /// Start a builder for a new menu.
    pub fn create(
        &self,
        name: impl Into<String>,
        metadata: BTreeMap<String, serde_json::Value>,
        options: BuilderOptions,
    ) -> MenuResult<MenuBuilder> {
        MenuBuilder::with_options(name, metadata, options)
    }

    /// Build an empty menu in one call.
    pub fn build(
        &self,
        name: impl Into<String>,
        metadata: BTreeMap<String, serde_json::Value>,
        options: BuilderOptions,
    ) -> MenuResult<Menu> {
        self.create(name, metadata, options)?.build()
    }

    /// Register a built menu under its id.
    pub fn register(&mut self, menu: Menu) -> &mut Self {
        self.registry.register(menu);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Menu> {
        self.registry.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.registry.has(name)
    }

    /// Render a registered menu. A missing menu degrades to the empty
    /// string with a warning trace rather than an error, since rendering
    /// is typically inlined into a larger document.
    pub fn render(&self, name: &str) -> String {
        match self.registry.get(name) {
            Some(menu) => self.renderer.render(menu),
            None => {
                warn!(menu = %name, "menu not found for rendering");
                String::new()
            }
        }
    }

    pub fn remove(&mut self, name: &str) -> &mut Self {
        self.registry.remove(name);
        self
    }

    pub fn all(&self) -> &HashMap<String, Menu> {
        self.registry.all()
    }

    pub fn clear(&mut self) -> &mut Self {
        self.registry.clear();
        self
    }

    pub fn count(&self) -> usize {
        self.registry.len()
    }

    /// Structural validation across every registered menu.
    pub fn validate(&self) -> ValidationReport {
        self.registry.validate()
    }

    /// Aggregate counters across every registered menu.
    pub fn stats(&self) -> MenuStats {
        self.registry.stats()
    }

    /// Build and register in one go: the callback receives the started
    /// builder and returns it when done.
    pub fn make<F>(
        &mut self,
        name: impl Into<String>,
        metadata: BTreeMap<String, serde_json::Value>,
        options: BuilderOptions,
        f: F,
    ) -> MenuResult<&mut Self>
    where
        F: FnOnce(MenuBuilder) -> MenuResult<MenuBuilder>,
    {
        let builder = self.create(name, metadata, options)?;
        let menu = f(builder)?.build()?;
        Ok(self.register(menu))
    }

    /// Build a menu from plain data records and register it. Items land
    /// in the default section.
    pub fn simple(
        &mut self,
        name: impl Into<String>,
        items: &[SimpleItem],
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> MenuResult<&mut Self> {
        self.make(name, metadata, BuilderOptions::default(), |mut builder| {
            for record in items {
                if record.label.trim().is_empty() {
                    continue;
                }
                builder = builder.item(record.label.clone(), record.route.clone())?;
                if let Some(icon) = &record.icon {
                    builder = builder.icon(icon.as_str())?;
                }
                if let Some(badge) = &record.badge {
                    builder = builder.badge(badge.as_str())?;
                }
                if let Some(active) = record.active {
                    builder = builder.active(active)?;
                }
            }
            Ok(builder)
        })
    }

    pub fn registry(&self) -> &MenuRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut MenuRegistry {
        &mut self.registry
    }

    pub fn renderer(&self) -> &MenuRenderer {
        &self.renderer
    }

    pub fn set_renderer(&mut self, renderer: MenuRenderer) -> &mut Self {
        self.renderer = renderer;
        self
    }
}

impl Default for MenuService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn render_missing_menu_is_empty_string() {
        let service = MenuService::new();
        assert_eq!(service.render("missing"), "");
    }

    #[test]
    fn make_builds_and_registers() {
        let mut service = MenuService::new();
        service
            .make(
                "main",
                BTreeMap::new(),
                BuilderOptions::default(),
                |builder| builder.item("Home", Some("/".to_string())),
            )
            .unwrap();

        assert!(service.has("main"));
        assert_eq!(service.get("main").unwrap().item_count(), 1);
    }

    #[test]
    fn simple_maps_record_fields_to_attributes() {
        let mut service = MenuService::new();
        let items = vec![
            SimpleItem {
                label: "Home".to_string(),
                route: Some("/".to_string()),
                icon: Some("home".to_string()),
                active: Some(true),
                ..SimpleItem::default()
            },
            SimpleItem {
                label: "Inbox".to_string(),
                badge: Some("12".to_string()),
                ..SimpleItem::default()
            },
            // Skipped: no label.
            SimpleItem::default(),
        ];

        service.simple("main", &items, BTreeMap::new()).unwrap();

        let menu = service.get("main").unwrap();
        assert_eq!(menu.item_count(), 2);

        let active = menu.active_items();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].label(), "Home");

        let inbox = menu.find_item("item_main_3").unwrap();
        assert!(inbox.badge().is_some());
    }

    #[test]
    fn simple_records_deserialize_with_defaults() {
        let record: SimpleItem =
            serde_json::from_str(r#"{"label": "Docs", "route": "/docs"}"#).unwrap();
        assert_eq!(record.label, "Docs");
        assert_eq!(record.icon, None);
        assert_eq!(record.active, None);
    }

    #[test]
    fn clear_and_count() {
        let mut service = MenuService::new();
        service
            .make("a", BTreeMap::new(), BuilderOptions::default(), |b| {
                b.item("X", None)
            })
            .unwrap();
        assert_eq!(service.count(), 1);

        service.clear();
        assert_eq!(service.count(), 0);
    }
}
