//! Menu - a top-level named navigation tree.

use std::collections::BTreeMap;

use serde_json::json;
use uuid::Uuid;

use super::item::MenuItem;
use super::section::MenuSection;
use crate::error::{MenuError, MenuResult};

/// A named navigation tree holding sections and/or root-level items, plus
/// metadata and a version fingerprint usable as a cache key.
#[derive(Debug, Clone)]
pub struct Menu {
    id: String,
    sections: Vec<MenuSection>,
    items: Vec<MenuItem>,
    metadata: BTreeMap<String, serde_json::Value>,
    version: String,
}

impl Menu {
    /// Create an empty menu. Menu ids are restricted to `[a-zA-Z0-9_-]`.
    pub fn new(
        id: impl Into<String>,
        metadata: BTreeMap<String, serde_json::Value>,
    ) -> MenuResult<Self> {
        let id = id.into();
        validate_menu_id(&id)?;

        Ok(Self {
            id,
            sections: Vec::new(),
            items: Vec::new(),
            metadata,
            version: generate_version(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sections(&self) -> &[MenuSection] {
        &self.sections
    }

    /// Root-level items, distinct from section items.
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn metadata(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.metadata
    }

    /// Opaque token regenerated on every structural or metadata mutation.
    /// In-place item attribute mutation is invisible to versioning.
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn has_sections(&self) -> bool {
        !self.sections.is_empty()
    }

    pub fn has_root_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Append a section. Section ids must be unique within the menu.
    pub fn add_section(&mut self, section: MenuSection) -> MenuResult<&mut Self> {
        if self.find_section(section.id()).is_some() {
            return Err(MenuError::InvalidArgument(format!(
                "menu section '{}' already exists in menu '{}'",
                section.id(),
                self.id
            )));
        }
        self.sections.push(section);
        self.bump_version();
        Ok(self)
    }

    pub fn remove_section(&mut self, section_id: &str) -> &mut Self {
        self.sections.retain(|section| section.id() != section_id);
        self.bump_version();
        self
    }

    pub fn find_section(&self, id: &str) -> Option<&MenuSection> {
        self.sections.iter().find(|section| section.id() == id)
    }

    /// Append a root-level item. Root item ids must be unique within the menu.
    pub fn add_item(&mut self, item: MenuItem) -> MenuResult<&mut Self> {
        if self.find_root_item(item.id()).is_some() {
            return Err(MenuError::InvalidArgument(format!(
                "menu item '{}' already exists in menu '{}'",
                item.id(),
                self.id
            )));
        }
        self.items.push(item);
        self.bump_version();
        Ok(self)
    }

    pub fn remove_item(&mut self, item_id: &str) -> &mut Self {
        self.items.retain(|item| item.id() != item_id);
        self.bump_version();
        self
    }

    pub fn find_root_item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    /// Find an item anywhere in the menu: root items first, then section
    /// items, recursing through children.
    pub fn find_item(&self, id: &str) -> Option<&MenuItem> {
        if let Some(found) = find_in_items(&self.items, id) {
            return Some(found);
        }
        for section in &self.sections {
            if let Some(found) = find_in_items(section.items(), id) {
                return Some(found);
            }
        }
        None
    }

    /// Set one metadata entry, bumping the version.
    pub fn set_metadata(&mut self, key: impl Into<String>, value: serde_json::Value) -> &mut Self {
        self.metadata.insert(key.into(), value);
        self.bump_version();
        self
    }

    /// Copy of this menu with metadata shallow-merged over the existing
    /// entries and a fresh version. The receiver is untouched.
    pub fn with_metadata(&self, metadata: BTreeMap<String, serde_json::Value>) -> Self {
        let mut new = self.clone();
        new.metadata.extend(metadata);
        new.bump_version();
        new
    }

    /// Total items across sections and root items, recursing through
    /// children.
    pub fn item_count(&self) -> usize {
        let section_count: usize = self
            .sections
            .iter()
            .map(|section| count_items(section.items()))
            .sum();
        section_count + count_items(&self.items)
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Every item whose `active` attribute is truthy, at any depth.
    pub fn active_items(&self) -> Vec<&MenuItem> {
        let mut active = Vec::new();
        collect_active(&self.items, &mut active);
        for section in &self.sections {
            collect_active(section.items(), &mut active);
        }
        active
    }

    /// Cache-invalidation key embedding the current version fingerprint.
    pub fn cache_key(&self) -> String {
        format!("menu:{}:{}", self.id, self.version)
    }

    /// Plain serializable representation.
    pub fn to_value(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "sections": self.sections.iter().map(MenuSection::to_value).collect::<Vec<_>>(),
            "items": self.items.iter().map(MenuItem::to_value).collect::<Vec<_>>(),
            "metadata": self.metadata,
            "version": self.version,
            "has_children": self.has_sections(),
            "has_root_items": self.has_root_items(),
            "item_count": self.item_count(),
        })
    }

    fn bump_version(&mut self) {
        self.version = generate_version();
    }
}

fn generate_version() -> String {
    Uuid::new_v4().to_string()
}

pub(crate) fn validate_menu_id(id: &str) -> MenuResult<()> {
    if id.trim().is_empty() {
        return Err(MenuError::InvalidArgument(
            "menu ID cannot be empty".to_string(),
        ));
    }
    if id.len() > 255 {
        return Err(MenuError::InvalidArgument(
            "menu ID cannot exceed 255 characters".to_string(),
        ));
    }
    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(MenuError::InvalidArgument(
            "menu ID can only contain alphanumeric characters, underscores, and hyphens"
                .to_string(),
        ));
    }
    Ok(())
}

fn find_in_items<'a>(items: &'a [MenuItem], id: &str) -> Option<&'a MenuItem> {
    for item in items {
        if item.id() == id {
            return Some(item);
        }
        if let Some(found) = item.find_descendant(id) {
            return Some(found);
        }
    }
    None
}

fn count_items(items: &[MenuItem]) -> usize {
    items
        .iter()
        .map(|item| 1 + count_items(item.children()))
        .sum()
}

fn collect_active<'a>(items: &'a [MenuItem], active: &mut Vec<&'a MenuItem>) {
    for item in items {
        if item.is_active() {
            active.push(item);
        }
        collect_active(item.children(), active);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, label: &str) -> MenuItem {
        MenuItem::new(id, label, None).unwrap()
    }

    #[test]
    fn id_charset_is_restricted() {
        assert!(Menu::new("main-nav_2", BTreeMap::new()).is_ok());
        assert!(Menu::new("main nav", BTreeMap::new()).is_err());
        assert!(Menu::new("nav<script>", BTreeMap::new()).is_err());
        assert!(Menu::new("", BTreeMap::new()).is_err());
    }

    #[test]
    fn version_changes_on_structural_mutation() {
        let mut menu = Menu::new("main", BTreeMap::new()).unwrap();
        let v0 = menu.version().to_string();

        menu.add_item(item("home", "Home")).unwrap();
        let v1 = menu.version().to_string();
        assert_ne!(v0, v1);

        menu.set_metadata("theme", serde_json::Value::from("dark"));
        assert_ne!(menu.version(), v1);
    }

    #[test]
    fn cache_key_embeds_id_and_version() {
        let menu = Menu::new("main", BTreeMap::new()).unwrap();
        let key = menu.cache_key();
        assert!(key.starts_with("menu:main:"));
        assert!(key.ends_with(menu.version()));
    }

    #[test]
    fn with_metadata_leaves_receiver_untouched() {
        let menu = Menu::new("main", BTreeMap::new()).unwrap();
        let mut extra = BTreeMap::new();
        extra.insert("role".to_string(), serde_json::Value::from("admin"));

        let copy = menu.with_metadata(extra);
        assert!(menu.metadata().is_empty());
        assert_eq!(copy.metadata()["role"], "admin");
        assert_ne!(menu.version(), copy.version());
    }

    #[test]
    fn duplicate_section_rejected() {
        let mut menu = Menu::new("main", BTreeMap::new()).unwrap();
        menu.add_section(MenuSection::new("s1", None, None).unwrap())
            .unwrap();
        assert!(
            menu.add_section(MenuSection::new("s1", None, None).unwrap())
                .is_err()
        );
    }

    #[test]
    fn remove_section_and_item_bump_version() {
        let mut menu = Menu::new("main", BTreeMap::new()).unwrap();
        menu.add_section(MenuSection::new("s1", None, None).unwrap())
            .unwrap();
        menu.add_item(item("root", "Root")).unwrap();

        let before = menu.version().to_string();
        menu.remove_section("s1");
        assert!(menu.find_section("s1").is_none());
        assert_ne!(menu.version(), before);

        let before = menu.version().to_string();
        menu.remove_item("root");
        assert!(!menu.has_root_items());
        assert_ne!(menu.version(), before);
    }

    #[test]
    fn item_count_recurses() {
        let mut menu = Menu::new("main", BTreeMap::new()).unwrap();
        let mut section = MenuSection::new("s1", None, None).unwrap();
        let mut parent = item("parent", "Parent");
        parent.add_child(item("child", "Child"));
        section.add_item(parent).unwrap();
        menu.add_section(section).unwrap();
        menu.add_item(item("root", "Root")).unwrap();

        assert_eq!(menu.item_count(), 3);
        assert!(!menu.is_empty());
    }

    #[test]
    fn find_item_searches_roots_and_sections() {
        let mut menu = Menu::new("main", BTreeMap::new()).unwrap();
        let mut section = MenuSection::new("s1", None, None).unwrap();
        let mut parent = item("parent", "Parent");
        parent.add_child(item("nested", "Nested"));
        section.add_item(parent).unwrap();
        menu.add_section(section).unwrap();
        menu.add_item(item("root", "Root")).unwrap();

        assert!(menu.find_item("root").is_some());
        assert!(menu.find_item("nested").is_some());
        assert!(menu.find_item("missing").is_none());
    }

    #[test]
    fn active_items_collected_recursively() {
        let mut menu = Menu::new("main", BTreeMap::new()).unwrap();
        let mut parent = item("parent", "Parent");
        let mut child = item("child", "Child");
        child.set_active(true).unwrap();
        parent.add_child(child);
        menu.add_item(parent).unwrap();

        let active = menu.active_items();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].id(), "child");
    }
}
