//! Menu section - a titled grouping of items. Sections do not nest.

use serde_json::json;

use super::item::MenuItem;
use super::validate_node_id;
use crate::error::{MenuError, MenuResult};

/// A titled grouping of items within a menu.
#[derive(Debug, Clone)]
pub struct MenuSection {
    id: String,
    title: Option<String>,
    icon: Option<String>,
    items: Vec<MenuItem>,
}

impl MenuSection {
    pub fn new(
        id: impl Into<String>,
        title: Option<String>,
        icon: Option<String>,
    ) -> MenuResult<Self> {
        let id = id.into();
        validate_node_id("menu section", &id)?;

        Ok(Self {
            id,
            title,
            icon,
            items: Vec::new(),
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn has_children(&self) -> bool {
        !self.items.is_empty()
    }

    pub fn set_title(&mut self, title: Option<String>) -> &mut Self {
        self.title = title;
        self
    }

    pub fn set_icon(&mut self, icon: Option<String>) -> &mut Self {
        self.icon = icon;
        self
    }

    /// Append an item. Direct item ids must be unique within the section.
    pub fn add_item(&mut self, item: MenuItem) -> MenuResult<&mut Self> {
        if self.find_item(item.id()).is_some() {
            return Err(MenuError::InvalidArgument(format!(
                "menu item '{}' already exists in section '{}'",
                item.id(),
                self.id
            )));
        }
        self.items.push(item);
        Ok(self)
    }

    pub fn remove_item(&mut self, item_id: &str) -> &mut Self {
        self.items.retain(|item| item.id() != item_id);
        self
    }

    /// Find a direct item by id.
    pub fn find_item(&self, id: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    pub(crate) fn items_mut(&mut self) -> &mut [MenuItem] {
        &mut self.items
    }

    /// Plain serializable representation.
    pub fn to_value(&self) -> serde_json::Value {
        json!({
            "id": self.id,
            "title": self.title,
            "icon": self.icon,
            "items": self.items.iter().map(MenuItem::to_value).collect::<Vec<_>>(),
            "has_children": self.has_children(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn rejects_duplicate_item_id() {
        let mut section = MenuSection::new("s1", Some("Main".to_string()), None).unwrap();
        section
            .add_item(MenuItem::new("home", "Home", None).unwrap())
            .unwrap();
        let duplicate = MenuItem::new("home", "Other", None).unwrap();
        assert!(section.add_item(duplicate).is_err());
    }

    #[test]
    fn remove_item_retains_rest() {
        let mut section = MenuSection::new("s1", None, None).unwrap();
        section
            .add_item(MenuItem::new("a", "A", None).unwrap())
            .unwrap();
        section
            .add_item(MenuItem::new("b", "B", None).unwrap())
            .unwrap();

        section.remove_item("a");
        assert!(section.find_item("a").is_none());
        assert!(section.find_item("b").is_some());
    }

    #[test]
    fn untitled_section_is_valid() {
        let section = MenuSection::new("s1", None, None).unwrap();
        assert_eq!(section.title(), None);
        assert!(!section.has_children());
    }
}
