//! Menu tree model: menus, sections, items, and attribute values.

pub mod item;
pub mod menu;
pub mod section;
pub mod value;

pub use item::{ALLOWED_ATTRIBUTES, MenuItem};
pub use menu::Menu;
pub use section::MenuSection;
pub use value::{AttrValue, Resolved};

use crate::error::{MenuError, MenuResult};

/// Capability shared by every node kind in a menu tree.
pub trait MenuNode {
    /// Unique identifier within the owning collection.
    fn id(&self) -> &str;

    /// Whether the node has any child nodes.
    fn has_children(&self) -> bool;

    /// Plain serializable representation of the node and its children.
    fn to_value(&self) -> serde_json::Value;
}

impl MenuNode for Menu {
    fn id(&self) -> &str {
        Menu::id(self)
    }

    fn has_children(&self) -> bool {
        self.has_sections()
    }

    fn to_value(&self) -> serde_json::Value {
        Menu::to_value(self)
    }
}

impl MenuNode for MenuSection {
    fn id(&self) -> &str {
        MenuSection::id(self)
    }

    fn has_children(&self) -> bool {
        MenuSection::has_children(self)
    }

    fn to_value(&self) -> serde_json::Value {
        MenuSection::to_value(self)
    }
}

impl MenuNode for MenuItem {
    fn id(&self) -> &str {
        MenuItem::id(self)
    }

    fn has_children(&self) -> bool {
        MenuItem::has_children(self)
    }

    fn to_value(&self) -> serde_json::Value {
        MenuItem::to_value(self)
    }
}

/// Shared id rule for sections and items: non-empty after trimming, at
/// most 255 characters. Menu ids additionally restrict the charset.
pub(crate) fn validate_node_id(kind: &str, id: &str) -> MenuResult<()> {
    if id.trim().is_empty() {
        return Err(MenuError::InvalidArgument(format!(
            "{kind} ID cannot be empty"
        )));
    }
    if id.len() > 255 {
        return Err(MenuError::InvalidArgument(format!(
            "{kind} ID cannot exceed 255 characters"
        )));
    }
    Ok(())
}
