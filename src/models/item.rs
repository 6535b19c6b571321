//! Menu item - a single navigable entry.

use std::collections::BTreeMap;

use serde_json::json;

use super::value::AttrValue;
use super::validate_node_id;
use crate::error::{MenuError, MenuResult};

/// Attribute keys accepted on a menu item.
pub const ALLOWED_ATTRIBUTES: &[&str] = &[
    "icon", "badge", "active", "class", "id", "target", "title", "rel",
];

/// A navigable menu entry. Items may nest arbitrarily deep via children;
/// depth limiting is renderer policy, not a data invariant.
#[derive(Debug, Clone)]
pub struct MenuItem {
    id: String,
    label: String,
    route: Option<String>,
    attributes: BTreeMap<String, AttrValue>,
    children: Vec<MenuItem>,
    /// Non-owning upward reference, set when added as a child. The
    /// ownership graph stays a pure tree; this is only for upward lookup
    /// and never serialized.
    parent_id: Option<String>,
}

impl MenuItem {
    /// Create an item with a validated id and label.
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        route: Option<String>,
    ) -> MenuResult<Self> {
        let id = id.into();
        let label = label.into();
        validate_node_id("menu item", &id)?;
        validate_label(&label)?;

        Ok(Self {
            id,
            label,
            route,
            attributes: BTreeMap::new(),
            children: Vec::new(),
            parent_id: None,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn route(&self) -> Option<&str> {
        self.route.as_deref()
    }

    pub fn attributes(&self) -> &BTreeMap<String, AttrValue> {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&AttrValue> {
        self.attributes.get(key)
    }

    pub fn icon(&self) -> Option<&AttrValue> {
        self.attribute("icon")
    }

    pub fn badge(&self) -> Option<&AttrValue> {
        self.attribute("badge")
    }

    /// Whether the `active` attribute is set and truthy.
    pub fn is_active(&self) -> bool {
        self.attribute("active").is_some_and(AttrValue::truthy)
    }

    /// Id of the owning item, when this item was added as a child.
    pub fn parent_id(&self) -> Option<&str> {
        self.parent_id.as_deref()
    }

    pub fn children(&self) -> &[MenuItem] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut [MenuItem] {
        &mut self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub fn set_label(&mut self, label: impl Into<String>) -> MenuResult<&mut Self> {
        let label = label.into();
        validate_label(&label)?;
        self.label = label;
        Ok(self)
    }

    pub fn set_route(&mut self, route: Option<String>) -> &mut Self {
        self.route = route;
        self
    }

    /// Set one attribute. The key must be on [`ALLOWED_ATTRIBUTES`].
    pub fn set_attribute(
        &mut self,
        key: impl Into<String>,
        value: impl Into<AttrValue>,
    ) -> MenuResult<&mut Self> {
        let key = key.into();
        validate_attribute_key(&key)?;
        self.attributes.insert(key, value.into());
        Ok(self)
    }

    /// Replace the whole attribute map after validating every key.
    pub fn set_attributes(&mut self, attributes: BTreeMap<String, AttrValue>) -> MenuResult<&mut Self> {
        for key in attributes.keys() {
            validate_attribute_key(key)?;
        }
        self.attributes = attributes;
        Ok(self)
    }

    pub fn set_icon(&mut self, icon: impl Into<AttrValue>) -> MenuResult<&mut Self> {
        self.set_attribute("icon", icon)
    }

    pub fn set_badge(&mut self, badge: impl Into<AttrValue>) -> MenuResult<&mut Self> {
        self.set_attribute("badge", badge)
    }

    pub fn set_active(&mut self, active: bool) -> MenuResult<&mut Self> {
        self.set_attribute("active", active)
    }

    /// Append a child, recording this item as its parent.
    pub fn add_child(&mut self, mut child: MenuItem) -> &mut Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Find a direct child by id.
    pub fn find_child(&self, id: &str) -> Option<&MenuItem> {
        self.children.iter().find(|child| child.id == id)
    }

    /// Find a child at any depth below this item.
    pub fn find_descendant(&self, id: &str) -> Option<&MenuItem> {
        for child in &self.children {
            if child.id == id {
                return Some(child);
            }
            if let Some(found) = child.find_descendant(id) {
                return Some(found);
            }
        }
        None
    }

    /// Copy of this item with a replacement attribute map.
    pub fn with_attributes(&self, attributes: BTreeMap<String, AttrValue>) -> MenuResult<Self> {
        let mut new = self.clone();
        new.set_attributes(attributes)?;
        Ok(new)
    }

    /// Copy of this item with one more child appended.
    pub fn with_child(&self, child: MenuItem) -> Self {
        let mut new = self.clone();
        new.add_child(child);
        new
    }

    /// Plain serializable representation. Lazy attribute values are
    /// resolved; the parent reference is deliberately omitted.
    pub fn to_value(&self) -> serde_json::Value {
        let attributes: serde_json::Map<String, serde_json::Value> = self
            .attributes
            .iter()
            .map(|(key, value)| (key.clone(), value.represent()))
            .collect();

        json!({
            "id": self.id,
            "label": self.label,
            "route": self.route,
            "attributes": attributes,
            "children": self.children.iter().map(MenuItem::to_value).collect::<Vec<_>>(),
            "has_children": self.has_children(),
        })
    }
}

fn validate_label(label: &str) -> MenuResult<()> {
    if label.trim().is_empty() {
        return Err(MenuError::InvalidArgument(
            "menu item label cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn validate_attribute_key(key: &str) -> MenuResult<()> {
    if !ALLOWED_ATTRIBUTES.contains(&key) {
        return Err(MenuError::InvalidArgument(format!(
            "attribute '{key}' is not allowed; allowed attributes: {}",
            ALLOWED_ATTRIBUTES.join(", ")
        )));
    }
    Ok(())
}
