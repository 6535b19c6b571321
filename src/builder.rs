//! Fluent menu construction.
//!
//! The builder tracks a small state machine (current section, current
//! item, and a stack of open `sub()` parents) so attribute calls and
//! nested-item calls know where to attach. Operations consume the builder
//! and hand it back, so protocol violations surface as errors at the call
//! site instead of leaving a half-built tree behind.

use std::collections::BTreeMap;

use serde_json::json;

use crate::error::{MenuError, MenuResult};
use crate::models::menu::validate_menu_id;
use crate::models::{AttrValue, Menu, MenuItem, MenuSection, Resolved};

/// Construction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuilderOptions {
    /// Items added with no open section become menu-level root items
    /// instead of requiring a section.
    pub allow_root_items: bool,

    /// Skip the default untitled section normally created so callers can
    /// add items immediately.
    pub no_default_section: bool,
}

/// Stateful fluent builder producing a validated [`Menu`].
///
/// ```
/// use navmenu::MenuBuilder;
///
/// let menu = MenuBuilder::new("main")?
///     .section("Main", None)?
///     .item("Home", Some("/".to_string()))?
///     .icon("home")?
///     .item("About", Some("/about".to_string()))?
///     .build()?;
/// assert_eq!(menu.item_count(), 2);
/// # Ok::<(), navmenu::MenuError>(())
/// ```
#[derive(Debug, Clone)]
pub struct MenuBuilder {
    menu_id: String,
    metadata: BTreeMap<String, serde_json::Value>,
    options: BuilderOptions,
    sections: Vec<MenuSection>,
    root_items: Vec<MenuItem>,
    current_section_id: Option<String>,
    current_item_id: Option<String>,
    /// Innermost-last stack of items with an open `sub()` block.
    sub_parents: Vec<String>,
    counter: u64,
}

impl MenuBuilder {
    /// Create a builder with default options and no metadata.
    pub fn new(menu_id: impl Into<String>) -> MenuResult<Self> {
        Self::with_options(menu_id, BTreeMap::new(), BuilderOptions::default())
    }

    /// Create a builder with explicit metadata and options.
    ///
    /// Unless root items are allowed or `no_default_section` is set, a
    /// default untitled section is opened so items can be added
    /// immediately.
    pub fn with_options(
        menu_id: impl Into<String>,
        metadata: BTreeMap<String, serde_json::Value>,
        options: BuilderOptions,
    ) -> MenuResult<Self> {
        let menu_id = menu_id.into();
        validate_menu_id(&menu_id)?;

        let mut builder = Self {
            menu_id,
            metadata,
            options,
            sections: Vec::new(),
            root_items: Vec::new(),
            current_section_id: None,
            current_item_id: None,
            sub_parents: Vec::new(),
            counter: 0,
        };

        if !options.allow_root_items && !options.no_default_section {
            builder = builder.open_section(None, None)?;
        }

        Ok(builder)
    }

    /// Open a new section and make it current. The current item is
    /// cleared; permitted in any state.
    pub fn section(self, title: impl Into<String>, icon: Option<String>) -> MenuResult<Self> {
        self.open_section(Some(title.into()), icon)
    }

    /// Add an item, attached according to the current context: the
    /// innermost open `sub()` parent, the menu root (when allowed and no
    /// section is open), or the current section.
    pub fn item(mut self, label: impl Into<String>, route: Option<String>) -> MenuResult<Self> {
        let item_id = self.generate_id("item");
        let item = MenuItem::new(item_id.clone(), label, route)?;

        if self.current_item_id.is_some()
            && let Some(parent_id) = self.sub_parents.last().cloned()
        {
            let parent = self.find_item_mut(&parent_id).ok_or_else(|| {
                MenuError::Logic(format!("sub() parent item '{parent_id}' no longer exists"))
            })?;
            parent.add_child(item);
            // The new item becomes current so a nested sub() targets it;
            // siblings in this block still attach to the stacked parent.
            self.current_item_id = Some(item_id);
        } else if self.options.allow_root_items && self.current_section_id.is_none() {
            self.root_items.push(item);
            self.current_item_id = Some(item_id);
        } else if let Some(section_id) = self.current_section_id.clone() {
            let section = self
                .sections
                .iter_mut()
                .find(|section| section.id() == section_id)
                .ok_or_else(|| {
                    MenuError::Logic(format!("current section '{section_id}' no longer exists"))
                })?;
            section.add_item(item)?;
            self.current_item_id = Some(item_id);
        } else {
            return Err(MenuError::Logic(
                "cannot add item without a section when root items are not allowed".to_string(),
            ));
        }

        Ok(self)
    }

    /// Open a nesting block under the current item. Items added inside
    /// the callback become its children; the block may nest further
    /// `sub()` calls. On return the current item is restored to what it
    /// was before the call.
    pub fn sub<F>(mut self, f: F) -> MenuResult<Self>
    where
        F: FnOnce(Self) -> MenuResult<Self>,
    {
        let Some(parent_id) = self.current_item_id.clone() else {
            return Err(MenuError::Logic(
                "sub() must be called after item()".to_string(),
            ));
        };

        self.sub_parents.push(parent_id.clone());
        let mut builder = f(self)?;
        builder.sub_parents.pop();
        builder.current_item_id = Some(parent_id);

        Ok(builder)
    }

    /// Set an attribute on the current item. With no current item, an
    /// `icon` key targets the current section instead (lazy values are
    /// resolved immediately). Anything else is a protocol violation.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> MenuResult<Self> {
        let key = key.into();

        if let Some(item_id) = self.current_item_id.clone() {
            let item = self.find_item_mut(&item_id).ok_or_else(|| {
                MenuError::Logic(format!("current item '{item_id}' no longer exists"))
            })?;
            item.set_attribute(key, value)?;
        } else if key == "icon"
            && let Some(section_id) = self.current_section_id.clone()
        {
            let icon = match value.into().resolve() {
                Resolved::Empty => None,
                resolved => Some(resolved.as_str().to_string()),
            };
            if let Some(section) = self
                .sections
                .iter_mut()
                .find(|section| section.id() == section_id)
            {
                section.set_icon(icon);
            }
        } else {
            return Err(MenuError::Logic(format!(
                "{key} must follow item() or section()"
            )));
        }

        Ok(self)
    }

    /// Set the icon of the current item, or of the current section when
    /// no item is current.
    pub fn icon(self, icon: impl Into<AttrValue>) -> MenuResult<Self> {
        self.attr("icon", icon)
    }

    pub fn badge(self, badge: impl Into<AttrValue>) -> MenuResult<Self> {
        self.attr("badge", badge)
    }

    pub fn active(self, active: bool) -> MenuResult<Self> {
        self.attr("active", active)
    }

    pub fn css_class(self, class: impl Into<AttrValue>) -> MenuResult<Self> {
        self.attr("class", class)
    }

    /// Copy of this builder with metadata shallow-merged over the
    /// existing entries. The receiver is untouched, supporting safe
    /// reuse.
    pub fn with_metadata(&self, metadata: BTreeMap<String, serde_json::Value>) -> Self {
        let mut new = self.clone();
        new.metadata.extend(metadata);
        new
    }

    /// Run a callback for chaining side work.
    pub fn then<F>(self, f: F) -> MenuResult<Self>
    where
        F: FnOnce(Self) -> MenuResult<Self>,
    {
        f(self)
    }

    /// Run the callback only when the condition holds.
    pub fn when<F>(self, condition: bool, f: F) -> MenuResult<Self>
    where
        F: FnOnce(Self) -> MenuResult<Self>,
    {
        if condition { f(self) } else { Ok(self) }
    }

    /// Run the callback only when the condition does not hold.
    pub fn unless<F>(self, condition: bool, f: F) -> MenuResult<Self>
    where
        F: FnOnce(Self) -> MenuResult<Self>,
    {
        self.when(!condition, f)
    }

    /// Fail when the menu under construction has no items at all, in any
    /// section or at the root.
    pub fn validate(self) -> MenuResult<Self> {
        let has_items = self.sections.iter().any(MenuSection::has_children)
            || (self.options.allow_root_items && !self.root_items.is_empty());

        if !has_items {
            return Err(MenuError::Logic(format!(
                "menu '{}' must have at least one item",
                self.menu_id
            )));
        }

        Ok(self)
    }

    /// Assemble a menu from the constructed sections and root items, in
    /// creation order. Callable multiple times; every call yields an
    /// independent copy of the constructed tree.
    pub fn build(&self) -> MenuResult<Menu> {
        let mut menu = Menu::new(self.menu_id.clone(), self.metadata.clone())?;

        for section in &self.sections {
            menu.add_section(section.clone())?;
        }

        if self.options.allow_root_items {
            for item in &self.root_items {
                menu.add_item(item.clone())?;
            }
        }

        Ok(menu)
    }

    pub fn menu_id(&self) -> &str {
        &self.menu_id
    }

    pub fn current_section_id(&self) -> Option<&str> {
        self.current_section_id.as_deref()
    }

    pub fn current_item_id(&self) -> Option<&str> {
        self.current_item_id.as_deref()
    }

    pub fn in_sub_context(&self) -> bool {
        !self.sub_parents.is_empty()
    }

    /// Snapshot of the construction state for debugging.
    pub fn debug_state(&self) -> serde_json::Value {
        json!({
            "menu_id": self.menu_id,
            "metadata": self.metadata,
            "allow_root_items": self.options.allow_root_items,
            "current_section_id": self.current_section_id,
            "current_item_id": self.current_item_id,
            "in_sub_context": self.in_sub_context(),
            "sections": self.sections.iter().map(MenuSection::to_value).collect::<Vec<_>>(),
            "root_items": self.root_items.iter().map(MenuItem::to_value).collect::<Vec<_>>(),
        })
    }

    fn open_section(mut self, title: Option<String>, icon: Option<String>) -> MenuResult<Self> {
        let section_id = self.generate_id("section");
        let section = MenuSection::new(section_id.clone(), title, icon)?;

        self.sections.push(section);
        self.current_section_id = Some(section_id);
        self.current_item_id = None;

        Ok(self)
    }

    fn generate_id(&mut self, kind: &str) -> String {
        self.counter += 1;
        format!("{kind}_{}_{}", self.menu_id, self.counter)
    }

    fn find_item_mut(&mut self, id: &str) -> Option<&mut MenuItem> {
        if let Some(found) = find_in_items_mut(&mut self.root_items, id) {
            return Some(found);
        }
        for section in &mut self.sections {
            if let Some(found) = find_in_items_mut(section.items_mut(), id) {
                return Some(found);
            }
        }
        None
    }
}

fn find_in_items_mut<'a>(items: &'a mut [MenuItem], id: &str) -> Option<&'a mut MenuItem> {
    for item in items.iter_mut() {
        if item.id() == id {
            return Some(item);
        }
        if let Some(found) = find_in_items_mut(item.children_mut(), id) {
            return Some(found);
        }
    }
    None
}
