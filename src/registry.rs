//! Menu registry - keyed in-memory store of built menus.
//!
//! The registry assumes a single logical owner per process and provides no
//! internal locking; concurrent callers must serialize access themselves.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use tracing::{debug, warn};

use crate::models::{Menu, MenuItem};

/// Aggregate counters across all registered menus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MenuStats {
    pub total_menus: usize,
    /// Items across all menus, counted recursively through children.
    pub total_items: usize,
    pub total_sections: usize,
    pub active_items: usize,
}

/// Batch structural validation result. Findings are data, not errors, so
/// many menus can be reported in one pass.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub valid: bool,
}

/// Keyed store of built menus with override/remove semantics.
#[derive(Debug, Default)]
pub struct MenuRegistry {
    menus: HashMap<String, Menu>,
}

impl MenuRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            menus: HashMap::new(),
        }
    }

    /// Get a menu by id.
    pub fn get(&self, id: &str) -> Option<&Menu> {
        let menu = self.menus.get(id);
        if menu.is_none() {
            debug!(menu = %id, "menu not found in registry");
        }
        menu
    }

    pub fn has(&self, id: &str) -> bool {
        self.menus.contains_key(id)
    }

    /// Register a menu under its id, silently replacing any existing
    /// entry (a warning trace is emitted on overwrite).
    pub fn register(&mut self, menu: Menu) -> &mut Self {
        let id = menu.id().to_string();

        if self.menus.contains_key(&id) {
            warn!(menu = %id, "overriding existing menu in registry");
        }

        self.menus.insert(id.clone(), menu);
        debug!(menu = %id, "menu registered");
        self
    }

    /// Remove a menu; removing an absent id is a traced no-op.
    pub fn remove(&mut self, id: &str) -> &mut Self {
        if self.menus.remove(id).is_none() {
            debug!(menu = %id, "cannot remove menu - not found in registry");
        } else {
            debug!(menu = %id, "menu removed from registry");
        }
        self
    }

    /// The full mapping of registered menus.
    pub fn all(&self) -> &HashMap<String, Menu> {
        &self.menus
    }

    /// Remove every menu.
    pub fn clear(&mut self) -> &mut Self {
        let count = self.menus.len();
        self.menus.clear();
        debug!(count, "cleared menus from registry");
        self
    }

    pub fn len(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    /// Registered menu ids, sorted for deterministic output.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.menus.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    /// Menus matching a predicate.
    pub fn filter(&self, predicate: impl Fn(&Menu) -> bool) -> Vec<&Menu> {
        self.menus.values().filter(|menu| predicate(menu)).collect()
    }

    /// Aggregate counters across all registered menus.
    pub fn stats(&self) -> MenuStats {
        let mut stats = MenuStats {
            total_menus: self.menus.len(),
            ..MenuStats::default()
        };

        for menu in self.menus.values() {
            stats.total_items += menu.item_count();
            stats.total_sections += menu.sections().len();
            stats.active_items += menu.active_items().len();
        }

        stats
    }

    /// Check every registered menu for structural problems: itemless
    /// menus (warning), duplicate item ids (error), and cycles in the
    /// item id graph (error).
    ///
    /// The builder's construction protocol makes cycles unreachable in
    /// normal use; the registry still checks explicitly since tree nodes
    /// remain directly mutable after build.
    pub fn validate(&self) -> ValidationReport {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        for id in self.keys() {
            let Some(menu) = self.menus.get(id) else {
                continue;
            };

            if menu.item_count() == 0 {
                warnings.push(format!("menu '{id}' has no items"));
            }

            let duplicates = duplicate_item_ids(menu);
            if !duplicates.is_empty() {
                errors.push(format!(
                    "menu '{id}' has duplicate item ids: {}",
                    duplicates.join(", ")
                ));
            }

            if has_cycle(menu) {
                errors.push(format!("menu '{id}' has circular references in items"));
            }
        }

        ValidationReport {
            valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

/// Item ids occurring more than once anywhere in the menu, sorted.
fn duplicate_item_ids(menu: &Menu) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    collect_ids(menu.items(), &mut counts);
    for section in menu.sections() {
        collect_ids(section.items(), &mut counts);
    }

    let mut duplicates: Vec<String> = counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(id, _)| id.to_string())
        .collect();
    duplicates.sort_unstable();
    duplicates
}

fn collect_ids<'a>(items: &'a [MenuItem], counts: &mut HashMap<&'a str, usize>) {
    for item in items {
        *counts.entry(item.id()).or_insert(0) += 1;
        collect_ids(item.children(), counts);
    }
}

/// Color-marking depth-first cycle check over item ids: a node reached
/// while still on the recursion stack (gray) indicates a cycle; finished
/// nodes (black) are never revisited.
fn has_cycle(menu: &Menu) -> bool {
    let mut gray = HashSet::new();
    let mut black = HashSet::new();

    for item in menu.items() {
        if visit(item, &mut gray, &mut black) {
            return true;
        }
    }
    for section in menu.sections() {
        for item in section.items() {
            if visit(item, &mut gray, &mut black) {
                return true;
            }
        }
    }
    false
}

fn visit(item: &MenuItem, gray: &mut HashSet<String>, black: &mut HashSet<String>) -> bool {
    let id = item.id().to_string();

    if gray.contains(&id) {
        return true;
    }
    if black.contains(&id) {
        return false;
    }

    gray.insert(id.clone());
    for child in item.children() {
        if visit(child, gray, black) {
            return true;
        }
    }
    gray.remove(&id);
    black.insert(id);

    false
}
