//! Recursive menu-to-HTML serialization with sanitization and depth
//! control.
//!
//! Every caller-supplied string (ids, labels, titles, attribute values,
//! badge content, routes) passes through [`html_escape`] before it is
//! embedded in the output. The only unescaped fragments are trusted
//! configuration (`chevron_icon`) and icon values explicitly marked as
//! safe markup when `escape_all` is off.

use crate::config::MenuConfig;
use crate::models::{AttrValue, Menu, MenuItem, MenuSection, Resolved};

/// Attribute keys handled outside the generic attribute loop.
const SPECIAL_ATTRIBUTES: &[&str] = &["icon", "badge", "active"];

/// Converts menu trees to sanitized, depth-bounded HTML.
pub struct MenuRenderer {
    config: MenuConfig,
}

impl MenuRenderer {
    /// Create a renderer with default configuration.
    pub fn new() -> Self {
        Self {
            config: MenuConfig::default(),
        }
    }

    /// Create a renderer with explicit configuration.
    pub fn with_config(config: MenuConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MenuConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: MenuConfig) -> &mut Self {
        self.config = config;
        self
    }

    /// Render a full menu. A menu with no sections and no root items
    /// renders as the empty string.
    pub fn render(&self, menu: &Menu) -> String {
        if !menu.has_sections() && !menu.has_root_items() {
            return String::new();
        }

        let menu_id = html_escape(menu.id());
        let mut html = format!(
            r#"<nav id="{menu_id}" class="{}" role="navigation" aria-label="{menu_id} menu">"#,
            self.config.css_classes.menu
        );

        for section in menu.sections() {
            html.push_str(&self.render_section(section));
        }

        if menu.has_root_items() {
            html.push_str(&self.render_root_items(menu.items()));
        }

        html.push_str("</nav>");
        html
    }

    /// Render one section. Itemless sections render as the empty string.
    pub fn render_section(&self, section: &MenuSection) -> String {
        if !section.has_children() {
            return String::new();
        }

        let classes = &self.config.css_classes;
        let mut html = format!(
            r#"<div id="{}" class="{}">"#,
            html_escape(section.id()),
            classes.section
        );

        if let Some(title) = section.title() {
            html.push_str(&format!(r#"<h2 class="{}">"#, classes.section_title));
            html.push_str(&self.render_plain_icon(section.icon()));
            html.push_str(&format!("<span>{}</span>", html_escape(title)));
            html.push_str("</h2>");
        }

        html.push_str(&format!(r#"<ul class="{}">"#, classes.list));
        for item in section.items() {
            html.push_str(&self.render_item(item, 1));
        }
        html.push_str("</ul>");
        html.push_str("</div>");

        html
    }

    /// Render one item at the given depth. Items deeper than the
    /// configured `max_depth` are silently dropped; this is the
    /// depth-limiting policy, not an error.
    pub fn render_item(&self, item: &MenuItem, depth: usize) -> String {
        if depth > self.config.max_depth {
            return String::new();
        }

        let classes = &self.config.css_classes;
        let has_children = item.has_children();
        let is_active = item.is_active();

        let href = match item.route() {
            Some(route) => html_escape(&self.sanitize_route(route)),
            None => "#".to_string(),
        };
        let link_class = if is_active {
            format!("{} {}", classes.link, classes.active)
        } else {
            classes.link.clone()
        };
        let attrs = self.build_attributes(item, has_children, is_active);

        let mut html = format!(r#"<li class="{}">"#, classes.item);
        html.push_str(&format!(
            r#"<a href="{href}" class="{link_class}"{attrs}>"#
        ));

        html.push_str(&self.render_icon(item.icon()));
        html.push_str(&format!(
            r#"<span class="{}">{}</span>"#,
            classes.text,
            html_escape(item.label())
        ));

        if has_children {
            html.push_str(&format!(
                r#"<span class="{}">{}</span>"#,
                classes.chevron, self.config.chevron_icon
            ));
        }

        html.push_str(&self.render_badge(item.badge()));
        html.push_str("</a>");

        if has_children {
            html.push_str(&format!(
                r#"<ul class="{} level-{depth}">"#,
                classes.sub_list
            ));
            for child in item.children() {
                html.push_str(&self.render_item(child, depth + 1));
            }
            html.push_str("</ul>");
        }

        html.push_str("</li>");
        html
    }

    /// Root-level items get their own list alongside the sections.
    fn render_root_items(&self, items: &[MenuItem]) -> String {
        if items.is_empty() {
            return String::new();
        }

        let mut html = format!(r#"<ul class="{} root-items">"#, self.config.css_classes.list);
        for item in items {
            html.push_str(&self.render_item(item, 1));
        }
        html.push_str("</ul>");
        html
    }

    /// Icon values skip escaping only when resolved to trusted markup and
    /// `escape_all` is off.
    fn render_icon(&self, icon: Option<&AttrValue>) -> String {
        let Some(icon) = icon else {
            return String::new();
        };
        if !icon.truthy() {
            return String::new();
        }

        let body = match icon.resolve() {
            Resolved::Empty => return String::new(),
            Resolved::Markup(markup) if !self.config.escape_all => markup,
            resolved => html_escape(resolved.as_str()),
        };

        format!(r#"<span class="{}">{body}</span>"#, self.config.css_classes.icon)
    }

    /// Section icons are plain strings and always escaped.
    fn render_plain_icon(&self, icon: Option<&str>) -> String {
        match icon {
            Some(icon) if !icon.is_empty() => format!(
                r#"<span class="{}">{}</span>"#,
                self.config.css_classes.icon,
                html_escape(icon)
            ),
            _ => String::new(),
        }
    }

    /// Badge content is always escaped, regardless of `escape_all`:
    /// badges carry untrusted free text more often than icons do.
    fn render_badge(&self, badge: Option<&AttrValue>) -> String {
        let Some(badge) = badge else {
            return String::new();
        };
        if !badge.truthy() {
            return String::new();
        }

        let resolved = badge.resolve();
        if resolved.is_empty() {
            return String::new();
        }

        format!(
            r#"<span class="{}">{}</span>"#,
            self.config.css_classes.badge,
            html_escape(resolved.as_str())
        )
    }

    /// Assemble the link's HTML attributes: toggle/ARIA state first, then
    /// the item's own attributes filtered by the emission allow-list,
    /// resolved and escaped. Empty resolutions are omitted entirely.
    fn build_attributes(&self, item: &MenuItem, has_children: bool, is_active: bool) -> String {
        let mut attrs: Vec<(String, String)> = Vec::new();

        if has_children {
            attrs.push(("data-toggle".to_string(), "sub-menu".to_string()));
            attrs.push((
                "aria-expanded".to_string(),
                if is_active { "true" } else { "false" }.to_string(),
            ));
        }
        if is_active {
            attrs.push(("aria-current".to_string(), "page".to_string()));
        }

        for (key, value) in item.attributes() {
            if SPECIAL_ATTRIBUTES.contains(&key.as_str()) {
                continue;
            }
            if !self.attribute_allowed(key) {
                continue;
            }
            let resolved = value.resolve();
            if resolved.is_empty() {
                continue;
            }
            attrs.push((key.clone(), html_escape(resolved.as_str())));
        }

        let mut html = String::new();
        for (key, value) in attrs {
            if value.is_empty() {
                continue;
            }
            html.push_str(&format!(r#" {}="{value}""#, html_escape(&key)));
        }
        html
    }

    /// Emission allow-list: the configured attribute keys minus the
    /// specially-handled ones, plus a `data-*` wildcard.
    fn attribute_allowed(&self, key: &str) -> bool {
        if key.starts_with("data-") {
            return true;
        }
        self.config
            .allowed_attributes
            .iter()
            .any(|allowed| allowed == key)
    }

    /// Replace routes carrying a disallowed scheme with `#`. Scheme-less
    /// (relative) routes pass through. Filtering happens here, at the
    /// last point before output, and is gated by `sanitize_urls`.
    fn sanitize_route(&self, route: &str) -> String {
        if !self.config.sanitize_urls {
            return route.to_string();
        }

        match route_scheme(route) {
            Some(scheme)
                if !self
                    .config
                    .allowed_protocols
                    .iter()
                    .any(|allowed| allowed.eq_ignore_ascii_case(&scheme)) =>
            {
                "#".to_string()
            }
            _ => route.to_string(),
        }
    }
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// The scheme of a URL-ish route, lowercased, when it has one.
fn route_scheme(route: &str) -> Option<String> {
    let (scheme, _) = route.split_once(':')?;
    if scheme.is_empty() {
        return None;
    }
    let mut chars = scheme.chars();
    let first_is_alpha = chars.next().is_some_and(|c| c.is_ascii_alphabetic());
    let rest_valid = scheme
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if first_is_alpha && rest_valid {
        Some(scheme.to_ascii_lowercase())
    } else {
        None
    }
}

/// HTML-escape a string for safe output.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}
