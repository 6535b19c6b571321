//! Hierarchical navigation menus.
//!
//! Menus are built through a fluent [`MenuBuilder`], kept in a
//! [`MenuRegistry`], and serialized to sanitized HTML by a
//! [`MenuRenderer`]; [`MenuService`] ties the three together for
//! external callers.

pub mod builder;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod render;
pub mod service;

pub use builder::{BuilderOptions, MenuBuilder};
pub use config::{CssClasses, MenuConfig};
pub use error::{MenuError, MenuResult};
pub use models::{ALLOWED_ATTRIBUTES, AttrValue, Menu, MenuItem, MenuNode, MenuSection, Resolved};
pub use registry::{MenuRegistry, MenuStats, ValidationReport};
pub use render::{MenuRenderer, html_escape};
pub use service::{MenuService, SimpleItem};
