//! Attribute values and their resolution.
//!
//! Item attributes accept plain scalars, pre-escaped markup fragments, and
//! lazily-computed values. Resolution happens at render/representation time
//! and always collapses to a string form plus a trust marker.

use std::fmt;
use std::sync::Arc;

/// A value assigned to a menu item attribute.
///
/// `Markup` carries a fragment the caller has already escaped or otherwise
/// trusts; everything else is treated as plain text and escaped on output.
/// `Lazy` wraps a zero-argument closure invoked at resolve time.
#[derive(Clone)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Markup(String),
    Lazy(Arc<dyn Fn() -> String + Send + Sync>),
}

impl AttrValue {
    /// Wrap a zero-argument closure evaluated when the value is resolved.
    pub fn lazy<F>(f: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        AttrValue::Lazy(Arc::new(f))
    }

    /// Wrap a pre-escaped markup fragment.
    pub fn markup(fragment: impl Into<String>) -> Self {
        AttrValue::Markup(fragment.into())
    }

    /// Resolve to the final output form.
    ///
    /// Order: numeric passthrough, closure invocation, safe-markup
    /// passthrough, string coercion. Booleans coerce the way loosely-typed
    /// template values do: `true` is `"1"`, `false` is empty.
    pub fn resolve(&self) -> Resolved {
        match self {
            AttrValue::Int(n) => Resolved::Number(n.to_string()),
            AttrValue::Float(n) => Resolved::Number(n.to_string()),
            AttrValue::Lazy(f) => {
                let text = f();
                if text.is_empty() {
                    Resolved::Empty
                } else {
                    Resolved::Text(text)
                }
            }
            AttrValue::Markup(m) => {
                if m.is_empty() {
                    Resolved::Empty
                } else {
                    Resolved::Markup(m.clone())
                }
            }
            AttrValue::Text(s) => {
                if s.is_empty() {
                    Resolved::Empty
                } else {
                    Resolved::Text(s.clone())
                }
            }
            AttrValue::Bool(true) => Resolved::Text("1".to_string()),
            AttrValue::Bool(false) => Resolved::Empty,
        }
    }

    /// Loose truthiness, used for the `active` flag and for skipping
    /// absent-looking icons and badges before resolution.
    ///
    /// Lazy values count as truthy without being invoked.
    pub fn truthy(&self) -> bool {
        match self {
            AttrValue::Bool(b) => *b,
            AttrValue::Int(n) => *n != 0,
            AttrValue::Float(n) => *n != 0.0,
            AttrValue::Text(s) => !s.is_empty() && s != "0",
            AttrValue::Markup(m) => !m.is_empty(),
            AttrValue::Lazy(_) => true,
        }
    }

    /// Plain JSON form for node representations. Lazy values are resolved.
    pub fn represent(&self) -> serde_json::Value {
        match self {
            AttrValue::Bool(b) => serde_json::Value::from(*b),
            AttrValue::Int(n) => serde_json::Value::from(*n),
            AttrValue::Float(n) => serde_json::Value::from(*n),
            AttrValue::Text(s) => serde_json::Value::from(s.clone()),
            AttrValue::Markup(m) => serde_json::Value::from(m.clone()),
            AttrValue::Lazy(f) => serde_json::Value::from(f()),
        }
    }
}

impl fmt::Debug for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            AttrValue::Int(n) => f.debug_tuple("Int").field(n).finish(),
            AttrValue::Float(n) => f.debug_tuple("Float").field(n).finish(),
            AttrValue::Text(s) => f.debug_tuple("Text").field(s).finish(),
            AttrValue::Markup(m) => f.debug_tuple("Markup").field(m).finish(),
            AttrValue::Lazy(_) => f.write_str("Lazy(..)"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Text(s.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Text(s)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        AttrValue::Bool(b)
    }
}

impl From<i64> for AttrValue {
    fn from(n: i64) -> Self {
        AttrValue::Int(n)
    }
}

impl From<i32> for AttrValue {
    fn from(n: i32) -> Self {
        AttrValue::Int(i64::from(n))
    }
}

impl From<f64> for AttrValue {
    fn from(n: f64) -> Self {
        AttrValue::Float(n)
    }
}

/// A fully resolved attribute value, ready for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// Numeric display form.
    Number(String),
    /// Trusted markup; may skip escaping where configuration allows.
    Markup(String),
    /// Plain text; always escaped on output.
    Text(String),
    /// Nothing to emit.
    Empty,
}

impl Resolved {
    /// The string content, empty for [`Resolved::Empty`].
    pub fn as_str(&self) -> &str {
        match self {
            Resolved::Number(s) | Resolved::Markup(s) | Resolved::Text(s) => s,
            Resolved::Empty => "",
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Resolved::Empty)
    }
}
