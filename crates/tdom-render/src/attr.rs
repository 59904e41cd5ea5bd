#![forbid(unsafe_code)]

//! Resolved attributes: what a renderer receives once all text is resolved.

use std::fmt;

use crate::handler::{Handler, Tagger};

/// Value of a resolved attribute or DOM property.
///
/// Most attributes are strings; booleans and numbers exist so properties
/// like `checked` or `tabindex` can pass through without stringly encoding.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PropertyValue {
    /// Explicitly unset.
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl PropertyValue {
    /// Borrow the string payload, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Whether the value is `Null`.
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => Ok(()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i32> for PropertyValue {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<i64> for PropertyValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

/// A resolved attribute as handed to the renderer.
///
/// There is no text payload left at this point: translatable properties have
/// already been turned into plain [`PropertyValue`]s.
pub enum Attr<Msg> {
    /// Attribute or DOM property with a concrete value.
    Property { key: String, value: PropertyValue },
    /// Event listener.
    Event { name: String, handler: Handler<Msg> },
}

impl<Msg> Attr<Msg> {
    /// Build a property attribute.
    pub fn property(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self::Property {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Build an event attribute.
    pub fn event(name: impl Into<String>, handler: Handler<Msg>) -> Self {
        Self::Event {
            name: name.into(),
            handler,
        }
    }

    /// Attribute key, or event name for listeners.
    pub fn key(&self) -> &str {
        match self {
            Self::Property { key, .. } => key,
            Self::Event { name, .. } => name,
        }
    }

    /// Property value, if this is not an event listener.
    pub fn value(&self) -> Option<&PropertyValue> {
        match self {
            Self::Property { value, .. } => Some(value),
            Self::Event { .. } => None,
        }
    }

    /// Whether this attribute is an event listener.
    pub fn is_event(&self) -> bool {
        matches!(self, Self::Event { .. })
    }
}

impl<Msg: 'static> Attr<Msg> {
    /// Rewrite the message type. Properties pass through untouched.
    pub fn map<B: 'static>(self, tagger: &Tagger<Msg, B>) -> Attr<B> {
        match self {
            Self::Property { key, value } => Attr::Property { key, value },
            Self::Event { name, handler } => Attr::Event {
                name,
                handler: handler.map(tagger.clone()),
            },
        }
    }
}

impl<Msg> Clone for Attr<Msg> {
    fn clone(&self) -> Self {
        match self {
            Self::Property { key, value } => Self::Property {
                key: key.clone(),
                value: value.clone(),
            },
            Self::Event { name, handler } => Self::Event {
                name: name.clone(),
                handler: handler.clone(),
            },
        }
    }
}

impl<Msg> fmt::Debug for Attr<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Property { key, value } => f
                .debug_struct("Property")
                .field("key", key)
                .field("value", value)
                .finish(),
            Self::Event { name, .. } => f.debug_struct("Event").field("name", name).finish(),
        }
    }
}
