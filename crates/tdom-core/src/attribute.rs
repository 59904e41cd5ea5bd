#![forbid(unsafe_code)]

//! Attributes of translatable trees.
//!
//! An [`Attribute`] is either plain data ([`Attribute::Static`]), a property
//! whose value depends on resolved text ([`Attribute::Translatable`]), or an
//! event listener ([`Attribute::Event`]). Only the last one carries the
//! message type; only the middle one needs the resolver.

use std::fmt;
use std::rc::Rc;

use tdom_render::{Attr, Handler, PropertyValue, Tagger};

use crate::resolver::Resolver;

/// Deferred property value computed from the resolver.
pub type Translate<T> = Rc<dyn Fn(&Resolver<T>) -> PropertyValue>;

/// A node attribute, generic over the user text type `T` and message `Msg`.
pub enum Attribute<T, Msg> {
    /// Attribute or property that needs no translation.
    Static { key: String, value: PropertyValue },
    /// Property whose value is computed from resolved text (e.g. `title`).
    Translatable { key: String, value: Translate<T> },
    /// Event listener.
    Event { name: String, handler: Handler<Msg> },
}

impl<T, Msg> Attribute<T, Msg> {
    /// Plain attribute.
    pub fn static_value(key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        Self::Static {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Property computed from the resolver at resolution time.
    pub fn translatable(
        key: impl Into<String>,
        value: impl Fn(&Resolver<T>) -> PropertyValue + 'static,
    ) -> Self {
        Self::Translatable {
            key: key.into(),
            value: Rc::new(value),
        }
    }

    /// Property holding a single piece of user text.
    pub fn text(key: impl Into<String>, text: T) -> Self
    where
        T: 'static,
    {
        Self::translatable(key, move |resolver| {
            PropertyValue::Str(resolver.resolve(&text))
        })
    }

    /// Event listener.
    pub fn event(name: impl Into<String>, handler: Handler<Msg>) -> Self {
        Self::Event {
            name: name.into(),
            handler,
        }
    }

    /// Attribute key, or event name for listeners.
    pub fn key(&self) -> &str {
        match self {
            Self::Static { key, .. } | Self::Translatable { key, .. } => key,
            Self::Event { name, .. } => name,
        }
    }

    /// Resolve into the renderer's attribute type.
    ///
    /// Static values and listeners pass through; translatable properties are
    /// evaluated exactly once against `resolver`.
    pub fn resolve(self, resolver: &Resolver<T>) -> Attr<Msg> {
        match self {
            Self::Static { key, value } => Attr::Property { key, value },
            Self::Translatable { key, value } => Attr::Property {
                key,
                value: value(resolver),
            },
            Self::Event { name, handler } => Attr::Event { name, handler },
        }
    }
}

impl<T, Msg: 'static> Attribute<T, Msg> {
    /// Rewrite the message type of an event listener.
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Attribute<T, B> {
        let tagger: Tagger<Msg, B> = Rc::new(f);
        self.map_with(&tagger)
    }

    pub(crate) fn map_with<B: 'static>(self, tagger: &Tagger<Msg, B>) -> Attribute<T, B> {
        match self {
            Self::Static { key, value } => Attribute::Static { key, value },
            Self::Translatable { key, value } => Attribute::Translatable { key, value },
            Self::Event { name, handler } => Attribute::Event {
                name,
                handler: handler.map(Rc::clone(tagger)),
            },
        }
    }
}

impl<T, Msg> Clone for Attribute<T, Msg> {
    fn clone(&self) -> Self {
        match self {
            Self::Static { key, value } => Self::Static {
                key: key.clone(),
                value: value.clone(),
            },
            Self::Translatable { key, value } => Self::Translatable {
                key: key.clone(),
                value: Rc::clone(value),
            },
            Self::Event { name, handler } => Self::Event {
                name: name.clone(),
                handler: handler.clone(),
            },
        }
    }
}

impl<T, Msg> fmt::Debug for Attribute<T, Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Static { key, value } => f
                .debug_struct("Static")
                .field("key", key)
                .field("value", value)
                .finish(),
            Self::Translatable { key, .. } => {
                f.debug_struct("Translatable").field("key", key).finish()
            }
            Self::Event { name, .. } => f.debug_struct("Event").field("name", name).finish(),
        }
    }
}
