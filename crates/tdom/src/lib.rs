#![forbid(unsafe_code)]

//! tdom public facade crate.
//!
//! Virtual-DOM trees whose user-visible text stays untranslated until a
//! [`Resolver`] turns it into display strings. Views are written once in
//! terms of the application's text type and rendered in any locale.
//!
//! This crate re-exports the stable surface of the workspace crates and
//! offers a prelude for day-to-day use:
//!
//! ```ignore
//! use tdom::prelude::*;
//!
//! fn view(name: &Rc<String>) -> Tree<Key, Msg, VirtualDom> {
//!     html::div(vec![title(Key::Tooltip)], vec![html::text(Key::Hello)])
//! }
//! ```

use std::fmt;

pub mod logging;

// --- Renderer boundary ----------------------------------------------------

pub use tdom_render::{
    Attr, DecodeError, Handled, Handler, MemoArg, MemoKey, MemoToken, PropertyValue, Renderer,
    Tagger, Thunk,
};

// --- Tree model -----------------------------------------------------------

pub use tdom_core::{Attribute, Deferred, Resolver, Tree, TreeKind};
pub use tdom_core::{lazy, lazy2, lazy3, lazy4, lazy5, lazy6};

// --- Reference renderer ---------------------------------------------------

#[cfg(feature = "harness")]
pub use tdom_harness::{
    DomNode, HarnessConfig, HarnessError, MarkupConfig, NodeSnapshot, RenderStats, Rendered,
    Session, VNode, VirtualDom,
};

// --- Errors ---------------------------------------------------------------

/// Top-level error type for tdom applications.
#[derive(Debug)]
pub enum Error {
    /// An event payload did not match what a handler expected.
    Decode(DecodeError),
    /// Harness configuration or fixture failure.
    #[cfg(feature = "harness")]
    Harness(HarnessError),
    /// A global log subscriber could not be installed.
    Logging(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Decode(err) => write!(f, "{err}"),
            #[cfg(feature = "harness")]
            Self::Harness(err) => write!(f, "{err}"),
            Self::Logging(msg) => write!(f, "logging: {msg}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode(err) => Some(err),
            #[cfg(feature = "harness")]
            Self::Harness(err) => Some(err),
            Self::Logging(_) => None,
        }
    }
}

impl From<DecodeError> for Error {
    fn from(err: DecodeError) -> Self {
        Self::Decode(err)
    }
}

#[cfg(feature = "harness")]
impl From<HarnessError> for Error {
    fn from(err: HarnessError) -> Self {
        Self::Harness(err)
    }
}

/// Standard result type for tdom APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Attribute, DecodeError, Error, Handled, Handler, MemoArg, PropertyValue, Renderer,
        Resolver, Result, Tree, lazy, lazy2, lazy3, lazy4, lazy5, lazy6,
    };

    #[cfg(feature = "harness")]
    pub use crate::{HarnessConfig, Rendered, Session, VirtualDom};

    pub use crate::html;
    pub use crate::html::attributes::{
        alt, aria_label, class, id, placeholder, style, text_attribute, title, translatable,
    };
    pub use crate::html::events::{on, on_check, on_click, on_input, on_submit};
}

pub use tdom_core as core;
#[cfg(feature = "harness")]
pub use tdom_harness as harness;
pub use tdom_html as html;
pub use tdom_render as render;
