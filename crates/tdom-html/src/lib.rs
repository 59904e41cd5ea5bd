#![forbid(unsafe_code)]

//! HTML helpers for translatable trees.
//!
//! Thin constructors over [`tdom_core::Tree`] and [`tdom_core::Attribute`]
//! for every standard HTML element, the common attributes, and event
//! listeners. Nothing here validates anything; these functions only save
//! typing tag and attribute names.
//!
//! Text-bearing positions take the application's user text type:
//!
//! ```ignore
//! use tdom_html::{attributes::*, events::on_click, *};
//!
//! fn view(model: &Model) -> Tree<Key, Msg, Dom> {
//!     div(
//!         vec![class("greeting"), title(Key::Tooltip)],
//!         vec![
//!             text(Key::Hello),
//!             button(vec![on_click(Msg::Refresh)], vec![text(Key::Refresh)]),
//!         ],
//!     )
//! }
//! ```

pub mod attributes;
pub mod elements;
pub mod events;
pub mod keyed;
pub mod lazy;

pub use elements::*;
pub use tdom_core::{Attribute, Resolver, Tree};
