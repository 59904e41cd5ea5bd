#![forbid(unsafe_code)]

//! Translatable virtual-DOM trees.
//!
//! # Role in tdom
//! `tdom-core` is the typed layer between view code and the renderer. A
//! [`Tree`] carries *unresolved* user text of an application-chosen type
//! (a message key, a tagged string, ...). Nothing in the API turns that text
//! into a display string except [`Tree::resolve`], so untranslated text
//! cannot reach the render boundary by accident.
//!
//! # Primary responsibilities
//! - **Tree / Attribute**: the five node kinds and three attribute kinds.
//! - **Resolution**: one pass applying a [`Resolver`] to every text slot.
//! - **Remapping**: [`Tree::map`] lifts a subtree's message type into a
//!   parent's, without touching text.
//! - **Memoization**: [`lazy`] through [`lazy6`] defer subtree construction
//!   to the renderer's identity-keyed memo primitive.
//!
//! # How it fits in the system
//! Nodes are produced through the [`Renderer`](tdom_render::Renderer) trait
//! from `tdom-render`; tag and attribute helpers live in `tdom-html`; the
//! reference renderer lives in `tdom-harness`.
//!
//! ```ignore
//! use tdom_core::{Attribute, Resolver, Tree};
//!
//! let view: Tree<Key, Msg, Dom> = Tree::element(
//!     "div",
//!     vec![Attribute::text("title", Key::Tooltip)],
//!     vec![Tree::text(Key::Hello)],
//! );
//! let node = view.resolve(&Resolver::new(|k: &Key| catalog.lookup(k)));
//! ```

pub mod attribute;
pub mod lazy;
pub mod resolver;
pub mod tree;

#[cfg(test)]
mod testing;

pub use attribute::{Attribute, Translate};
pub use lazy::{lazy, lazy2, lazy3, lazy4, lazy5, lazy6};
pub use resolver::Resolver;
pub use tree::{Deferred, Tree, TreeKind};
