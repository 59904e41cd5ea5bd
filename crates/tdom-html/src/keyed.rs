#![forbid(unsafe_code)]

//! Keyed elements.
//!
//! Children of a keyed element carry a string key that identifies them
//! across render passes, so a renderer can move nodes instead of rebuilding
//! them when a list is reordered. Keys should be unique among siblings;
//! that is not checked here.

use tdom_core::{Attribute, Tree};
use tdom_render::Renderer;

/// Keyed element with an arbitrary tag name.
pub fn node<T, Msg: 'static, R: Renderer>(
    tag: impl Into<String>,
    attrs: Vec<Attribute<T, Msg>>,
    children: Vec<(String, Tree<T, Msg, R>)>,
) -> Tree<T, Msg, R> {
    Tree::keyed(tag, attrs, children)
}

/// Keyed `<ul>`.
pub fn ul<T, Msg: 'static, R: Renderer>(
    attrs: Vec<Attribute<T, Msg>>,
    children: Vec<(String, Tree<T, Msg, R>)>,
) -> Tree<T, Msg, R> {
    Tree::keyed("ul", attrs, children)
}

/// Keyed `<ol>`.
pub fn ol<T, Msg: 'static, R: Renderer>(
    attrs: Vec<Attribute<T, Msg>>,
    children: Vec<(String, Tree<T, Msg, R>)>,
) -> Tree<T, Msg, R> {
    Tree::keyed("ol", attrs, children)
}
