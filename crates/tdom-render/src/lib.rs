#![forbid(unsafe_code)]

//! Renderer boundary for tdom.
//!
//! This crate defines the contract between the translatable tree layer
//! (`tdom-core`) and whatever engine turns resolved trees into UI updates.
//! The core never builds renderer-native nodes directly; it goes through the
//! [`Renderer`] trait, which exposes exactly the primitives a host engine
//! has to provide:
//!
//! - element, keyed element and text constructors
//! - an n-ary memoization primitive keyed by argument identity ([`MemoKey`])
//! - a message-remapping primitive over the native node type
//!
//! The resolved attribute type ([`Attr`]), event handlers ([`Handler`]) and
//! memo keys live here as well, because both sides of the boundary speak them.

pub mod attr;
pub mod handler;
pub mod memo;

pub use attr::{Attr, PropertyValue};
pub use handler::{DecodeError, Handled, Handler, Tagger};
pub use memo::{MemoArg, MemoKey, MemoToken, Pin, Thunk};

/// Host rendering engine.
///
/// Implementations own the native resolved-tree type and the diffing
/// machinery. All constructors are associated functions: building a node
/// must not depend on renderer state, so nodes can be produced anywhere in
/// view code and handed to the engine later.
///
/// Concrete implementations:
/// - `tdom-harness`: in-memory reference renderer with a memoizing session.
pub trait Renderer: Sized + 'static {
    /// Native resolved node, generic over the message type its handlers emit.
    type Node<Msg: 'static>: 'static;

    /// Build an element with positional children.
    fn element<Msg: 'static>(
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<Self::Node<Msg>>,
    ) -> Self::Node<Msg>;

    /// Build an element whose children carry stable identity keys.
    ///
    /// Keys are not validated; duplicate keys are the caller's problem.
    fn keyed_element<Msg: 'static>(
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<(String, Self::Node<Msg>)>,
    ) -> Self::Node<Msg>;

    /// Build a text node from an already-resolved display string.
    fn text<Msg: 'static>(content: String) -> Self::Node<Msg>;

    /// Native memoization primitive.
    ///
    /// The renderer may skip calling `thunk` when a node at the same position
    /// in the previous pass carried an equal `key`. Keys compare argument
    /// identities, never argument contents.
    fn memo<Msg: 'static>(key: MemoKey, thunk: Thunk<Self::Node<Msg>>) -> Self::Node<Msg>;

    /// Native message remapping: every message produced under `node` is
    /// passed through `tagger` exactly once.
    fn map<A: 'static, B: 'static>(tagger: Tagger<A, B>, node: Self::Node<A>) -> Self::Node<B>;
}
