#![forbid(unsafe_code)]

//! Translatable trees and the two traversals over them.
//!
//! A [`Tree`] is built by view code over an application-chosen user text
//! type `T` and message type `Msg`, targeting a host renderer `R`. It can be
//! consumed in exactly two ways:
//!
//! - [`Tree::resolve`] applies a [`Resolver`] everywhere and yields the
//!   renderer's native node. This is the only way user text leaves a tree.
//! - [`Tree::map`] rewrites the message type and leaves text alone.
//!
//! The two commute: `t.map(f).resolve(r)` and `R::map(f, t.resolve(r))`
//! produce the same resolved tree.

use std::fmt;
use std::rc::Rc;

use tdom_render::{Attr, Renderer, Tagger};

use crate::attribute::Attribute;
use crate::resolver::Resolver;

type DeferFn<T, Msg, R> = dyn Fn(&Resolver<T>) -> <R as Renderer>::Node<Msg>;

/// A computation postponed until resolution time.
///
/// Already expressed in terms of the resolver, so resolving it is a direct
/// call rather than a tree walk.
pub struct Deferred<T, Msg: 'static, R: Renderer> {
    run: Rc<DeferFn<T, Msg, R>>,
}

impl<T, Msg: 'static, R: Renderer> Deferred<T, Msg, R> {
    pub fn new(run: impl Fn(&Resolver<T>) -> R::Node<Msg> + 'static) -> Self {
        Self { run: Rc::new(run) }
    }

    /// Evaluate against `resolver`.
    #[inline]
    pub fn run(&self, resolver: &Resolver<T>) -> R::Node<Msg> {
        (self.run)(resolver)
    }
}

impl<T, Msg: 'static, R: Renderer> Clone for Deferred<T, Msg, R> {
    fn clone(&self) -> Self {
        Self {
            run: Rc::clone(&self.run),
        }
    }
}

/// Variant tag of a [`Tree`], for inspection without exposing payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TreeKind {
    Element,
    KeyedElement,
    Lazy,
    Text,
    Core,
}

enum Node<T, Msg: 'static, R: Renderer> {
    Element {
        tag: String,
        attrs: Vec<Attribute<T, Msg>>,
        children: Vec<Tree<T, Msg, R>>,
    },
    KeyedElement {
        tag: String,
        attrs: Vec<Attribute<T, Msg>>,
        children: Vec<(String, Tree<T, Msg, R>)>,
    },
    Lazy(Deferred<T, Msg, R>),
    Text(T),
    Core(R::Node<Msg>),
}

/// A virtual-DOM tree whose text still needs resolving.
///
/// The representation is private: there is no accessor for the user text
/// it carries. Text only leaves a tree through [`Tree::resolve`].
pub struct Tree<T, Msg: 'static, R: Renderer> {
    node: Node<T, Msg, R>,
}

impl<T, Msg: 'static, R: Renderer> Tree<T, Msg, R> {
    /// Element with positional children. Tag and attributes are not validated.
    pub fn element(
        tag: impl Into<String>,
        attrs: Vec<Attribute<T, Msg>>,
        children: Vec<Tree<T, Msg, R>>,
    ) -> Self {
        Self {
            node: Node::Element {
                tag: tag.into(),
                attrs,
                children,
            },
        }
    }

    /// Element whose children carry identity keys for reconciliation.
    ///
    /// Keys are passed to the renderer as given; duplicates are not detected.
    pub fn keyed(
        tag: impl Into<String>,
        attrs: Vec<Attribute<T, Msg>>,
        children: Vec<(String, Tree<T, Msg, R>)>,
    ) -> Self {
        Self {
            node: Node::KeyedElement {
                tag: tag.into(),
                attrs,
                children,
            },
        }
    }

    /// Text node holding unresolved user text.
    pub fn text(text: T) -> Self {
        Self {
            node: Node::Text(text),
        }
    }

    /// Embed an already-resolved renderer node.
    ///
    /// Useful for content with nothing to translate, or content produced by
    /// code that speaks the renderer directly.
    pub fn core(node: R::Node<Msg>) -> Self {
        Self {
            node: Node::Core(node),
        }
    }

    /// Node whose construction is deferred until resolution.
    ///
    /// Prefer [`lazy`](crate::lazy::lazy) and friends, which route through
    /// the renderer's memoization primitive.
    pub fn deferred(run: impl Fn(&Resolver<T>) -> R::Node<Msg> + 'static) -> Self {
        Self {
            node: Node::Lazy(Deferred::new(run)),
        }
    }

    /// Which variant this tree is.
    pub fn kind(&self) -> TreeKind {
        match &self.node {
            Node::Element { .. } => TreeKind::Element,
            Node::KeyedElement { .. } => TreeKind::KeyedElement,
            Node::Lazy(_) => TreeKind::Lazy,
            Node::Text(_) => TreeKind::Text,
            Node::Core(_) => TreeKind::Core,
        }
    }

    /// Tag name for element variants.
    pub fn tag(&self) -> Option<&str> {
        match &self.node {
            Node::Element { tag, .. } | Node::KeyedElement { tag, .. } => Some(tag),
            _ => None,
        }
    }

    /// Resolve all user text, producing the renderer's native node.
    ///
    /// Every `Text` and every translatable property is passed through
    /// `resolver` exactly once. Lazy nodes are handed the resolver directly,
    /// so the renderer can memoize them before any subtree work happens.
    pub fn resolve(self, resolver: &Resolver<T>) -> R::Node<Msg> {
        #[cfg(feature = "tracing")]
        let _span = tracing::trace_span!("resolve", kind = ?self.kind()).entered();

        self.resolve_node(resolver)
    }

    fn resolve_node(self, resolver: &Resolver<T>) -> R::Node<Msg> {
        match self.node {
            Node::Element {
                tag,
                attrs,
                children,
            } => R::element(
                tag,
                resolve_attrs(attrs, resolver),
                children
                    .into_iter()
                    .map(|child| child.resolve_node(resolver))
                    .collect(),
            ),
            Node::KeyedElement {
                tag,
                attrs,
                children,
            } => R::keyed_element(
                tag,
                resolve_attrs(attrs, resolver),
                children
                    .into_iter()
                    .map(|(key, child)| (key, child.resolve_node(resolver)))
                    .collect(),
            ),
            Node::Lazy(deferred) => deferred.run(resolver),
            Node::Text(text) => R::text(resolver.resolve(&text)),
            Node::Core(node) => node,
        }
    }

    /// Rewrite the message type of every listener in the tree.
    ///
    /// Structure, order and user text are untouched. Lazy and core subtrees
    /// are remapped through the renderer's own [`Renderer::map`].
    pub fn map<B: 'static>(self, f: impl Fn(Msg) -> B + 'static) -> Tree<T, B, R>
    where
        T: 'static,
    {
        let tagger: Tagger<Msg, B> = Rc::new(f);
        self.map_with(&tagger)
    }

    fn map_with<B: 'static>(self, tagger: &Tagger<Msg, B>) -> Tree<T, B, R>
    where
        T: 'static,
    {
        let node = match self.node {
            Node::Element {
                tag,
                attrs,
                children,
            } => Node::Element {
                tag,
                attrs: map_attrs(attrs, tagger),
                children: children
                    .into_iter()
                    .map(|child| child.map_with(tagger))
                    .collect(),
            },
            Node::KeyedElement {
                tag,
                attrs,
                children,
            } => Node::KeyedElement {
                tag,
                attrs: map_attrs(attrs, tagger),
                children: children
                    .into_iter()
                    .map(|(key, child)| (key, child.map_with(tagger)))
                    .collect(),
            },
            // The deferred result has already dropped `T`, so the remap has to
            // happen on the resolved output, at resolution time.
            Node::Lazy(deferred) => {
                let tagger = Rc::clone(tagger);
                Node::Lazy(Deferred::new(move |resolver| {
                    R::map(Rc::clone(&tagger), deferred.run(resolver))
                }))
            }
            Node::Text(text) => Node::Text(text),
            Node::Core(node) => Node::Core(R::map(Rc::clone(tagger), node)),
        };
        Tree { node }
    }
}

fn resolve_attrs<T, Msg>(attrs: Vec<Attribute<T, Msg>>, resolver: &Resolver<T>) -> Vec<Attr<Msg>> {
    attrs.into_iter().map(|attr| attr.resolve(resolver)).collect()
}

fn map_attrs<T, A: 'static, B: 'static>(
    attrs: Vec<Attribute<T, A>>,
    tagger: &Tagger<A, B>,
) -> Vec<Attribute<T, B>> {
    attrs.into_iter().map(|attr| attr.map_with(tagger)).collect()
}

impl<T, Msg: 'static, R: Renderer> From<Deferred<T, Msg, R>> for Tree<T, Msg, R> {
    fn from(deferred: Deferred<T, Msg, R>) -> Self {
        Self {
            node: Node::Lazy(deferred),
        }
    }
}

impl<T, Msg: 'static, R: Renderer> fmt::Debug for Tree<T, Msg, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Node::Element {
                tag,
                attrs,
                children,
            } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attrs", attrs)
                .field("children", children)
                .finish(),
            Node::KeyedElement {
                tag,
                attrs,
                children,
            } => f
                .debug_struct("KeyedElement")
                .field("tag", tag)
                .field("attrs", attrs)
                .field("children", children)
                .finish(),
            Node::Lazy(_) => f.write_str("Lazy(..)"),
            Node::Text(_) => f.write_str("Text(..)"),
            Node::Core(_) => f.write_str("Core(..)"),
        }
    }
}
