#![forbid(unsafe_code)]

//! In-memory reference renderer.
//!
//! [`VirtualDom`] implements [`Renderer`] with two node types:
//!
//! - [`VNode`]: what resolution produces. Memo nodes still hold their key and
//!   an unevaluated thunk.
//! - [`DomNode`]: what a [`Session`](crate::Session) produces after forcing
//!   every memo. This is the tree markup, snapshots and dispatch work on.
//!
//! `map` is applied eagerly to plain elements: handlers are rewritten in
//! place. Memo nodes are wrapped in [`VNode::Mapped`] instead, so a session
//! caches the memo output before any tagger runs and applies the taggers of
//! the current pass every time, whether the memo hit or missed.

use std::fmt;
use std::rc::Rc;

use tdom_render::{Attr, Handler, MemoKey, PropertyValue, Renderer, Tagger, Thunk};

use crate::session::Pass;

/// Reference renderer.
#[derive(Debug, Clone, Copy, Default)]
pub struct VirtualDom;

/// Resolved, not yet forced node.
pub enum VNode<Msg> {
    Element {
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<VNode<Msg>>,
    },
    Keyed {
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<(String, VNode<Msg>)>,
    },
    Text(String),
    Memo {
        key: MemoKey,
        thunk: Thunk<VNode<Msg>>,
    },
    /// Memo subtree of another message type, remapped when forced.
    Mapped(Mapped<Msg>),
}

/// A memo subtree paired with the tagger lifting its messages into `Msg`.
pub struct Mapped<Msg> {
    inner: Rc<dyn Remap<Msg>>,
}

impl<Msg> Mapped<Msg> {
    /// Memo key of the wrapped memo node.
    pub fn memo_key(&self) -> Option<&MemoKey> {
        self.inner.memo_key()
    }

    pub(crate) fn force(&self, pass: &mut Pass, depth: usize) -> DomNode<Msg> {
        self.inner.force(pass, depth)
    }
}

impl<Msg> Clone for Mapped<Msg> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

pub(crate) trait Remap<B> {
    fn force(&self, pass: &mut Pass, depth: usize) -> DomNode<B>;
    fn memo_key(&self) -> Option<&MemoKey>;
}

struct Remapped<A, B> {
    tagger: Tagger<A, B>,
    node: VNode<A>,
}

impl<A: 'static, B: 'static> Remap<B> for Remapped<A, B> {
    fn force(&self, pass: &mut Pass, depth: usize) -> DomNode<B> {
        let forced = pass.force(self.node.clone(), depth);
        map_dom(&self.tagger, forced)
    }

    fn memo_key(&self) -> Option<&MemoKey> {
        self.node.memo_key()
    }
}

impl VirtualDom {
    /// Text node outside of any tree, for embedding with `Tree::core`.
    pub fn text_node<Msg>(content: impl Into<String>) -> VNode<Msg> {
        VNode::Text(content.into())
    }

    /// Element node outside of any tree.
    pub fn element_node<Msg>(
        tag: impl Into<String>,
        attrs: Vec<Attr<Msg>>,
        children: Vec<VNode<Msg>>,
    ) -> VNode<Msg> {
        VNode::Element {
            tag: tag.into(),
            attrs,
            children,
        }
    }
}

impl Renderer for VirtualDom {
    type Node<Msg: 'static> = VNode<Msg>;

    fn element<Msg: 'static>(
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<VNode<Msg>>,
    ) -> VNode<Msg> {
        VNode::Element {
            tag,
            attrs,
            children,
        }
    }

    fn keyed_element<Msg: 'static>(
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<(String, VNode<Msg>)>,
    ) -> VNode<Msg> {
        VNode::Keyed {
            tag,
            attrs,
            children,
        }
    }

    fn text<Msg: 'static>(content: String) -> VNode<Msg> {
        VNode::Text(content)
    }

    fn memo<Msg: 'static>(key: MemoKey, thunk: Thunk<VNode<Msg>>) -> VNode<Msg> {
        VNode::Memo { key, thunk }
    }

    fn map<A: 'static, B: 'static>(tagger: Tagger<A, B>, node: VNode<A>) -> VNode<B> {
        map_vnode(&tagger, node)
    }
}

fn map_attrs<A: 'static, B: 'static>(tagger: &Tagger<A, B>, attrs: Vec<Attr<A>>) -> Vec<Attr<B>> {
    attrs.into_iter().map(|a| a.map(tagger)).collect()
}

fn map_vnode<A: 'static, B: 'static>(tagger: &Tagger<A, B>, node: VNode<A>) -> VNode<B> {
    match node {
        VNode::Element {
            tag,
            attrs,
            children,
        } => VNode::Element {
            tag,
            attrs: map_attrs(tagger, attrs),
            children: children
                .into_iter()
                .map(|c| map_vnode(tagger, c))
                .collect(),
        },
        VNode::Keyed {
            tag,
            attrs,
            children,
        } => VNode::Keyed {
            tag,
            attrs: map_attrs(tagger, attrs),
            children: children
                .into_iter()
                .map(|(k, c)| (k, map_vnode(tagger, c)))
                .collect(),
        },
        VNode::Text(s) => VNode::Text(s),
        memo @ (VNode::Memo { .. } | VNode::Mapped(_)) => VNode::Mapped(Mapped {
            inner: Rc::new(Remapped {
                tagger: Rc::clone(tagger),
                node: memo,
            }),
        }),
    }
}

impl<Msg> VNode<Msg> {
    /// Memo key, if this is a memo node, mapped or not.
    pub fn memo_key(&self) -> Option<&MemoKey> {
        match self {
            Self::Memo { key, .. } => Some(key),
            Self::Mapped(mapped) => mapped.memo_key(),
            _ => None,
        }
    }
}

impl<Msg> Clone for VNode<Msg> {
    fn clone(&self) -> Self {
        match self {
            Self::Element {
                tag,
                attrs,
                children,
            } => Self::Element {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: children.clone(),
            },
            Self::Keyed {
                tag,
                attrs,
                children,
            } => Self::Keyed {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: children.clone(),
            },
            Self::Text(s) => Self::Text(s.clone()),
            Self::Memo { key, thunk } => Self::Memo {
                key: key.clone(),
                thunk: Rc::clone(thunk),
            },
            Self::Mapped(mapped) => Self::Mapped(mapped.clone()),
        }
    }
}

impl<Msg> fmt::Debug for VNode<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element {
                tag,
                attrs,
                children,
            } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attrs", attrs)
                .field("children", children)
                .finish(),
            Self::Keyed {
                tag,
                attrs,
                children,
            } => f
                .debug_struct("Keyed")
                .field("tag", tag)
                .field("attrs", attrs)
                .field("children", children)
                .finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
            Self::Memo { key, .. } => f.debug_struct("Memo").field("key", key).finish(),
            Self::Mapped(mapped) => f
                .debug_struct("Mapped")
                .field("key", &mapped.memo_key())
                .finish(),
        }
    }
}

/// Rewrite every listener of a forced subtree.
pub(crate) fn map_dom<A: 'static, B: 'static>(tagger: &Tagger<A, B>, node: DomNode<A>) -> DomNode<B> {
    match node {
        DomNode::Element {
            tag,
            attrs,
            children,
        } => DomNode::Element {
            tag,
            attrs: map_attrs(tagger, attrs),
            children: children.into_iter().map(|c| map_dom(tagger, c)).collect(),
        },
        DomNode::Keyed {
            tag,
            attrs,
            children,
        } => DomNode::Keyed {
            tag,
            attrs: map_attrs(tagger, attrs),
            children: children
                .into_iter()
                .map(|(k, c)| (k, map_dom(tagger, c)))
                .collect(),
        },
        DomNode::Text(s) => DomNode::Text(s),
    }
}

// ---------------------------------------------------------------------------
// Forced tree
// ---------------------------------------------------------------------------

/// Fully forced node. No memo nodes remain.
pub enum DomNode<Msg> {
    Element {
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<DomNode<Msg>>,
    },
    Keyed {
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<(String, DomNode<Msg>)>,
    },
    Text(String),
}

impl<Msg> DomNode<Msg> {
    /// Tag name, `None` for text.
    pub fn tag(&self) -> Option<&str> {
        match self {
            Self::Element { tag, .. } | Self::Keyed { tag, .. } => Some(tag),
            Self::Text(_) => None,
        }
    }

    /// Attributes in insertion order. Empty for text.
    pub fn attrs(&self) -> &[Attr<Msg>] {
        match self {
            Self::Element { attrs, .. } | Self::Keyed { attrs, .. } => attrs,
            Self::Text(_) => &[],
        }
    }

    /// Children in order, without their keys.
    pub fn children(&self) -> Vec<&DomNode<Msg>> {
        match self {
            Self::Element { children, .. } => children.iter().collect(),
            Self::Keyed { children, .. } => children.iter().map(|(_, c)| c).collect(),
            Self::Text(_) => Vec::new(),
        }
    }

    /// Child keys of a keyed element; empty for anything else.
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Keyed { children, .. } => children.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Text payload of a text node.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Last value set for property `key`.
    pub fn property(&self, key: &str) -> Option<&PropertyValue> {
        self.attrs()
            .iter()
            .rev()
            .filter(|a| a.key() == key)
            .find_map(Attr::value)
    }

    /// Concatenated text of this subtree in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Self::Text(s) => out.push_str(s),
            _ => {
                for child in self.children() {
                    child.collect_text(out);
                }
            }
        }
    }

    /// Handlers for `event` in document (pre-order) order.
    pub fn handlers(&self, event: &str) -> Vec<&Handler<Msg>> {
        let mut out = Vec::new();
        self.collect_handlers(event, &mut out);
        out
    }

    fn collect_handlers<'a>(&'a self, event: &str, out: &mut Vec<&'a Handler<Msg>>) {
        for attr in self.attrs() {
            if let Attr::Event { name, handler } = attr
                && name == event
            {
                out.push(handler);
            }
        }
        for child in self.children() {
            child.collect_handlers(event, out);
        }
    }

    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self
            .children()
            .into_iter()
            .map(DomNode::node_count)
            .sum::<usize>()
    }
}

impl<Msg> Clone for DomNode<Msg> {
    fn clone(&self) -> Self {
        match self {
            Self::Element {
                tag,
                attrs,
                children,
            } => Self::Element {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: children.clone(),
            },
            Self::Keyed {
                tag,
                attrs,
                children,
            } => Self::Keyed {
                tag: tag.clone(),
                attrs: attrs.clone(),
                children: children.clone(),
            },
            Self::Text(s) => Self::Text(s.clone()),
        }
    }
}

impl<Msg> fmt::Debug for DomNode<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Element {
                tag,
                attrs,
                children,
            } => f
                .debug_struct("Element")
                .field("tag", tag)
                .field("attrs", attrs)
                .field("children", children)
                .finish(),
            Self::Keyed {
                tag,
                attrs,
                children,
            } => f
                .debug_struct("Keyed")
                .field("tag", tag)
                .field("attrs", attrs)
                .field("children", children)
                .finish(),
            Self::Text(s) => f.debug_tuple("Text").field(s).finish(),
        }
    }
}
