#![forbid(unsafe_code)]

//! Minimal renderer for unit tests: eager, records memo keys, prints shapes.

use std::fmt::Write as _;

use tdom_render::{Attr, Handler, MemoKey, Renderer, Tagger, Thunk};

pub(crate) struct Recorder;

pub(crate) enum RecordedNode<Msg> {
    Element {
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<RecordedNode<Msg>>,
    },
    Keyed {
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<(String, RecordedNode<Msg>)>,
    },
    Text(String),
    Memo {
        key: MemoKey,
        inner: Box<RecordedNode<Msg>>,
    },
}

fn props<Msg>(attrs: Vec<(&str, &str)>) -> Vec<Attr<Msg>> {
    attrs
        .into_iter()
        .map(|(k, v)| Attr::property(k, v))
        .collect()
}

impl<Msg> RecordedNode<Msg> {
    pub(crate) fn text(content: &str) -> Self {
        Self::Text(content.to_string())
    }

    pub(crate) fn element(tag: &str, attrs: Vec<(&str, &str)>, children: Vec<Self>) -> Self {
        Self::element_with(tag, props(attrs), children)
    }

    pub(crate) fn element_with(tag: &str, attrs: Vec<Attr<Msg>>, children: Vec<Self>) -> Self {
        Self::Element {
            tag: tag.to_string(),
            attrs,
            children,
        }
    }

    pub(crate) fn keyed(tag: &str, attrs: Vec<(&str, &str)>, children: Vec<(&str, Self)>) -> Self {
        Self::Keyed {
            tag: tag.to_string(),
            attrs: props(attrs),
            children: children
                .into_iter()
                .map(|(k, c)| (k.to_string(), c))
                .collect(),
        }
    }

    /// Structural rendering without handlers, comparable across message types.
    pub(crate) fn shape(&self) -> String {
        let mut out = String::new();
        self.write_shape(&mut out);
        out
    }

    fn write_shape(&self, out: &mut String) {
        match self {
            Self::Element {
                tag,
                attrs,
                children,
            } => {
                write_head(out, tag, attrs);
                out.push('{');
                for child in children {
                    child.write_shape(out);
                    out.push(',');
                }
                out.push('}');
            }
            Self::Keyed {
                tag,
                attrs,
                children,
            } => {
                write_head(out, tag, attrs);
                out.push_str("#{");
                for (key, child) in children {
                    let _ = write!(out, "{key}:");
                    child.write_shape(out);
                    out.push(',');
                }
                out.push('}');
            }
            Self::Text(s) => {
                let _ = write!(out, "{s:?}");
            }
            Self::Memo { key, inner } => {
                let _ = write!(out, "memo/{}(", key.len());
                inner.write_shape(out);
                out.push(')');
            }
        }
    }

    /// All handlers in document order.
    pub(crate) fn handlers(&self) -> Vec<Handler<Msg>> {
        let mut out = Vec::new();
        self.collect_handlers(&mut out);
        out
    }

    fn collect_handlers(&self, out: &mut Vec<Handler<Msg>>) {
        let own = |attrs: &Vec<Attr<Msg>>, out: &mut Vec<Handler<Msg>>| {
            for attr in attrs {
                if let Attr::Event { handler, .. } = attr {
                    out.push(handler.clone());
                }
            }
        };
        match self {
            Self::Element {
                attrs, children, ..
            } => {
                own(attrs, out);
                for child in children {
                    child.collect_handlers(out);
                }
            }
            Self::Keyed {
                attrs, children, ..
            } => {
                own(attrs, out);
                for (_, child) in children {
                    child.collect_handlers(out);
                }
            }
            Self::Text(_) => {}
            Self::Memo { inner, .. } => inner.collect_handlers(out),
        }
    }

    /// Keys of a keyed node's children.
    pub(crate) fn keys(&self) -> Vec<&str> {
        match self {
            Self::Keyed { children, .. } => children.iter().map(|(k, _)| k.as_str()).collect(),
            _ => Vec::new(),
        }
    }

    /// Memo key of a memo node.
    pub(crate) fn memo_key(&self) -> Option<&MemoKey> {
        match self {
            Self::Memo { key, .. } => Some(key),
            _ => None,
        }
    }
}

fn write_head<Msg>(out: &mut String, tag: &str, attrs: &[Attr<Msg>]) {
    out.push_str(tag);
    out.push('[');
    for attr in attrs {
        match attr {
            Attr::Property { key, value } => {
                let _ = write!(out, "{key}={value};");
            }
            Attr::Event { name, .. } => {
                let _ = write!(out, "@{name};");
            }
        }
    }
    out.push(']');
}

fn map_node<A: 'static, B: 'static>(tagger: &Tagger<A, B>, node: RecordedNode<A>) -> RecordedNode<B> {
    match node {
        RecordedNode::Element {
            tag,
            attrs,
            children,
        } => RecordedNode::Element {
            tag,
            attrs: attrs.into_iter().map(|a| a.map(tagger)).collect(),
            children: children.into_iter().map(|c| map_node(tagger, c)).collect(),
        },
        RecordedNode::Keyed {
            tag,
            attrs,
            children,
        } => RecordedNode::Keyed {
            tag,
            attrs: attrs.into_iter().map(|a| a.map(tagger)).collect(),
            children: children
                .into_iter()
                .map(|(k, c)| (k, map_node(tagger, c)))
                .collect(),
        },
        RecordedNode::Text(s) => RecordedNode::Text(s),
        RecordedNode::Memo { key, inner } => RecordedNode::Memo {
            key,
            inner: Box::new(map_node(tagger, *inner)),
        },
    }
}

impl Renderer for Recorder {
    type Node<Msg: 'static> = RecordedNode<Msg>;

    fn element<Msg: 'static>(
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<RecordedNode<Msg>>,
    ) -> RecordedNode<Msg> {
        RecordedNode::Element {
            tag,
            attrs,
            children,
        }
    }

    fn keyed_element<Msg: 'static>(
        tag: String,
        attrs: Vec<Attr<Msg>>,
        children: Vec<(String, RecordedNode<Msg>)>,
    ) -> RecordedNode<Msg> {
        RecordedNode::Keyed {
            tag,
            attrs,
            children,
        }
    }

    fn text<Msg: 'static>(content: String) -> RecordedNode<Msg> {
        RecordedNode::Text(content)
    }

    fn memo<Msg: 'static>(key: MemoKey, thunk: Thunk<RecordedNode<Msg>>) -> RecordedNode<Msg> {
        RecordedNode::Memo {
            key,
            inner: Box::new(thunk()),
        }
    }

    fn map<A: 'static, B: 'static>(tagger: Tagger<A, B>, node: RecordedNode<A>) -> RecordedNode<B> {
        map_node(&tagger, node)
    }
}
