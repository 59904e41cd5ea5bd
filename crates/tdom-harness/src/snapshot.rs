#![forbid(unsafe_code)]

//! Serializable snapshots of forced trees.
//!
//! A snapshot keeps everything structural (tags, property values, listener
//! names, keys, text) and drops the handler closures. Two trees with equal
//! snapshots render to the same markup and listen for the same events.

use serde::{Deserialize, Serialize};
use tdom_render::{Attr, PropertyValue};

use crate::dom::DomNode;
use crate::error::HarnessError;

/// Structural copy of a [`DomNode`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeSnapshot {
    Element {
        tag: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        props: Vec<(String, PropertyValue)>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        events: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSnapshot>,
    },
    Keyed {
        tag: String,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        props: Vec<(String, PropertyValue)>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        events: Vec<String>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<KeyedSnapshot>,
    },
    Text {
        text: String,
    },
}

/// Keyed child in a [`NodeSnapshot::Keyed`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedSnapshot {
    pub key: String,
    pub node: NodeSnapshot,
}

fn split_attrs<Msg>(attrs: &[Attr<Msg>]) -> (Vec<(String, PropertyValue)>, Vec<String>) {
    let mut props = Vec::new();
    let mut events = Vec::new();
    for attr in attrs {
        match attr {
            Attr::Property { key, value } => props.push((key.clone(), value.clone())),
            Attr::Event { name, .. } => events.push(name.clone()),
        }
    }
    (props, events)
}

impl NodeSnapshot {
    /// Capture `node`.
    pub fn from_node<Msg>(node: &DomNode<Msg>) -> Self {
        match node {
            DomNode::Element {
                tag,
                attrs,
                children,
            } => {
                let (props, events) = split_attrs(attrs);
                Self::Element {
                    tag: tag.clone(),
                    props,
                    events,
                    children: children.iter().map(Self::from_node).collect(),
                }
            }
            DomNode::Keyed {
                tag,
                attrs,
                children,
            } => {
                let (props, events) = split_attrs(attrs);
                Self::Keyed {
                    tag: tag.clone(),
                    props,
                    events,
                    children: children
                        .iter()
                        .map(|(key, child)| KeyedSnapshot {
                            key: key.clone(),
                            node: Self::from_node(child),
                        })
                        .collect(),
                }
            }
            DomNode::Text(text) => Self::Text { text: text.clone() },
        }
    }

    /// Compact JSON.
    pub fn to_json(&self) -> Result<String, HarnessError> {
        serde_json::to_string(self).map_err(HarnessError::Json)
    }

    /// Indented JSON, for fixture files.
    pub fn to_json_pretty(&self) -> Result<String, HarnessError> {
        serde_json::to_string_pretty(self).map_err(HarnessError::Json)
    }

    /// Parse JSON produced by [`to_json`](Self::to_json).
    pub fn from_json(s: &str) -> Result<Self, HarnessError> {
        serde_json::from_str(s).map_err(HarnessError::Json)
    }
}
