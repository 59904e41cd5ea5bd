#![forbid(unsafe_code)]

//! HTML serialization of forced trees.
//!
//! Attribute rules:
//!
//! - keys are printed as given, in first-occurrence order
//! - repeated `class` values are joined with a space, repeated `style`
//!   values with `"; "`; any other repeated key keeps its last value
//! - `true` prints the bare key, `false` and null omit the attribute
//! - event listeners never appear in markup
//!
//! Void elements (`br`, `input`, ...) print no closing tag and no children.

use std::fmt::Write as _;

use tdom_render::{Attr, PropertyValue};

use crate::config::MarkupConfig;
use crate::dom::DomNode;

/// Elements that never have content or a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Whether `tag` is a void element.
pub fn is_void(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// Escape text content.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape a double-quoted attribute value.
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Serialize `node` to HTML.
pub fn to_markup<Msg>(node: &DomNode<Msg>, config: &MarkupConfig) -> String {
    let mut out = String::new();
    write_node(&mut out, node, config, 0);
    if config.pretty && out.ends_with('\n') {
        out.pop();
    }
    out
}

/// Property attributes after merging, in first-occurrence order.
///
/// Omitted attributes (`false`, null) are already filtered out; `None`
/// values are bare boolean attributes.
pub fn merged_attributes<Msg>(attrs: &[Attr<Msg>]) -> Vec<(String, Option<String>)> {
    let mut merged: Vec<(&str, PropertyValue)> = Vec::new();
    for attr in attrs {
        let Attr::Property { key, value } = attr else {
            continue;
        };
        match merged.iter_mut().find(|(k, _)| *k == key.as_str()) {
            Some((k, slot)) => {
                let current = std::mem::take(slot);
                *slot = match (list_separator(*k), current, value) {
                    (Some(sep), PropertyValue::Str(a), PropertyValue::Str(b)) => {
                        PropertyValue::Str(join_list(&a, b, sep))
                    }
                    _ => value.clone(),
                };
            }
            None => merged.push((key.as_str(), value.clone())),
        }
    }

    merged
        .into_iter()
        .filter_map(|(key, value)| match value {
            PropertyValue::Null | PropertyValue::Bool(false) => None,
            PropertyValue::Bool(true) => Some((key.to_string(), None)),
            other => Some((key.to_string(), Some(other.to_string()))),
        })
        .collect()
}

fn list_separator(key: &str) -> Option<&'static str> {
    match key {
        "class" => Some(" "),
        "style" => Some("; "),
        _ => None,
    }
}

fn join_list(a: &str, b: &str, sep: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (true, _) => b.to_string(),
        (_, true) => a.to_string(),
        _ => format!("{a}{sep}{b}"),
    }
}

fn write_open_tag<Msg>(out: &mut String, tag: &str, attrs: &[Attr<Msg>]) {
    out.push('<');
    out.push_str(tag);
    for (key, value) in merged_attributes(attrs) {
        out.push(' ');
        out.push_str(&key);
        if let Some(value) = value {
            let _ = write!(out, "=\"{}\"", escape_attr(&value));
        }
    }
    out.push('>');
}

fn indent(out: &mut String, config: &MarkupConfig, depth: usize) {
    if config.pretty {
        out.extend(std::iter::repeat_n(' ', config.indent * depth));
    }
}

fn newline(out: &mut String, config: &MarkupConfig) {
    if config.pretty {
        out.push('\n');
    }
}

fn write_node<Msg>(out: &mut String, node: &DomNode<Msg>, config: &MarkupConfig, depth: usize) {
    match node {
        DomNode::Text(s) => {
            indent(out, config, depth);
            out.push_str(&escape_text(s));
            newline(out, config);
        }
        DomNode::Element { tag, attrs, .. } | DomNode::Keyed { tag, attrs, .. } => {
            indent(out, config, depth);
            write_open_tag(out, tag, attrs);
            if is_void(tag) {
                newline(out, config);
                return;
            }
            let children = node.children();
            if !children.is_empty() {
                newline(out, config);
                for child in children {
                    write_node(out, child, config, depth + 1);
                }
                indent(out, config, depth);
            }
            let _ = write!(out, "</{tag}>");
            newline(out, config);
        }
    }
}
