#![forbid(unsafe_code)]
#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tdom_core::{Attribute, Resolver, Tree, lazy};
use tdom_harness::{HarnessConfig, Session, VirtualDom};
use tdom_render::Handler;

type Html = Tree<u8, u8, VirtualDom>;

#[derive(Debug, Arbitrary)]
enum Shape {
    Text(u8),
    Raw(String),
    Lazy(u8),
    Element(u8, Vec<(String, u8)>, Vec<Shape>),
    Keyed(Vec<(String, Shape)>),
}

#[derive(Debug, Arbitrary)]
struct Input {
    max_depth: u8,
    pretty: bool,
    tree: Shape,
}

const TAGS: [&str; 4] = ["div", "span", "br", "p"];

fn cell(n: &u8) -> Html {
    Tree::element("b", vec![], vec![Tree::text(*n)])
}

fn build(shape: &Shape) -> Html {
    match shape {
        Shape::Text(u) => Tree::text(*u),
        Shape::Raw(s) => Tree::core(VirtualDom::text_node(s.clone())),
        Shape::Lazy(n) => lazy(cell, *n),
        Shape::Element(tag, attrs, children) => Tree::element(
            TAGS[usize::from(*tag) % TAGS.len()],
            attrs
                .iter()
                .map(|(k, m)| {
                    if k.is_empty() {
                        Attribute::event("click", Handler::message(*m))
                    } else {
                        Attribute::static_value(k.clone(), k.clone())
                    }
                })
                .collect(),
            children.iter().map(build).collect(),
        ),
        Shape::Keyed(children) => Tree::keyed(
            "ul",
            vec![],
            children.iter().map(|(k, c)| (k.clone(), build(c))).collect(),
        ),
    }
}

fuzz_target!(|input: Input| {
    let mut config = HarnessConfig {
        max_depth: usize::from(input.max_depth).max(1),
        ..HarnessConfig::default()
    };
    config.markup.pretty = input.pretty;
    let Ok(mut session) = Session::with_config(config) else {
        return;
    };
    let resolver = Resolver::new(|u: &u8| format!("<{u}>"));

    let first = session.render(build(&input.tree).resolve(&resolver));
    let second = session.render(build(&input.tree).resolve(&resolver));

    // Rendering is deterministic and memo reuse does not change output.
    assert_eq!(first.to_markup(), second.to_markup());
    assert_eq!(first.checksum(), second.checksum());
    assert_eq!(first.root().node_count(), second.root().node_count());
    assert!(first.checksum().starts_with("blake3:"));

    let json = first.snapshot().to_json();
    assert!(json.is_ok());
});
