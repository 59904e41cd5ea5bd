#![forbid(unsafe_code)]

//! Element constructors.

use tdom_core::{Attribute, Tree};
use tdom_render::Renderer;

/// Element with an arbitrary tag name.
pub fn node<T, Msg: 'static, R: Renderer>(
    tag: impl Into<String>,
    attrs: Vec<Attribute<T, Msg>>,
    children: Vec<Tree<T, Msg, R>>,
) -> Tree<T, Msg, R> {
    Tree::element(tag, attrs, children)
}

/// Text node holding user text. Resolved later, never displayed as-is.
pub fn text<T, Msg: 'static, R: Renderer>(text: T) -> Tree<T, Msg, R> {
    Tree::text(text)
}

/// Embed an already-resolved node, e.g. content with nothing to translate.
pub fn from_core<T, Msg: 'static, R: Renderer>(node: R::Node<Msg>) -> Tree<T, Msg, R> {
    Tree::core(node)
}

macro_rules! elements {
    ($($name:ident),* $(,)?) => {
        $(
            #[doc = concat!("`<", stringify!($name), ">` element.")]
            #[inline]
            pub fn $name<T, Msg: 'static, R: Renderer>(
                attrs: Vec<Attribute<T, Msg>>,
                children: Vec<Tree<T, Msg, R>>,
            ) -> Tree<T, Msg, R> {
                Tree::element(stringify!($name), attrs, children)
            }
        )*
    };
}

// Headers and grouping
elements!(
    h1, h2, h3, h4, h5, h6, div, p, hr, pre, blockquote, span, br, figure, figcaption,
);

// Sectioning
elements!(section, nav, article, aside, header, footer, address, main,);

// Inline text semantics
elements!(
    a, code, em, strong, i, b, u, s, sub, sup, small, cite, dfn, abbr, time, var, samp, kbd, q,
    mark, ruby, rt, rp, bdi, bdo, wbr, ins, del,
);

// Lists
elements!(ol, ul, li, dl, dt, dd,);

// Embedded content
elements!(img, iframe, canvas, math, embed, object, param, audio, video, source, track,);

// Forms
elements!(
    form, input, textarea, button, select, option, optgroup, fieldset, legend, label, datalist,
    output, progress, meter,
);

// Tables
elements!(table, caption, colgroup, col, tbody, thead, tfoot, tr, td, th,);

// Interactive
elements!(details, summary, menuitem, menu,);
