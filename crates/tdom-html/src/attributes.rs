#![forbid(unsafe_code)]

//! Attribute constructors.
//!
//! Attributes that display text to the user (`title`, `placeholder`, `alt`,
//! `aria-label`) take user text and are resolved with the rest of the tree.
//! Everything else is static data.

use tdom_core::{Attribute, Resolver};
use tdom_render::PropertyValue;

/// Arbitrary static attribute.
pub fn attribute<T, Msg>(key: impl Into<String>, value: impl Into<String>) -> Attribute<T, Msg> {
    Attribute::static_value(key, value.into())
}

/// Arbitrary static property with a non-string value.
pub fn property<T, Msg>(
    key: impl Into<String>,
    value: impl Into<PropertyValue>,
) -> Attribute<T, Msg> {
    Attribute::static_value(key, value)
}

/// Arbitrary property computed from the resolver.
pub fn translatable<T, Msg>(
    key: impl Into<String>,
    value: impl Fn(&Resolver<T>) -> PropertyValue + 'static,
) -> Attribute<T, Msg> {
    Attribute::translatable(key, value)
}

/// Arbitrary attribute holding one piece of user text.
pub fn text_attribute<T: 'static, Msg>(key: impl Into<String>, text: T) -> Attribute<T, Msg> {
    Attribute::text(key, text)
}

/// A single inline style declaration. Several `style` attributes on one
/// element are joined by the renderer.
pub fn style<T, Msg>(name: &str, value: &str) -> Attribute<T, Msg> {
    Attribute::static_value("style", format!("{name}: {value}"))
}

/// `class` built from the names whose flag is set.
pub fn class_list<T, Msg>(classes: &[(&str, bool)]) -> Attribute<T, Msg> {
    let names: Vec<&str> = classes
        .iter()
        .filter(|(_, on)| *on)
        .map(|(name, _)| *name)
        .collect();
    Attribute::static_value("class", names.join(" "))
}

macro_rules! translatable_attributes {
    ($($name:ident => $key:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $key, "` attribute holding user text.")]
            pub fn $name<T: 'static, Msg>(text: T) -> Attribute<T, Msg> {
                Attribute::text($key, text)
            }
        )*
    };
}

translatable_attributes!(
    title => "title",
    placeholder => "placeholder",
    alt => "alt",
    aria_label => "aria-label",
    aria_description => "aria-description",
);

macro_rules! string_attributes {
    ($($name:ident => $key:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $key, "` attribute.")]
            pub fn $name<T, Msg>(value: impl Into<String>) -> Attribute<T, Msg> {
                Attribute::static_value($key, value.into())
            }
        )*
    };
}

string_attributes!(
    id => "id",
    class => "class",
    href => "href",
    src => "src",
    name => "name",
    value => "value",
    type_ => "type",
    for_ => "for",
    rel => "rel",
    target => "target",
    lang => "lang",
    dir => "dir",
    accept => "accept",
    accept_charset => "accept-charset",
    action => "action",
    method => "method",
    enctype => "enctype",
    autocomplete => "autocomplete",
    pattern => "pattern",
    min => "min",
    max => "max",
    step => "step",
    download => "download",
    hreflang => "hreflang",
    media => "media",
    ping => "ping",
    kind => "kind",
    srclang => "srclang",
    headers => "headers",
    scope => "scope",
    wrap => "wrap",
    form => "form",
    list => "list",
    shape => "shape",
    coords => "coords",
    usemap => "usemap",
    datetime => "datetime",
    cite => "cite",
    accesskey => "accesskey",
    poster => "poster",
    preload => "preload",
    sandbox => "sandbox",
    srcdoc => "srcdoc",
    role => "role",
);

macro_rules! bool_attributes {
    ($($name:ident => $key:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $key, "` boolean property.")]
            pub fn $name<T, Msg>(on: bool) -> Attribute<T, Msg> {
                Attribute::static_value($key, on)
            }
        )*
    };
}

bool_attributes!(
    hidden => "hidden",
    checked => "checked",
    selected => "selected",
    disabled => "disabled",
    readonly => "readonly",
    required => "required",
    multiple => "multiple",
    autofocus => "autofocus",
    autoplay => "autoplay",
    controls => "controls",
    loop_ => "loop",
    default_ => "default",
    novalidate => "novalidate",
    reversed => "reversed",
    ismap => "ismap",
);

// Enumerated attributes: absence means "inherit", not "false".
macro_rules! enumerated_bool_attributes {
    ($($name:ident => $key:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $key, "` enumerated attribute, rendered as `\"true\"` or `\"false\"`.")]
            pub fn $name<T, Msg>(on: bool) -> Attribute<T, Msg> {
                Attribute::static_value($key, if on { "true" } else { "false" })
            }
        )*
    };
}

enumerated_bool_attributes!(
    draggable => "draggable",
    spellcheck => "spellcheck",
    contenteditable => "contenteditable",
);

macro_rules! int_attributes {
    ($($name:ident => $key:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $key, "` numeric property.")]
            pub fn $name<T, Msg>(n: i64) -> Attribute<T, Msg> {
                Attribute::static_value($key, n)
            }
        )*
    };
}

int_attributes!(
    maxlength => "maxlength",
    minlength => "minlength",
    size => "size",
    cols => "cols",
    rows => "rows",
    colspan => "colspan",
    rowspan => "rowspan",
    tabindex => "tabindex",
    start => "start",
    width => "width",
    height => "height",
);
