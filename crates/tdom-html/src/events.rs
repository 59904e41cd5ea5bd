#![forbid(unsafe_code)]

//! Event listeners and payload decoders.
//!
//! Payloads arrive as JSON values shaped like DOM events
//! (`{"target": {"value": ...}, "keyCode": 13, ...}`). Decoders read what
//! they need with JSON pointers and report [`DecodeError`] otherwise; a
//! listener whose decoder fails simply does not fire.

use serde_json::Value;
use tdom_core::Attribute;
use tdom_render::{DecodeError, Handled, Handler};

// ---------------------------------------------------------------------------
// General listeners
// ---------------------------------------------------------------------------

/// Listener producing a message from the event payload.
pub fn on<T, Msg: 'static>(
    event: &str,
    decoder: impl Fn(&Value) -> Result<Msg, DecodeError> + 'static,
) -> Attribute<T, Msg> {
    Attribute::event(event, Handler::normal(decoder))
}

/// Listener whose decoder also decides whether to stop propagation.
pub fn stop_propagation_on<T, Msg: 'static>(
    event: &str,
    decoder: impl Fn(&Value) -> Result<(Msg, bool), DecodeError> + 'static,
) -> Attribute<T, Msg> {
    Attribute::event(
        event,
        Handler::custom(move |payload| {
            let (message, stop) = decoder(payload)?;
            Ok(Handled::new(message).stop_propagation(stop))
        }),
    )
}

/// Listener whose decoder also decides whether to prevent the default action.
pub fn prevent_default_on<T, Msg: 'static>(
    event: &str,
    decoder: impl Fn(&Value) -> Result<(Msg, bool), DecodeError> + 'static,
) -> Attribute<T, Msg> {
    Attribute::event(
        event,
        Handler::custom(move |payload| {
            let (message, prevent) = decoder(payload)?;
            Ok(Handled::new(message).prevent_default(prevent))
        }),
    )
}

/// Listener with full control over the handled record.
pub fn custom<T, Msg: 'static>(
    event: &str,
    decoder: impl Fn(&Value) -> Result<Handled<Msg>, DecodeError> + 'static,
) -> Attribute<T, Msg> {
    Attribute::event(event, Handler::custom(decoder))
}

// ---------------------------------------------------------------------------
// Mouse and focus
// ---------------------------------------------------------------------------

macro_rules! message_events {
    ($($name:ident => $event:literal),* $(,)?) => {
        $(
            #[doc = concat!("`", $event, "` listener sending a fixed message.")]
            pub fn $name<T, Msg: Clone + 'static>(msg: Msg) -> Attribute<T, Msg> {
                Attribute::event($event, Handler::message(msg))
            }
        )*
    };
}

message_events!(
    on_click => "click",
    on_double_click => "dblclick",
    on_mouse_down => "mousedown",
    on_mouse_up => "mouseup",
    on_mouse_enter => "mouseenter",
    on_mouse_leave => "mouseleave",
    on_mouse_over => "mouseover",
    on_mouse_out => "mouseout",
    on_blur => "blur",
    on_focus => "focus",
);

// ---------------------------------------------------------------------------
// Forms
// ---------------------------------------------------------------------------

/// `input` listener receiving `event.target.value`.
///
/// Always stops propagation, so nested inputs do not trigger outer ones.
pub fn on_input<T, Msg: 'static>(tagger: impl Fn(String) -> Msg + 'static) -> Attribute<T, Msg> {
    stop_propagation_on("input", move |event| Ok((tagger(target_value(event)?), true)))
}

/// `change` listener receiving `event.target.checked`.
pub fn on_check<T, Msg: 'static>(tagger: impl Fn(bool) -> Msg + 'static) -> Attribute<T, Msg> {
    on("change", move |event| Ok(tagger(target_checked(event)?)))
}

/// `submit` listener. Always prevents the default form submission.
pub fn on_submit<T, Msg: Clone + 'static>(msg: Msg) -> Attribute<T, Msg> {
    prevent_default_on("submit", move |_| Ok((msg.clone(), true)))
}

// ---------------------------------------------------------------------------
// Decoders
// ---------------------------------------------------------------------------

/// Look up `pointer` in the payload.
pub fn field<'a>(event: &'a Value, pointer: &str) -> Result<&'a Value, DecodeError> {
    event
        .pointer(pointer)
        .ok_or_else(|| DecodeError::MissingField(pointer.to_string()))
}

/// String at `pointer`.
pub fn string_at(event: &Value, pointer: &str) -> Result<String, DecodeError> {
    field(event, pointer)?
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| DecodeError::WrongType {
            path: pointer.to_string(),
            expected: "string",
        })
}

/// Boolean at `pointer`.
pub fn bool_at(event: &Value, pointer: &str) -> Result<bool, DecodeError> {
    field(event, pointer)?
        .as_bool()
        .ok_or_else(|| DecodeError::WrongType {
            path: pointer.to_string(),
            expected: "bool",
        })
}

/// Integer at `pointer`.
pub fn int_at(event: &Value, pointer: &str) -> Result<i64, DecodeError> {
    field(event, pointer)?
        .as_i64()
        .ok_or_else(|| DecodeError::WrongType {
            path: pointer.to_string(),
            expected: "integer",
        })
}

/// `event.target.value`.
pub fn target_value(event: &Value) -> Result<String, DecodeError> {
    string_at(event, "/target/value")
}

/// `event.target.checked`.
pub fn target_checked(event: &Value) -> Result<bool, DecodeError> {
    bool_at(event, "/target/checked")
}

/// `event.keyCode`.
pub fn key_code(event: &Value) -> Result<i64, DecodeError> {
    int_at(event, "/keyCode")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{button, div, form, input};
    use serde_json::json;
    use tdom_core::{Resolver, Tree};
    use tdom_harness::{Session, VirtualDom};

    #[derive(Debug, Clone, PartialEq)]
    enum Msg {
        Clicked,
        Typed(String),
        Toggled(bool),
        Submitted,
        Key(i64),
    }

    fn render(tree: Tree<String, Msg, VirtualDom>) -> tdom_harness::Rendered<Msg> {
        let resolver = Resolver::new(|s: &String| s.clone());
        Session::new().render(tree.resolve(&resolver))
    }

    #[test]
    fn on_click_sends_fixed_message() {
        let rendered = render(button(vec![on_click(Msg::Clicked)], vec![]));
        let handled = rendered.dispatch("click", &Value::Null);
        assert_eq!(handled.len(), 1);
        assert_eq!(handled[0].message, Msg::Clicked);
        assert!(!handled[0].stop_propagation);
    }

    #[test]
    fn on_input_reads_target_value_and_stops() {
        let rendered = render(input(vec![on_input(Msg::Typed)], vec![]));
        let handled = rendered.dispatch("input", &json!({"target": {"value": "héllo"}}));
        assert_eq!(handled[0].message, Msg::Typed("héllo".into()));
        assert!(handled[0].stop_propagation);
        assert!(!handled[0].prevent_default);
    }

    #[test]
    fn on_check_reads_target_checked() {
        let rendered = render(input(vec![on_check(Msg::Toggled)], vec![]));
        let handled = rendered.dispatch("change", &json!({"target": {"checked": true}}));
        assert_eq!(handled[0].message, Msg::Toggled(true));
    }

    #[test]
    fn on_submit_prevents_default() {
        let rendered = render(form(vec![on_submit(Msg::Submitted)], vec![]));
        let handled = rendered.dispatch("submit", &Value::Null);
        assert_eq!(handled[0].message, Msg::Submitted);
        assert!(handled[0].prevent_default);
    }

    #[test]
    fn failed_decoders_do_not_fire() {
        let rendered = render(input(vec![on_input(Msg::Typed)], vec![]));
        assert!(rendered.dispatch("input", &json!({"target": {}})).is_empty());
    }

    #[test]
    fn custom_on_with_key_code() {
        let rendered = render(div(
            vec![on("keydown", |e| key_code(e).map(Msg::Key))],
            vec![],
        ));
        let handled = rendered.dispatch("keydown", &json!({"keyCode": 13}));
        assert_eq!(handled[0].message, Msg::Key(13));
    }

    #[test]
    fn decoder_errors_name_the_pointer() {
        let payload = json!({"target": {"value": 3}});
        assert_eq!(
            target_value(&payload),
            Err(DecodeError::WrongType {
                path: "/target/value".into(),
                expected: "string",
            })
        );
        assert_eq!(
            target_checked(&json!({})),
            Err(DecodeError::MissingField("/target/checked".into()))
        );
    }

    #[test]
    fn custom_sets_both_flags() {
        let rendered = render(div(
            vec![custom("wheel", |_| {
                Ok(Handled::new(Msg::Clicked)
                    .stop_propagation(true)
                    .prevent_default(true))
            })],
            vec![],
        ));
        let handled = rendered.dispatch("wheel", &Value::Null);
        assert!(handled[0].stop_propagation && handled[0].prevent_default);
    }
}
