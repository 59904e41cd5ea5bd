#![forbid(unsafe_code)]

//! Event handlers and the decoding contract they follow.
//!
//! A [`Handler`] turns an event payload (a JSON value, as delivered by the
//! host) into a [`Handled`] record: the message to dispatch plus the
//! propagation and default-action flags. Decoding may fail; hosts treat a
//! failed decode as "this listener does not apply" and move on.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// Message rewriting function shared across a remapped subtree.
pub type Tagger<A, B> = Rc<dyn Fn(A) -> B>;

/// Outcome of decoding an event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Handled<Msg> {
    pub message: Msg,
    pub stop_propagation: bool,
    pub prevent_default: bool,
}

impl<Msg> Handled<Msg> {
    /// A plain message: propagation and default action untouched.
    pub fn new(message: Msg) -> Self {
        Self {
            message,
            stop_propagation: false,
            prevent_default: false,
        }
    }

    /// Set the stop-propagation flag.
    pub fn stop_propagation(mut self, stop: bool) -> Self {
        self.stop_propagation = stop;
        self
    }

    /// Set the prevent-default flag.
    pub fn prevent_default(mut self, prevent: bool) -> Self {
        self.prevent_default = prevent;
        self
    }

    /// Rewrite the message, keeping both flags.
    pub fn map<B>(self, f: impl FnOnce(Msg) -> B) -> Handled<B> {
        Handled {
            message: f(self.message),
            stop_propagation: self.stop_propagation,
            prevent_default: self.prevent_default,
        }
    }
}

/// Errors raised while decoding an event payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A required field was absent. Holds the JSON pointer that was looked up.
    MissingField(String),
    /// A field was present with the wrong JSON type.
    WrongType {
        path: String,
        expected: &'static str,
    },
    /// Decoder-specific failure.
    Failure(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(path) => write!(f, "missing field at {path}"),
            Self::WrongType { path, expected } => {
                write!(f, "expected {expected} at {path}")
            }
            Self::Failure(msg) => write!(f, "decode failed: {msg}"),
        }
    }
}

impl std::error::Error for DecodeError {}

type DecodeFn<Msg> = dyn Fn(&Value) -> Result<Handled<Msg>, DecodeError>;

/// An event decoder producing messages of type `Msg`.
///
/// Cloning is cheap (shared closure).
pub struct Handler<Msg> {
    decode: Rc<DecodeFn<Msg>>,
}

impl<Msg> Handler<Msg> {
    /// Handler from a full decoder, controlling both flags.
    pub fn custom(decode: impl Fn(&Value) -> Result<Handled<Msg>, DecodeError> + 'static) -> Self {
        Self {
            decode: Rc::new(decode),
        }
    }

    /// Handler whose decoder only yields a message.
    pub fn normal(decode: impl Fn(&Value) -> Result<Msg, DecodeError> + 'static) -> Self {
        Self::custom(move |event| decode(event).map(Handled::new))
    }

    /// Handler that always yields a clone of `message`, ignoring the payload.
    pub fn message(message: Msg) -> Self
    where
        Msg: Clone + 'static,
    {
        Self::custom(move |_| Ok(Handled::new(message.clone())))
    }

    /// Decode an event payload.
    pub fn decode(&self, event: &Value) -> Result<Handled<Msg>, DecodeError> {
        (self.decode)(event)
    }

    /// Identity of the shared decoder closure.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.decode, &other.decode)
    }
}

impl<Msg: 'static> Handler<Msg> {
    /// Compose the decoder with `tagger`. Flags are preserved.
    pub fn map<B: 'static>(self, tagger: Tagger<Msg, B>) -> Handler<B> {
        let decode = self.decode;
        Handler::custom(move |event| decode(event).map(|handled| handled.map(&*tagger)))
    }
}

impl<Msg> Clone for Handler<Msg> {
    fn clone(&self) -> Self {
        Self {
            decode: Rc::clone(&self.decode),
        }
    }
}

impl<Msg> fmt::Debug for Handler<Msg> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler(..)")
    }
}
