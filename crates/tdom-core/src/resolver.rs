#![forbid(unsafe_code)]

//! The resolver: the single place user text becomes display text.

use std::fmt;
use std::rc::Rc;

use tdom_render::{MemoArg, MemoToken, Pin};

/// Application-supplied function from user text to a display string.
///
/// Resolvers are shared handles. Memoized nodes record the resolver's
/// identity in their memo key, so keep one resolver alive across render
/// passes (switch it only when the language actually changes) to let the
/// renderer skip unchanged lazy subtrees.
pub struct Resolver<T> {
    resolve: Rc<dyn Fn(&T) -> String>,
}

impl<T> Resolver<T> {
    /// Wrap a resolving function.
    pub fn new(resolve: impl Fn(&T) -> String + 'static) -> Self {
        Self {
            resolve: Rc::new(resolve),
        }
    }

    /// Resolve one piece of user text.
    #[inline]
    pub fn resolve(&self, text: &T) -> String {
        (self.resolve)(text)
    }

    /// Whether both handles share the same function.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.resolve, &other.resolve)
    }
}

impl<T> Clone for Resolver<T> {
    fn clone(&self) -> Self {
        Self {
            resolve: Rc::clone(&self.resolve),
        }
    }
}

impl<T: 'static> MemoArg for Resolver<T> {
    fn memo_token(&self) -> MemoToken {
        self.resolve.memo_token()
    }

    fn pin(&self) -> Option<Pin> {
        self.resolve.pin()
    }
}

impl<T> fmt::Debug for Resolver<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Resolver(..)")
    }
}
