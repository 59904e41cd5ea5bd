#![forbid(unsafe_code)]

//! Memoized subtrees.
//!
//! `lazy(view, a)` builds a [`Tree`] that only runs `view(&a)` when the host
//! renderer decides it has to. At resolution time the node hands the
//! renderer a memo key made of:
//!
//! 1. the address of `view`,
//! 2. the identity of the resolver,
//! 3. the identity of each argument ([`MemoArg`]),
//!
//! and a thunk that runs `view` and resolves the result. If the key matches
//! the one recorded at the same position in the previous pass, the renderer
//! reuses its previous output and `view` is not called.
//!
//! The renderer primitive holds [`MemoKey::MAX_SLOTS`] slots. The view and
//! the resolver take two, which is why the family stops at `lazy6`.
//!
//! # Argument identity
//!
//! Keys compare identity, not contents. `Rc` arguments match only when the
//! same allocation is passed again; small scalars match by value. Allocating
//! a fresh `Rc` on every render makes the memo miss every time. Nothing
//! breaks, the subtree is simply rebuilt on each pass. Keep model data in
//! `Rc`s that survive across passes and pass clones of those.
//!
//! `view` must be a function item or non-capturing closure coerced to a
//! function pointer, so that its address is stable across passes.

use std::rc::Rc;

use tdom_render::{MemoArg, MemoKey, MemoToken, Renderer};

use crate::resolver::Resolver;
use crate::tree::Tree;

macro_rules! lazy_view {
    ($(#[$doc:meta])* $name:ident, $arity:literal, $($arg:ident: $ty:ident),+) => {
        $(#[$doc])*
        pub fn $name<T, Msg, R, $($ty),+>(
            view: fn($(&$ty),+) -> Tree<T, Msg, R>,
            $($arg: $ty),+
        ) -> Tree<T, Msg, R>
        where
            T: 'static,
            Msg: 'static,
            R: Renderer,
            $($ty: MemoArg + Clone + 'static),+
        {
            Tree::deferred(move |resolver: &Resolver<T>| {
                let key = MemoKey::new()
                    .with(MemoToken::Address(view as usize))
                    .with_arg(resolver)
                    $(.with_arg(&$arg))+;
                let resolver = resolver.clone();
                $(let $arg = $arg.clone();)+
                R::memo(
                    key,
                    Rc::new(move || {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(arity = $arity, "evaluating lazy view");
                        view($(&$arg),+).resolve(&resolver)
                    }),
                )
            })
        }
    };
}

lazy_view!(
    /// Memoize `view(&a)`.
    ///
    /// ```ignore
    /// fn row(item: &Rc<Item>) -> Html<Msg> { /* ... */ }
    ///
    /// let cell = lazy(row, Rc::clone(&model.items[0]));
    /// ```
    lazy, 1, a: A
);

lazy_view!(
    /// Memoize `view(&a, &b)`.
    lazy2, 2, a: A, b: B
);

lazy_view!(
    /// Memoize `view(&a, &b, &c)`.
    lazy3, 3, a: A, b: B, c: C
);

lazy_view!(
    /// Memoize `view(&a, &b, &c, &d)`.
    lazy4, 4, a: A, b: B, c: C, d: D
);

lazy_view!(
    /// Memoize `view(&a, &b, &c, &d, &e)`.
    lazy5, 5, a: A, b: B, c: C, d: D, e: E
);

lazy_view!(
    /// Memoize `view(&a, &b, &c, &d, &e, &f)`.
    ///
    /// Uses every slot of the renderer's memo key.
    lazy6, 6, a: A, b: B, c: C, d: D, e: E, f: F
);
