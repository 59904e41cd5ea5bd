#![forbid(unsafe_code)]

//! Identity-based memo keys.
//!
//! A [`MemoKey`] is an ordered list of [`MemoToken`]s, one per memoized
//! argument. Tokens capture *identity*: the address of a shared allocation,
//! or the bits of a small `Copy` value. Two keys are equal when every slot
//! holds the same identity, which is how a renderer decides to skip a thunk.
//!
//! A key also holds a clone of every shared allocation whose address it
//! records. While a renderer keeps a key around, none of those addresses
//! can be freed and handed to a different value.
//!
//! The native primitive accepts at most [`MemoKey::MAX_SLOTS`] slots.

use std::any::Any;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;
use std::sync::Arc;

use smallvec::SmallVec;

const SLOT_CAPACITY: usize = 8;

/// Deferred node construction handed to [`Renderer::memo`](crate::Renderer::memo).
pub type Thunk<N> = Rc<dyn Fn() -> N>;

/// Owned handle keeping the source of an address token alive.
pub type Pin = Rc<dyn Any>;

/// Identity of one memoized argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemoToken {
    /// Address of a shared allocation or function.
    Address(usize),
    /// Bit pattern of a small value compared by value.
    Value(u64),
}

/// Ordered identity key for a memoized node.
///
/// Equality and hashing look at the tokens only.
#[derive(Clone, Default)]
pub struct MemoKey {
    slots: SmallVec<[MemoToken; SLOT_CAPACITY]>,
    pins: SmallVec<[Pin; SLOT_CAPACITY]>,
}

impl MemoKey {
    /// Slot capacity of the native memoization primitive.
    pub const MAX_SLOTS: usize = SLOT_CAPACITY;

    /// Empty key.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a slot.
    ///
    /// Keys past [`MAX_SLOTS`](Self::MAX_SLOTS) are a caller bug; extra
    /// slots are still compared but debug builds assert.
    #[must_use]
    pub fn with(mut self, token: MemoToken) -> Self {
        debug_assert!(
            self.slots.len() < Self::MAX_SLOTS,
            "memo key exceeds {} slots",
            Self::MAX_SLOTS
        );
        self.slots.push(token);
        self
    }

    /// Append the identity of `arg`, pinning its allocation if it has one.
    #[must_use]
    pub fn with_arg<A: MemoArg + ?Sized>(self, arg: &A) -> Self {
        let mut key = self.with(arg.memo_token());
        if let Some(pin) = arg.pin() {
            key.pins.push(pin);
        }
        key
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slot is occupied.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Occupied slots in order.
    pub fn tokens(&self) -> &[MemoToken] {
        &self.slots
    }

    /// Number of allocations this key keeps alive.
    pub fn pinned(&self) -> usize {
        self.pins.len()
    }
}

impl PartialEq for MemoKey {
    fn eq(&self, other: &Self) -> bool {
        self.slots == other.slots
    }
}

impl Eq for MemoKey {}

impl Hash for MemoKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.slots.hash(state);
    }
}

impl fmt::Debug for MemoKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoKey")
            .field("slots", &self.slots)
            .field("pinned", &self.pins.len())
            .finish()
    }
}

/// Values that can sit in a memo slot.
///
/// Shared pointers contribute their address, so a clone of the same `Rc`
/// matches while a freshly allocated equal value does not. Small scalars
/// contribute their value.
pub trait MemoArg {
    fn memo_token(&self) -> MemoToken;

    /// Handle keeping the allocation behind an address token alive.
    ///
    /// Types whose token is an address of memory that can be freed must
    /// return one, otherwise a later allocation may reuse the address.
    fn pin(&self) -> Option<Pin> {
        None
    }
}

impl<T: ?Sized + 'static> MemoArg for Rc<T> {
    fn memo_token(&self) -> MemoToken {
        MemoToken::Address(Rc::as_ptr(self).cast::<()>() as usize)
    }

    fn pin(&self) -> Option<Pin> {
        Some(Rc::new(Rc::clone(self)))
    }
}

impl<T: ?Sized + 'static> MemoArg for Arc<T> {
    fn memo_token(&self) -> MemoToken {
        MemoToken::Address(Arc::as_ptr(self).cast::<()>() as usize)
    }

    fn pin(&self) -> Option<Pin> {
        Some(Rc::new(Arc::clone(self)))
    }
}

impl MemoArg for &'static str {
    fn memo_token(&self) -> MemoToken {
        // Address alone would alias a literal with its own prefix.
        MemoToken::Address(self.as_ptr() as usize ^ self.len().rotate_left(48))
    }
}

macro_rules! scalar_memo_arg {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MemoArg for $ty {
                #[inline]
                fn memo_token(&self) -> MemoToken {
                    MemoToken::Value(*self as u64)
                }
            }
        )*
    };
}

scalar_memo_arg!(u8, u16, u32, u64, usize, i8, i16, i32, i64, isize, bool);

impl MemoArg for char {
    fn memo_token(&self) -> MemoToken {
        MemoToken::Value(u64::from(*self))
    }
}

impl MemoArg for f32 {
    fn memo_token(&self) -> MemoToken {
        MemoToken::Value(u64::from(self.to_bits()))
    }
}

impl MemoArg for f64 {
    fn memo_token(&self) -> MemoToken {
        MemoToken::Value(self.to_bits())
    }
}

impl MemoArg for () {
    fn memo_token(&self) -> MemoToken {
        MemoToken::Value(0)
    }
}
