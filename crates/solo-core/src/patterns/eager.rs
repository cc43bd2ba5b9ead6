//! Eager singletons.
//!
//! [`Eager<T>`] holds a value built in a `const` context, i.e. at the
//! point the `static` is laid out.  There is no lazy step and therefore
//! nothing to lock.  The trade-off is that the payload must be
//! const-constructible and is paid for even if nobody reads it.

use std::fmt;
use std::ops::Deref;

/// A value constructed when its `static` is initialised.
///
/// # Example
/// ```
/// use solo_core::Eager;
///
/// pub struct Limits { pub max_conn: u32 }
/// pub static LIMITS: Eager<Limits> = Eager::new(Limits { max_conn: 64 });
///
/// assert_eq!(LIMITS.get().max_conn, 64);
/// assert!(Eager::ptr_eq(LIMITS.get(), &LIMITS));
/// ```
pub struct Eager<T> {
    value: T,
}

impl<T> Eager<T> {
    /// Wrap an already-built value.
    pub const fn new(value: T) -> Self {
        Self { value }
    }

    /// Borrow the value.  Always succeeds; never blocks.
    pub const fn get(&self) -> &T {
        &self.value
    }

    /// Return `true` if `value` is this holder's payload.
    pub fn ptr_eq(value: &T, this: &Self) -> bool {
        std::ptr::eq(value, &this.value)
    }
}

impl<T> Deref for Eager<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T: fmt::Debug> fmt::Debug for Eager<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Eager").field(&self.value).finish()
    }
}
