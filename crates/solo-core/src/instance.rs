//! `Instance<T>` — the shared, non-owning handle to a guarded value.
//!
//! Callers never hold the payload by value.  They receive an `Instance<T>`,
//! a reference-counted pointer to the payload owned by its
//! [`SingletonCell`][crate::cell::SingletonCell].  Handles can only be
//! minted by the cell, and cloning one yields the very same reference, so
//! the copy bypass never produces a second payload.
//!
//! | bypass | outcome |
//! |--------|---------|
//! | `instance.clone()` | same reference |
//! | serialize + deserialize | same reference (see [`Singleton::resolve`][crate::Singleton::resolve]) |
//! | privileged construction | rejected or redirected by the cell's policy |

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

/// A shared reference to the unique value of type `T`.
pub struct Instance<T> {
    inner: Arc<T>,
}

impl<T> Instance<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Arc::new(value),
        }
    }

    /// Return `true` if both handles refer to the same payload.
    ///
    /// This is the identity comparison; two distinct payloads with equal
    /// contents compare `false`.
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        Arc::ptr_eq(&this.inner, &other.inner)
    }

    /// Address of the payload, for logging and identity checks.
    pub fn as_ptr(this: &Self) -> *const T {
        Arc::as_ptr(&this.inner)
    }

    /// Number of live handles, including the one held by the cell.
    pub fn handle_count(this: &Self) -> usize {
        Arc::strong_count(&this.inner)
    }
}

impl<T> Clone for Instance<T> {
    /// Duplicating a handle never duplicates the payload.
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T> Deref for Instance<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.inner
    }
}

impl<T> AsRef<T> for Instance<T> {
    fn as_ref(&self) -> &T {
        &self.inner
    }
}

impl<T: fmt::Debug> fmt::Debug for Instance<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Instance({:?} @ {:p})", self.inner, Arc::as_ptr(&self.inner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Payload {
        id: u32,
    }

    #[test]
    fn clone_is_same_reference() {
        let a = Instance::new(Payload { id: 7 });
        let b = a.clone();
        assert!(Instance::ptr_eq(&a, &b));
        assert_eq!(Instance::as_ptr(&a), Instance::as_ptr(&b));
        assert_eq!(Instance::handle_count(&a), 2);
    }

    #[test]
    fn equal_contents_are_not_identical() {
        let a = Instance::new(Payload { id: 1 });
        let b = Instance::new(Payload { id: 1 });
        assert_eq!(*a, *b);
        assert!(!Instance::ptr_eq(&a, &b));
    }

    #[test]
    fn deref_reaches_payload() {
        let a = Instance::new(Payload { id: 3 });
        assert_eq!(a.id, 3);
        assert_eq!(a.as_ref().id, 3);
        assert!(format!("{a:?}").starts_with("Instance(Payload { id: 3 } @ "));
    }
}
