//! `SingletonCell<T>` — the process-wide gate for one guarded value.
//!
//! The cell implements double-checked guarded initialization:
//!
//! 1. **Fast path.**  Read the published [`Instance`] without locking.  The
//!    read is a single acquire load inside `OnceLock::get`.
//! 2. **Slow path.**  Take the cell's mutex, check again (another thread may
//!    have finished while we waited), then build, publish, and set the
//!    one-shot flag.
//!
//! Publication happens through `OnceLock`, whose release store guarantees
//! that no thread on the fast path can observe a partially-built payload.
//!
//! A failed or panicking constructor leaves the cell empty.  The mutex is a
//! `parking_lot` mutex, which does not poison, so the next access simply
//! retries.
//!
//! [`construct`][SingletonCell::construct] is the privileged constructor.
//! Once the one-shot flag is set it either fails with
//! [`Error::ReentrantConstruction`] or hands back the canonical instance,
//! depending on the cell's [`ConstructionPolicy`].

use std::any::type_name;
use std::convert::Infallible;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use parking_lot::{const_mutex, Mutex};
use tracing::{debug, trace, warn};

use crate::errors::{Error, Result};
use crate::instance::Instance;
use crate::registry::{Event, Registry};

/// What [`SingletonCell::construct`] does once the instance already exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConstructionPolicy {
    /// Fail with [`Error::ReentrantConstruction`].
    #[default]
    Reject,
    /// Return the canonical instance.
    Redirect,
}

/// Holder of at most one value of type `T`.
///
/// Cells are normally declared as `static` items (see
/// [`singleton!`][crate::singleton]), which makes the guarded value live
/// for the rest of the process.  There is no teardown.
pub struct SingletonCell<T> {
    value: OnceLock<Instance<T>>,
    created: AtomicBool,
    lock: Mutex<()>,
    policy: ConstructionPolicy,
}

impl<T> SingletonCell<T> {
    /// An empty cell that rejects privileged re-construction.
    pub const fn new() -> Self {
        Self::with_policy(ConstructionPolicy::Reject)
    }

    /// An empty cell with the given privileged-construction policy.
    pub const fn with_policy(policy: ConstructionPolicy) -> Self {
        Self {
            value: OnceLock::new(),
            created: AtomicBool::new(false),
            lock: const_mutex(()),
            policy,
        }
    }

    /// The policy applied by [`construct`][Self::construct].
    pub fn policy(&self) -> ConstructionPolicy {
        self.policy
    }

    /// The published instance, or `None` before first creation.
    ///
    /// Never blocks.
    pub fn get(&self) -> Option<&Instance<T>> {
        self.value.get()
    }

    /// Return `true` once the one-shot flag is set.
    pub fn is_initialized(&self) -> bool {
        self.created.load(Ordering::Acquire)
    }

    /// Return the shared instance, building it with `init` on first call.
    ///
    /// Exactly one call of `init` happens even when many threads race on an
    /// empty cell.  If `init` panics the cell stays empty and the panic is
    /// propagated.
    pub fn get_or_init<F>(&self, init: F) -> &Instance<T>
    where
        F: FnOnce() -> T,
    {
        match self.get_or_try_init(|| Ok::<T, Infallible>(init())) {
            Ok(instance) => instance,
            Err(never) => match never {},
        }
    }

    /// Fallible variant of [`get_or_init`][Self::get_or_init].
    ///
    /// An error from `init` is returned to this caller only; nothing is
    /// cached, and the next call runs `init` again.
    pub fn get_or_try_init<F, E>(&self, init: F) -> Result<&Instance<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        if let Some(instance) = self.value.get() {
            return Ok(instance);
        }
        self.init_slow(init)
    }

    #[cold]
    fn init_slow<F, E>(&self, init: F) -> Result<&Instance<T>, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        trace!(type_name = type_name::<T>(), "singleton slow path");
        let _guard = self.lock.lock();
        if let Some(instance) = self.value.get() {
            return Ok(instance);
        }
        let value = self.build(init)?;
        Ok(self.publish(Instance::new(value)))
    }

    /// The privileged constructor.
    ///
    /// The first construction of the cell's lifetime succeeds and its result
    /// becomes the canonical instance.  Afterwards the call fails with
    /// [`Error::ReentrantConstruction`] under [`ConstructionPolicy::Reject`],
    /// or returns the canonical instance under
    /// [`ConstructionPolicy::Redirect`].  `init` is not run in either case.
    pub fn construct<F>(&self, init: F) -> Result<Instance<T>>
    where
        F: FnOnce() -> Result<T>,
    {
        let type_name = type_name::<T>();
        let _guard = self.lock.lock();
        if self.created.load(Ordering::Acquire) {
            return match (self.policy, self.value.get()) {
                (ConstructionPolicy::Redirect, Some(existing)) => {
                    Registry::instance().record(type_name, Event::Redirected);
                    debug!(type_name, "privileged construction redirected to canonical instance");
                    Ok(existing.clone())
                }
                _ => {
                    Registry::instance().record(type_name, Event::Rejected);
                    warn!(type_name, "privileged construction rejected");
                    Err(Error::ReentrantConstruction { type_name })
                }
            };
        }
        let value = self.build(init)?;
        Ok(self.publish(Instance::new(value)).clone())
    }

    // Runs `init` with the lock held. Failures and panics are recorded and
    // leave the cell untouched.
    fn build<F, E>(&self, init: F) -> Result<T, E>
    where
        F: FnOnce() -> Result<T, E>,
    {
        let type_name = type_name::<T>();
        match panic::catch_unwind(AssertUnwindSafe(init)) {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => {
                Registry::instance().record(type_name, Event::Failed);
                warn!(type_name, "singleton construction failed; next access retries");
                Err(err)
            }
            Err(payload) => {
                Registry::instance().record(type_name, Event::Failed);
                warn!(type_name, "singleton construction panicked; next access retries");
                panic::resume_unwind(payload)
            }
        }
    }

    fn publish(&self, instance: Instance<T>) -> &Instance<T> {
        let type_name = type_name::<T>();
        let published = self.value.get_or_init(|| instance);
        self.created.store(true, Ordering::Release);
        Registry::instance().record(type_name, Event::Created);
        debug!(
            type_name,
            address = ?Instance::as_ptr(published),
            "singleton instance created"
        );
        published
    }
}

impl<T> Default for SingletonCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for SingletonCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SingletonCell")
            .field("type", &type_name::<T>())
            .field("initialized", &self.is_initialized())
            .field("policy", &self.policy)
            .finish()
    }
}
