//! The `Singleton` trait and the declaration macros.
//!
//! A type becomes a singleton by binding it to one `static`
//! [`SingletonCell`] and giving it a constructor.  The [`singleton!`] macro
//! does both.  [`define_singleton!`] is the alternative built on the
//! runtime's own one-time primitive, `std::sync::LazyLock`.

use std::any::type_name;

use tracing::debug;

use crate::cell::SingletonCell;
use crate::errors::Result;
use crate::instance::Instance;

/// Re-export `LazyLock`, the container used by [`define_singleton!`].
pub use std::sync::LazyLock;

/// A type with exactly one process-wide value.
///
/// Implementors provide the cell and the constructor; everything else is
/// provided.  Prefer [`singleton!`] over a hand-written impl.
///
/// # Example
/// ```
/// use solo_core::{Instance, Singleton, SingletonCell};
///
/// struct Clock { offset: i64 }
///
/// impl Singleton for Clock {
///     fn cell() -> &'static SingletonCell<Self> {
///         static CELL: SingletonCell<Clock> = SingletonCell::new();
///         &CELL
///     }
///     fn create() -> solo_core::Result<Self> {
///         Ok(Clock { offset: 0 })
///     }
/// }
///
/// let a = Clock::instance().unwrap();
/// let b = Clock::instance().unwrap();
/// assert!(Instance::ptr_eq(&a, &b));
/// assert!(Clock::construct().is_err());
/// ```
pub trait Singleton: Sized + Send + Sync + 'static {
    /// The process-wide cell holding the instance.
    fn cell() -> &'static SingletonCell<Self>;

    /// Build the payload.  Called at most once per successful creation.
    fn create() -> Result<Self>;

    /// Return the shared instance, creating it on first call.
    ///
    /// A failed [`create`][Self::create] is not cached.
    fn instance() -> Result<Instance<Self>> {
        Self::cell().get_or_try_init(Self::create).cloned()
    }

    /// Construct the payload directly, bypassing [`instance`][Self::instance].
    ///
    /// Succeeds only when no instance exists yet; see
    /// [`SingletonCell::construct`].
    fn construct() -> Result<Instance<Self>> {
        Self::cell().construct(Self::create)
    }

    /// Resolution hook run after a value has been rebuilt from a persisted
    /// form.  The default discards `fresh` and returns the canonical
    /// instance.
    fn resolve(fresh: Self) -> Result<Instance<Self>> {
        drop(fresh);
        debug!(
            type_name = type_name::<Self>(),
            "decoded value resolved to canonical instance"
        );
        Self::instance()
    }
}

/// Declare `$ty` a singleton guarded by a double-checked [`SingletonCell`].
///
/// Implements [`Singleton`] with `$init` as the constructor and adds an
/// infallible `get_instance()` associated function.  An optional policy
/// selects the privileged-construction behaviour.
///
/// # Example
/// ```
/// use solo_core::{singleton, ConstructionPolicy, Instance, Singleton};
///
/// pub struct Config { pub name: String }
/// singleton!(Config, Config { name: "prod".into() });
///
/// pub struct Pool { pub size: usize }
/// singleton!(Pool, Pool { size: 8 }, ConstructionPolicy::Redirect);
///
/// assert_eq!(Config::get_instance().name, "prod");
/// assert!(Config::construct().is_err());
/// assert!(Instance::ptr_eq(&Pool::construct().unwrap(), &Pool::get_instance()));
/// ```
#[macro_export]
macro_rules! singleton {
    ($ty:ty, $init:expr) => {
        $crate::singleton!($ty, $init, $crate::ConstructionPolicy::Reject);
    };
    ($ty:ty, $init:expr, $policy:expr) => {
        impl $crate::Singleton for $ty {
            fn cell() -> &'static $crate::SingletonCell<Self> {
                static CELL: $crate::SingletonCell<$ty> = $crate::SingletonCell::with_policy($policy);
                &CELL
            }

            fn create() -> $crate::Result<Self> {
                Ok($init)
            }
        }

        impl $ty {
            /// Return the process-wide instance, creating it on first call.
            #[allow(dead_code)]
            pub fn get_instance() -> $crate::Instance<$ty> {
                <$ty as $crate::Singleton>::cell()
                    .get_or_init(|| $init)
                    .clone()
            }
        }
    };
}

/// Define a singleton instance of type `$ty` as a `LazyLock` static.
///
/// The runtime guarantees `$init` runs exactly once, on first
/// dereference.  Creation is reported to the
/// [`Registry`][crate::registry::Registry].  Privileged construction does
/// not apply: the value is only reachable through the static.
///
/// # Example
/// ```
/// use solo_core::define_singleton;
///
/// struct Catalog { entries: Vec<String> }
/// define_singleton!(CATALOG, Catalog, Catalog { entries: Vec::new() });
///
/// assert!(CATALOG.entries.is_empty());
/// assert!(std::ptr::eq(&*CATALOG, &*CATALOG));
/// ```
#[macro_export]
macro_rules! define_singleton {
    ($name:ident, $ty:ty, $init:expr) => {
        /// Lazily-initialised global singleton.
        pub static $name: $crate::patterns::singleton::LazyLock<$ty> =
            $crate::patterns::singleton::LazyLock::new(|| {
                let value = $init;
                $crate::registry::Registry::instance()
                    .record_created(::std::any::type_name::<$ty>());
                value
            });
    };
}
