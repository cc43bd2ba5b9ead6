//! # solo-core
//!
//! Process-wide, tamper-resistant singletons.
//!
//! A singleton type owns exactly one value for the life of the process.
//! The value is built on first access, even when many threads race for it,
//! and the usual duplication routes are closed off:
//!
//! * cloning an [`Instance`] hands back the same reference;
//! * decoding an [`Instance`] (feature `serde`) resolves to the canonical
//!   value;
//! * constructing the payload directly through
//!   [`Singleton::construct`] fails once the instance exists, unless the
//!   cell's [`ConstructionPolicy`] redirects it.
//!
//! Three holders share that contract: the double-checked [`SingletonCell`]
//! (usually via [`singleton!`]), the `LazyLock`-backed
//! [`define_singleton!`], and the const-built [`Eager`].

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// The double-checked singleton cell.
pub mod cell;

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

/// Shared handle to the guarded value.
pub mod instance;

/// The `Singleton` trait, declaration macros, and eager holders.
pub mod patterns;

/// Process-wide record of singleton lifecycle events.
pub mod registry;

/// `serde` support for `Instance<T>`.
#[cfg(feature = "serde")]
pub mod serialization;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use cell::{ConstructionPolicy, SingletonCell};
pub use errors::{Error, Result};
pub use instance::Instance;
pub use patterns::eager::Eager;
pub use patterns::singleton::Singleton;
pub use registry::{Entry, Registry};
