//! # solo
//!
//! Process-wide, tamper-resistant singletons.
//!
//! This crate is a **façade** that re-exports the workspace crates.
//! Application code should depend on this crate rather than the individual
//! `solo-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use solo::{singleton, Instance, Singleton};
//!
//! struct Settings { verbose: bool }
//! singleton!(Settings, Settings { verbose: false });
//!
//! let a = Settings::get_instance();
//! let b = a.clone();
//! assert!(Instance::ptr_eq(&a, &b));
//! assert!(Settings::construct().is_err());
//! assert!(!a.verbose);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Cells, handles, errors, and the `Singleton` trait.
pub use solo_core as core;

/// Byte codec that resolves decoded values to the canonical instance.
pub use solo_persist as persist;

pub use solo_core::{
    define_singleton, ensure, fail, singleton, ConstructionPolicy, Eager, Entry, Error, Instance,
    Registry, Result, Singleton, SingletonCell,
};
