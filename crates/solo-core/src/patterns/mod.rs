//! Patterns sub-module: the `Singleton` trait and macros, eager holders.

pub mod eager;
pub mod singleton;
