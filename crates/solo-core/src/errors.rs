//! Error types for solo.
//!
//! Every fallible operation in the workspace returns [`Result`], whose error
//! is the single `thiserror`-derived [`Error`] enum below.  The [`ensure!`]
//! and [`fail!`] macros are shorthands for returning
//! [`Error::Construction`] from payload constructors.

use thiserror::Error;

/// The top-level error type used throughout solo.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// A privileged construction was attempted after the instance already
    /// exists.
    ///
    /// This is a programming error: the call site must go through the
    /// accessor instead.  It is never retried.
    #[error("instance of `{type_name}` already constructed; use the accessor")]
    ReentrantConstruction {
        /// Fully-qualified name of the guarded type.
        type_name: &'static str,
    },

    /// Building the payload failed.  Nothing was cached; the next access
    /// retries construction from scratch.
    #[error("construction failed: {0}")]
    Construction(String),

    /// Encoding or decoding the payload failed.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    /// Return `true` if retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, Error::Construction(_))
    }
}

/// Shorthand `Result` type used throughout solo.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Return `Err(Error::Construction(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use solo_core::{ensure, errors::Error};
/// fn pool_size(n: usize) -> solo_core::errors::Result<usize> {
///     ensure!(n > 0, "pool size must be positive, got {n}");
///     Ok(n)
/// }
/// assert!(pool_size(4).is_ok());
/// assert!(matches!(pool_size(0), Err(Error::Construction(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::Construction(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Construction(...))` immediately.
///
/// # Example
/// ```
/// use solo_core::{fail, errors::Error};
/// fn connect() -> solo_core::errors::Result<()> {
///     fail!("backend unavailable");
/// }
/// assert_eq!(
///     connect(),
///     Err(Error::Construction("backend unavailable".into()))
/// );
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Construction(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reentrant_message_names_type() {
        let err = Error::ReentrantConstruction {
            type_name: "app::Config",
        };
        assert_eq!(
            err.to_string(),
            "instance of `app::Config` already constructed; use the accessor"
        );
        assert!(!err.is_transient());
    }

    #[test]
    fn construction_is_transient() {
        assert!(Error::Construction("io".into()).is_transient());
        assert!(!Error::Serialization("eof".into()).is_transient());
    }
}
