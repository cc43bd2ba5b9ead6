//! # solo-persist
//!
//! Byte representation for singleton instances.
//!
//! [`to_bytes`] writes the payload as JSON.  [`from_bytes`] decodes it and
//! runs the payload's resolution hook, so the result is always the
//! process's canonical [`Instance`], never a second value.
//!
//! ```
//! use solo_core::{singleton, Instance};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Registry { shards: u16 }
//! singleton!(Registry, Registry { shards: 4 });
//!
//! let original = Registry::get_instance();
//! let bytes = solo_persist::to_bytes(&original).unwrap();
//! let restored = solo_persist::from_bytes::<Registry>(&bytes).unwrap();
//! assert!(Instance::ptr_eq(&original, &restored));
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

use serde::de::DeserializeOwned;
use serde::Serialize;
use solo_core::{Error, Instance, Result, Singleton};
use tracing::trace;

/// Encode the payload behind `instance`.
pub fn to_bytes<T>(instance: &Instance<T>) -> Result<Vec<u8>>
where
    T: Serialize,
{
    let bytes = serde_json::to_vec(instance).map_err(|e| Error::Serialization(e.to_string()))?;
    trace!(
        type_name = std::any::type_name::<T>(),
        len = bytes.len(),
        "encoded singleton payload"
    );
    Ok(bytes)
}

/// Decode `bytes` and resolve the result to the canonical instance.
///
/// The canonical instance is created if it does not exist yet.  Malformed
/// input fails with [`Error::Serialization`]; a failing constructor
/// surfaces as [`Error::Construction`].
pub fn from_bytes<T>(bytes: &[u8]) -> Result<Instance<T>>
where
    T: Singleton + DeserializeOwned,
{
    let fresh: T = serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))?;
    T::resolve(fresh)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use solo_core::{fail, SingletonCell};

    #[derive(Debug, Serialize, Deserialize)]
    struct Quota {
        limit: u32,
    }
    solo_core::singleton!(Quota, Quota { limit: 500 });

    #[test]
    fn round_trip_is_identity() {
        let original = Quota::get_instance();
        let bytes = to_bytes(&original).unwrap();
        assert_eq!(bytes, br#"{"limit":500}"#);
        let restored = from_bytes::<Quota>(&bytes).unwrap();
        assert!(Instance::ptr_eq(&original, &restored));
    }

    #[test]
    fn garbage_is_rejected() {
        let err = from_bytes::<Quota>(b"not json").unwrap_err();
        assert!(matches!(err, Error::Serialization(_)));
    }

    #[derive(Debug, Serialize, Deserialize)]
    struct Unreachable {
        host: String,
    }

    impl Singleton for Unreachable {
        fn cell() -> &'static SingletonCell<Self> {
            static CELL: SingletonCell<Unreachable> = SingletonCell::new();
            &CELL
        }

        fn create() -> Result<Self> {
            fail!("no route to host");
        }
    }

    #[test]
    fn construction_failure_surfaces_on_decode() {
        let err = from_bytes::<Unreachable>(br#"{"host":"db"}"#).unwrap_err();
        assert_eq!(err, Error::Construction("no route to host".into()));
        assert!(!Unreachable::cell().is_initialized());
    }
}
