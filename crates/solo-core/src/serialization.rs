//! `serde` integration for [`Instance<T>`] (feature `serde`).
//!
//! Serializing an instance writes the payload.  Deserializing one decodes a
//! fresh payload and immediately passes it to [`Singleton::resolve`], which
//! replaces it with the canonical instance.  A persistence round-trip
//! therefore never yields a second value.
//!
//! The payload type's own `Deserialize` impl is not intercepted; decode
//! `Instance<T>`, not `T`.

use serde::de::{Deserialize, Deserializer, Error as _};
use serde::ser::{Serialize, Serializer};

use crate::instance::Instance;
use crate::patterns::singleton::Singleton;

impl<T: Serialize> Serialize for Instance<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.as_ref().serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Instance<T>
where
    T: Singleton + Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let fresh = T::deserialize(deserializer)?;
        T::resolve(fresh).map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use crate::{singleton, Instance, Singleton};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize)]
    struct Profile {
        region: String,
        replicas: u8,
    }
    singleton!(
        Profile,
        Profile {
            region: "eu-west".into(),
            replicas: 3,
        }
    );

    #[test]
    fn round_trip_resolves_to_canonical() {
        let canonical = Profile::get_instance();
        let json = serde_json::to_string(&canonical).unwrap();
        assert_eq!(json, r#"{"region":"eu-west","replicas":3}"#);

        let decoded: Instance<Profile> = serde_json::from_str(&json).unwrap();
        assert!(Instance::ptr_eq(&canonical, &decoded));
    }

    #[test]
    fn decoded_contents_are_discarded() {
        let decoded: Instance<Profile> =
            serde_json::from_str(r#"{"region":"us-east","replicas":9}"#).unwrap();
        assert_eq!(decoded.region, "eu-west");
        assert!(Instance::ptr_eq(&decoded, &Profile::instance().unwrap()));
    }

    #[test]
    fn nested_instances_resolve_too() {
        #[derive(Serialize, Deserialize)]
        struct Envelope {
            profile: Instance<Profile>,
            note: String,
        }

        let envelope = Envelope {
            profile: Profile::get_instance(),
            note: "snapshot".into(),
        };
        let json = serde_json::to_string(&envelope).unwrap();
        let back: Envelope = serde_json::from_str(&json).unwrap();
        assert!(Instance::ptr_eq(&back.profile, &envelope.profile));
        assert_eq!(back.note, "snapshot");
    }

    #[test]
    fn malformed_payload_is_an_error() {
        let result = serde_json::from_str::<Instance<Profile>>(r#"{"region":1}"#);
        assert!(result.is_err());
    }
}
