//! The full access / bypass scenario against one singleton type.

use serde::{Deserialize, Serialize};
use solo::persist::{from_bytes, to_bytes};
use solo::{singleton, Error, Instance, Registry, Singleton};

#[derive(Debug, Serialize, Deserialize)]
struct AppContext {
    service: String,
    port: u16,
}

singleton!(
    AppContext,
    AppContext {
        service: "billing".into(),
        port: 8443,
    }
);

#[test]
fn access_and_every_bypass_path() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::TRACE)
        .try_init();

    // (a) first access creates the instance
    let a = AppContext::get_instance();
    assert_eq!(a.service, "billing");

    // (b) second access returns the same one
    let again = AppContext::get_instance();
    assert!(Instance::ptr_eq(&a, &again));

    // (c) direct construction is refused
    match AppContext::construct() {
        Err(Error::ReentrantConstruction { type_name }) => {
            assert!(type_name.ends_with("AppContext"));
        }
        other => panic!("expected ReentrantConstruction, got {other:?}"),
    }

    // (d) clone is the same reference
    let cloned = a.clone();
    assert!(Instance::ptr_eq(&a, &cloned));

    // (e) serialize + deserialize resolves to the same reference
    let bytes = to_bytes(&a).unwrap();
    let restored = from_bytes::<AppContext>(&bytes).unwrap();
    assert!(Instance::ptr_eq(&a, &restored));

    let entry = Registry::instance()
        .entry(std::any::type_name::<AppContext>())
        .unwrap();
    assert!(entry.created);
    assert_eq!(entry.rejected, 1);
    assert_eq!(entry.failed_attempts, 0);
}
