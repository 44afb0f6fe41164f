//! Tests for telemetry helpers

use deferred_callbacks::core::CallbackRegistry;
use deferred_callbacks::util::init_tracing;

#[test]
fn test_init_tracing_is_idempotent() {
    init_tracing();
    init_tracing();

    // Instrumented paths must not panic with a subscriber installed.
    let registry = CallbackRegistry::new();
    registry.insert_native(|| {}, f64::NAN);
    assert!(registry.wait_until_due(0.0).unwrap());
    assert_eq!(registry.take_due(0, registry.now()).len(), 1);
}
