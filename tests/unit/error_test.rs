//! Tests for error types

use deferred_callbacks::core::RegistryError;

#[test]
fn test_interrupted_error() {
    let err = RegistryError::Interrupted;
    assert_eq!(format!("{err}"), "wait interrupted");
}

#[test]
fn test_invalid_config_error() {
    let err = RegistryError::InvalidConfig("max_sleep_secs must be positive".to_string());
    assert_eq!(
        format!("{err}"),
        "invalid configuration: max_sleep_secs must be positive"
    );
}
