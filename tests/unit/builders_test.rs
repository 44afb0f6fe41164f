//! Tests for builder modules

use std::sync::Arc;

use deferred_callbacks::builders::RegistryBuilder;
use deferred_callbacks::config::RegistryConfig;
use deferred_callbacks::core::{CallbackRegistry, RegistryError};
use deferred_callbacks::util::clock::{ManualClock, Timestamp};

#[test]
fn test_builder_defaults() {
    let builder = RegistryBuilder::new();
    assert_eq!(builder.current_config(), &RegistryConfig::default());

    let registry = builder.build().unwrap();
    assert!(registry.is_empty());
    assert!(registry.is_owner_thread());
    assert_eq!(registry.config(), &RegistryConfig::default());
}

#[test]
fn test_builder_rejects_invalid_config() {
    let result = CallbackRegistry::builder()
        .config(RegistryConfig {
            max_sleep_secs: 0.0,
            ..RegistryConfig::default()
        })
        .build();

    assert!(matches!(result, Err(RegistryError::InvalidConfig(_))));
}

#[test]
fn test_builder_uses_custom_clock() {
    let clock = Arc::new(ManualClock::starting_at(Timestamp::from_secs(42.0)));
    let registry = RegistryBuilder::new().clock(clock.clone()).build().unwrap();
    assert_eq!(registry.now(), Timestamp::from_secs(42.0));

    registry.insert_native(|| {}, 1.0);
    assert_eq!(registry.next_due_time(), Some(Timestamp::from_secs(43.0)));
}

#[test]
fn test_builder_uses_custom_owner_check() {
    let registry = RegistryBuilder::new()
        .owner_check(Arc::new(|| false))
        .build()
        .unwrap();
    assert!(!registry.is_owner_thread());
}

#[test]
fn test_builder_debug_hides_collaborators() {
    let rendered = format!("{:?}", RegistryBuilder::new().clock(Arc::new(ManualClock::new())));
    assert!(rendered.contains("custom_clock: true"));
    assert!(rendered.contains("custom_owner: false"));
}
