//! Tests for configuration validation

use deferred_callbacks::config::{RegistryConfig, ENV_MAX_SLEEP_SECS, ENV_UNBOUNDED_TIMEOUT_SECS};

#[test]
fn test_default_config_validation() {
    let cfg = RegistryConfig::default();
    assert!(cfg.validate().is_ok());
    assert!((cfg.max_sleep_secs - 2.0).abs() < f64::EPSILON);
}

#[test]
fn test_invalid_max_sleep() {
    for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        let cfg = RegistryConfig {
            max_sleep_secs: bad,
            ..RegistryConfig::default()
        };
        assert!(cfg.validate().is_err(), "accepted max_sleep_secs = {bad}");
    }
}

#[test]
fn test_invalid_unbounded_timeout() {
    let cfg = RegistryConfig {
        unbounded_timeout_secs: 0.0,
        ..RegistryConfig::default()
    };
    assert!(cfg.validate().is_err());

    let cfg = RegistryConfig {
        max_sleep_secs: 10.0,
        unbounded_timeout_secs: 5.0,
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "max_sleep_secs": 0.25,
        "unbounded_timeout_secs": 3600
    }"#;

    let cfg = RegistryConfig::from_json_str(json).unwrap();
    assert!((cfg.max_sleep_secs - 0.25).abs() < f64::EPSILON);
    assert!((cfg.unbounded_timeout_secs - 3600.0).abs() < f64::EPSILON);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(RegistryConfig::from_json_str(r#"{ "max_sleep_secs": -2 }"#).is_err());
    assert!(RegistryConfig::from_json_str("not json").is_err());
}

#[test]
fn test_config_round_trips_through_json() {
    let cfg = RegistryConfig {
        max_sleep_secs: 1.5,
        unbounded_timeout_secs: 60.0,
    };
    let json = serde_json::to_string(&cfg).unwrap();
    assert_eq!(RegistryConfig::from_json_str(&json).unwrap(), cfg);
}

// Single test so no other test observes these variables mid-update.
#[test]
fn test_config_from_env() {
    std::env::remove_var(ENV_MAX_SLEEP_SECS);
    std::env::remove_var(ENV_UNBOUNDED_TIMEOUT_SECS);
    assert_eq!(RegistryConfig::from_env().unwrap(), RegistryConfig::default());

    std::env::set_var(ENV_MAX_SLEEP_SECS, "0.75");
    let cfg = RegistryConfig::from_env().unwrap();
    assert!((cfg.max_sleep_secs - 0.75).abs() < f64::EPSILON);

    std::env::set_var(ENV_MAX_SLEEP_SECS, "soon");
    let err = RegistryConfig::from_env().unwrap_err();
    assert!(err.to_string().contains(ENV_MAX_SLEEP_SECS));

    std::env::set_var(ENV_MAX_SLEEP_SECS, "0");
    assert!(RegistryConfig::from_env().is_err());

    std::env::remove_var(ENV_MAX_SLEEP_SECS);
}
