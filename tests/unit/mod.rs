//! Unit tests for individual components

mod builders_test;
mod clock_test;
mod config_test;
mod error_test;
mod telemetry_test;
