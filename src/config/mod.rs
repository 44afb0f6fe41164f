//! Configuration models for the registry wait loop.

pub mod registry;

pub use registry::{RegistryConfig, ENV_MAX_SLEEP_SECS, ENV_UNBOUNDED_TIMEOUT_SECS};
