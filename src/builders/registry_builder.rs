//! Builder wiring a [`CallbackRegistry`] to its collaborators.

use std::fmt;
use std::sync::Arc;

use crate::config::RegistryConfig;
use crate::core::{CallbackRegistry, InterruptCheck, NeverInterrupt, RegistryError};
use crate::util::clock::{Clock, SystemClock};
use crate::util::thread::{OwnerCheck, OwnerThread};

/// Assembles a registry from a config, a clock, an interrupt hook and an
/// owner-thread check.
///
/// Unset collaborators default to [`SystemClock`], [`NeverInterrupt`], and an
/// [`OwnerThread`] pinned to the thread that calls [`RegistryBuilder::build`].
#[derive(Default)]
pub struct RegistryBuilder {
    config: RegistryConfig,
    clock: Option<Arc<dyn Clock>>,
    interrupt: Option<Arc<dyn InterruptCheck>>,
    owner: Option<Arc<dyn OwnerCheck>>,
}

impl RegistryBuilder {
    /// Builder with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the configuration.
    #[must_use]
    pub fn config(mut self, config: RegistryConfig) -> Self {
        self.config = config;
        self
    }

    /// Use a custom clock.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Poll `check` after every wake of the wait loop.
    #[must_use]
    pub fn interrupt_check(mut self, check: Arc<dyn InterruptCheck>) -> Self {
        self.interrupt = Some(check);
        self
    }

    /// Replace the owner-thread predicate.
    #[must_use]
    pub fn owner_check(mut self, check: Arc<dyn OwnerCheck>) -> Self {
        self.owner = Some(check);
        self
    }

    /// Configuration that will be applied.
    #[must_use]
    pub const fn current_config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Validate the configuration and build the registry.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidConfig`] if validation fails.
    pub fn build(self) -> Result<CallbackRegistry, RegistryError> {
        self.config.validate().map_err(RegistryError::InvalidConfig)?;
        Ok(self.build_with_defaults())
    }

    /// Build without validating; only used with the default configuration.
    pub(crate) fn build_with_defaults(self) -> CallbackRegistry {
        let clock = self.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let interrupt = self.interrupt.unwrap_or_else(|| Arc::new(NeverInterrupt));
        let owner = self
            .owner
            .unwrap_or_else(|| Arc::new(OwnerThread::current()));
        tracing::debug!(
            max_sleep_secs = self.config.max_sleep_secs,
            unbounded_timeout_secs = self.config.unbounded_timeout_secs,
            "building callback registry"
        );
        CallbackRegistry::from_parts(self.config, clock, interrupt, owner)
    }
}

impl fmt::Debug for RegistryBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder")
            .field("config", &self.config)
            .field("custom_clock", &self.clock.is_some())
            .field("custom_interrupt", &self.interrupt.is_some())
            .field("custom_owner", &self.owner.is_some())
            .finish()
    }
}
