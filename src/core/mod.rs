//! Scheduled items, the callback registry, and their collaborators.

pub mod error;
pub mod interrupt;
pub mod item;
mod queue;
pub mod registry;
pub mod wake;

pub use error::{AppResult, RegistryError};
pub use interrupt::{InterruptCheck, InterruptFlag, NeverInterrupt};
pub use item::{HostFunction, ItemDescription, ScheduledItem, Work};
pub use registry::CallbackRegistry;
pub use wake::WakeSignal;
