//! # Deferred Callbacks
//!
//! A thread-safe registry of "run this at or after time T" requests.
//!
//! Any number of producer threads insert work with a delay. One owner thread
//! drives a pump loop: it sleeps until the earliest deadline, extracts every
//! item that has come due, and invokes them itself. The registry never runs
//! callbacks; it only stores and releases them in order.
//!
//! ## Ordering
//!
//! Items are released by due time, and items with the same due time are
//! released in insertion order. Every item carries a sequence number from a
//! single process-wide counter, so the order is total and deterministic.
//!
//! ## Waiting
//!
//! [`core::CallbackRegistry::wait_until_due`] blocks on a condition variable
//! that every insertion signals. Each sleep is capped (two seconds by default)
//! and an injected [`core::InterruptCheck`] is polled after every wake, so a
//! cancellation request is noticed promptly even when the next deadline is far
//! away or absent.
//!
//! ```
//! use std::sync::Arc;
//! use deferred_callbacks::core::{CallbackRegistry, InterruptFlag};
//!
//! let flag = InterruptFlag::new();
//! let registry = CallbackRegistry::builder()
//!     .interrupt_check(Arc::new(flag.clone()))
//!     .build()
//!     .expect("default config is valid");
//!
//! registry.insert_native(|| println!("tick"), 0.01);
//!
//! // Pump loop
//! while !registry.is_empty() {
//!     if registry.wait_until_due(1.0).expect("not interrupted") {
//!         for item in registry.take_due(0, registry.now()) {
//!             item.invoke();
//!         }
//!     }
//! }
//! ```
//!
//! ## Owner thread
//!
//! Extraction, waiting, snapshots and host-managed insertions are owner-thread
//! operations. The owner is decided by a pluggable [`util::OwnerCheck`]
//! (by default the thread that built the registry) and violations fail a
//! debug assertion.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Scheduled items, the registry, and its collaborator traits.
pub mod core;
/// Configuration for the registry wait loop.
pub mod config;
/// Builders to construct registries from configuration.
pub mod builders;
/// Clocks, owner-thread checks, and telemetry.
pub mod util;
