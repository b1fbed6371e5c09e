//! Adapter utilities for the `rotator` crate.
//!
//! The `rotator` crate is UI-agnostic and focuses on the core rotation state.
//! This crate provides the small, framework-neutral pieces a host needs to
//! actually run it:
//!
//! - A [`Tween`] primitive for the per-step offset animation and the one-shot
//!   container fade-in
//! - A fixed-interval [`Scheduler`] with injected time
//! - A [`Driver`] that wires scheduler ticks, tween sampling, and completion
//!   events into the engine for a host render loop
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod driver;
mod scheduler;
mod tween;

#[cfg(test)]
mod tests;

pub use driver::{DEFAULT_FADE_DURATION_MS, DEFAULT_STEP_DURATION_MS, Driver, DriverEvent};
pub use scheduler::Scheduler;
pub use tween::{Easing, Tween};
