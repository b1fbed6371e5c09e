//! A headless content rotation engine for looping message tickers.
//!
//! For adapter-level utilities (tween animation, scheduling), see the
//! `rotator-adapter` crate.
//!
//! This crate focuses on the core state machine needed to scroll a fixed set
//! of items through a small viewport forever: a first-write-wins height
//! registry fed by asynchronous layout measurements, a fixed-size two-copy
//! display buffer regenerated at cycle boundaries, per-step scroll deltas
//! derived from measured heights, and the cycle-boundary offset correction
//! that keeps the long-run scroll position bounded.
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - rendering of the items themselves (the engine only tracks indexes)
//! - per-item layout measurements (reported via `record_height`)
//! - an animation primitive that interpolates the scroll offset per step
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod buffer;
mod heights;
mod options;
mod rotator;
mod state;
mod types;


pub use buffer::RotationBuffer;
pub use heights::HeightRegistry;
pub use options::{OnChangeCallback, RotatorOptions};
pub use rotator::Rotator;
pub use state::RotationState;
pub use types::{Phase, Slot, StepMotion, StepOutcome};
