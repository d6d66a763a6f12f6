//! # musicstar-core
//!
//! Backend library for the Music Star sequencer: configuration, pitch tables,
//! action dispatch and the frame driver, independent of any UI.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use musicstar_core::config::Config;
//! use musicstar_core::driver::Driver;
//! use musicstar_types::{Lane, StarAction, StarSequencer, StepFired};
//!
//! let config = Config::load();
//! let mut driver = Driver::new(StarSequencer::new(&config.settings()));
//!
//! // UI input: mutate through actions, refresh controls from the result
//! let result = driver.dispatch(&StarAction::SetTempo(Lane::Top, 0.3));
//!
//! // Host loop: once per frame
//! let mut sink = |fired: &StepFired| { /* play pitch::note_for(fired.lane, fired.step, a4) */ };
//! driver.frame(frame_dt, &mut sink);
//! ```
//!
//! ## Module Overview
//!
//! - [`config`]: TOML configuration (embedded defaults + user override)
//! - [`dispatch`]: `dispatch_action()`, the entry point for state mutation
//! - [`driver`]: `Driver` and the `NoteSink` sound-emitter seam
//! - [`pitch`]: per-lane pitch tables and note frequencies
//! - [`script`]: timed action scripts for headless runs

pub mod config;
pub mod dispatch;
pub mod driver;
pub mod pitch;
pub mod script;

pub use musicstar_types as types;
