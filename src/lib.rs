//! Console-driven command dispatcher and state engine for polled firmware.
//!
//! Exposes the pure-logic modules for integration testing.  ESP-IDF
//! specific code is guarded by `#[cfg(target_os = "espidf")]` inside the
//! adapters that need it.

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod command;
pub mod config;
pub mod error;
pub mod fsm;
pub mod status;

pub use command::{ArgType, CommandFn, CommandRegistry};
pub use error::{CommandError, Error, Result, StateError};
pub use fsm::{StateMachine, StateView, Transition};
pub use status::{Severity, Status};
