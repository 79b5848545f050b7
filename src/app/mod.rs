//! Application layer: the reference device built on the two core
//! components.
//!
//! The dispatcher ([`crate::command`]) and the engine ([`crate::fsm`]) know
//! nothing about this device.  Everything outside them reaches in through
//! the **port traits** in [`ports`], so the whole layer runs under test
//! with scripted input and a manual clock.

pub mod commands;
pub mod ports;
pub mod service;
