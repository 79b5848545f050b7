//! Error types for the dispatcher, the state engine and configuration.
//!
//! Every failure is handled where it is detected: the component records a
//! status line and hands one of these back to the caller.  Setup code that
//! touches several subsystems funnels them into the crate-wide [`Error`].

use core::fmt;

use crate::command::ArgType;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Command registration or dispatch failed.
    Command(CommandError),
    /// State registration or transition failed.
    State(StateError),
    /// Configuration is invalid or could not be loaded.
    Config(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Command(e) => write!(f, "command: {e}"),
            Self::State(e) => write!(f, "state: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Command errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The command table already holds `MAX_COMMANDS` entries.
    CapacityExceeded,
    /// No registered command matches the given name.
    UnknownCommand(String),
    /// Argument count differs from the registered signature.
    ArgumentCountMismatch { expected: usize, got: usize },
    /// Argument `index` (1-based) does not parse as `expected`.
    ArgumentTypeMismatch {
        index: usize,
        expected: ArgType,
        got: String,
    },
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "command table full"),
            Self::UnknownCommand(name) => write!(f, "unknown command '{name}'"),
            Self::ArgumentCountMismatch { expected, got } => {
                write!(f, "expected {expected} arguments, got {got}")
            }
            Self::ArgumentTypeMismatch {
                index,
                expected,
                got,
            } => write!(f, "argument {index} is not {expected}: '{got}'"),
        }
    }
}

impl From<CommandError> for Error {
    fn from(e: CommandError) -> Self {
        Self::Command(e)
    }
}

// ---------------------------------------------------------------------------
// State errors
// ---------------------------------------------------------------------------

/// Hard failures of the state engine.
///
/// A redundant transition is not in here: it is a warning, reported as
/// [`Transition::Unchanged`](crate::fsm::Transition::Unchanged).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    /// The state table already holds `MAX_STATES` entries.
    CapacityExceeded,
    /// The requested identifier was never registered.
    UnknownState,
}

impl fmt::Display for StateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded => write!(f, "state table full"),
            Self::UnknownState => write!(f, "unknown state"),
        }
    }
}

impl From<StateError> for Error {
    fn from(e: StateError) -> Self {
        Self::State(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, Error>;
