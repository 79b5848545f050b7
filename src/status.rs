//! Single-slot status line shared by the dispatcher and the state engine.
//!
//! Both components overwrite one [`Status`] on every processed request
//! (last write wins, no history).  When debug mode is on, each new status
//! is also written to the log at the level matching its [`Severity`].

use core::fmt;

/// How a recorded status line should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Normal outcome.
    Info,
    /// Soft failure: nothing changed and nothing broke.
    Warning,
    /// Hard failure: the request was rejected.
    Error,
}

/// The most recent human-readable outcome of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    message: String,
    severity: Severity,
}

impl Status {
    pub fn new(message: impl Into<String>, severity: Severity) -> Self {
        Self {
            message: message.into(),
            severity,
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(message, Severity::Info)
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    /// Only [`Severity::Error`] counts as an error; warnings do not.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Replace the slot and mirror it to the log.
    pub(crate) fn record(&mut self, next: Status, source: &str, debug: bool) {
        if debug {
            match next.severity {
                Severity::Info => log::info!("{}: {}", source, next.message),
                Severity::Warning => log::warn!("{}: {}", source, next.message),
                Severity::Error => log::error!("{}: {}", source, next.message),
            }
        } else {
            log::trace!("{}: {}", source, next.message);
        }
        *self = next;
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}
