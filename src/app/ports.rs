//! Port traits — the boundary between the core and the outside world.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ CommandRegistry / StateMachine
//! ```
//!
//! The core only ever sees these two traits.  Adapters in
//! [`crate::adapters`] implement them for stdio, the ESP-IDF timer, and
//! host-side simulation.

// ───────────────────────────────────────────────────────────────
// Line channel (operator console)
// ───────────────────────────────────────────────────────────────

/// Line-oriented text channel polled once per tick.
pub trait LineChannel {
    /// Take one complete line if one is available.  Must not block.
    /// The returned line may still carry its `\r` / `\n` terminator.
    fn read_line(&mut self) -> Option<String>;

    /// Write text to the operator.
    fn write_str(&mut self, text: &str);
}

// ───────────────────────────────────────────────────────────────
// Clock
// ───────────────────────────────────────────────────────────────

/// Monotonic millisecond clock used for time-in-state.
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin.  Never decreases.
    fn now_ms(&self) -> u64;
}
