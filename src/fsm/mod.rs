//! Function-pointer finite state machine engine.
//!
//! Classic embedded FSM pattern, generic over the state identifier:
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  StateTable (insertion order, capacity MAX_STATES)           │
//! │  ┌─────────┬────────────┬──────────────────────┬──────────┐  │
//! │  │ id: S   │ on_enter   │ on_update            │ on_exit  │  │
//! │  ├─────────┼────────────┼──────────────────────┼──────────┤  │
//! │  │ Idle    │ fn(ctx,v)? │ fn(ctx,v)->Option<S>?│ None     │  │
//! │  │ Running │ fn(ctx,v)? │ fn(ctx,v)->Option<S>?│ fn(..)?  │  │
//! │  │ ...     │            │                      │          │  │
//! │  └─────────┴────────────┴──────────────────────┴──────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host calls [`StateMachine::update`] once per tick; it runs
//! `on_update` for the **current** state.  Transitions are requested
//! explicitly through [`StateMachine::set_state`] (or by `on_update`
//! returning `Some(next)`) and always run in the order
//! `on_exit(old)` → switch → reset entry time → status → `on_enter(new)`.
//!
//! Every registered state may transition to every other; legality is the
//! caller's business.

pub mod context;
pub mod states;

use core::fmt::Debug;

use log::{info, warn};

use crate::app::ports::Clock;
use crate::error::StateError;
use crate::status::{Severity, Status};

/// Maximum number of registered states.
pub const MAX_STATES: usize = 10;

const STATUS_SOURCE: &str = "fsm";

// ---------------------------------------------------------------------------
// Callback types
// ---------------------------------------------------------------------------

/// What a callback can see of the engine while it runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateView<S> {
    /// The current state.  Inside `on_enter` this is already the new state.
    pub state: S,
    /// Milliseconds since the current state was entered.
    pub elapsed_ms: u64,
}

/// Signature for `on_enter` and `on_exit` actions.
pub type StateActionFn<S, C> = fn(&mut C, &StateView<S>);

/// Signature for the per-tick update handler.
/// Returns `Some(next)` to request a transition, or `None` to stay.
pub type StateUpdateFn<S, C> = fn(&mut C, &StateView<S>) -> Option<S>;

// ---------------------------------------------------------------------------
// State descriptor (one row in the table)
// ---------------------------------------------------------------------------

/// One row of the state table.  Any callback may be absent.
pub struct StateDescriptor<S, C> {
    pub id: S,
    pub on_enter: Option<StateActionFn<S, C>>,
    pub on_update: Option<StateUpdateFn<S, C>>,
    pub on_exit: Option<StateActionFn<S, C>>,
}

/// Result of a [`StateMachine::set_state`] call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition<S> {
    /// The machine moved; `from` is `None` on the very first transition.
    Changed { from: Option<S>, to: S },
    /// Target was already current; a warning was recorded.
    Unchanged(S),
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

/// The state engine.
///
/// * `S`: state identifier (cheap to copy, comparable, printable).
/// * `C`: context threaded through every callback.
/// * `K`: monotonic clock.
pub struct StateMachine<S, C, K> {
    table: heapless::Vec<StateDescriptor<S, C>, MAX_STATES>,
    /// Index of the current state; `None` until the first transition.
    current: Option<usize>,
    /// Clock reading at the last successful transition.
    entered_at_ms: u64,
    clock: K,
    last_status: Status,
    debug: bool,
}

impl<S, C, K> StateMachine<S, C, K>
where
    S: Copy + PartialEq + Debug,
    K: Clock,
{
    /// Empty engine with no current state.
    pub fn new(clock: K) -> Self {
        let entered_at_ms = clock.now_ms();
        Self {
            table: heapless::Vec::new(),
            current: None,
            entered_at_ms,
            clock,
            last_status: Status::info("No state set yet"),
            debug: false,
        }
    }

    /// Mirror every recorded status line to the log at its own level.
    pub fn set_debug_mode(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn debug_mode(&self) -> bool {
        self.debug
    }

    // ── Registration ─────────────────────────────────────────

    /// Append a state to the table.  Identifiers should be unique; if not,
    /// the first registration shadows later ones.
    pub fn register_state(
        &mut self,
        id: S,
        on_enter: Option<StateActionFn<S, C>>,
        on_update: Option<StateUpdateFn<S, C>>,
        on_exit: Option<StateActionFn<S, C>>,
    ) -> Result<(), StateError> {
        self.register(StateDescriptor {
            id,
            on_enter,
            on_update,
            on_exit,
        })
    }

    /// Append a prepared descriptor.
    pub fn register(&mut self, descriptor: StateDescriptor<S, C>) -> Result<(), StateError> {
        if self.table.push(descriptor).is_err() {
            self.set_status("Error: Maximum number of states reached", Severity::Error);
            return Err(StateError::CapacityExceeded);
        }
        Ok(())
    }

    // ── Transitions ──────────────────────────────────────────

    /// Move to `id`.
    ///
    /// Targeting the current state is a no-op that records a warning.
    /// An unregistered `id` leaves the current state untouched.
    pub fn set_state(&mut self, id: S, ctx: &mut C) -> Result<Transition<S>, StateError> {
        if self.state() == Some(id) {
            self.set_status("Warning: Already in state, not changing.", Severity::Warning);
            return Ok(Transition::Unchanged(id));
        }

        let Some(next) = self.table.iter().position(|d| d.id == id) else {
            warn!("FSM: rejected transition to unregistered state {:?}", id);
            self.set_status("Error: Unknown state", Severity::Error);
            return Err(StateError::UnknownState);
        };

        let from = self.state();
        info!("FSM transition: {:?} -> {:?}", from, id);

        // Exit current state
        if let Some(prev) = self.current {
            if let Some(exit) = self.table[prev].on_exit {
                let view = self.view_of(prev);
                exit(ctx, &view);
            }
        }

        // Update pointer and timing
        self.current = Some(next);
        self.entered_at_ms = self.clock.now_ms();
        self.set_status(format!("State changed to: {:?}", id), Severity::Info);

        // Enter new state
        if let Some(enter) = self.table[next].on_enter {
            let view = self.view_of(next);
            enter(ctx, &view);
        }

        Ok(Transition::Changed { from, to: id })
    }

    /// Run the current state's `on_update` once.
    ///
    /// A transition requested through the return value is applied with
    /// [`set_state`](Self::set_state) after the callback returns.
    pub fn update(&mut self, ctx: &mut C) {
        let Some(idx) = self.current else {
            return;
        };
        let Some(update) = self.table[idx].on_update else {
            return;
        };

        let view = self.view_of(idx);
        if let Some(next) = update(ctx, &view) {
            if let Err(e) = self.set_state(next, ctx) {
                warn!("FSM: on_update of {:?} requested {:?}: {}", view.state, next, e);
            }
        }
    }

    // ── Queries ──────────────────────────────────────────────

    /// The current state, or `None` before the first successful transition.
    pub fn state(&self) -> Option<S> {
        self.current.map(|i| self.table[i].id)
    }

    /// Milliseconds since the last successful transition.
    pub fn elapsed_ms(&self) -> u64 {
        self.clock.now_ms().saturating_sub(self.entered_at_ms)
    }

    pub fn last_status(&self) -> &Status {
        &self.last_status
    }

    /// Registered identifiers in registration order.
    pub fn states(&self) -> impl Iterator<Item = S> + '_ {
        self.table.iter().map(|d| d.id)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    pub fn clock(&self) -> &K {
        &self.clock
    }

    // ── Internal ─────────────────────────────────────────────

    fn view_of(&self, idx: usize) -> StateView<S> {
        StateView {
            state: self.table[idx].id,
            elapsed_ms: self.elapsed_ms(),
        }
    }

    fn set_status(&mut self, message: impl Into<String>, severity: Severity) {
        self.last_status
            .record(Status::new(message, severity), STATUS_SOURCE, self.debug);
    }
}
