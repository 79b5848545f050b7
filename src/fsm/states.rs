//! Reference device states and their handler functions.
//!
//! Each state is defined by up to three plain `fn` pointers with no
//! closures or heap.
//!
//! ```text
//!  IDLE ──[run]──▶ RUNNING ──[run_timeout / stop]──▶ COOLDOWN
//!    ▲                                                  │
//!    └──────────────────[cooldown elapsed]──────────────┘
//!
//!  Any state ──[fault]──▶ FAULT ──[clear, budget left]──▶ IDLE
//! ```
//!
//! Timed edges are requested from `on_update`; operator edges come from
//! command handlers calling `set_state`.

use core::fmt;
use core::str::FromStr;

use log::{info, warn};

use super::context::{DeviceContext, LED_COOLDOWN, LED_FAULT, LED_IDLE, LED_RUNNING};
use super::{StateMachine, StateView};
use crate::app::ports::Clock;
use crate::error::StateError;

// ═══════════════════════════════════════════════════════════════════════════
//  State identity
// ═══════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceState {
    Idle,
    Running,
    Cooldown,
    Fault,
}

impl DeviceState {
    pub const ALL: [Self; 4] = [Self::Idle, Self::Running, Self::Cooldown, Self::Fault];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Cooldown => "cooldown",
            Self::Fault => "fault",
        }
    }
}

impl fmt::Display for DeviceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Case-insensitive, by [`DeviceState::name`].
impl FromStr for DeviceState {
    type Err = StateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.name().eq_ignore_ascii_case(s))
            .ok_or(StateError::UnknownState)
    }
}

type Ctx = DeviceContext;
type View = StateView<DeviceState>;

// ═══════════════════════════════════════════════════════════════════════════
//  Table builder
// ═══════════════════════════════════════════════════════════════════════════

/// Install the four device states.  Called once at startup.
pub fn register_device_states<K: Clock>(
    fsm: &mut StateMachine<DeviceState, DeviceContext, K>,
) -> Result<(), StateError> {
    fsm.register_state(DeviceState::Idle, Some(idle_enter), None, None)?;
    fsm.register_state(
        DeviceState::Running,
        Some(running_enter),
        Some(running_update),
        Some(running_exit),
    )?;
    fsm.register_state(
        DeviceState::Cooldown,
        Some(cooldown_enter),
        Some(cooldown_update),
        None,
    )?;
    fsm.register_state(DeviceState::Fault, Some(fault_enter), None, Some(fault_exit))?;
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════
//  IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn idle_enter(ctx: &mut Ctx, _v: &View) {
    ctx.led_rgb = LED_IDLE;
    info!("IDLE: waiting for operator");
}

// ═══════════════════════════════════════════════════════════════════════════
//  RUNNING — times out into COOLDOWN
// ═══════════════════════════════════════════════════════════════════════════

fn running_enter(ctx: &mut Ctx, _v: &View) {
    ctx.runs = ctx.runs.saturating_add(1);
    ctx.led_rgb = LED_RUNNING;
    info!(
        "RUNNING: run #{} for up to {} ms",
        ctx.runs, ctx.config.run_timeout_ms
    );
}

fn running_update(ctx: &mut Ctx, v: &View) -> Option<DeviceState> {
    (v.elapsed_ms >= ctx.config.run_timeout_ms).then_some(DeviceState::Cooldown)
}

fn running_exit(ctx: &mut Ctx, v: &View) {
    ctx.active_ms = ctx.active_ms.saturating_add(v.elapsed_ms);
}

// ═══════════════════════════════════════════════════════════════════════════
//  COOLDOWN — returns to IDLE
// ═══════════════════════════════════════════════════════════════════════════

fn cooldown_enter(ctx: &mut Ctx, _v: &View) {
    ctx.led_rgb = LED_COOLDOWN;
    info!("COOLDOWN: {} ms", ctx.config.cooldown_ms);
}

fn cooldown_update(ctx: &mut Ctx, v: &View) -> Option<DeviceState> {
    (v.elapsed_ms >= ctx.config.cooldown_ms).then_some(DeviceState::Idle)
}

// ═══════════════════════════════════════════════════════════════════════════
//  FAULT — latched until cleared by the operator
// ═══════════════════════════════════════════════════════════════════════════

fn fault_enter(ctx: &mut Ctx, _v: &View) {
    ctx.faults = ctx.faults.saturating_add(1);
    ctx.led_rgb = LED_FAULT;
    warn!("FAULT #{}: {}", ctx.faults, ctx.fault_reason);
}

fn fault_exit(ctx: &mut Ctx, v: &View) {
    info!("FAULT cleared after {} ms", v.elapsed_ms);
    ctx.fault_reason.clear();
}
