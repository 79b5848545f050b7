//! Console service — the firmware glue around the two core components.
//!
//! [`Console`] owns the command dispatcher and the [`Device`] (state engine
//! plus its context).  Nothing is global: command handlers receive the
//! `Device` by `&mut` and drive the engine through it.
//!
//! ```text
//!  LineChannel ──▶ ┌──────────────────────────────┐
//!                  │           Console            │
//!                  │  CommandRegistry<Device>     │──▶ handlers ──┐
//!                  │  Device { StateMachine, ctx }│◀──────────────┘
//!                  └──────────────────────────────┘
//!                           ▲ tick(): poll one line, then update()
//! ```

use log::{info, warn};

use crate::command::CommandRegistry;
use crate::config::ConsoleConfig;
use crate::error::{Result, StateError};
use crate::fsm::context::DeviceContext;
use crate::fsm::states::{DeviceState, register_device_states};
use crate::fsm::{StateMachine, Transition};

use super::commands::register_device_commands;
use super::ports::{Clock, LineChannel};

// ───────────────────────────────────────────────────────────────
// Device
// ───────────────────────────────────────────────────────────────

/// The state engine together with the context its callbacks mutate.
pub struct Device<K> {
    pub machine: StateMachine<DeviceState, DeviceContext, K>,
    pub ctx: DeviceContext,
}

impl<K: Clock> Device<K> {
    pub fn new(config: ConsoleConfig, clock: K) -> Result<Self> {
        let mut machine = StateMachine::new(clock);
        machine.set_debug_mode(config.debug_mode);
        register_device_states(&mut machine)?;
        Ok(Self {
            machine,
            ctx: DeviceContext::new(config),
        })
    }

    /// Transition the engine, handing it the context.
    pub fn goto(
        &mut self,
        target: DeviceState,
    ) -> core::result::Result<Transition<DeviceState>, StateError> {
        self.machine.set_state(target, &mut self.ctx)
    }

    pub fn update(&mut self) {
        self.machine.update(&mut self.ctx);
    }

    pub fn state(&self) -> Option<DeviceState> {
        self.machine.state()
    }

    /// Milliseconds since the clock's origin.
    pub fn uptime_ms(&self) -> u64 {
        self.machine.clock().now_ms()
    }
}

// ───────────────────────────────────────────────────────────────
// Console
// ───────────────────────────────────────────────────────────────

pub struct Console<K> {
    commands: CommandRegistry<Device<K>>,
    device: Device<K>,
    ticks: u64,
}

impl<K: Clock> Console<K> {
    /// Build the dispatcher and the device.
    ///
    /// Does **not** enter the first state; call [`start`](Self::start).
    pub fn new(config: ConsoleConfig, clock: K) -> Result<Self> {
        config.validate()?;
        let mut commands = CommandRegistry::new();
        commands.set_debug_mode(config.debug_mode);
        register_device_commands(&mut commands)?;
        let device = Device::new(config, clock)?;
        Ok(Self {
            commands,
            device,
            ticks: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter `Idle`.
    pub fn start(&mut self) -> Result<()> {
        self.device.goto(DeviceState::Idle)?;
        info!(
            "Console started: {} commands, {} states",
            self.commands.len(),
            self.device.machine.len()
        );
        Ok(())
    }

    // ── Per-tick orchestration ────────────────────────────────

    /// One host tick: dispatch at most one pending line, then run the
    /// current state's update.
    pub fn tick(&mut self, io: &mut impl LineChannel) {
        self.ticks += 1;
        if let Some(false) = self.commands.poll(io, &mut self.device) {
            warn!("Command failed: {}", self.commands.last_status());
        }
        self.apply_debug_request();
        self.device.update();
    }

    /// Run one line immediately, outside the tick cadence.
    pub fn execute(&mut self, line: &str) -> bool {
        let ok = self.commands.process_command(line, &mut self.device);
        self.apply_debug_request();
        ok
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn commands(&self) -> &CommandRegistry<Device<K>> {
        &self.commands
    }

    pub fn device(&self) -> &Device<K> {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut Device<K> {
        &mut self.device
    }

    pub fn state(&self) -> Option<DeviceState> {
        self.device.state()
    }

    /// Host ticks executed since construction.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    pub fn tick_interval_ms(&self) -> u32 {
        self.device.ctx.config.tick_interval_ms
    }

    // ── Internal ──────────────────────────────────────────────

    fn apply_debug_request(&mut self) {
        let wanted = self.device.ctx.debug_requested;
        if self.commands.debug_mode() != wanted {
            info!("Debug mode {}", if wanted { "on" } else { "off" });
            self.commands.set_debug_mode(wanted);
            self.device.machine.set_debug_mode(wanted);
        }
    }
}
