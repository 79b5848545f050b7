//! Operator commands for the reference device.
//!
//! Every handler is a plain `fn` over the [`Device`]; argument count and
//! types are already validated by the dispatcher when a handler runs, so
//! numeric parses here only fail on overflow.

use log::info;

use crate::command::{ArgType, CommandRegistry};
use crate::error::{CommandError, StateError};
use crate::fsm::Transition;
use crate::fsm::states::DeviceState;

use super::ports::Clock;
use super::service::Device;

/// Install the ten device commands, in listing order.
pub fn register_device_commands<K: Clock>(
    reg: &mut CommandRegistry<Device<K>>,
) -> Result<(), CommandError> {
    reg.register_command("state", state_cmd::<K>, "Show state, counters and LED colour", &[])?;
    reg.register_command("goto", goto_cmd::<K>, "Force a state by name", &[ArgType::String])?;
    reg.register_command("run", run_cmd::<K>, "Start a run", &[])?;
    reg.register_command("stop", stop_cmd::<K>, "Stop the run and cool down", &[])?;
    reg.register_command(
        "fault",
        fault_cmd::<K>,
        "Latch a fault with a reason",
        &[ArgType::String],
    )?;
    reg.register_command("clear", clear_cmd::<K>, "Clear a latched fault", &[])?;
    reg.register_command("uptime", uptime_cmd::<K>, "Milliseconds since boot", &[])?;
    reg.register_command(
        "add",
        add_cmd::<K>,
        "Add an integer and a float",
        &[ArgType::Int, ArgType::Float],
    )?;
    reg.register_command("echo", echo_cmd::<K>, "Echo one word back", &[ArgType::String])?;
    reg.register_command(
        "debug",
        debug_cmd::<K>,
        "Status logging: 1 = on, 0 = off",
        &[ArgType::Int],
    )?;
    Ok(())
}

// ── Helpers ───────────────────────────────────────────────────

fn describe(outcome: Result<Transition<DeviceState>, StateError>) -> String {
    match outcome {
        Ok(Transition::Changed { to, .. }) => format!("State changed to: {to}"),
        Ok(Transition::Unchanged(st)) => format!("Already in {st}"),
        Err(e) => format!("Transition failed: {e}"),
    }
}

// ── State control ─────────────────────────────────────────────

fn state_cmd<K: Clock>(dev: &mut Device<K>, _args: &[&str]) -> String {
    let ctx = &dev.ctx;
    match dev.state() {
        Some(st) => format!(
            "{st} for {} ms (runs={}, faults={}/{}, active={} ms, led={})",
            dev.machine.elapsed_ms(),
            ctx.runs,
            ctx.faults,
            ctx.config.max_faults,
            ctx.active_ms,
            ctx.led_hex()
        ),
        None => "not started".into(),
    }
}

fn goto_cmd<K: Clock>(dev: &mut Device<K>, args: &[&str]) -> String {
    match args[0].parse::<DeviceState>() {
        Ok(target) => describe(dev.goto(target)),
        Err(_) => format!("Unknown state '{}'", args[0]),
    }
}

fn run_cmd<K: Clock>(dev: &mut Device<K>, _args: &[&str]) -> String {
    if dev.state() == Some(DeviceState::Fault) {
        return "Refused: clear the fault first".into();
    }
    describe(dev.goto(DeviceState::Running))
}

fn stop_cmd<K: Clock>(dev: &mut Device<K>, _args: &[&str]) -> String {
    if dev.state() != Some(DeviceState::Running) {
        return "Not running".into();
    }
    describe(dev.goto(DeviceState::Cooldown))
}

fn fault_cmd<K: Clock>(dev: &mut Device<K>, args: &[&str]) -> String {
    dev.ctx.latch_fault_reason(args[0]);
    describe(dev.goto(DeviceState::Fault))
}

fn clear_cmd<K: Clock>(dev: &mut Device<K>, _args: &[&str]) -> String {
    if dev.state() != Some(DeviceState::Fault) {
        return "No fault to clear".into();
    }
    if dev.ctx.fault_limit_reached() {
        return format!(
            "Refused: fault limit reached ({}/{})",
            dev.ctx.faults, dev.ctx.config.max_faults
        );
    }
    describe(dev.goto(DeviceState::Idle))
}

// ── Misc ──────────────────────────────────────────────────────

fn uptime_cmd<K: Clock>(dev: &mut Device<K>, _args: &[&str]) -> String {
    format!("Uptime: {} ms", dev.uptime_ms())
}

fn add_cmd<K: Clock>(_dev: &mut Device<K>, args: &[&str]) -> String {
    match (args[0].parse::<i64>(), args[1].parse::<f64>()) {
        (Ok(a), Ok(b)) => format!("{}", a as f64 + b),
        _ => "Invalid number".into(),
    }
}

fn echo_cmd<K: Clock>(_dev: &mut Device<K>, args: &[&str]) -> String {
    args[0].to_owned()
}

fn debug_cmd<K: Clock>(dev: &mut Device<K>, args: &[&str]) -> String {
    let on = args[0].parse::<i64>().is_ok_and(|v| v != 0);
    dev.ctx.debug_requested = on;
    info!("Debug mode requested: {}", on);
    format!("Debug mode {}", if on { "on" } else { "off" })
}
