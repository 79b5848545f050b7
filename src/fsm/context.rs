//! Shared mutable context threaded through every device state callback.
//!
//! `DeviceContext` is the blackboard the reference device's state handlers
//! read from and write to: configuration, counters, the fault latch, and
//! the status LED colour the main loop would push to hardware.

use crate::config::ConsoleConfig;

/// Longest fault reason kept (bytes); longer reasons are truncated.
pub const MAX_FAULT_REASON: usize = 32;

/// Status LED colour (R, G, B), each 0 to 255.
pub type Rgb = (u8, u8, u8);

pub const LED_OFF: Rgb = (0, 0, 0);
pub const LED_IDLE: Rgb = (0, 180, 148);
pub const LED_RUNNING: Rgb = (0, 50, 255);
pub const LED_COOLDOWN: Rgb = (255, 140, 0);
pub const LED_FAULT: Rgb = (255, 0, 0);

pub struct DeviceContext {
    // -- Configuration --
    pub config: ConsoleConfig,

    // -- Counters --
    /// Runs started since boot.
    pub runs: u32,
    /// Faults latched since boot.
    pub faults: u32,
    /// Total milliseconds spent in `Running`, summed on exit.
    pub active_ms: u64,

    // -- Fault latch --
    /// Reason given for the current (or last) fault.
    pub fault_reason: heapless::String<MAX_FAULT_REASON>,

    // -- Outputs --
    pub led_rgb: Rgb,
    /// Set by the `debug` command; the service applies it to both the
    /// dispatcher and the engine after each tick.
    pub debug_requested: bool,
}

impl DeviceContext {
    pub fn new(config: ConsoleConfig) -> Self {
        let debug_requested = config.debug_mode;
        Self {
            config,
            runs: 0,
            faults: 0,
            active_ms: 0,
            fault_reason: heapless::String::new(),
            led_rgb: LED_OFF,
            debug_requested,
        }
    }

    /// Record why the next fault transition happens.
    pub fn latch_fault_reason(&mut self, reason: &str) {
        self.fault_reason = crate::command::args::bounded(reason);
    }

    /// Current LED colour as `#RRGGBB`.
    pub fn led_hex(&self) -> String {
        let (r, g, b) = self.led_rgb;
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// `true` once the fault budget is used up.
    pub fn fault_limit_reached(&self) -> bool {
        self.faults >= self.config.max_faults
    }
}
