//! console-fsm — Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │   StdioChannel (LineChannel)   MonotonicClock (Clock)    │
//! │   ────────────── Port Trait Boundary ──────────────      │
//! │   ┌──────────────────────────────────────────────────┐   │
//! │   │  Console: CommandRegistry · StateMachine · ctx   │   │
//! │   └──────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `console-fsm [config.json]`
#![deny(unused_must_use)]

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use log::info;

use console_fsm::adapters::logging;
use console_fsm::adapters::stdio::StdioChannel;
use console_fsm::adapters::time::MonotonicClock;
use console_fsm::app::service::Console;
use console_fsm::config::{self, ConsoleConfig};

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    #[cfg(target_os = "espidf")]
    esp_idf_svc::sys::link_patches();
    logging::init()?;

    info!("console-fsm v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration ──────────────────────────────────────
    let config = match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => {
            let config = config::load(&path)
                .with_context(|| format!("loading config from {}", path.display()))?;
            info!("Config loaded from {}", path.display());
            config
        }
        None => {
            info!("No config file given, using defaults");
            ConsoleConfig::default()
        }
    };
    let tick = Duration::from_millis(u64::from(config.tick_interval_ms));

    // ── 3. Wire up ────────────────────────────────────────────
    let mut console =
        Console::new(config, MonotonicClock::new()).context("building console")?;
    let mut io = StdioChannel::spawn().context("starting stdin reader")?;
    console.start()?;

    info!("Ready. Type 'help' for commands.");

    // ── 4. Tick loop ──────────────────────────────────────────
    loop {
        console.tick(&mut io);
        if io.is_closed() {
            info!("Input closed after {} ticks, exiting", console.tick_count());
            return Ok(());
        }
        std::thread::sleep(tick);
    }
}
