//! Integration tests for the line → dispatcher → engine pipeline of the
//! reference device, driven tick by tick with a manual clock.

use console_fsm::adapters::time::ManualClock;
use console_fsm::app::service::Console;
use console_fsm::config::ConsoleConfig;
use console_fsm::fsm::context::{LED_COOLDOWN, LED_FAULT, LED_IDLE, LED_RUNNING};
use console_fsm::fsm::states::DeviceState;

use crate::mock_io::ScriptedChannel;

fn make_console() -> (Console<ManualClock>, ManualClock) {
    let clock = ManualClock::new();
    let config = ConsoleConfig {
        run_timeout_ms: 1_000,
        cooldown_ms: 200,
        ..ConsoleConfig::default()
    };
    let mut console = Console::new(config, clock.clone()).unwrap();
    console.start().unwrap();
    (console, clock)
}

#[test]
fn starts_idle_with_idle_led() {
    let (console, _) = make_console();
    assert_eq!(console.state(), Some(DeviceState::Idle));
    assert_eq!(console.device().ctx.led_rgb, LED_IDLE);
}

#[test]
fn run_times_out_then_cools_down() {
    let (mut console, clock) = make_console();
    let mut io = ScriptedChannel::new(&["run"]);

    console.tick(&mut io);
    assert_eq!(console.state(), Some(DeviceState::Running));
    assert_eq!(console.device().ctx.led_rgb, LED_RUNNING);
    assert_eq!(io.take_output(), "State changed to: running\n");

    clock.advance(1_000);
    console.tick(&mut io);
    assert_eq!(console.state(), Some(DeviceState::Cooldown));
    assert_eq!(console.device().ctx.led_rgb, LED_COOLDOWN);
    assert_eq!(console.device().ctx.active_ms, 1_000);

    clock.advance(200);
    console.tick(&mut io);
    assert_eq!(console.state(), Some(DeviceState::Idle));
    assert!(io.output.is_empty());
}

#[test]
fn command_runs_before_update_in_the_same_tick() {
    let (mut console, clock) = make_console();
    console.execute("run");
    clock.advance(5_000);

    // `stop` moves to Cooldown, whose timer restarts, so this tick's
    // update must not also bounce straight back to Idle.
    let mut io = ScriptedChannel::new(&["stop"]);
    console.tick(&mut io);
    assert_eq!(console.state(), Some(DeviceState::Cooldown));
}

#[test]
fn fault_and_clear_over_the_channel() {
    let (mut console, _) = make_console();
    let mut io = ScriptedChannel::new(&["fault overheat", "state", "run", "clear"]);
    for _ in 0..4 {
        console.tick(&mut io);
    }
    assert_eq!(
        io.lines(),
        vec![
            "State changed to: fault",
            "fault for 0 ms (runs=0, faults=1/3, active=0 ms, led=#FF0000)",
            "Refused: clear the fault first",
            "State changed to: idle",
        ]
    );
    assert_eq!(console.state(), Some(DeviceState::Idle));
    assert!(console.device().ctx.fault_reason.is_empty());
}

#[test]
fn fault_latch_survives_time() {
    let (mut console, clock) = make_console();
    console.execute("fault sensor");
    clock.advance(60_000);
    let mut io = ScriptedChannel::default();
    console.tick(&mut io);
    assert_eq!(console.state(), Some(DeviceState::Fault));
    assert_eq!(console.device().ctx.led_rgb, LED_FAULT);
    assert_eq!(console.device().ctx.fault_reason.as_str(), "sensor");
}

#[test]
fn errors_are_written_as_status_lines() {
    let (mut console, _) = make_console();
    let mut io = ScriptedChannel::new(&["warp 9", "add one 2", "goto nowhere"]);
    for _ in 0..3 {
        console.tick(&mut io);
    }
    assert_eq!(
        io.lines(),
        vec![
            "Error: Unknown command 'warp'",
            "Error: Argument 1 has incorrect type. Expected Integer, got 'one'",
            "Unknown state 'nowhere'",
        ]
    );
    assert_eq!(console.state(), Some(DeviceState::Idle));
}

#[test]
fn help_lists_all_device_commands() {
    let (mut console, _) = make_console();
    let mut io = ScriptedChannel::new(&["help"]);
    console.tick(&mut io);
    let out = io.take_output();
    assert!(out.starts_with("Available commands:\n"));
    for name in [
        "state", "goto", "run", "stop", "fault", "clear", "uptime", "add", "echo", "debug",
    ] {
        assert!(out.contains(&format!("\n{name}: ")), "missing {name}");
    }
    assert!(out.ends_with("\n\n"));
}

#[test]
fn idle_ticks_do_not_write() {
    let (mut console, _) = make_console();
    let mut io = ScriptedChannel::default();
    for _ in 0..10 {
        console.tick(&mut io);
    }
    assert_eq!(console.tick_count(), 10);
    assert!(io.output.is_empty());
}
