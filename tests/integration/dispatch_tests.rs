//! Dispatcher behaviour through the public API, with a caller-defined
//! context and the scripted channel.

use console_fsm::command::{ArgType, CommandRegistry, MAX_COMMANDS};
use console_fsm::{CommandError, Severity};

use crate::mock_io::ScriptedChannel;

/// Caller context: a journal of every handler invocation.
#[derive(Default)]
struct Bench {
    seen: Vec<(String, Vec<String>)>,
}

fn record(name: &str, bench: &mut Bench, args: &[&str]) {
    bench
        .seen
        .push((name.to_owned(), args.iter().map(|a| (*a).to_owned()).collect()));
}

fn add(bench: &mut Bench, args: &[&str]) -> String {
    record("add", bench, args);
    "added".into()
}

fn greet(bench: &mut Bench, args: &[&str]) -> String {
    record("greet", bench, args);
    format!("hello {}", args[0])
}

fn noop(bench: &mut Bench, args: &[&str]) -> String {
    record("noop", bench, args);
    String::new()
}

fn bench_registry() -> CommandRegistry<Bench> {
    let mut reg = CommandRegistry::new();
    reg.register_command("add", add, "Add numbers", &[ArgType::Int, ArgType::Float])
        .unwrap();
    reg.register_command("greet", greet, "Say hello", &[ArgType::String])
        .unwrap();
    reg
}

// ── Registration ──────────────────────────────────────────────

#[test]
fn eleventh_registration_fails_and_table_stays_full() {
    let mut reg: CommandRegistry<Bench> = CommandRegistry::new();
    for i in 0..MAX_COMMANDS {
        assert!(reg.register_command(&format!("cmd{i}"), noop, "", &[]).is_ok());
    }
    assert_eq!(
        reg.register_command("cmd10", noop, "", &[]),
        Err(CommandError::CapacityExceeded)
    );
    assert_eq!(reg.len(), MAX_COMMANDS);

    // The rejected name is not dispatchable.
    let mut bench = Bench::default();
    assert!(!reg.process_command("cmd10", &mut bench));
    assert!(bench.seen.is_empty());
}

// ── Dispatch ──────────────────────────────────────────────────

#[test]
fn valid_line_reaches_handler_with_raw_tokens() {
    let mut reg = bench_registry();
    let mut bench = Bench::default();
    assert_eq!(reg.execute("add 3 4.5", &mut bench), Ok("added".to_owned()));
    assert_eq!(
        bench.seen,
        vec![("add".to_owned(), vec!["3".to_owned(), "4.5".to_owned()])]
    );
}

#[test]
fn wrong_arity_and_wrong_type_never_reach_handler() {
    let mut reg = bench_registry();
    let mut bench = Bench::default();

    assert_eq!(
        reg.execute("add 3", &mut bench),
        Err(CommandError::ArgumentCountMismatch {
            expected: 2,
            got: 1
        })
    );
    assert!(matches!(
        reg.execute("add x 4.5", &mut bench),
        Err(CommandError::ArgumentTypeMismatch { index: 1, .. })
    ));
    assert!(matches!(
        reg.execute("add 1 2 3 4 5 6 7", &mut bench),
        Err(CommandError::ArgumentCountMismatch { expected: 2, got: 5 })
    ));
    assert!(bench.seen.is_empty());
    assert_eq!(reg.last_status().severity(), Severity::Error);
}

#[test]
fn mixed_case_names_dispatch() {
    let mut reg = bench_registry();
    let mut bench = Bench::default();
    assert!(reg.process_command("GREET world", &mut bench));
    assert!(reg.process_command("Greet again", &mut bench));
    assert_eq!(reg.last_result(), "hello again");
    assert_eq!(bench.seen.len(), 2);
}

#[test]
fn whitespace_runs_are_collapsed() {
    let mut reg = bench_registry();
    let mut bench = Bench::default();
    assert!(reg.process_command("  add\t 10    -2.5 \r\n", &mut bench));
    assert_eq!(bench.seen[0].1, vec!["10".to_owned(), "-2.5".to_owned()]);
}

#[test]
fn blank_line_is_unknown_command() {
    let mut reg = bench_registry();
    let mut bench = Bench::default();
    assert_eq!(
        reg.execute("   ", &mut bench),
        Err(CommandError::UnknownCommand(String::new()))
    );
    assert_eq!(reg.last_status().message(), "Error: Unknown command ''");
}

// ── Help ──────────────────────────────────────────────────────

#[test]
fn help_and_question_mark_list_in_registration_order() {
    let mut reg = bench_registry();
    let mut bench = Bench::default();
    let expected = "Available commands:\nadd: Add numbers\ngreet: Say hello\n\n";
    assert_eq!(reg.execute("help", &mut bench).as_deref(), Ok(expected));
    assert_eq!(reg.execute("?", &mut bench).as_deref(), Ok(expected));
    assert_eq!(reg.execute("help extra args", &mut bench).as_deref(), Ok(expected));
    assert!(bench.seen.is_empty());
}

#[test]
fn listing_is_byte_identical_across_calls() {
    let mut reg = bench_registry();
    let a = reg.list_all_commands().to_owned();
    let b = reg.list_all_commands().to_owned();
    assert_eq!(a, b);
}

// ── Polling a channel ─────────────────────────────────────────

#[test]
fn poll_takes_one_line_per_call() {
    let mut reg = bench_registry();
    let mut bench = Bench::default();
    let mut io = ScriptedChannel::new(&["greet a", "add 1", "", "greet b"]);

    assert_eq!(reg.poll(&mut io, &mut bench), Some(true));
    assert_eq!(reg.poll(&mut io, &mut bench), Some(false));
    assert_eq!(reg.poll(&mut io, &mut bench), None);
    assert_eq!(reg.poll(&mut io, &mut bench), Some(true));
    assert_eq!(reg.poll(&mut io, &mut bench), None);

    assert_eq!(
        io.lines(),
        vec![
            "hello a",
            "Error: Expected 2 arguments, but got 1. Expected types: Integer Float. Received: 1",
            "hello b",
        ]
    );
}
