//! Command registry and line dispatcher.
//!
//! ```text
//!  "add 3 4.5" ──▶ tokenize ──▶ help? ──▶ lookup ──▶ count ──▶ types ──▶ handler
//!                                 │          │          │         │          │
//!                                 ▼          ▼          ▼         ▼          ▼
//!                              listing   Unknown    Count     Type     last result
//!                                        Command    Mismatch  Mismatch + status
//! ```
//!
//! The table is a fixed-capacity array scanned in registration order; the
//! first case-insensitive name match wins.  Every call leaves exactly one
//! outcome behind in the single-slot "last status" / "last result" fields.

pub mod args;

pub use args::ArgType;

use core::fmt::Write as _;

use crate::app::ports::LineChannel;
use crate::error::CommandError;
use crate::status::{Severity, Status};

use args::{bounded, tokenize};

/// Maximum number of registered commands.
pub const MAX_COMMANDS: usize = 10;
/// Maximum positional arguments per command (extra tokens are dropped).
pub const MAX_ARGS: usize = 5;
/// Command names are stored and matched on at most this many bytes.
pub const MAX_COMMAND_LENGTH: usize = 20;
/// Descriptions are truncated to this many bytes.
pub const MAX_DESCRIPTION_LENGTH: usize = 64;

const STATUS_SOURCE: &str = "cmd";

/// Handler signature: caller context plus the raw argument tokens
/// (command name excluded).  The returned text becomes the last result.
pub type CommandFn<C> = fn(&mut C, &[&str]) -> String;

/// One row of the command table.  Immutable once registered.
pub struct Command<C> {
    name: heapless::String<MAX_COMMAND_LENGTH>,
    description: heapless::String<MAX_DESCRIPTION_LENGTH>,
    arg_types: heapless::Vec<ArgType, MAX_ARGS>,
    handler: CommandFn<C>,
}

impl<C> Command<C> {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn arg_types(&self) -> &[ArgType] {
        &self.arg_types
    }

    /// Number of positional arguments; always equals `arg_types().len()`.
    pub fn arg_count(&self) -> usize {
        self.arg_types.len()
    }
}

/// The dispatcher: command table plus the single-slot outcome.
pub struct CommandRegistry<C> {
    commands: heapless::Vec<Command<C>, MAX_COMMANDS>,
    last_status: Status,
    last_result: String,
    debug: bool,
}

impl<C> Default for CommandRegistry<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> CommandRegistry<C> {
    pub fn new() -> Self {
        Self {
            commands: heapless::Vec::new(),
            last_status: Status::info("No commands processed yet"),
            last_result: String::new(),
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

    /// Append a command to the table.
    ///
    /// Type tags beyond [`MAX_ARGS`] are dropped; over-long names and
    /// descriptions are truncated.  Duplicate names are accepted and the
    /// earlier registration keeps precedence.
    pub fn register_command(
        &mut self,
        name: &str,
        handler: CommandFn<C>,
        description: &str,
        arg_types: &[ArgType],
    ) -> Result<(), CommandError> {
        if self.commands.is_full() {
            self.set_status("Error: Maximum number of commands reached", Severity::Error);
            return Err(CommandError::CapacityExceeded);
        }

        let mut types = heapless::Vec::new();
        for &t in arg_types.iter().take(MAX_ARGS) {
            let _ = types.push(t);
        }

        let command = Command {
            name: bounded(name),
            description: bounded(description),
            arg_types: types,
            handler,
        };
        // Capacity was checked above.
        let _ = self.commands.push(command);
        Ok(())
    }

    // ── Dispatch ─────────────────────────────────────────────

    /// Parse and run one line.  Returns `true` on success; the details are
    /// left in [`last_status`](Self::last_status) and
    /// [`last_result`](Self::last_result).
    pub fn process_command(&mut self, line: &str, ctx: &mut C) -> bool {
        self.execute(line, ctx).is_ok()
    }

    /// Parse and run one line, returning the handler's result text (or the
    /// command listing for `help` / `?`) directly.
    pub fn execute(&mut self, line: &str, ctx: &mut C) -> Result<String, CommandError> {
        let parsed = tokenize(line);

        if parsed.name.eq_ignore_ascii_case("help") || parsed.name == "?" {
            return Ok(self.list_all_commands().to_owned());
        }

        let Some(index) = self.find(parsed.name) else {
            self.set_status(
                format!("Error: Unknown command '{}'", parsed.name),
                Severity::Error,
            );
            return Err(CommandError::UnknownCommand(parsed.name.to_owned()));
        };

        self.validate(index, parsed.args.as_slice())?;

        let handler = self.commands[index].handler;
        let result = handler(ctx, parsed.args.as_slice());

        let mut status = format!("Executed command: {}", parsed.name);
        for arg in &parsed.args {
            status.push(' ');
            status.push_str(arg);
        }
        self.set_status(status, Severity::Info);
        self.last_result.clone_from(&result);
        Ok(result)
    }

    /// Build the `name: description` listing in registration order and store
    /// it as both the last status and the last result.
    pub fn list_all_commands(&mut self) -> &str {
        let mut listing = String::from("Available commands:\n");
        for cmd in &self.commands {
            let _ = writeln!(listing, "{}: {}", cmd.name, cmd.description);
        }
        listing.push('\n');

        self.last_result.clone_from(&listing);
        self.set_status(listing, Severity::Info);
        &self.last_result
    }

    /// Poll the channel for one line and dispatch it.
    ///
    /// Writes the result on success and the status line on failure.
    /// Returns `None` when no line was pending or the line was blank.
    pub fn poll(&mut self, io: &mut impl LineChannel, ctx: &mut C) -> Option<bool> {
        let line = io.read_line()?;
        if line.trim().is_empty() {
            return None;
        }

        let ok = self.process_command(&line, ctx);
        let reply = if ok {
            self.last_result.as_str()
        } else {
            self.last_status.message()
        };
        io.write_str(reply);
        if !reply.ends_with('\n') {
            io.write_str("\n");
        }
        Some(ok)
    }

    // ── Queries ──────────────────────────────────────────────

    pub fn last_status(&self) -> &Status {
        &self.last_status
    }

    pub fn last_result(&self) -> &str {
        &self.last_result
    }

    pub fn is_last_status_error(&self) -> bool {
        self.last_status.is_error()
    }

    /// Registered commands in registration order.
    pub fn commands(&self) -> impl Iterator<Item = &Command<C>> {
        self.commands.iter()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    // ── Internal ─────────────────────────────────────────────

    fn find(&self, name: &str) -> Option<usize> {
        self.commands
            .iter()
            .position(|c| c.name.eq_ignore_ascii_case(name))
    }

    fn validate(&mut self, index: usize, args: &[&str]) -> Result<(), CommandError> {
        let expected = self.commands[index].arg_types.clone();

        if args.len() != expected.len() {
            let mut msg = format!(
                "Error: Expected {} arguments, but got {}. Expected types:",
                expected.len(),
                args.len()
            );
            for t in &expected {
                msg.push(' ');
                msg.push_str(t.name());
            }
            msg.push_str(". Received:");
            for arg in args {
                msg.push(' ');
                msg.push_str(arg);
            }
            self.set_status(msg, Severity::Error);
            return Err(CommandError::ArgumentCountMismatch {
                expected: expected.len(),
                got: args.len(),
            });
        }

        for (i, (&t, &arg)) in expected.iter().zip(args).enumerate() {
            if !t.accepts(arg) {
                self.set_status(
                    format!(
                        "Error: Argument {} has incorrect type. Expected {}, got '{}'",
                        i + 1,
                        t,
                        arg
                    ),
                    Severity::Error,
                );
                return Err(CommandError::ArgumentTypeMismatch {
                    index: i + 1,
                    expected: t,
                    got: arg.to_owned(),
                });
            }
        }
        Ok(())
    }

    fn set_status(&mut self, message: impl Into<String>, severity: Severity) {
        self.last_status
            .record(Status::new(message, severity), STATUS_SOURCE, self.debug);
    }
}
