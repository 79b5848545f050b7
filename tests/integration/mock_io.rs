//! Scripted line channel for integration tests.
//!
//! Feeds queued lines one per `read_line` and captures everything written,
//! so tests can assert on the exact console transcript.

use std::collections::VecDeque;

use console_fsm::app::ports::LineChannel;

// ── ScriptedChannel ───────────────────────────────────────────

#[derive(Default)]
pub struct ScriptedChannel {
    pub input: VecDeque<String>,
    pub output: String,
}

#[allow(dead_code)]
impl ScriptedChannel {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            input: lines.iter().map(|l| (*l).to_owned()).collect(),
            output: String::new(),
        }
    }

    pub fn push(&mut self, line: &str) {
        self.input.push_back(line.to_owned());
    }

    /// Output lines written so far, without terminators.
    pub fn lines(&self) -> Vec<&str> {
        self.output.lines().collect()
    }

    /// Drain the captured output.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.output)
    }
}

impl LineChannel for ScriptedChannel {
    fn read_line(&mut self) -> Option<String> {
        self.input.pop_front()
    }

    fn write_str(&mut self, text: &str) {
        self.output.push_str(text);
    }
}
