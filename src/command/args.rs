//! Line tokenizer and positional-argument validation.

use core::fmt;

use super::{MAX_ARGS, MAX_COMMAND_LENGTH};

/// Declared type of one positional argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    String,
    Int,
    Float,
}

impl ArgType {
    /// Name used in operator-facing messages.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "String",
            Self::Int => "Integer",
            Self::Float => "Float",
        }
    }

    /// Whether `arg` is acceptable for this type.
    pub fn accepts(self, arg: &str) -> bool {
        match self {
            Self::String => true,
            Self::Int => is_integer(arg),
            Self::Float => is_float(arg),
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Optional `-`, then one or more ASCII digits.
pub fn is_integer(s: &str) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// Optional `-`, then one or more of ASCII digits and at most one `.`.
///
/// A lone `.` passes: the check is lexical, not numeric.
pub fn is_float(s: &str) -> bool {
    let body = s.strip_prefix('-').unwrap_or(s);
    if body.is_empty() {
        return false;
    }
    let mut seen_dot = false;
    for b in body.bytes() {
        match b {
            b'.' if seen_dot => return false,
            b'.' => seen_dot = true,
            b'0'..=b'9' => {}
            _ => return false,
        }
    }
    true
}

/// One tokenized input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine<'a> {
    /// Command token, truncated to `MAX_COMMAND_LENGTH` bytes.
    pub name: &'a str,
    /// Up to `MAX_ARGS` argument tokens; anything beyond is dropped.
    pub args: heapless::Vec<&'a str, MAX_ARGS>,
}

/// Split a line on whitespace into a command name and its arguments.
///
/// A blank line yields an empty name and no arguments.
pub fn tokenize(line: &str) -> ParsedLine<'_> {
    let mut tokens = line.split_whitespace();
    let name = tokens
        .next()
        .map_or("", |t| truncate(t, MAX_COMMAND_LENGTH));
    let mut args = heapless::Vec::new();
    for token in tokens {
        if args.push(token).is_err() {
            break;
        }
    }
    ParsedLine { name, args }
}

/// Cut `s` to at most `max` bytes without splitting a character.
pub(crate) fn truncate(s: &str, max: usize) -> &str {
    if s.len() <= max {
        return s;
    }
    let mut end = max;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

/// Copy `s` into a bounded string, truncating as needed.
pub(crate) fn bounded<const N: usize>(s: &str) -> heapless::String<N> {
    let mut out = heapless::String::new();
    // Cannot fail: the slice is cut to capacity first.
    let _ = out.push_str(truncate(s, N));
    out
}
