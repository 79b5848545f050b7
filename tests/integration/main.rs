//! Integration test driver for `tests/integration/` submodule.
//!
//! Each `mod` below maps to a file that exercises one layer through the
//! public API against mock adapters.  Everything runs on the host.

mod console_tests;
mod dispatch_tests;
mod mock_io;
