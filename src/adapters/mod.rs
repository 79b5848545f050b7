//! Adapters — concrete implementations of the port traits.
//!
//! | Adapter   | Implements    | Connects to                        |
//! |-----------|---------------|------------------------------------|
//! | `stdio`   | LineChannel   | stdin / stdout (console UART)      |
//! | `time`    | Clock         | ESP32 system timer / host Instant  |
//! |           | Clock         | manual clock for tests             |
//! | `logging` | —             | esp_idf_logger / env_logger        |

pub mod logging;
pub mod stdio;
pub mod time;
