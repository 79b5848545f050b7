//! Stdio line channel.
//!
//! On ESP-IDF, stdin/stdout are bound to the console UART (or USB-CDC), so
//! the same adapter serves both the device and the host simulator.
//! Reading stdin blocks, so a reader thread feeds complete lines through an
//! `mpsc` queue and [`LineChannel::read_line`] only ever does a `try_recv`.

use std::io::{BufRead, Write};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use log::{info, warn};

use crate::app::ports::LineChannel;

const READER_STACK_SIZE: usize = 4096;

pub struct StdioChannel {
    lines: Receiver<String>,
    closed: bool,
}

impl StdioChannel {
    /// Spawn the stdin reader thread.
    pub fn spawn() -> std::io::Result<Self> {
        let (tx, rx) = mpsc::channel();
        thread::Builder::new()
            .name("stdin-reader".into())
            .stack_size(READER_STACK_SIZE)
            .spawn(move || {
                let stdin = std::io::stdin();
                for line in stdin.lock().lines() {
                    match line {
                        Ok(line) => {
                            if tx.send(line).is_err() {
                                break;
                            }
                        }
                        Err(e) => {
                            warn!("stdin read failed: {}", e);
                            break;
                        }
                    }
                }
            })?;
        info!("StdioChannel: reader thread started");
        Ok(Self {
            lines: rx,
            closed: false,
        })
    }

    /// `true` once stdin hit end-of-file and every queued line was taken.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl LineChannel for StdioChannel {
    fn read_line(&mut self) -> Option<String> {
        match self.lines.try_recv() {
            Ok(line) => Some(line),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.closed = true;
                None
            }
        }
    }

    fn write_str(&mut self, text: &str) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all(text.as_bytes()).and_then(|()| out.flush()) {
            warn!("stdout write failed: {}", e);
        }
    }
}
