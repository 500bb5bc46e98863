//! # MorseTx
//!
//! Serial text to Morse code transmitter: every line received on the
//! console is keyed out on an LED and a buzzer.
//!
//! ## Architecture
//!
//! ```text
//! UART ─▶ LineBuffer ─▶ Sequencer ─▶ TimedEvent ─▶ SignalSink ─▶ LED / buzzer
//!                          │                          (or PCM, or a test recorder)
//!                          └─▶ Progress (serial echo)
//! ```
//!
//! - [`morse`] maps characters to dot/dash codes
//! - [`sequencer`] turns a message into timed on/off events, lazily
//! - [`sink`] is the only place that waits or touches outputs
//!
//! Everything except [`hal`] is `no_std`, allocation-free and tested on the
//! host.

#![cfg_attr(not(test), no_std)]

pub mod audio;
pub mod config;
pub mod console;
pub mod fault;
pub mod logging;
pub mod morse;
pub mod progress;
pub mod sequencer;
pub mod sink;
pub mod timing;

#[cfg(target_os = "espidf")]
pub mod hal;

pub use config::CONFIG;
pub use fault::{FaultCode, FaultState};
pub use logging::TX_LOG;
pub use morse::{encode, MorseCode, Symbol, Unsupported};
pub use sequencer::{transmit, Sequencer, Step, Transmitter};
pub use sink::SignalSink;
pub use timing::{TimedEvent, TimingProfile};

/// Global hardware fault latch.
pub static FAULT: FaultState = FaultState::new();
