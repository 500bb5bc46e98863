//! Tone synthesis for the buzzer output.
//!
//! - 256-entry const sine table
//! - Phase-accumulator oscillator with attack/release ramp
//! - PCM sink rendering a whole transmission

pub mod lut;
pub mod render;
pub mod sidetone;

pub use lut::{LUT_SIZE, SINE_LUT};
pub use render::PcmSink;
pub use sidetone::{Envelope, Sidetone};
