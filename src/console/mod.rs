//! Serial console input.
//!
//! Assembles bytes into complete lines. Zero heap allocation.

pub mod error;
pub mod line_buffer;

pub use error::ConsoleError;
pub use line_buffer::LineBuffer;
