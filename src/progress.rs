//! Progress reporting while a message is being sent.
//!
//! Observability only: nothing here affects timing. [`Echo`] writes the
//! operator-facing serial transcript.

use core::fmt::Write;

use crate::morse::MorseCode;

/// Receives sequencing milestones.
///
/// All methods default to no-ops, and `()` reports nothing.
pub trait Progress {
    fn message_start(&mut self, _message: &str) {}
    fn character(&mut self, _ch: char, _code: MorseCode) {}
    fn word_break(&mut self) {}
    fn message_end(&mut self) {}
}

impl Progress for () {}

impl<P: Progress + ?Sized> Progress for &mut P {
    fn message_start(&mut self, message: &str) {
        (**self).message_start(message)
    }

    fn character(&mut self, ch: char, code: MorseCode) {
        (**self).character(ch, code)
    }

    fn word_break(&mut self) {
        (**self).word_break()
    }

    fn message_end(&mut self) {
        (**self).message_end()
    }
}

/// Serial echo of the transmission.
///
/// ```text
/// Message received: SOS
/// Transmitting in Morse code...
/// S: ... O: --- S: ...
/// Ready for next message
/// ```
pub struct Echo<W: Write> {
    out: W,
}

impl<W: Write> Echo<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Give back the writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

// Echo is best effort: a failing writer must not stop the transmission.
impl<W: Write> Progress for Echo<W> {
    fn message_start(&mut self, message: &str) {
        let _ = writeln!(self.out, "Message received: {}", message);
        let _ = writeln!(self.out, "Transmitting in Morse code...");
    }

    fn character(&mut self, ch: char, code: MorseCode) {
        let _ = write!(self.out, "{}: {} ", ch, code);
    }

    fn word_break(&mut self) {
        let _ = self.out.write_str("   ");
    }

    fn message_end(&mut self) {
        let _ = writeln!(self.out);
        let _ = writeln!(self.out, "Ready for next message");
    }
}

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Print the power-on banner.
pub fn banner(out: &mut dyn Write) {
    let _ = writeln!(out, "{}", VERSION);
    let _ = writeln!(out, "Morse Code Transmitter");
    let _ = writeln!(out, "Enter a message and press Send");
}
