//! Hardware Abstraction Layer (ESP-IDF targets only).
//!
//! Thin wrappers around ESP-IDF peripherals plus the firmware main loop.
//! Encoding and timing stay in the core modules; this layer is just I/O.

pub mod gpio;
pub mod uart;

pub use gpio::EspSink;
pub use uart::Serial;

use core::fmt::Write;

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::peripherals::Peripherals;
use esp_idf_svc::sys::EspError;

use crate::config::{CONFIG, LINE_SIZE};
use crate::console::LineBuffer;
use crate::fault::FaultCode;
use crate::logging::{drain_to, TX_LOG};
use crate::progress::{banner, Echo};
use crate::sequencer::Transmitter;
use crate::FAULT;

/// Poll interval while the serial port is idle.
const IDLE_POLL_MS: u32 = 10;

/// Firmware entry: read lines from UART0 and key them out, forever.
///
/// Pins are fixed by the board wiring and match [`CONFIG`]: LED on GPIO13,
/// buzzer on GPIO8, console on GPIO43/44.
pub fn run() -> Result<(), EspError> {
    let p = Peripherals::take()?;

    let mut serial = Serial::new(p.uart0, p.pins.gpio43, p.pins.gpio44, CONFIG.uart_baud)?;
    let mut sink = EspSink::new(
        p.pins.gpio13,
        p.pins.gpio8,
        p.ledc.timer0,
        p.ledc.channel0,
        &CONFIG,
    )?;
    let transmitter = Transmitter::new(CONFIG.timing, CONFIG.tone_hz);

    banner(&mut serial);

    let mut line = LineBuffer::new();
    let mut overflowed = false;
    let mut rx = [0u8; 64];

    loop {
        let n = match serial.read(&mut rx) {
            Ok(n) => n,
            Err(e) => {
                FAULT.set(FaultCode::SerialIo, e.code() as u32);
                0
            }
        };

        for &byte in &rx[..n] {
            match line.push(byte) {
                Ok(true) => {
                    let mut echo = Echo::new(&mut serial);
                    transmitter.transmit_with_progress(line.as_str(), &mut sink, &mut echo);
                    line.clear();
                    overflowed = false;
                    report(&mut serial);
                }
                Ok(false) => {}
                Err(e) => {
                    // One report per line, not one per dropped byte.
                    if !overflowed {
                        overflowed = true;
                        FAULT.set(FaultCode::LineOverflow, LINE_SIZE as u32);
                        crate::tx_warn!(TX_LOG, 0, "{}", e);
                    }
                }
            }
        }

        if n == 0 {
            FreeRtos::delay_ms(IDLE_POLL_MS);
        }
    }
}

/// Flush logs and any latched fault to the console between messages.
fn report(serial: &mut Serial<'_>) {
    if let Some(fault) = FAULT.take() {
        let _ = writeln!(serial, "{}", fault);
    }
    drain_to(&TX_LOG, serial);
}
