//! Serial console on UART0.
//!
//! Carries both directions: operator text in, progress echo and drained log
//! entries out.
//!
//! ```text
//! ESP32-S3 GPIO43 (TX) ──────▶ USB-UART RX
//!          GPIO44 (RX) ◀────── USB-UART TX
//! ```

use core::fmt;

use esp_idf_svc::hal::delay::NON_BLOCK;
use esp_idf_svc::hal::gpio::{self, InputPin, OutputPin};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::uart::{self, UartDriver};
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::fault::FaultCode;
use crate::FAULT;

pub struct Serial<'d> {
    uart: UartDriver<'d>,
}

impl<'d> Serial<'d> {
    pub fn new(
        uart: impl Peripheral<P = uart::UART0> + 'd,
        tx_pin: impl Peripheral<P = impl OutputPin> + 'd,
        rx_pin: impl Peripheral<P = impl InputPin> + 'd,
        baud_rate: u32,
    ) -> Result<Self, EspError> {
        let config = uart::config::Config::default().baudrate(Hertz(baud_rate));
        let uart = UartDriver::new(
            uart,
            tx_pin,
            rx_pin,
            Option::<gpio::AnyIOPin>::None, // CTS
            Option::<gpio::AnyIOPin>::None, // RTS
            &config,
        )?;
        Ok(Self { uart })
    }

    /// Read whatever is buffered, without blocking.
    pub fn read(&mut self, buf: &mut [u8]) -> Result<usize, EspError> {
        self.uart.read(buf, NON_BLOCK)
    }

    /// Write all of `bytes`.
    pub fn write_all(&mut self, mut bytes: &[u8]) -> Result<(), EspError> {
        while !bytes.is_empty() {
            let n = self.uart.write(bytes)?;
            bytes = &bytes[n..];
        }
        Ok(())
    }
}

impl fmt::Write for Serial<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.write_all(s.as_bytes()).map_err(|_| {
            FAULT.set(FaultCode::SerialIo, 0);
            fmt::Error
        })
    }
}
