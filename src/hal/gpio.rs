//! Indicator LED and buzzer on ESP32 GPIO.
//!
//! ```text
//! GPIO13 ──[330Ω]──▶ LED        (visual)
//! GPIO8  ── LEDC ──▶ buzzer     (audible, 50% duty square wave)
//! ```
//!
//! Driver errors are latched in [`FAULT`] and logged, never returned: a
//! message that has started always plays to the end.

use esp_idf_svc::hal::delay::FreeRtos;
use esp_idf_svc::hal::gpio::{AnyOutputPin, Output, OutputPin, PinDriver};
use esp_idf_svc::hal::ledc::config::TimerConfig;
use esp_idf_svc::hal::ledc::{LedcChannel, LedcDriver, LedcTimer, LedcTimerDriver};
use esp_idf_svc::hal::peripheral::Peripheral;
use esp_idf_svc::hal::units::Hertz;
use esp_idf_svc::sys::EspError;

use crate::config::Config;
use crate::fault::FaultCode;
use crate::logging::TX_LOG;
use crate::sink::SignalSink;
use crate::FAULT;

/// Hardware [`SignalSink`]: LED on a push-pull pin, buzzer on LEDC PWM.
pub struct EspSink<'d, T: LedcTimer> {
    led: PinDriver<'d, AnyOutputPin, Output>,
    led_gpio: u8,
    buzzer: LedcDriver<'d>,
    /// Owns the PWM timer; dropping it would stop the buzzer clock.
    _timer: LedcTimerDriver<'d, T>,
    buzzer_gpio: u8,
    tone_hz: u32,
    duty_on: u32,
    /// Time left before the current tone stops by itself.
    tone_left_ms: u32,
}

impl<'d, T: LedcTimer + 'd> EspSink<'d, T> {
    /// Claim the LED pin, the buzzer pin and one LEDC timer/channel pair.
    ///
    /// The PWM clock runs at `config.tone_hz`; the buzzer is silent until
    /// [`SignalSink::sound_tone`] raises the duty.
    pub fn new<C: LedcChannel<SpeedMode = T::SpeedMode>>(
        led_pin: impl Peripheral<P = impl OutputPin> + 'd,
        buzzer_pin: impl Peripheral<P = impl OutputPin> + 'd,
        timer: impl Peripheral<P = T> + 'd,
        channel: impl Peripheral<P = C> + 'd,
        config: &Config,
    ) -> Result<Self, EspError> {
        let mut led = PinDriver::output(led_pin.into_ref().map_into::<AnyOutputPin>())?;
        led.set_low()?;

        let timer = LedcTimerDriver::new(
            timer,
            &TimerConfig::default().frequency(Hertz(config.tone_hz)),
        )?;
        let mut buzzer = LedcDriver::new(channel, &timer, buzzer_pin)?;
        let duty_on = buzzer.get_max_duty() * u32::from(config.buzzer_duty_pct) / 100;
        buzzer.set_duty(0)?;

        Ok(Self {
            led,
            led_gpio: config.led_gpio,
            buzzer,
            _timer: timer,
            buzzer_gpio: config.buzzer_gpio,
            tone_hz: config.tone_hz,
            duty_on,
            tone_left_ms: 0,
        })
    }

    fn buzzer_duty(&mut self, duty: u32) {
        if let Err(e) = self.buzzer.set_duty(duty) {
            self.fault(FaultCode::ToneDriver, self.buzzer_gpio, e);
        }
    }

    fn fault(&self, code: FaultCode, gpio: u8, err: EspError) {
        FAULT.set(code, u32::from(gpio));
        crate::tx_error!(TX_LOG, 0, "{} on GPIO{}: {}", code, gpio, err);
    }
}

impl<'d, T: LedcTimer + 'd> SignalSink for EspSink<'d, T> {
    fn set_signal(&mut self, on: bool) {
        let result = if on { self.led.set_high() } else { self.led.set_low() };
        if let Err(e) = result {
            self.fault(FaultCode::SignalPin, self.led_gpio, e);
        }
    }

    fn sound_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
        // The PWM clock is fixed at init; a different pitch is not worth
        // reconfiguring the timer mid-message.
        if frequency_hz != self.tone_hz {
            crate::tx_warn!(
                TX_LOG,
                0,
                "tone {} Hz requested, buzzer runs at {} Hz",
                frequency_hz,
                self.tone_hz
            );
        }
        self.buzzer_duty(self.duty_on);
        self.tone_left_ms = duration_ms;
    }

    fn wait_ms(&mut self, ms: u32) {
        let mut remaining = ms;
        if self.tone_left_ms > 0 {
            let audible = remaining.min(self.tone_left_ms);
            FreeRtos::delay_ms(audible);
            remaining -= audible;
            self.tone_left_ms -= audible;
            if self.tone_left_ms == 0 {
                self.buzzer_duty(0);
            }
        }
        if remaining > 0 {
            FreeRtos::delay_ms(remaining);
        }
    }
}
