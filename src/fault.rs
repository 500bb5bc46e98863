//! Latched hardware fault state.
//!
//! Output drivers cannot return errors through [`SignalSink`]: a message that
//! has started always runs to the end. Instead, a failing driver latches a
//! fault here and keeps going, and the main loop reports it between
//! messages.
//!
//! [`SignalSink`]: crate::sink::SignalSink

use core::fmt;
use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// What went wrong.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    /// No fault recorded.
    None = 0,
    /// Driving the indicator pin failed.
    SignalPin = 1,
    /// Starting or stopping the buzzer PWM failed.
    ToneDriver = 2,
    /// Reading from or writing to the serial port failed.
    SerialIo = 3,
    /// An input line exceeded the line buffer and was truncated.
    LineOverflow = 4,
}

impl FaultCode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::SignalPin,
            2 => FaultCode::ToneDriver,
            3 => FaultCode::SerialIo,
            4 => FaultCode::LineOverflow,
            _ => FaultCode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::SignalPin => "signal pin",
            FaultCode::ToneDriver => "tone driver",
            FaultCode::SerialIo => "serial I/O",
            FaultCode::LineOverflow => "line overflow",
        }
    }
}

impl fmt::Display for FaultCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Thread-safe fault latch.
///
/// ```ignore
/// static FAULT: FaultState = FaultState::new();
///
/// // in a driver:
/// if led.set_high().is_err() {
///     FAULT.set(FaultCode::SignalPin, 13);
/// }
///
/// // between messages:
/// if let Some(snapshot) = FAULT.take() {
///     report(snapshot);
/// }
/// ```
pub struct FaultState {
    active: AtomicBool,
    code: AtomicU8,
    /// Code-specific detail (pin number, raw ESP error code, ...).
    data: AtomicU32,
    /// Faults since boot. Never cleared.
    count: AtomicU32,
}

impl FaultState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(0),
            data: AtomicU32::new(0),
            count: AtomicU32::new(0),
        }
    }

    /// Latch a fault. The most recent fault wins.
    #[inline]
    pub fn set(&self, code: FaultCode, data: u32) {
        self.code.store(code as u8, Ordering::Release);
        self.data.store(data, Ordering::Release);
        self.count.fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Only meaningful while `is_active()`.
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    #[inline]
    pub fn data(&self) -> u32 {
        self.data.load(Ordering::Acquire)
    }

    #[inline]
    pub fn count(&self) -> u32 {
        self.count.load(Ordering::Relaxed)
    }

    /// Clear the active flag. The counter is kept for diagnostics.
    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            active: self.is_active(),
            code: self.code(),
            data: self.data(),
            count: self.count(),
        }
    }

    /// Snapshot and clear an active fault.
    pub fn take(&self) -> Option<FaultSnapshot> {
        if !self.active.swap(false, Ordering::AcqRel) {
            return None;
        }
        Some(FaultSnapshot {
            active: true,
            code: self.code(),
            data: self.data(),
            count: self.count(),
        })
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    pub data: u32,
    pub count: u32,
}

impl fmt::Display for FaultSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "fault: {} (data={}, total={})",
            self.code, self.data, self.count
        )
    }
}
