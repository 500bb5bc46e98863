//! Non-blocking logging for the transmitter.
//!
//! ```text
//! transmit()            LogRing               drain (after message)
//! ──────────            ───────               ─────────────────────
//! tx_info!() ─────────▶ [E0][E1][E2] ───────▶ UART / stderr
//! never blocks           fixed slots           blocking ok
//! ```
//!
//! Producers format into a stack buffer and claim a slot with a CAS on the
//! write index. When every slot is taken the message is dropped and counted;
//! a transmission is never slowed down by logging. Entries are drained and
//! printed between messages, when blocking is harmless.

use core::cell::UnsafeCell;
use core::fmt::{self, Write};
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Maximum message length in bytes; longer messages are truncated.
pub const MAX_MSG_LEN: usize = 96;

/// Default ring size (number of entries).
pub const LOG_RING_SIZE: usize = 64;

/// Log level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }
}

/// A single log entry.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Microseconds since the start of the current message.
    pub timestamp_us: i64,
    pub level: LogLevel,
    pub len: u8,
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const EMPTY: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Message text. Truncation may have split a UTF-8 sequence; the valid
    /// prefix is returned in that case.
    pub fn message(&self) -> &str {
        let bytes = &self.msg[..self.len as usize];
        match core::str::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => core::str::from_utf8(&bytes[..e.valid_up_to()]).unwrap_or(""),
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::EMPTY
    }
}

impl fmt::Debug for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogEntry")
            .field("timestamp_us", &self.timestamp_us)
            .field("level", &self.level)
            .field("msg", &self.message())
            .finish()
    }
}

struct Slot {
    /// Set by the producer once `entry` is fully written.
    ready: AtomicBool,
    entry: UnsafeCell<LogEntry>,
}

impl Slot {
    const EMPTY: Self = Self {
        ready: AtomicBool::new(false),
        entry: UnsafeCell::new(LogEntry::EMPTY),
    };
}

/// Bounded multi-producer, single-consumer log ring.
pub struct LogRing<const N: usize = LOG_RING_SIZE> {
    slots: [Slot; N],
    write_idx: AtomicU32,
    read_idx: AtomicU32,
    dropped: AtomicU32,
}

// SAFETY: a slot is written only by the producer that claimed its index via
// CAS, and read only by the single consumer after `ready` is observed.
unsafe impl<const N: usize> Sync for LogRing<N> {}
unsafe impl<const N: usize> Send for LogRing<N> {}

impl<const N: usize> LogRing<N> {
    const MASK: usize = N - 1;

    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be a power of 2");

        Self {
            slots: [Slot::EMPTY; N],
            write_idx: AtomicU32::new(0),
            read_idx: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
        }
    }

    /// Queue a message. Returns `false` if the ring was full and the
    /// message was dropped.
    pub fn push(&self, timestamp_us: i64, level: LogLevel, msg: &[u8]) -> bool {
        let mut write = self.write_idx.load(Ordering::Relaxed);
        loop {
            let read = self.read_idx.load(Ordering::Acquire);
            if write.wrapping_sub(read) >= N as u32 {
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return false;
            }
            match self.write_idx.compare_exchange_weak(
                write,
                write.wrapping_add(1),
                Ordering::AcqRel,
                Ordering::Relaxed,
            ) {
                Ok(_) => break,
                Err(current) => write = current,
            }
        }

        let slot = &self.slots[write as usize & Self::MASK];
        let len = msg.len().min(MAX_MSG_LEN);

        // SAFETY: index `write` was claimed exclusively above and the
        // consumer has released it (write - read < N).
        unsafe {
            let entry = &mut *slot.entry.get();
            entry.timestamp_us = timestamp_us;
            entry.level = level;
            entry.len = len as u8;
            entry.msg[..len].copy_from_slice(&msg[..len]);
        }
        slot.ready.store(true, Ordering::Release);
        true
    }

    /// Take the oldest entry. Single consumer only.
    ///
    /// Returns `None` when empty, or when the oldest slot is still being
    /// written.
    pub fn drain(&self) -> Option<LogEntry> {
        let read = self.read_idx.load(Ordering::Relaxed);
        if read == self.write_idx.load(Ordering::Acquire) {
            return None;
        }

        let slot = &self.slots[read as usize & Self::MASK];
        if !slot.ready.load(Ordering::Acquire) {
            return None;
        }

        // SAFETY: `ready` was published with Release after the write.
        let entry = unsafe { *slot.entry.get() };
        slot.ready.store(false, Ordering::Relaxed);
        self.read_idx.store(read.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Messages dropped since the last reset.
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    /// Entries claimed but not yet drained.
    pub fn pending(&self) -> u32 {
        let read = self.read_idx.load(Ordering::Relaxed);
        self.write_idx.load(Ordering::Acquire).wrapping_sub(read)
    }

    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }
}

impl<const N: usize> Default for LogRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// `fmt::Write` over a fixed byte buffer. Silently truncates.
pub struct FixedWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> FixedWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }
}

impl Write for FixedWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let n = s.len().min(self.buf.len() - self.pos);
        self.buf[self.pos..self.pos + n].copy_from_slice(&s.as_bytes()[..n]);
        self.pos += n;
        Ok(())
    }
}

/// Format `args` into `buf`, returning the number of bytes written.
#[inline]
pub fn format_to_buffer(buf: &mut [u8], args: fmt::Arguments<'_>) -> usize {
    let mut w = FixedWriter::new(buf);
    let _ = w.write_fmt(args);
    w.len()
}

/// Render an entry as `[timestamp_us] LEVEL: message\n`.
pub fn format_entry(entry: &LogEntry, out: &mut dyn Write) -> fmt::Result {
    writeln!(
        out,
        "[{:10}] {}: {}",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.message()
    )
}

/// Drain every pending entry of `ring` into `out`, then report drops.
///
/// Returns the number of entries written.
pub fn drain_to<const N: usize>(ring: &LogRing<N>, out: &mut dyn Write) -> usize {
    let mut count = 0;
    while let Some(entry) = ring.drain() {
        let _ = format_entry(&entry, out);
        count += 1;
    }

    let dropped = ring.dropped();
    if dropped > 0 {
        let _ = writeln!(out, "[WARN] Dropped {} log messages", dropped);
        ring.reset_dropped();
    }
    count
}

/// Non-blocking log macro.
///
/// ```ignore
/// tx_log!(LogLevel::Info, TX_LOG, elapsed_us, "sent {}", ch);
/// ```
#[macro_export]
macro_rules! tx_log {
    ($level:expr, $ring:expr, $timestamp:expr, $($arg:tt)*) => {{
        let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
        let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
        $ring.push($timestamp, $level, &buf[..len]);
    }};
}

#[macro_export]
macro_rules! tx_info {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Info, $ring, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! tx_warn {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Warn, $ring, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! tx_error {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Error, $ring, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! tx_debug {
    ($ring:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::tx_log!($crate::logging::LogLevel::Debug, $ring, $timestamp, $($arg)*)
    };
}

/// Global ring shared by the transmitter and the hardware layer.
pub static TX_LOG: LogRing = LogRing::new();
