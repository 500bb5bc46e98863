//! MorseTx - Main entry point
//!
//! On ESP-IDF targets this is the firmware: UART0 in, LED and buzzer out.
//! On any other target it is a console simulator: lines from stdin (or the
//! command line) are sequenced in real time and echoed like the device's
//! serial monitor.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_svc::sys::link_patches();

    morse_tx::hal::run()?;
    Ok(())
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    simulator::run()
}

#[cfg(not(target_os = "espidf"))]
mod simulator {
    use std::fmt;
    use std::fs::File;
    use std::io::{self, BufWriter, Read, Write};
    use std::path::PathBuf;
    use std::thread;
    use std::time::Duration;

    use anyhow::Context;
    use clap::Parser;

    use morse_tx::audio::PcmSink;
    use morse_tx::config::CONFIG;
    use morse_tx::console::LineBuffer;
    use morse_tx::logging::{drain_to, TX_LOG};
    use morse_tx::progress::{banner, Echo};
    use morse_tx::sequencer::Transmitter;
    use morse_tx::sink::SignalSink;

    /// Key text out as Morse code on a simulated LED and buzzer.
    #[derive(Parser, Debug)]
    #[command(name = "morse-tx", version = env!("VERSION_STRING"))]
    struct Args {
        /// Messages to send; stdin is read line by line when none are given
        messages: Vec<String>,

        /// Do not wait in real time
        #[arg(long)]
        dry_run: bool,

        /// Print every LED and buzzer transition to stderr
        #[arg(long)]
        trace: bool,

        /// Print the transmit log to stderr after each message
        #[arg(short, long)]
        verbose: bool,

        /// Render the buzzer to a raw PCM file (signed 16-bit LE, mono)
        /// instead of keying in real time
        #[arg(long, value_name = "FILE")]
        pcm: Option<PathBuf>,
    }

    /// Stand-in for the LED pin and buzzer.
    struct ConsoleSink {
        dry_run: bool,
        trace: bool,
        /// Simulated time in ms since the message started.
        clock_ms: u64,
    }

    impl SignalSink for ConsoleSink {
        fn set_signal(&mut self, on: bool) {
            if self.trace {
                eprintln!("[{:8} ms] LED {}", self.clock_ms, if on { "on" } else { "off" });
            }
        }

        fn sound_tone(&mut self, frequency_hz: u32, duration_ms: u32) {
            if self.trace {
                eprintln!(
                    "[{:8} ms] tone {} Hz for {} ms",
                    self.clock_ms, frequency_hz, duration_ms
                );
            }
        }

        fn wait_ms(&mut self, ms: u32) {
            if !self.dry_run {
                thread::sleep(Duration::from_millis(u64::from(ms)));
            }
            self.clock_ms += u64::from(ms);
        }
    }

    /// `fmt::Write` over stdout, flushed on every write so the echo keeps
    /// pace with the keying.
    struct Stdout(io::Stdout);

    impl fmt::Write for Stdout {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            let mut out = self.0.lock();
            out.write_all(s.as_bytes()).map_err(|_| fmt::Error)?;
            out.flush().map_err(|_| fmt::Error)
        }
    }

    struct Session {
        transmitter: Transmitter,
        sink: ConsoleSink,
        echo: Echo<Stdout>,
        pcm: Option<BufWriter<File>>,
        verbose: bool,
    }

    impl Session {
        fn send(&mut self, message: &str) -> anyhow::Result<()> {
            match &mut self.pcm {
                Some(file) => {
                    let mut samples = Vec::new();
                    let mut sink = PcmSink::new(CONFIG.sample_rate, CONFIG.fade_samples, |s| {
                        samples.push(s)
                    });
                    self.transmitter
                        .transmit_with_progress(message, &mut sink, &mut self.echo);
                    drop(sink);

                    for sample in samples {
                        file.write_all(&sample.to_le_bytes())
                            .context("writing PCM output")?;
                    }
                }
                None => {
                    self.sink.clock_ms = 0;
                    self.transmitter
                        .transmit_with_progress(message, &mut self.sink, &mut self.echo);
                }
            }

            let mut log = String::new();
            drain_to(&TX_LOG, &mut log);
            if self.verbose {
                eprint!("{}", log);
            }
            Ok(())
        }

        fn finish(mut self) -> anyhow::Result<()> {
            if let Some(file) = self.pcm.as_mut() {
                file.flush().context("flushing PCM output")?;
            }
            Ok(())
        }
    }

    pub fn run() -> anyhow::Result<()> {
        let args = Args::parse();

        let pcm = match &args.pcm {
            Some(path) => Some(BufWriter::new(
                File::create(path).with_context(|| format!("creating {}", path.display()))?,
            )),
            None => None,
        };

        let mut session = Session {
            transmitter: Transmitter::new(CONFIG.timing, CONFIG.tone_hz),
            sink: ConsoleSink {
                dry_run: args.dry_run,
                trace: args.trace,
                clock_ms: 0,
            },
            echo: Echo::new(Stdout(io::stdout())),
            pcm,
            verbose: args.verbose,
        };

        if !args.messages.is_empty() {
            for message in &args.messages {
                session.send(message)?;
            }
            return session.finish();
        }

        let mut out = Stdout(io::stdout());
        banner(&mut out);

        let mut line = LineBuffer::new();
        let mut overflowed = false;
        let mut stdin = io::stdin().lock();
        let mut buf = [0u8; 256];

        loop {
            let n = stdin.read(&mut buf).context("reading stdin")?;
            if n == 0 {
                break;
            }
            for &byte in &buf[..n] {
                match line.push(byte) {
                    Ok(true) => {
                        session.send(line.as_str())?;
                        line.clear();
                        overflowed = false;
                    }
                    Ok(false) => {}
                    Err(e) if !overflowed => {
                        overflowed = true;
                        eprintln!("warning: {}", e);
                    }
                    Err(_) => {}
                }
            }
        }

        if !line.is_empty() && args.verbose {
            eprintln!("discarding unterminated line {:?}", line.as_str());
        }
        session.finish()
    }
}
