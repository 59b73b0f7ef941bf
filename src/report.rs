//! Progress reporting to the caller-supplied sink.
//!
//! The surrounding build system owns the log writer; the pipeline only
//! needs somewhere to push human-readable progress lines. Diagnostic
//! logging via the `log` macros is separate and stays out of this sink.

use std::io::Write;
use std::sync::Mutex;

/// Sink for human-readable progress lines.
#[cfg_attr(test, mockall::automock)]
pub trait Reporter: Send + Sync {
    fn line(&self, message: &str);
}

/// Reporter writing each line to standard output. Used by the CLI.
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn line(&self, message: &str) {
        println!("{}", message);
    }
}

/// Reporter appending lines to any writer, e.g. a build log file.
pub struct WriterReporter<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterReporter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner().unwrap_or_else(|e| e.into_inner())
    }
}

impl<W: Write + Send> Reporter for WriterReporter<W> {
    fn line(&self, message: &str) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", message);
        }
    }
}
