//! The bounded log bridge out of an isolated execution context.
//!
//! An enclave has exactly one diagnostic channel: a host-provided sink that
//! accepts a rendered string of bounded length. This module adapts that
//! channel to the [`log`] facade, so the rest of the crate logs the normal
//! way and the bridge does the rendering, bounding and forwarding.

use log::{LevelFilter, Metadata, Record, SetLoggerError};

use crate::util::truncate_utf8;

/// Largest rendered message the bridge will hand to the sink, in bytes.
pub const MAX_MESSAGE_LEN: usize = 4096;

/// Host-side sink for rendered log messages.
///
/// The implementation is supplied by the surrounding runtime (for SGX-style
/// contexts, an OCALL that prints the buffer on the host terminal). The
/// sink sees complete rendered strings no longer than the bridge's
/// configured bound.
pub trait LogSink: Send + Sync {
    /// Delivers one rendered message.
    fn print(&self, msg: &str);
}

/// [`log::Log`] implementation forwarding to a [`LogSink`].
///
/// Messages longer than the configured bound are truncated, not reported
/// as errors; the channel is for diagnostics, and a clipped line is more
/// useful than a refused one.
pub struct BridgeLogger<S> {
    sink: S,
    max_len: usize,
    level: LevelFilter,
}

impl<S: LogSink> BridgeLogger<S> {
    /// Creates a bridge with the default bound and `Info` filtering.
    pub fn new(sink: S) -> Self {
        BridgeLogger {
            sink,
            max_len: MAX_MESSAGE_LEN,
            level: LevelFilter::Info,
        }
    }

    /// Overrides the message length bound.
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = max_len;
        self
    }

    /// Overrides the level filter.
    pub fn with_level(mut self, level: LevelFilter) -> Self {
        self.level = level;
        self
    }

    /// Installs the bridge as the global logger.
    ///
    /// # Errors
    ///
    /// Returns a [`SetLoggerError`] if a logger is already installed.
    pub fn init(self) -> Result<(), SetLoggerError>
    where
        S: 'static,
    {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn render(&self, record: &Record) -> String {
        let mut msg = format!("[{}] {}", record.level(), record.args());
        truncate_utf8(&mut msg, self.max_len);
        msg
    }
}

impl<S: LogSink> log::Log for BridgeLogger<S> {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.sink.print(&self.render(record));
    }

    fn flush(&self) {}
}
