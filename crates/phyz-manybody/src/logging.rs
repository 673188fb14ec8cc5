//! Logging collaborator injected into models at construction.
//!
//! Models never call a process-wide macro directly; they report through a
//! [`LogSink`] carried by their [`crate::ModelContext`]. The default sink
//! forwards to `tracing`.

use std::fmt;
use tracing::Level;

/// Destination for model diagnostics.
///
/// `verbosity` is the message's detail level: the larger, the chattier.
/// Implementations decide whether to emit it; logging never fails.
pub trait LogSink: Send + Sync {
    fn log(&self, message: &str, level: Level, verbosity: u8);
}

/// Forwards messages with `verbosity <= threshold` to `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    pub threshold: u8,
}

impl Default for TracingSink {
    fn default() -> Self {
        Self { threshold: 3 }
    }
}

impl LogSink for TracingSink {
    fn log(&self, message: &str, level: Level, verbosity: u8) {
        if verbosity > self.threshold {
            return;
        }
        match level {
            Level::ERROR => tracing::error!(target: "phyz_manybody", verbosity, "{message}"),
            Level::WARN => tracing::warn!(target: "phyz_manybody", verbosity, "{message}"),
            Level::INFO => tracing::info!(target: "phyz_manybody", verbosity, "{message}"),
            Level::DEBUG => tracing::debug!(target: "phyz_manybody", verbosity, "{message}"),
            _ => tracing::trace!(target: "phyz_manybody", verbosity, "{message}"),
        }
    }
}

/// Discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl LogSink for NullSink {
    fn log(&self, _message: &str, _level: Level, _verbosity: u8) {}
}

impl fmt::Debug for dyn LogSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LogSink")
    }
}
