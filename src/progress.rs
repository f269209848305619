//! Phase notifications for long-running file operations.
//!
//! Callers that want to show "reading", "hashing", "writing" feedback pass a
//! [`ProgressSink`] into an operation. The sink is called synchronously at
//! fixed phase boundaries and cannot influence the result: a panicking sink
//! is logged and ignored.
//!
//! ```
//! use filesigner::progress::ProgressSink;
//!
//! let sink = |phase: &str| eprintln!("... {phase}");
//! sink.on_phase("Reading file");
//! ```

use std::panic::{AssertUnwindSafe, catch_unwind};

/// Phase strings reported by the operations.
pub mod phase {
    pub const READING: &str = "Reading file";
    pub const GENERATING: &str = "Generating signature";
    pub const EXTRACTING: &str = "Extracting signature data";
    pub const VERIFYING: &str = "Verifying integrity";
    pub const REMOVING: &str = "Removing markers";
    pub const WRITING: &str = "Writing file";
}

/// Receiver of phase notifications.
pub trait ProgressSink {
    fn on_phase(&self, phase: &str);
}

impl<F> ProgressSink for F
where
    F: Fn(&str),
{
    fn on_phase(&self, phase: &str) {
        self(phase);
    }
}

/// Forward `phase` to `sink`, if any, swallowing panics.
pub(crate) fn notify(sink: Option<&dyn ProgressSink>, phase: &str) {
    tracing::debug!(phase, "progress");

    let Some(sink) = sink else {
        return;
    };

    if catch_unwind(AssertUnwindSafe(|| sink.on_phase(phase))).is_err() {
        tracing::warn!(phase, "Progress sink panicked; continuing");
    }
}
