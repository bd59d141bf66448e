//! Operator-facing progress lines.

use tokio::sync::mpsc::UnboundedSender;
use tracing::{info, trace};

/// Streams human-readable progress lines to an operator, mirrored to tracing.
///
/// Lines are prefixed with `"> "`. A reporter without a channel logs them at
/// `info`.
#[derive(Debug, Clone, Default)]
pub struct ProgressReporter {
    sender: Option<UnboundedSender<String>>,
}

impl ProgressReporter {
    /// Reporter forwarding lines to `sender`.
    pub fn new(sender: UnboundedSender<String>) -> Self {
        Self {
            sender: Some(sender),
        }
    }

    /// Reporter that only logs.
    pub fn silent() -> Self {
        Self::default()
    }

    /// Emit one line. A closed receiver is ignored.
    ///
    /// With a channel attached the receiver prints the line, so the log mirror
    /// drops to `trace`.
    pub fn report(&self, line: impl AsRef<str>) {
        let line = line.as_ref();
        match &self.sender {
            Some(sender) => {
                trace!(progress = %line);
                let _ = sender.send(format!("> {}", line));
            }
            None => info!(progress = %line),
        }
    }
}
