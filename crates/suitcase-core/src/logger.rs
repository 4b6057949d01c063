//! Bridge from a dependency-injection container's logger to `tracing`.
//!
//! Containers typically report at three levels (debug, info, error) and are
//! noisy at the lower two, so the bridge shifts those down one level:
//!
//! | container | tracing |
//! |-----------|---------|
//! | `debug`   | TRACE   |
//! | `info`    | DEBUG   |
//! | `err`     | ERROR   |

use tracing::{debug, error, trace};

/// Tag attached to bridged messages unless another one is given.
pub const DEFAULT_TAG: &str = "Koin";

/// Logger interface exposed by a dependency-injection container.
pub trait FrameworkLogger {
    /// Container debug output.
    fn debug(&self, msg: &str);

    /// Container informational output.
    fn info(&self, msg: &str);

    /// Container error output.
    fn err(&self, msg: &str);
}

/// Forwards container logs to `tracing` with a `tag` field.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    tag: String,
}

impl TracingLogger {
    /// Create a bridge that tags messages with `tag`.
    pub fn new(tag: impl Into<String>) -> Self {
        Self { tag: tag.into() }
    }

    /// The tag attached to every message.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(DEFAULT_TAG)
    }
}

impl FrameworkLogger for TracingLogger {
    fn debug(&self, msg: &str) {
        trace!(tag = %self.tag, "{msg}");
    }

    fn info(&self, msg: &str) {
        debug!(tag = %self.tag, "{msg}");
    }

    fn err(&self, msg: &str) {
        error!(tag = %self.tag, "{msg}");
    }
}
