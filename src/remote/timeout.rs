use std::time::Duration;

use crate::config::TimeoutSettings;

/// Resolved transport timeouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeoutConfig {
    pub connect: Duration,
    pub read: Duration,
    pub write: Duration,
}

impl TimeoutConfig {
    /// Upper bound for a whole call.
    ///
    /// reqwest has no write timeout of its own, so the request deadline
    /// covers connect, write and read back to back.
    pub fn total(&self) -> Duration {
        self.connect
            .saturating_add(self.write)
            .saturating_add(self.read)
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self::from(&TimeoutSettings::default())
    }
}

impl From<&TimeoutSettings> for TimeoutConfig {
    fn from(settings: &TimeoutSettings) -> Self {
        Self {
            connect: Duration::from_secs(settings.connect_seconds),
            read: Duration::from_secs(settings.read_seconds),
            write: Duration::from_secs(settings.write_seconds),
        }
    }
}
