//! Identifier and timestamp generation.

use web_time::{SystemTime, UNIX_EPOCH};

/// Produces `"{prefix}-{millis}"` identifiers.
///
/// The numeric part is strictly increasing even when several ids are
/// requested within the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next(&mut self, prefix: &str) -> String {
        let now = now_millis();
        self.last = now.max(self.last + 1);
        format!("{prefix}-{}", self.last)
    }
}

/// Milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Current time as an RFC 3339 string, as stored in project records.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
