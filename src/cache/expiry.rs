use std::time::Duration;

use chrono::{DateTime, Utc};

/// A time-to-live value: an expiry instant plus the span to extend it by.
///
/// Starts out expired, so nothing counts as fresh before the first refresh.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expiry {
    ttl: Duration,
    expires_at: DateTime<Utc>,
}

impl Expiry {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            expires_at: Utc::now(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.is_active_at(Utc::now())
    }

    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }

    pub fn is_expired(&self) -> bool {
        !self.is_active()
    }

    /// Push the expiry to `ttl` from now.
    pub fn refresh(&mut self) {
        self.refresh_at(Utc::now());
    }

    pub fn refresh_at(&mut self, now: DateTime<Utc>) {
        // Out-of-range ttl saturates to the far future.
        self.expires_at = chrono::Duration::from_std(self.ttl)
            .ok()
            .and_then(|ttl| now.checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC);
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }
}
