use std::sync::Mutex;

use time::{Duration, OffsetDateTime};

/// Wall-clock source used to timestamp sessions.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> OffsetDateTime;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<OffsetDateTime>,
}

impl ManualClock {
    pub fn new(now: OffsetDateTime) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|e| e.into_inner());
        *now += by;
    }

    pub fn set(&self, to: OffsetDateTime) {
        *self.now.lock().unwrap_or_else(|e| e.into_inner()) = to;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> OffsetDateTime {
        *self.now.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::new(datetime!(2024-03-01 09:00:00 UTC));
        assert_eq!(clock.now(), datetime!(2024-03-01 09:00:00 UTC));

        clock.advance(Duration::milliseconds(1500));
        assert_eq!(clock.now(), datetime!(2024-03-01 09:00:01.5 UTC));

        clock.set(datetime!(2024-03-02 00:00:00 UTC));
        assert_eq!(clock.now(), datetime!(2024-03-02 00:00:00 UTC));
    }
}
