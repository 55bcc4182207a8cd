use time::{format_description::well_known::Rfc3339, Date, OffsetDateTime};

use super::HoursWorked;

/// Elapsed display of a session that has not accrued any time.
pub const IDLE_DISPLAY: &str = "00:00:00";

/// The tracked work session.
///
/// `running` implies `started_at` is present. A stopped session has no start
/// time; its `elapsed_display` stays frozen at the stopped value until the
/// session is reset after a successful submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub started_at: Option<OffsetDateTime>,
    pub running: bool,
    pub elapsed_display: String,
}

impl Default for Session {
    fn default() -> Self {
        Self::idle()
    }
}

impl Session {
    pub fn idle() -> Self {
        Self {
            started_at: None,
            running: false,
            elapsed_display: IDLE_DISPLAY.to_string(),
        }
    }

    pub fn started(started_at: OffsetDateTime) -> Self {
        Self {
            started_at: Some(started_at),
            running: true,
            elapsed_display: IDLE_DISPLAY.to_string(),
        }
    }

    /// A running session resumed at `now`, with its display already caught up.
    pub fn resumed(started_at: OffsetDateTime, now: OffsetDateTime) -> Self {
        Self {
            started_at: Some(started_at),
            running: true,
            elapsed_display: HoursWorked::between(started_at, now).to_string(),
        }
    }

    pub fn finished(worked: HoursWorked) -> Self {
        Self {
            started_at: None,
            running: false,
            elapsed_display: worked.to_string(),
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.running && self.elapsed_display == IDLE_DISPLAY
    }

    /// Time accrued at `now`, or `None` if the session is not running.
    pub fn elapsed_at(&self, now: OffsetDateTime) -> Option<HoursWorked> {
        match (self.running, self.started_at) {
            (true, Some(started_at)) => Some(HoursWorked::between(started_at, now)),
            _ => None,
        }
    }

    pub fn snapshot(&self) -> PersistedSessionSnapshot {
        PersistedSessionSnapshot {
            started_at_iso: self
                .started_at
                .and_then(|t| t.format(&Rfc3339).ok())
                .unwrap_or_default(),
            running: self.running,
            elapsed_display: self.elapsed_display.clone(),
            work_date: None,
        }
    }
}

/// Durable projection of a [`Session`].
///
/// `started_at_iso` is RFC 3339 or empty. `work_date` is set only for a
/// stopped session that is waiting to be submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSessionSnapshot {
    pub started_at_iso: String,
    pub running: bool,
    pub elapsed_display: String,
    pub work_date: Option<Date>,
}

impl PersistedSessionSnapshot {
    pub fn started_at(&self) -> Option<OffsetDateTime> {
        if self.started_at_iso.is_empty() {
            return None;
        }
        OffsetDateTime::parse(&self.started_at_iso, &Rfc3339).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn started_session_begins_at_zero() {
        let session = Session::started(datetime!(2024-03-01 09:00:00 UTC));
        assert!(session.running);
        assert_eq!(session.elapsed_display, "00:00:00");
        assert!(!session.is_idle());
    }

    #[test]
    fn resumed_session_catches_up_display() {
        let started = datetime!(2024-03-01 09:00:00 UTC);
        let now = datetime!(2024-03-01 09:00:05 UTC);
        assert_eq!(Session::resumed(started, now).elapsed_display, "00:00:05");
    }

    #[test]
    fn finished_session_drops_start_time() {
        let session = Session::finished(HoursWorked::from_secs(3));
        assert_eq!(session.started_at, None);
        assert!(!session.running);
        assert_eq!(session.elapsed_display, "00:00:03");
        assert_eq!(session.elapsed_at(datetime!(2024-03-01 10:00:00 UTC)), None);
    }

    #[test]
    fn snapshot_encodes_start_as_rfc3339() {
        let started = datetime!(2024-03-01 09:00:00 UTC);
        let snapshot = Session::started(started).snapshot();

        assert_eq!(snapshot.started_at_iso, "2024-03-01T09:00:00Z");
        assert!(snapshot.running);
        assert_eq!(snapshot.started_at(), Some(started));
    }

    #[test]
    fn idle_snapshot_has_empty_start() {
        let snapshot = Session::idle().snapshot();
        assert_eq!(snapshot.started_at_iso, "");
        assert_eq!(snapshot.started_at(), None);
        assert!(!snapshot.running);
        assert_eq!(snapshot.work_date, None);
    }
}
