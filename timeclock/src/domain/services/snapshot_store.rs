use std::sync::Arc;

use time::{macros::format_description, Date};

use crate::domain::{
    models::{HoursWorked, PersistedSessionSnapshot},
    ports::outbound::KeyValueStore,
};

pub const TIME_IN_KEY: &str = "timeIn";
pub const IS_TRACKING_KEY: &str = "isTracking";
pub const ELAPSED_TIME_KEY: &str = "elapsedTime";
/// `YYYY-MM-DD` of the stop, or empty. Snapshots written before this key
/// existed simply lack it.
pub const WORK_DATE_KEY: &str = "workDate";

const KEYS: [&str; 4] = [TIME_IN_KEY, IS_TRACKING_KEY, ELAPSED_TIME_KEY, WORK_DATE_KEY];

/// Best-effort durable snapshot of the session under fixed keys.
///
/// The snapshot is a recovery hint, not a source of truth: writes never
/// fail the caller, and anything unreadable on load is treated as "no session".
#[derive(Clone)]
pub struct SessionSnapshotStore {
    backend: Arc<dyn KeyValueStore>,
}

impl SessionSnapshotStore {
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    pub fn save(&self, snapshot: &PersistedSessionSnapshot) {
        let work_date = snapshot
            .work_date
            .and_then(|d| d.format(format_description!("[year]-[month]-[day]")).ok())
            .unwrap_or_default();
        let entries = [
            (TIME_IN_KEY, snapshot.started_at_iso.as_str()),
            (IS_TRACKING_KEY, if snapshot.running { "true" } else { "false" }),
            (ELAPSED_TIME_KEY, snapshot.elapsed_display.as_str()),
            (WORK_DATE_KEY, work_date.as_str()),
        ];

        for (key, value) in entries {
            if let Err(e) = self.backend.set(key, value) {
                tracing::warn!("Failed to persist session key '{}': {}", key, e);
            }
        }
    }

    pub fn load(&self) -> Option<PersistedSessionSnapshot> {
        match self.try_load() {
            Ok(snapshot) => snapshot,
            Err(reason) => {
                tracing::warn!("Ignoring unreadable session snapshot: {}", reason);
                None
            }
        }
    }

    pub fn clear(&self) {
        for key in KEYS {
            if let Err(e) = self.backend.remove(key) {
                tracing::warn!("Failed to remove session key '{}': {}", key, e);
            }
        }
    }

    fn read(&self, key: &str) -> Result<Option<String>, String> {
        self.backend
            .get(key)
            .map_err(|e| format!("failed to read '{}': {}", key, e))
    }

    fn try_load(&self) -> Result<Option<PersistedSessionSnapshot>, String> {
        let time_in = self.read(TIME_IN_KEY)?;
        let is_tracking = self.read(IS_TRACKING_KEY)?;
        let elapsed_time = self.read(ELAPSED_TIME_KEY)?;

        let (time_in, is_tracking, elapsed_time) = match (time_in, is_tracking, elapsed_time) {
            (None, None, None) => return Ok(None),
            (Some(t), Some(r), Some(e)) => (t, r, e),
            _ => return Err("partial snapshot".to_string()),
        };

        let running = match is_tracking.trim() {
            "true" => true,
            "false" => false,
            other => return Err(format!("invalid running flag {:?}", other)),
        };

        let elapsed_display = elapsed_time.trim().to_string();
        elapsed_display
            .parse::<HoursWorked>()
            .map_err(|e| e.to_string())?;

        let started_at_iso = match time_in.trim() {
            "null" => String::new(),
            other => other.to_string(),
        };

        let work_date = match self.read(WORK_DATE_KEY)?.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => Some(
                Date::parse(raw, format_description!("[year]-[month]-[day]"))
                    .map_err(|e| format!("invalid work date {:?}: {}", raw, e))?,
            ),
        };

        let snapshot = PersistedSessionSnapshot {
            started_at_iso,
            running,
            elapsed_display,
            work_date,
        };

        if !snapshot.started_at_iso.is_empty() && snapshot.started_at().is_none() {
            return Err(format!(
                "start time {:?} is not a valid instant",
                snapshot.started_at_iso
            ));
        }
        if snapshot.running && snapshot.started_at().is_none() {
            return Err("running snapshot without a start time".to_string());
        }

        Ok(Some(snapshot))
    }
}
