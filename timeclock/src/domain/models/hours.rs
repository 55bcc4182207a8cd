use std::{fmt, str::FromStr};

use time::{Duration, OffsetDateTime};

/// A worked duration in whole seconds, rendered as `HH:MM:SS`.
///
/// Hours are not wrapped at 24; a 30 hour session renders as `30:00:00`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HoursWorked(u64);

impl HoursWorked {
    pub const ZERO: Self = Self(0);

    pub fn from_secs(secs: u64) -> Self {
        Self(secs)
    }

    /// Floors to whole seconds; negative durations clamp to zero.
    pub fn from_duration(elapsed: Duration) -> Self {
        Self(elapsed.whole_seconds().max(0) as u64)
    }

    pub fn between(start: OffsetDateTime, end: OffsetDateTime) -> Self {
        Self::from_duration(end - start)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Get the duration as (hours, minutes, seconds).
    pub fn hms(&self) -> (u64, u64, u64) {
        let hours = self.0 / 3600;
        let minutes = (self.0 % 3600) / 60;
        let seconds = self.0 % 60;
        (hours, minutes, seconds)
    }
}

impl fmt::Display for HoursWorked {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (hours, minutes, seconds) = self.hms();
        write!(f, "{:02}:{:02}:{:02}", hours, minutes, seconds)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid HH:MM:SS duration: {0:?}")]
pub struct ParseHoursError(String);

impl FromStr for HoursWorked {
    type Err = ParseHoursError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseHoursError(s.to_string());

        let mut parts = s.split(':');
        let (Some(h), Some(m), Some(sec), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(err());
        };

        let all_digits = |p: &str| !p.is_empty() && p.bytes().all(|b| b.is_ascii_digit());
        if h.len() < 2 || m.len() != 2 || sec.len() != 2 {
            return Err(err());
        }
        if !all_digits(h) || !all_digits(m) || !all_digits(sec) {
            return Err(err());
        }

        let hours: u64 = h.parse().map_err(|_| err())?;
        let minutes: u64 = m.parse().map_err(|_| err())?;
        let seconds: u64 = sec.parse().map_err(|_| err())?;
        if minutes >= 60 || seconds >= 60 {
            return Err(err());
        }

        hours
            .checked_mul(3600)
            .and_then(|h| h.checked_add(minutes * 60 + seconds))
            .map(Self)
            .ok_or_else(err)
    }
}
