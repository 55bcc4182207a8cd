use time::{Date, OffsetDateTime, UtcOffset};

pub fn to_local_time(dt: OffsetDateTime) -> OffsetDateTime {
    if let Ok(local_offset) = UtcOffset::current_local_offset() {
        dt.to_offset(local_offset)
    } else {
        dt
    }
}

/// Calendar date of `dt` in the local timezone, falling back to UTC.
pub fn local_date(dt: OffsetDateTime) -> Date {
    to_local_time(dt).date()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn local_time_keeps_the_instant() {
        let dt = datetime!(2024-03-01 23:30:00 UTC);
        assert_eq!(to_local_time(dt), dt);
    }
}
