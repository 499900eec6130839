//! Explicit calendar configuration.
//!
//! Nothing in the scheduling core reads an ambient clock or time zone. Every
//! day boundary is computed through a [`CareCalendar`] that the caller
//! constructs once (usually from configuration) and passes down.

use jiff::{
    civil::{Date, DateTime},
    tz::TimeZone,
    Timestamp, Zoned,
};

use crate::error::{CareError, Result};

/// The time zone in which care days begin and end.
#[derive(Debug, Clone, PartialEq)]
pub struct CareCalendar {
    time_zone: TimeZone,
}

impl CareCalendar {
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// Calendar in UTC. Mostly useful for tests.
    pub fn utc() -> Self {
        Self::new(TimeZone::UTC)
    }

    /// Calendar in the system's configured time zone.
    pub fn system() -> Self {
        Self::new(TimeZone::system())
    }

    /// Looks up an IANA time zone name such as `Europe/Paris`.
    pub fn from_name(name: &str) -> Result<Self> {
        TimeZone::get(name).map(Self::new).map_err(|e| {
            CareError::invalid_input("time_zone").with_reason(format!("Unknown time zone '{name}': {e}"))
        })
    }

    pub fn time_zone(&self) -> &TimeZone {
        &self.time_zone
    }

    /// Name used in logs and output; `None` for zones without an IANA name.
    pub fn name(&self) -> Option<&str> {
        self.time_zone.iana_name()
    }

    /// Places an instant on this calendar.
    pub fn to_zoned(&self, instant: Timestamp) -> Zoned {
        instant.to_zoned(self.time_zone.clone())
    }

    /// The calendar day an instant falls on.
    pub fn date_of(&self, instant: Timestamp) -> Date {
        self.to_zoned(instant).date()
    }

    /// Midnight (or the first valid instant) of the day containing `instant`.
    pub fn start_of_day(&self, instant: Timestamp) -> Result<Zoned> {
        self.date_of(instant)
            .to_zoned(self.time_zone.clone())
            .map_err(|e| CareError::Configuration {
                message: format!("Cannot compute start of day: {e}"),
            })
    }

    /// Parses a user supplied date for the given field.
    ///
    /// Accepted forms, most specific first: a zoned datetime
    /// (`2021-06-10T09:00[Europe/Paris]`), an RFC 3339 timestamp, a civil
    /// datetime (`2021-06-10T09:00`) or a bare date (`2021-06-10`, taken as the
    /// start of that day). Civil values are interpreted in this calendar.
    pub fn parse(&self, field: &str, input: &str) -> Result<Zoned> {
        let input = input.trim();
        if let Ok(zoned) = input.parse::<Zoned>() {
            return Ok(zoned.with_time_zone(self.time_zone.clone()));
        }
        if let Ok(instant) = input.parse::<Timestamp>() {
            return Ok(self.to_zoned(instant));
        }
        let resolved = if let Ok(datetime) = input.parse::<DateTime>() {
            datetime.to_zoned(self.time_zone.clone())
        } else if let Ok(date) = input.parse::<Date>() {
            date.to_zoned(self.time_zone.clone())
        } else {
            return Err(CareError::invalid_input(field).with_reason(format!(
                "'{input}' is not a date (expected e.g. 2021-06-10 or 2021-06-10T09:00)"
            )));
        };
        resolved.map_err(|e| CareError::invalid_input(field).with_reason(e.to_string()))
    }
}

impl Default for CareCalendar {
    fn default() -> Self {
        Self::system()
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;

    #[test]
    fn test_parse_bare_date_is_start_of_day() {
        let calendar = CareCalendar::utc();
        let zoned = calendar.parse("start", "2021-06-10").expect("parse");
        assert_eq!(zoned.date(), date(2021, 6, 10));
        assert_eq!(zoned.hour(), 0);
        assert_eq!(zoned.minute(), 0);
    }

    #[test]
    fn test_parse_civil_datetime_uses_calendar_zone() {
        let calendar = CareCalendar::from_name("Asia/Tokyo").expect("zone");
        let zoned = calendar.parse("start", "2021-06-10T09:30").expect("parse");
        assert_eq!(zoned.hour(), 9);
        assert_eq!(zoned.time_zone().iana_name(), Some("Asia/Tokyo"));
        assert_eq!(zoned.timestamp().to_string(), "2021-06-10T00:30:00Z");
    }

    #[test]
    fn test_parse_timestamp_is_converted_to_calendar() {
        let calendar = CareCalendar::from_name("Asia/Tokyo").expect("zone");
        let zoned = calendar.parse("start", "2021-06-10T23:00:00Z").expect("parse");
        assert_eq!(zoned.date(), date(2021, 6, 11));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        let calendar = CareCalendar::utc();
        let err = calendar.parse("due", "next tuesday").unwrap_err();
        assert!(matches!(err, CareError::InvalidInput { ref field, .. } if field == "due"));
    }

    #[test]
    fn test_unknown_zone_is_invalid_input() {
        assert!(matches!(
            CareCalendar::from_name("Mars/Olympus_Mons"),
            Err(CareError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_date_of_respects_zone() {
        let instant: Timestamp = "2021-06-10T20:00:00Z".parse().unwrap();
        assert_eq!(CareCalendar::utc().date_of(instant), date(2021, 6, 10));
        let tokyo = CareCalendar::from_name("Asia/Tokyo").unwrap();
        assert_eq!(tokyo.date_of(instant), date(2021, 6, 11));
        assert_eq!(
            tokyo.start_of_day(instant).unwrap().timestamp().to_string(),
            "2021-06-10T15:00:00Z"
        );
    }
}
