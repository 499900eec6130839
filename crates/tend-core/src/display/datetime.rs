//! Date and time display helpers.

use std::fmt;

use jiff::{Timestamp, Zoned};

/// A zoned date in the zone it was scheduled in: `Sat 2021-06-12 08:00 UTC`.
pub struct LocalDate<'a>(pub &'a Zoned);

impl fmt::Display for LocalDate<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%a %Y-%m-%d %H:%M %Z"))
    }
}

/// A bookkeeping timestamp, always shown in UTC.
pub struct UtcDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for UtcDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.strftime("%Y-%m-%d %H:%M:%S UTC"))
    }
}

#[cfg(test)]
mod tests {
    use jiff::{civil::date, tz::TimeZone};

    use super::*;

    #[test]
    fn test_local_date_keeps_zone() {
        let zoned = date(2021, 6, 12)
            .at(8, 0, 0, 0)
            .to_zoned(TimeZone::UTC)
            .unwrap();
        assert_eq!(LocalDate(&zoned).to_string(), "Sat 2021-06-12 08:00 UTC");
    }

    #[test]
    fn test_utc_date_time() {
        let ts: Timestamp = "2021-06-10T09:30:15Z".parse().unwrap();
        assert_eq!(UtcDateTime(&ts).to_string(), "2021-06-10 09:30:15 UTC");
    }
}
