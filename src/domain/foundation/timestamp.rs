//! Timestamp value object for immutable points in time.
//!
//! All dates flowing through the engine are UTC. NationBuilder accepts and
//! returns seconds-precision ISO datetimes without a timezone suffix
//! (`2024-01-15T00:00:00`), so formatting and parsing follow that shape,
//! with RFC 3339 and bare dates accepted on input for provider payloads.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Parses a timestamp from any of the formats providers and the CRM
    /// send: RFC 3339, naive ISO datetime, or a bare `YYYY-MM-DD` date
    /// (taken as midnight UTC).
    pub fn parse(value: &str) -> Option<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
            return Some(Self(dt.with_timezone(&Utc)));
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
            return Some(Self(naive.and_utc()));
        }
        if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
            return date.and_hms_opt(0, 0, 0).map(|dt| Self(dt.and_utc()));
        }
        None
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Creates a new timestamp by adding the specified number of days.
    pub fn add_days(&self, days: i64) -> Self {
        Self(self.0 + Duration::days(days))
    }

    /// Creates a new timestamp by adding calendar months.
    ///
    /// Uses real calendar arithmetic: Jan 15 + 12 months is Jan 15 of the
    /// next year, and end-of-month dates clamp (Jan 31 + 1 month = Feb 28).
    pub fn add_months(&self, months: u32) -> Self {
        Self(
            self.0
                .checked_add_months(Months::new(months))
                .expect("datetime within supported range"),
        )
    }

    /// Formats as the CRM's datetime shape: `YYYY-MM-DDTHH:MM:SS`.
    pub fn to_crm_string(&self) -> String {
        self.0.format("%Y-%m-%dT%H:%M:%S").to_string()
    }

    /// Formats as a bare ISO date: `YYYY-MM-DD`.
    pub fn to_date_string(&self) -> String {
        self.0.format("%Y-%m-%d").to_string()
    }

    /// Year component (UTC).
    pub fn year(&self) -> i32 {
        self.0.year()
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_crm_string())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Timestamp::parse(&value)
            .ok_or_else(|| serde::de::Error::custom(format!("unrecognized datetime: {}", value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(value: &str) -> Timestamp {
        Timestamp::parse(value).unwrap()
    }

    #[test]
    fn parses_rfc3339() {
        let ts = date("2024-01-15T10:30:00Z");
        assert_eq!(ts.to_crm_string(), "2024-01-15T10:30:00");
    }

    #[test]
    fn parses_naive_datetime() {
        let ts = date("2024-01-15T10:30:00");
        assert_eq!(ts.to_crm_string(), "2024-01-15T10:30:00");
    }

    #[test]
    fn parses_bare_date_as_midnight() {
        let ts = date("2024-01-15");
        assert_eq!(ts.to_crm_string(), "2024-01-15T00:00:00");
    }

    #[test]
    fn rejects_garbage() {
        assert!(Timestamp::parse("15/01/2024").is_none());
        assert!(Timestamp::parse("").is_none());
    }

    #[test]
    fn add_months_is_calendar_correct() {
        assert_eq!(
            date("2024-01-15").add_months(12).to_date_string(),
            "2025-01-15"
        );
        assert_eq!(
            date("2024-06-01").add_months(1).to_date_string(),
            "2024-07-01"
        );
    }

    #[test]
    fn add_months_clamps_end_of_month() {
        assert_eq!(
            date("2024-01-31").add_months(1).to_date_string(),
            "2024-02-29"
        );
    }

    #[test]
    fn add_days_crosses_month_boundary() {
        assert_eq!(date("2024-02-29").add_days(1).to_date_string(), "2024-03-01");
    }

    #[test]
    fn ordering_follows_chronology() {
        assert!(date("2024-05-01") < date("2024-06-01"));
        assert_eq!(
            date("2024-05-01").max(date("2024-06-01")),
            date("2024-06-01")
        );
    }

    #[test]
    fn serializes_to_crm_shape() {
        let json = serde_json::to_string(&date("2024-01-15T10:30:00")).unwrap();
        assert_eq!(json, "\"2024-01-15T10:30:00\"");
    }

    #[test]
    fn deserializes_from_crm_shape() {
        let ts: Timestamp = serde_json::from_str("\"2025-01-16T00:00:00\"").unwrap();
        assert_eq!(ts.year(), 2025);
    }
}
