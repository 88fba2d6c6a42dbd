//! Typed property values (RFC 5545 §3.3).

use serde::{Deserialize, Serialize};

use super::{DateTime, Duration, RRule, Time, UtcOffset};

/// A DATE value (RFC 5545 §3.3.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Date {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}{:02}{:02}", self.year, self.month, self.day)
    }
}

/// A PERIOD value (RFC 5545 §3.3.9): start plus either an explicit end or a
/// duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Period {
    Explicit { start: DateTime, end: DateTime },
    Duration { start: DateTime, duration: Duration },
}

impl Period {
    /// The period start.
    #[must_use]
    pub fn start(&self) -> &DateTime {
        match self {
            Self::Explicit { start, .. } | Self::Duration { start, .. } => start,
        }
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Explicit { start, end } => write!(f, "{start}/{end}"),
            Self::Duration { start, duration } => write!(f, "{start}/{duration}"),
        }
    }
}

/// A GEO position: latitude and longitude in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Geo {
    pub lat: f64,
    pub lon: f64,
}

impl std::fmt::Display for Geo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{};{}", self.lat, self.lon)
    }
}

/// A decoded property value.
///
/// The parser picks the variant from the property name's default value type,
/// overridden by an explicit `VALUE` parameter. Values that fail to decode in
/// lenient mode are kept as [`Value::Unknown`] with the raw text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Date(Date),
    DateList(Vec<Date>),
    DateTime(DateTime),
    DateTimeList(Vec<DateTime>),
    Time(Time),
    Duration(Duration),
    Period(Period),
    PeriodList(Vec<Period>),
    Recur(Box<RRule>),
    UtcOffset(UtcOffset),
    Uri(String),
    Geo(Geo),
    /// Decoded binary content (wire form is base64).
    Binary(Vec<u8>),
    /// Undecoded raw text for unrecognized or failed value types.
    Unknown(String),
}

impl Value {
    /// Returns the text content if this is a TEXT value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the integer if this is an INTEGER value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the date-time if this is a DATE-TIME value.
    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::DateTime(dt) => Some(dt),
            _ => None,
        }
    }

    /// Returns the date if this is a DATE value.
    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the duration if this is a DURATION value.
    #[must_use]
    pub fn as_duration(&self) -> Option<Duration> {
        match self {
            Self::Duration(d) => Some(*d),
            _ => None,
        }
    }

    /// Returns the recurrence rule if this is a RECUR value.
    #[must_use]
    pub fn as_recur(&self) -> Option<&RRule> {
        match self {
            Self::Recur(r) => Some(r),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_display() {
        let d = Date {
            year: 2026,
            month: 3,
            day: 7,
        };
        assert_eq!(d.to_string(), "20260307");
    }

    #[test]
    fn period_display() {
        let start = DateTime::utc(2026, 1, 1, 10, 0, 0);
        let explicit = Period::Explicit {
            start: start.clone(),
            end: DateTime::utc(2026, 1, 1, 11, 0, 0),
        };
        assert_eq!(explicit.to_string(), "20260101T100000Z/20260101T110000Z");

        let by_duration = Period::Duration {
            start,
            duration: Duration::hms(1, 0, 0),
        };
        assert_eq!(by_duration.to_string(), "20260101T100000Z/PT1H");
    }

    #[test]
    fn value_accessors() {
        assert_eq!(Value::Integer(5).as_integer(), Some(5));
        assert_eq!(Value::Text("a".into()).as_integer(), None);
        assert_eq!(Value::Text("a".into()).as_text(), Some("a"));
    }
}
