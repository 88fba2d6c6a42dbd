//! Recurrence rule model (RFC 5545 §3.3.10, RFC 7529).

use serde::{Deserialize, Serialize};

use super::{Date, DateTime};

/// Recurrence frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Frequency {
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Parses a `FREQ` value (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SECONDLY" => Some(Self::Secondly),
            "MINUTELY" => Some(Self::Minutely),
            "HOURLY" => Some(Self::Hourly),
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }

    /// Wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

/// Day of the week, in the two-letter wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Parses a two-letter day code (case-insensitive).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SU" => Some(Self::Sunday),
            "MO" => Some(Self::Monday),
            "TU" => Some(Self::Tuesday),
            "WE" => Some(Self::Wednesday),
            "TH" => Some(Self::Thursday),
            "FR" => Some(Self::Friday),
            "SA" => Some(Self::Saturday),
            _ => None,
        }
    }

    /// Wire code.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    /// Day number with Sunday = 0, matching the fixed-day weekday convention
    /// used by the expansion engine.
    #[must_use]
    pub const fn number_from_sunday(self) -> u8 {
        match self {
            Self::Sunday => 0,
            Self::Monday => 1,
            Self::Tuesday => 2,
            Self::Wednesday => 3,
            Self::Thursday => 4,
            Self::Friday => 5,
            Self::Saturday => 6,
        }
    }
}

/// A `BYDAY` entry: a weekday with an optional ordinal (`2TU`, `-1FR`, `MO`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekdayNum {
    /// Ordinal within the period: 1..=53 or -53..=-1. `None` means every
    /// matching weekday.
    pub ordinal: Option<i8>,
    pub weekday: Weekday,
}

impl WeekdayNum {
    /// An entry matching every occurrence of the weekday.
    #[must_use]
    pub const fn every(weekday: Weekday) -> Self {
        Self {
            ordinal: None,
            weekday,
        }
    }
}

impl std::fmt::Display for WeekdayNum {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ord) = self.ordinal {
            write!(f, "{ord}")?;
        }
        write!(f, "{}", self.weekday.as_str())
    }
}

/// The `UNTIL` bound: either a DATE or a DATE-TIME, matching the precision
/// of the rule's anchor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RRuleUntil {
    Date(Date),
    DateTime(DateTime),
}

impl std::fmt::Display for RRuleUntil {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Date(d) => write!(f, "{d}"),
            Self::DateTime(dt) => write!(f, "{dt}"),
        }
    }
}

/// Recurrence rule construction errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RuleError {
    /// `FREQ` is mandatory.
    #[error("recurrence rule is missing FREQ")]
    MissingFrequency,
    /// `COUNT` and `UNTIL` are mutually exclusive.
    #[error("recurrence rule specifies both COUNT and UNTIL")]
    CountAndUntil,
    /// `INTERVAL` must be a positive integer.
    #[error("recurrence rule INTERVAL must be positive")]
    ZeroInterval,
    /// A BY-rule value is outside its permitted range.
    #[error("{key} value {value} is out of range")]
    OutOfRange {
        /// BY-rule key.
        key: &'static str,
        /// The offending value.
        value: i32,
    },
    /// `RSCALE` names a calendar system the registry does not know.
    #[error("unknown calendar scale {0}")]
    UnknownScale(String),
}

/// A recurrence rule (RFC 5545 §3.3.10), optionally scaled to a
/// non-Gregorian calendar via `RSCALE` (RFC 7529).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RRule {
    pub freq: Frequency,
    /// Period multiplier, at least 1.
    pub interval: u32,
    /// Total occurrence cap, mutually exclusive with `until`.
    pub count: Option<u32>,
    /// Inclusive upper bound, mutually exclusive with `count`.
    pub until: Option<RRuleUntil>,
    /// Week start for WEEKLY splitting and BYWEEKNO numbering.
    pub wkst: Weekday,
    pub by_second: Vec<u8>,
    pub by_minute: Vec<u8>,
    pub by_hour: Vec<u8>,
    pub by_day: Vec<WeekdayNum>,
    pub by_monthday: Vec<i8>,
    pub by_yearday: Vec<i16>,
    pub by_weekno: Vec<i8>,
    pub by_month: Vec<u8>,
    pub by_setpos: Vec<i16>,
    /// Calendar scale identifier (`RSCALE`), uppercase. `None` means
    /// Gregorian.
    pub rscale: Option<String>,
    /// Unrecognized keys preserved in lenient mode, in source order.
    pub extensions: Vec<(String, String)>,
}

impl RRule {
    /// Creates a rule with the given frequency and all other parts at their
    /// defaults.
    #[must_use]
    pub fn new(freq: Frequency) -> Self {
        Self {
            freq,
            interval: 1,
            count: None,
            until: None,
            wkst: Weekday::Monday,
            by_second: Vec::new(),
            by_minute: Vec::new(),
            by_hour: Vec::new(),
            by_day: Vec::new(),
            by_monthday: Vec::new(),
            by_yearday: Vec::new(),
            by_weekno: Vec::new(),
            by_month: Vec::new(),
            by_setpos: Vec::new(),
            rscale: None,
            extensions: Vec::new(),
        }
    }

    /// Checks structural constraints: positive interval, COUNT/UNTIL
    /// exclusivity, and BY-rule value ranges.
    pub fn validate(&self) -> Result<(), RuleError> {
        if self.interval == 0 {
            return Err(RuleError::ZeroInterval);
        }
        if self.count.is_some() && self.until.is_some() {
            return Err(RuleError::CountAndUntil);
        }
        for &s in &self.by_second {
            if s > 60 {
                return Err(RuleError::OutOfRange {
                    key: "BYSECOND",
                    value: i32::from(s),
                });
            }
        }
        for &m in &self.by_minute {
            if m > 59 {
                return Err(RuleError::OutOfRange {
                    key: "BYMINUTE",
                    value: i32::from(m),
                });
            }
        }
        for &h in &self.by_hour {
            if h > 23 {
                return Err(RuleError::OutOfRange {
                    key: "BYHOUR",
                    value: i32::from(h),
                });
            }
        }
        for day in &self.by_day {
            if let Some(ord) = day.ordinal {
                if ord == 0 || !(-53..=53).contains(&i32::from(ord)) {
                    return Err(RuleError::OutOfRange {
                        key: "BYDAY",
                        value: i32::from(ord),
                    });
                }
            }
        }
        for &d in &self.by_monthday {
            if d == 0 || !(-31..=31).contains(&i32::from(d)) {
                return Err(RuleError::OutOfRange {
                    key: "BYMONTHDAY",
                    value: i32::from(d),
                });
            }
        }
        for &d in &self.by_yearday {
            if d == 0 || !(-366..=366).contains(&i32::from(d)) {
                return Err(RuleError::OutOfRange {
                    key: "BYYEARDAY",
                    value: i32::from(d),
                });
            }
        }
        for &w in &self.by_weekno {
            if w == 0 || !(-53..=53).contains(&i32::from(w)) {
                return Err(RuleError::OutOfRange {
                    key: "BYWEEKNO",
                    value: i32::from(w),
                });
            }
        }
        for &m in &self.by_month {
            if m == 0 || m > 13 {
                return Err(RuleError::OutOfRange {
                    key: "BYMONTH",
                    value: i32::from(m),
                });
            }
        }
        for &p in &self.by_setpos {
            if p == 0 || !(-366..=366).contains(&i32::from(p)) {
                return Err(RuleError::OutOfRange {
                    key: "BYSETPOS",
                    value: i32::from(p),
                });
            }
        }
        Ok(())
    }
}

fn write_list<T: std::fmt::Display>(
    f: &mut std::fmt::Formatter<'_>,
    key: &str,
    items: &[T],
) -> std::fmt::Result {
    if items.is_empty() {
        return Ok(());
    }
    write!(f, ";{key}=")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl std::fmt::Display for RRule {
    /// Canonical wire form. Keys are emitted in a fixed order with
    /// `RSCALE` first (RFC 7529 requires it to lead when present); defaults
    /// (`INTERVAL=1`, `WKST=MO`) are omitted.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(rscale) = &self.rscale {
            write!(f, "RSCALE={rscale};")?;
        }
        write!(f, "FREQ={}", self.freq.as_str())?;
        if self.interval != 1 {
            write!(f, ";INTERVAL={}", self.interval)?;
        }
        if let Some(count) = self.count {
            write!(f, ";COUNT={count}")?;
        }
        if let Some(until) = &self.until {
            write!(f, ";UNTIL={until}")?;
        }
        write_list(f, "BYSECOND", &self.by_second)?;
        write_list(f, "BYMINUTE", &self.by_minute)?;
        write_list(f, "BYHOUR", &self.by_hour)?;
        write_list(f, "BYDAY", &self.by_day)?;
        write_list(f, "BYMONTHDAY", &self.by_monthday)?;
        write_list(f, "BYYEARDAY", &self.by_yearday)?;
        write_list(f, "BYWEEKNO", &self.by_weekno)?;
        write_list(f, "BYMONTH", &self.by_month)?;
        write_list(f, "BYSETPOS", &self.by_setpos)?;
        if self.wkst != Weekday::Monday {
            write!(f, ";WKST={}", self.wkst.as_str())?;
        }
        for (key, value) in &self.extensions {
            write!(f, ";{key}={value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_minimal() {
        let rule = RRule::new(Frequency::Daily);
        assert_eq!(rule.to_string(), "FREQ=DAILY");
    }

    #[test]
    fn display_full_order() {
        let mut rule = RRule::new(Frequency::Monthly);
        rule.interval = 2;
        rule.count = Some(10);
        rule.by_day = vec![WeekdayNum {
            ordinal: Some(-1),
            weekday: Weekday::Friday,
        }];
        rule.by_setpos = vec![1];
        rule.wkst = Weekday::Sunday;
        assert_eq!(
            rule.to_string(),
            "FREQ=MONTHLY;INTERVAL=2;COUNT=10;BYDAY=-1FR;BYSETPOS=1;WKST=SU"
        );
    }

    #[test]
    fn display_rscale_leads() {
        let mut rule = RRule::new(Frequency::Yearly);
        rule.rscale = Some("HEBREW".into());
        rule.by_month = vec![9];
        assert_eq!(rule.to_string(), "RSCALE=HEBREW;FREQ=YEARLY;BYMONTH=9");
    }

    #[test]
    fn validate_count_and_until() {
        let mut rule = RRule::new(Frequency::Daily);
        rule.count = Some(5);
        rule.until = Some(RRuleUntil::Date(Date {
            year: 2026,
            month: 1,
            day: 1,
        }));
        assert_eq!(rule.validate(), Err(RuleError::CountAndUntil));
    }

    #[test]
    fn validate_ranges() {
        let mut rule = RRule::new(Frequency::Monthly);
        rule.by_monthday = vec![0];
        assert!(matches!(
            rule.validate(),
            Err(RuleError::OutOfRange {
                key: "BYMONTHDAY",
                ..
            })
        ));

        let mut rule = RRule::new(Frequency::Daily);
        rule.by_hour = vec![24];
        assert!(rule.validate().is_err());
    }

    #[test]
    fn validate_zero_interval() {
        let mut rule = RRule::new(Frequency::Weekly);
        rule.interval = 0;
        assert_eq!(rule.validate(), Err(RuleError::ZeroInterval));
    }
}
