//! Value type parsers for iCalendar (RFC 5545 §3.3).
//!
//! Error sources are intentionally discarded during parsing (`map_err_ignore`);
//! the position-carrying [`ParseError`] is the reportable unit.
#![expect(
    clippy::map_err_ignore,
    reason = "Value parsers intentionally discard error sources; position errors are the reportable unit"
)]

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::ical::core::{
    Date, DateTime, DateTimeForm, Duration, Frequency, Geo, Period, RRule, RRuleUntil, Time,
    UtcOffset, Weekday, WeekdayNum,
};

/// Parses a DATE value (RFC 5545 §3.3.4).
///
/// Format: YYYYMMDD (e.g., "19970714")
///
/// ## Errors
/// Returns an error if the string is not a valid 8-digit date.
pub fn parse_date(s: &str, line: usize, col: usize) -> ParseResult<Date> {
    if s.len() != 8 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    let year = s[0..4]
        .parse::<u16>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;
    let month = s[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;
    let day = s[6..8]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidDate, line, col))?;

    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return Err(ParseError::new(ParseErrorKind::InvalidDate, line, col));
    }

    Ok(Date { year, month, day })
}

/// Parses a TIME value (RFC 5545 §3.3.12).
///
/// Format: HHMMSS[Z] (e.g., "133000", "133000Z")
///
/// ## Errors
/// Returns an error if the string is not a valid 6-digit time.
pub fn parse_time(s: &str, line: usize, col: usize) -> ParseResult<Time> {
    let (time_str, is_utc) = if let Some(stripped) = s.strip_suffix('Z') {
        (stripped, true)
    } else {
        (s, false)
    };

    if time_str.len() != 6 || !time_str.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    let hour = time_str[0..2]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;
    let minute = time_str[2..4]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;
    let second = time_str[4..6]
        .parse::<u8>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidTime, line, col))?;

    // Allow 60 for leap seconds
    if hour > 23 || minute > 59 || second > 60 {
        return Err(ParseError::new(ParseErrorKind::InvalidTime, line, col));
    }

    Ok(Time {
        hour,
        minute,
        second,
        is_utc,
    })
}

/// Parses a DATE-TIME value (RFC 5545 §3.3.5).
///
/// Format: YYYYMMDD"T"HHMMSS[Z] (e.g., "19970714T133000Z")
///
/// A TZID arrives from the property parameter, never from the value itself.
/// A `Z` suffix wins over a TZID; without either, the value floats.
///
/// ## Errors
/// Returns an error if the string is not a valid date-time format.
pub fn parse_datetime(
    s: &str,
    tzid: Option<&str>,
    line: usize,
    col: usize,
) -> ParseResult<DateTime> {
    let t_pos = s
        .find('T')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidDateTime, line, col))?;

    let date = parse_date(&s[..t_pos], line, col)?;
    let time = parse_time(&s[t_pos + 1..], line, col + t_pos + 1)?;

    let form = if time.is_utc {
        DateTimeForm::Utc
    } else if let Some(tz) = tzid {
        DateTimeForm::Zoned {
            tzid: tz.to_string(),
        }
    } else {
        DateTimeForm::Floating
    };

    Ok(DateTime {
        year: date.year,
        month: date.month,
        day: date.day,
        hour: time.hour,
        minute: time.minute,
        second: time.second,
        form,
    })
}

/// Parses a UTC-OFFSET value (RFC 5545 §3.3.14).
///
/// Format: (+|-)HHMM[SS]. Optional colons between fields are accepted on
/// input (`+05:30`); serialization always emits the canonical colon-less
/// form.
///
/// ## Errors
/// Returns an error if the string is not a valid UTC offset.
pub fn parse_utc_offset(s: &str, line: usize, col: usize) -> ParseResult<UtcOffset> {
    let mut chars = s.chars();
    let sign = match chars.next() {
        Some('+') => 1,
        Some('-') => -1,
        _ => return Err(ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col)),
    };

    let digits: String = chars.filter(|&c| c != ':').collect();
    if digits.len() != 4 && digits.len() != 6 {
        return Err(ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col));
    }
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col));
    }

    let hours = digits[0..2]
        .parse::<i32>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col))?;
    let minutes = digits[2..4]
        .parse::<i32>()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col))?;
    let seconds = if digits.len() == 6 {
        digits[4..6]
            .parse::<i32>()
            .map_err(|_| ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col))?
    } else {
        0
    };

    if minutes > 59 || seconds > 59 {
        return Err(ParseError::new(ParseErrorKind::InvalidUtcOffset, line, col));
    }

    Ok(UtcOffset::from_seconds(
        sign * (hours * 3600 + minutes * 60 + seconds),
    ))
}

/// Parses a DURATION value (RFC 5545 §3.3.6).
///
/// Format: [+|-]P[nW] or [+|-]P[nD][T[nH][nM][nS]]
///
/// ## Errors
/// Returns an error if the string is not a valid duration.
pub fn parse_duration(s: &str, line: usize, col: usize) -> ParseResult<Duration> {
    let err = || ParseError::new(ParseErrorKind::InvalidDuration, line, col);

    let mut dur = Duration::zero();
    let rest = if let Some(rest) = s.strip_prefix('-') {
        dur.negative = true;
        rest
    } else {
        s.strip_prefix('+').unwrap_or(s)
    };

    let rest = rest.strip_prefix('P').ok_or_else(err)?;
    if rest.is_empty() {
        return Err(err());
    }

    let mut in_time = false;
    let mut saw_component = false;
    let mut num: Option<u32> = None;

    for c in rest.chars() {
        if let Some(d) = c.to_digit(10) {
            num = Some(
                num.unwrap_or(0)
                    .checked_mul(10)
                    .and_then(|n| n.checked_add(d))
                    .ok_or_else(err)?,
            );
            continue;
        }
        match c {
            'T' if !in_time && num.is_none() => in_time = true,
            'W' if !in_time => dur.weeks = num.take().ok_or_else(err)?,
            'D' if !in_time => dur.days = num.take().ok_or_else(err)?,
            'H' if in_time => dur.hours = num.take().ok_or_else(err)?,
            'M' if in_time => dur.minutes = num.take().ok_or_else(err)?,
            'S' if in_time => dur.seconds = num.take().ok_or_else(err)?,
            _ => return Err(err()),
        }
        if c != 'T' {
            saw_component = true;
        }
    }

    // Trailing digits with no designator, or "P"/"PT" with no component
    if num.is_some() || !saw_component {
        return Err(err());
    }

    Ok(dur)
}

/// Parses a PERIOD value (RFC 5545 §3.3.9).
///
/// Format: start"/"end or start"/"duration
///
/// ## Errors
/// Returns an error if the string is not a valid period.
pub fn parse_period(s: &str, tzid: Option<&str>, line: usize, col: usize) -> ParseResult<Period> {
    let slash_pos = s
        .find('/')
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidPeriod, line, col))?;

    let start = parse_datetime(&s[..slash_pos], tzid, line, col)?;
    let end_str = &s[slash_pos + 1..];

    if end_str.starts_with(['P', '+', '-']) {
        let duration = parse_duration(end_str, line, col + slash_pos + 1)?;
        Ok(Period::Duration { start, duration })
    } else {
        let end = parse_datetime(end_str, tzid, line, col + slash_pos + 1)?;
        Ok(Period::Explicit { start, end })
    }
}

/// Parses a GEO value: latitude and longitude separated by ';'.
///
/// ## Errors
/// Returns an error if either coordinate is missing, non-numeric, or out of
/// range.
pub fn parse_geo(s: &str, line: usize, col: usize) -> ParseResult<Geo> {
    let err = || ParseError::new(ParseErrorKind::InvalidGeo, line, col);

    let (lat_str, lon_str) = s.split_once(';').ok_or_else(err)?;
    let lat: f64 = lat_str.trim().parse().map_err(|_| err())?;
    let lon: f64 = lon_str.trim().parse().map_err(|_| err())?;

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(err());
    }

    Ok(Geo { lat, lon })
}

/// Parses a RECUR (RRULE) value (RFC 5545 §3.3.10, RFC 7529).
///
/// In strict mode an unknown key is an error; otherwise unknown keys are
/// preserved verbatim as extension pairs. Range constraints and the
/// COUNT/UNTIL exclusivity are enforced in both modes.
///
/// ## Errors
/// Returns an error if the string is not a valid recurrence rule.
pub fn parse_rrule(s: &str, strict: bool, line: usize, col: usize) -> ParseResult<RRule> {
    let mut freq = None;
    let mut rule = RRule::new(Frequency::Daily);

    for part in s.split(';') {
        let (key, value) = part
            .split_once('=')
            .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?;

        match key.to_ascii_uppercase().as_str() {
            "FREQ" => {
                freq = Some(
                    Frequency::parse(value)
                        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFrequency, line, col))?,
                );
            }
            "INTERVAL" => {
                rule.interval = value
                    .parse()
                    .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?;
            }
            "COUNT" => {
                if rule.until.is_some() {
                    return Err(ParseError::new(
                        ParseErrorKind::UntilCountConflict,
                        line,
                        col,
                    ));
                }
                rule.count = Some(
                    value
                        .parse()
                        .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?,
                );
            }
            "UNTIL" => {
                if rule.count.is_some() {
                    return Err(ParseError::new(
                        ParseErrorKind::UntilCountConflict,
                        line,
                        col,
                    ));
                }
                rule.until = Some(if value.contains('T') {
                    RRuleUntil::DateTime(parse_datetime(value, None, line, col)?)
                } else {
                    RRuleUntil::Date(parse_date(value, line, col)?)
                });
            }
            "WKST" => {
                rule.wkst = Weekday::parse(value)
                    .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?;
            }
            "RSCALE" => rule.rscale = Some(value.to_ascii_uppercase()),
            "BYSECOND" => rule.by_second = parse_num_list(value, line, col)?,
            "BYMINUTE" => rule.by_minute = parse_num_list(value, line, col)?,
            "BYHOUR" => rule.by_hour = parse_num_list(value, line, col)?,
            "BYDAY" => rule.by_day = parse_byday(value, line, col)?,
            "BYMONTHDAY" => rule.by_monthday = parse_num_list(value, line, col)?,
            "BYYEARDAY" => rule.by_yearday = parse_num_list(value, line, col)?,
            "BYWEEKNO" => rule.by_weekno = parse_num_list(value, line, col)?,
            "BYMONTH" => rule.by_month = parse_num_list(value, line, col)?,
            "BYSETPOS" => rule.by_setpos = parse_num_list(value, line, col)?,
            other => {
                if strict {
                    return Err(ParseError::new(ParseErrorKind::InvalidRRule, line, col)
                        .with_context(format!("unknown rule part '{other}'")));
                }
                rule.extensions.push((other.to_owned(), value.to_owned()));
            }
        }
    }

    rule.freq = freq.ok_or_else(|| {
        ParseError::new(ParseErrorKind::InvalidRRule, line, col).with_context("missing FREQ")
    })?;

    rule.validate().map_err(|e| {
        let kind = match e {
            crate::ical::core::RuleError::CountAndUntil => ParseErrorKind::UntilCountConflict,
            _ => ParseErrorKind::InvalidRRule,
        };
        ParseError::new(kind, line, col).with_context(e.to_string())
    })?;

    Ok(rule)
}

/// Parses a comma-separated list of integer values.
fn parse_num_list<T: std::str::FromStr>(s: &str, line: usize, col: usize) -> ParseResult<Vec<T>> {
    s.split(',')
        .map(|v| {
            v.trim()
                .parse()
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))
        })
        .collect()
}

/// Parses a BYDAY value (weekdays with optional ordinals).
fn parse_byday(s: &str, line: usize, col: usize) -> ParseResult<Vec<WeekdayNum>> {
    s.split(',')
        .map(|v| parse_weekday_num(v.trim(), line, col))
        .collect()
}

/// Parses a single weekday with optional ordinal (e.g., "MO", "1MO", "-1FR").
fn parse_weekday_num(s: &str, line: usize, col: usize) -> ParseResult<WeekdayNum> {
    if s.len() < 2 {
        return Err(ParseError::new(ParseErrorKind::InvalidWeekday, line, col));
    }

    let weekday_str = &s[s.len() - 2..];
    let ordinal_str = &s[..s.len() - 2];

    let weekday = Weekday::parse(weekday_str)
        .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?;

    let ordinal = if ordinal_str.is_empty() {
        None
    } else {
        Some(
            ordinal_str
                .parse()
                .map_err(|_| ParseError::new(ParseErrorKind::InvalidRRule, line, col))?,
        )
    };

    Ok(WeekdayNum { ordinal, weekday })
}

/// Unescapes text values (RFC 5545 §3.3.11).
///
/// Escape sequences: \\ \, \; \n \N
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n' | 'N') => result.push('\n'),
                Some(',') => result.push(','),
                Some(';') => result.push(';'),
                Some('\\') | None => result.push('\\'),
                Some(other) => {
                    // Invalid escape, preserve as-is
                    result.push('\\');
                    result.push(other);
                }
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Parses a BOOLEAN value (RFC 5545 §3.3.2).
///
/// ## Errors
/// Returns an error if the string is not "TRUE" or "FALSE".
pub fn parse_boolean(s: &str, line: usize, col: usize) -> ParseResult<bool> {
    match s.to_ascii_uppercase().as_str() {
        "TRUE" => Ok(true),
        "FALSE" => Ok(false),
        _ => Err(ParseError::new(ParseErrorKind::InvalidBoolean, line, col)),
    }
}

/// Parses an INTEGER value (RFC 5545 §3.3.8).
///
/// ## Errors
/// Returns an error if the string is not a valid integer.
pub fn parse_integer(s: &str, line: usize, col: usize) -> ParseResult<i64> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidInteger, line, col))
}

/// Parses a FLOAT value (RFC 5545 §3.3.7).
///
/// ## Errors
/// Returns an error if the string is not a valid floating-point number.
pub fn parse_float(s: &str, line: usize, col: usize) -> ParseResult<f64> {
    s.parse()
        .map_err(|_| ParseError::new(ParseErrorKind::InvalidFloat, line, col))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_basic() {
        let date = parse_date("20260123", 1, 1).unwrap();
        assert_eq!(date.year, 2026);
        assert_eq!(date.month, 1);
        assert_eq!(date.day, 23);
    }

    #[test]
    fn parse_date_invalid() {
        assert!(parse_date("2026012", 1, 1).is_err()); // Too short
        assert!(parse_date("20261301", 1, 1).is_err()); // Invalid month
        assert!(parse_date("2026-1-1", 1, 1).is_err()); // Non-digits
    }

    #[test]
    fn parse_time_utc() {
        let time = parse_time("120000Z", 1, 1).unwrap();
        assert_eq!(time.hour, 12);
        assert!(time.is_utc);
    }

    #[test]
    fn parse_datetime_forms() {
        let dt = parse_datetime("20260123T120000Z", None, 1, 1).unwrap();
        assert!(dt.is_utc());

        let dt = parse_datetime("20260123T120000", None, 1, 1).unwrap();
        assert!(dt.is_floating());

        let dt = parse_datetime("20260123T120000", Some("America/New_York"), 1, 1).unwrap();
        assert_eq!(dt.tzid(), Some("America/New_York"));

        // Z wins over a stray TZID
        let dt = parse_datetime("20260123T120000Z", Some("America/New_York"), 1, 1).unwrap();
        assert!(dt.is_utc());
    }

    #[test]
    fn parse_duration_forms() {
        let dur = parse_duration("P2W", 1, 1).unwrap();
        assert_eq!(dur.weeks, 2);

        let dur = parse_duration("P1DT2H30M", 1, 1).unwrap();
        assert_eq!((dur.days, dur.hours, dur.minutes), (1, 2, 30));

        let dur = parse_duration("-PT15M", 1, 1).unwrap();
        assert!(dur.negative);
        assert_eq!(dur.minutes, 15);

        let dur = parse_duration("PT0S", 1, 1).unwrap();
        assert!(dur.is_zero());
    }

    #[test]
    fn parse_duration_invalid() {
        assert!(parse_duration("P", 1, 1).is_err());
        assert!(parse_duration("PT", 1, 1).is_err());
        assert!(parse_duration("P1D2H", 1, 1).is_err()); // H outside time part
        assert!(parse_duration("PT5", 1, 1).is_err()); // Trailing number
        assert!(parse_duration("1D", 1, 1).is_err()); // Missing P
    }

    #[test]
    fn parse_utc_offset_forms() {
        let offset = parse_utc_offset("+0530", 1, 1).unwrap();
        assert_eq!(offset.as_seconds(), 5 * 3600 + 30 * 60);

        let offset = parse_utc_offset("-0800", 1, 1).unwrap();
        assert_eq!(offset.hours(), -8);

        // Optional colons accepted on input
        let offset = parse_utc_offset("+05:30", 1, 1).unwrap();
        assert_eq!(offset.as_seconds(), 5 * 3600 + 30 * 60);
        assert_eq!(offset.to_string(), "+0530");

        let offset = parse_utc_offset("-01:00:30", 1, 1).unwrap();
        assert_eq!(offset.as_seconds(), -(3600 + 30));
    }

    #[test]
    fn parse_utc_offset_invalid() {
        assert!(parse_utc_offset("0530", 1, 1).is_err());
        assert!(parse_utc_offset("+5", 1, 1).is_err());
        assert!(parse_utc_offset("+0575", 1, 1).is_err());
    }

    #[test]
    fn parse_geo_basic() {
        let geo = parse_geo("37.386013;-122.082932", 1, 1).unwrap();
        assert!((geo.lat - 37.386_013).abs() < 1e-9);
        assert!((geo.lon - -122.082_932).abs() < 1e-9);
    }

    #[test]
    fn parse_geo_out_of_range() {
        assert!(parse_geo("91.0;0.0", 1, 1).is_err());
        assert!(parse_geo("0.0;181.0", 1, 1).is_err());
        assert!(parse_geo("37.0", 1, 1).is_err());
    }

    #[test]
    fn parse_rrule_basic() {
        let rule = parse_rrule("FREQ=DAILY;COUNT=10", true, 1, 1).unwrap();
        assert_eq!(rule.freq, Frequency::Daily);
        assert_eq!(rule.count, Some(10));
        assert_eq!(rule.interval, 1);
    }

    #[test]
    fn parse_rrule_weekly_byday() {
        let rule = parse_rrule("FREQ=WEEKLY;BYDAY=MO,WE,FR", true, 1, 1).unwrap();
        assert_eq!(rule.freq, Frequency::Weekly);
        assert_eq!(rule.by_day.len(), 3);
    }

    #[test]
    fn parse_rrule_monthly_nth() {
        let rule = parse_rrule("FREQ=MONTHLY;BYDAY=-1FR", true, 1, 1).unwrap();
        assert_eq!(rule.by_day[0].ordinal, Some(-1));
        assert_eq!(rule.by_day[0].weekday, Weekday::Friday);
    }

    #[test]
    fn parse_rrule_rscale() {
        let rule = parse_rrule("RSCALE=HEBREW;FREQ=YEARLY;BYMONTH=9", true, 1, 1).unwrap();
        assert_eq!(rule.rscale.as_deref(), Some("HEBREW"));
        assert_eq!(rule.by_month, vec![9]);
    }

    #[test]
    fn parse_rrule_until_count_conflict() {
        let err = parse_rrule("FREQ=DAILY;COUNT=10;UNTIL=20260131", true, 1, 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UntilCountConflict);
    }

    #[test]
    fn parse_rrule_missing_freq() {
        assert!(parse_rrule("COUNT=10", true, 1, 1).is_err());
    }

    #[test]
    fn parse_rrule_unknown_key() {
        // Strict rejects, lenient preserves
        assert!(parse_rrule("FREQ=DAILY;X-EXT=1", true, 1, 1).is_err());

        let rule = parse_rrule("FREQ=DAILY;X-EXT=1", false, 1, 1).unwrap();
        assert_eq!(rule.extensions, vec![("X-EXT".to_string(), "1".to_string())]);
        assert_eq!(rule.to_string(), "FREQ=DAILY;X-EXT=1");
    }

    #[test]
    fn parse_rrule_out_of_range() {
        assert!(parse_rrule("FREQ=DAILY;BYHOUR=24", false, 1, 1).is_err());
        assert!(parse_rrule("FREQ=MONTHLY;BYMONTHDAY=32", false, 1, 1).is_err());
    }

    #[test]
    fn unescape_text_basic() {
        assert_eq!(unescape_text("hello\\, world"), "hello, world");
        assert_eq!(unescape_text("line1\\nline2"), "line1\nline2");
        assert_eq!(unescape_text("back\\\\slash"), "back\\slash");
        assert_eq!(unescape_text("semi\\;colon"), "semi;colon");
    }

    #[test]
    fn parse_period_explicit() {
        let period = parse_period("20260123T090000Z/20260123T170000Z", None, 1, 1).unwrap();
        match period {
            Period::Explicit { start, end } => {
                assert_eq!(start.hour, 9);
                assert_eq!(end.hour, 17);
            }
            Period::Duration { .. } => panic!("Expected explicit period"),
        }
    }

    #[test]
    fn parse_period_duration() {
        let period = parse_period("20260123T090000Z/PT8H", None, 1, 1).unwrap();
        match period {
            Period::Duration { start, duration } => {
                assert_eq!(start.hour, 9);
                assert_eq!(duration.hours, 8);
            }
            Period::Explicit { .. } => panic!("Expected duration period"),
        }
    }
}
