//! TZID resolution and UTC conversion.
//!
//! Uses ICU4X to map Windows zone names to IANA and to canonicalize IANA
//! aliases, and `chrono-tz` for the actual offset lookups. VTIMEZONE
//! components embedded in a document take precedence over the IANA
//! database, so proprietary zones keep working.

use std::collections::HashMap;
use std::str::FromStr;

use chrono::{LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use icu::time::zone::WindowsParser;
use icu::time::zone::iana::IanaParserExtended;

use crate::ical::core::{DateTime, DateTimeForm, ICalendar};

use super::calendar::CalendarRegistry;
use super::vtimezone::{VTimezone, VTimezoneError};

/// Error during timezone conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    /// Unknown or invalid timezone identifier.
    #[error("unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Ambiguous local time during a DST fold.
    #[error("ambiguous time (DST fold): {0}")]
    AmbiguousTime(String),

    /// Non-existent local time during a DST gap.
    #[error("non-existent time (DST gap): {0}")]
    NonExistentTime(String),

    /// The date-time fields do not form a valid calendar date.
    #[error("invalid date-time: {0}")]
    InvalidDateTime(String),
}

/// Resolves TZIDs to concrete zone rules.
///
/// Successful IANA lookups are cached. Registered VTIMEZONE definitions are
/// consulted before the IANA database.
pub struct TimeZoneResolver {
    cache: HashMap<String, Tz>,
    vtimezones: HashMap<String, VTimezone>,
    registry: CalendarRegistry,
}

/// Builds a resolver with every `VTIMEZONE` of the document registered.
///
/// # Errors
///
/// Returns an error if any `VTIMEZONE` component is invalid.
pub fn build_timezone_resolver(ical: &ICalendar) -> Result<TimeZoneResolver, VTimezoneError> {
    let mut resolver = TimeZoneResolver::new();
    for tz_component in ical.timezones() {
        resolver.register_vtimezone(VTimezone::parse(tz_component)?);
    }
    Ok(resolver)
}

impl TimeZoneResolver {
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
            vtimezones: HashMap::new(),
            registry: CalendarRegistry::default(),
        }
    }

    /// Registers a zone definition; it shadows any IANA zone with the same
    /// identifier.
    pub fn register_vtimezone(&mut self, vtimezone: VTimezone) {
        self.vtimezones.insert(vtimezone.tzid.clone(), vtimezone);
    }

    #[must_use]
    pub fn get_vtimezone(&self, tzid: &str) -> Option<&VTimezone> {
        self.vtimezones.get(tzid)
    }

    #[must_use]
    pub fn has_vtimezone(&self, tzid: &str) -> bool {
        self.vtimezones.contains_key(tzid)
    }

    /// Resolves a TZID to an IANA zone, normalizing Windows names, vendor
    /// prefixes, and aliases first.
    ///
    /// # Errors
    ///
    /// [`ConversionError::UnknownTimezone`] if nothing matches.
    pub fn resolve(&mut self, tzid: &str) -> Result<Tz, ConversionError> {
        if let Some(tz) = self.cache.get(tzid) {
            return Ok(*tz);
        }

        let normalized = normalize_tzid(tzid);
        let tz = Tz::from_str(&normalized)
            .map_err(|_e| ConversionError::UnknownTimezone(tzid.to_owned()))?;

        self.cache.insert(tzid.to_owned(), tz);
        Ok(tz)
    }
}

impl Default for TimeZoneResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalizes a TZID to an IANA name.
///
/// Vendor prefixes (`/mozilla.org/...`) are stripped, Windows zone names
/// are mapped through the CLDR windowsZones data, and IANA aliases are
/// canonicalized (`Europe/Kiev` to `Europe/Kyiv`). Unrecognized identifiers
/// pass through unchanged.
#[must_use]
pub fn normalize_tzid(tzid: &str) -> String {
    let stripped = tzid
        .strip_prefix("/mozilla.org/")
        .or_else(|| tzid.strip_prefix("/softwarestudio.org/"))
        .unwrap_or(tzid);

    let windows_parser = WindowsParser::new();
    if let Some(tz) = windows_parser.parse(stripped, None) {
        let iana_parser = IanaParserExtended::new();
        for entry in iana_parser.iter() {
            if entry.time_zone == tz {
                return entry.canonical.to_string();
            }
        }
    }

    let iana_parser = IanaParserExtended::new();
    let parsed = iana_parser.parse(stripped);
    if parsed.time_zone != icu::time::TimeZone::UNKNOWN {
        return parsed.canonical.to_string();
    }

    stripped.to_string()
}

fn naive_of(dt: &DateTime) -> Result<NaiveDateTime, ConversionError> {
    let date = chrono::NaiveDate::from_ymd_opt(
        i32::from(dt.year),
        u32::from(dt.month),
        u32::from(dt.day),
    )
    .ok_or_else(|| ConversionError::InvalidDateTime(dt.to_string()))?;
    let time = chrono::NaiveTime::from_hms_opt(
        u32::from(dt.hour),
        u32::from(dt.minute),
        u32::from(dt.second),
    )
    .ok_or_else(|| ConversionError::InvalidDateTime(dt.to_string()))?;
    Ok(NaiveDateTime::new(date, time))
}

fn utc_of(naive: NaiveDateTime) -> DateTime {
    use chrono::{Datelike, Timelike};
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    DateTime::utc(
        naive.year() as u16,
        naive.month() as u8,
        naive.day() as u8,
        naive.hour() as u8,
        naive.minute() as u8,
        naive.second() as u8,
    )
}

/// Converts a date-time to UTC, dispatching on its zone disposition.
///
/// UTC values pass through; floating values are reinterpreted as UTC, since
/// without a zone there is nothing better to anchor them to; zoned values
/// go through [`convert_to_utc`].
///
/// # Errors
///
/// See [`convert_to_utc`].
pub fn to_utc(dt: &DateTime, resolver: &mut TimeZoneResolver) -> Result<DateTime, ConversionError> {
    match &dt.form {
        DateTimeForm::Utc => Ok(dt.clone()),
        DateTimeForm::Floating => Ok(DateTime::utc(
            dt.year, dt.month, dt.day, dt.hour, dt.minute, dt.second,
        )),
        DateTimeForm::Zoned { tzid } => {
            let tzid = tzid.clone();
            convert_to_utc(dt, &tzid, resolver)
        }
    }
}

/// Converts a local wall-clock time in the given zone to a UTC instant.
///
/// A registered VTIMEZONE wins over the IANA database. For IANA zones, a
/// DST fold resolves to the first (pre-transition) occurrence per RFC 5545
/// §3.3.5, and a DST gap is an error.
///
/// # Errors
///
/// [`ConversionError`] if the zone is unknown or the local time falls in a
/// DST gap.
pub fn convert_to_utc(
    local: &DateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime, ConversionError> {
    if let Some(vtimezone) = resolver.vtimezones.get(tzid) {
        return Ok(vtimezone.to_utc(local, &resolver.registry));
    }

    let tz = resolver.resolve(tzid)?;
    let naive = naive_of(local)?;

    match tz.from_local_datetime(&naive) {
        LocalResult::None => Err(ConversionError::NonExistentTime(format!(
            "{naive} in timezone {tzid}"
        ))),
        LocalResult::Single(dt) => Ok(utc_of(dt.with_timezone(&Utc).naive_utc())),
        // Fold: the first occurrence, before the offset change
        LocalResult::Ambiguous(first, _second) => {
            Ok(utc_of(first.with_timezone(&Utc).naive_utc()))
        }
    }
}

/// Lenient variant of [`convert_to_utc`] that shifts a time in a DST gap
/// forward by one hour instead of failing.
///
/// # Errors
///
/// [`ConversionError`] if the zone cannot be resolved.
pub fn convert_to_utc_lenient(
    local: &DateTime,
    tzid: &str,
    resolver: &mut TimeZoneResolver,
) -> Result<DateTime, ConversionError> {
    match convert_to_utc(local, tzid, resolver) {
        Err(ConversionError::NonExistentTime(_)) => {
            let naive = naive_of(local)? + chrono::Duration::hours(1);
            use chrono::{Datelike, Timelike};
            #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let shifted = DateTime {
                year: naive.year() as u16,
                month: naive.month() as u8,
                day: naive.day() as u8,
                hour: naive.hour() as u8,
                minute: naive.minute() as u8,
                second: naive.second() as u8,
                form: local.form.clone(),
            };
            convert_to_utc(&shifted, tzid, resolver)
        }
        result => result,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::core::{Component, ComponentKind, Property};

    fn fixed_vtimezone(tzid: &str, offset: &str) -> Component {
        let mut timezone = Component::new(ComponentKind::Timezone);
        timezone.add_property(Property::text("TZID", tzid));

        let mut standard = Component::new(ComponentKind::Standard);
        standard.add_property(Property::datetime(
            "DTSTART",
            DateTime::floating(1970, 1, 1, 0, 0, 0),
        ));
        standard.add_property(Property::text("TZOFFSETFROM", offset));
        standard.add_property(Property::text("TZOFFSETTO", offset));
        timezone.add_child(standard);
        timezone
    }

    #[test]
    fn resolve_iana_timezone() {
        let mut resolver = TimeZoneResolver::new();
        let tz = resolver.resolve("America/New_York").expect("should resolve");
        assert_eq!(tz, Tz::America__New_York);
        // Second lookup comes from the cache
        assert!(resolver.cache.contains_key("America/New_York"));
        resolver.resolve("America/New_York").expect("cached");
    }

    #[test]
    fn resolve_unknown_timezone_fails() {
        let mut resolver = TimeZoneResolver::new();
        assert!(matches!(
            resolver.resolve("Not/A_Zone"),
            Err(ConversionError::UnknownTimezone(_))
        ));
    }

    #[test]
    fn normalize_windows_names() {
        assert_eq!(normalize_tzid("Eastern Standard Time"), "America/New_York");
        assert_eq!(
            normalize_tzid("Pacific Standard Time"),
            "America/Los_Angeles"
        );
        assert_eq!(normalize_tzid("W. Europe Standard Time"), "Europe/Berlin");
    }

    #[test]
    fn normalize_vendor_prefix() {
        assert_eq!(
            normalize_tzid("/mozilla.org/America/New_York"),
            "America/New_York"
        );
    }

    #[test]
    fn normalize_iana_alias() {
        assert_eq!(normalize_tzid("Europe/Kiev"), "Europe/Kyiv");
        assert_eq!(normalize_tzid("US/Eastern"), "America/New_York");
    }

    #[test]
    fn convert_standard_time() {
        let mut resolver = TimeZoneResolver::new();
        let local = DateTime::zoned("America/New_York", 2026, 1, 15, 10, 0, 0);
        let utc = convert_to_utc(&local, "America/New_York", &mut resolver).unwrap();
        // EST is UTC-5
        assert_eq!(utc, DateTime::utc(2026, 1, 15, 15, 0, 0));
    }

    #[test]
    fn convert_daylight_time() {
        let mut resolver = TimeZoneResolver::new();
        let local = DateTime::zoned("America/New_York", 2026, 7, 15, 10, 0, 0);
        let utc = convert_to_utc(&local, "America/New_York", &mut resolver).unwrap();
        // EDT is UTC-4
        assert_eq!(utc, DateTime::utc(2026, 7, 15, 14, 0, 0));
    }

    #[test]
    fn dst_gap_is_an_error_and_lenient_shifts() {
        // 2026-03-08 02:30 does not exist in New York
        let mut resolver = TimeZoneResolver::new();
        let local = DateTime::zoned("America/New_York", 2026, 3, 8, 2, 30, 0);
        assert!(matches!(
            convert_to_utc(&local, "America/New_York", &mut resolver),
            Err(ConversionError::NonExistentTime(_))
        ));

        let shifted = convert_to_utc_lenient(&local, "America/New_York", &mut resolver).unwrap();
        assert_eq!(shifted, DateTime::utc(2026, 3, 8, 7, 30, 0));
    }

    #[test]
    fn dst_fold_takes_first_occurrence() {
        // 2026-11-01 01:30 occurs twice in New York; the first is EDT (-4)
        let mut resolver = TimeZoneResolver::new();
        let local = DateTime::zoned("America/New_York", 2026, 11, 1, 1, 30, 0);
        let utc = convert_to_utc(&local, "America/New_York", &mut resolver).unwrap();
        assert_eq!(utc, DateTime::utc(2026, 11, 1, 5, 30, 0));
    }

    #[test]
    fn vtimezone_takes_precedence() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        ical.add_timezone(fixed_vtimezone("Test/Fixed", "+0200"));

        let mut resolver = build_timezone_resolver(&ical).expect("valid VTIMEZONE");
        assert!(resolver.has_vtimezone("Test/Fixed"));

        let local = DateTime::zoned("Test/Fixed", 2026, 1, 15, 10, 0, 0);
        let utc = convert_to_utc(&local, "Test/Fixed", &mut resolver).unwrap();
        assert_eq!(utc, DateTime::utc(2026, 1, 15, 8, 0, 0));
    }

    #[test]
    fn to_utc_dispatches_on_form() {
        let mut resolver = TimeZoneResolver::new();

        let already = DateTime::utc(2026, 1, 1, 12, 0, 0);
        assert_eq!(to_utc(&already, &mut resolver).unwrap(), already);

        let floating = DateTime::floating(2026, 1, 1, 12, 0, 0);
        assert_eq!(
            to_utc(&floating, &mut resolver).unwrap(),
            DateTime::utc(2026, 1, 1, 12, 0, 0)
        );

        let zoned = DateTime::zoned("America/New_York", 2026, 1, 1, 12, 0, 0);
        assert_eq!(
            to_utc(&zoned, &mut resolver).unwrap(),
            DateTime::utc(2026, 1, 1, 17, 0, 0)
        );
    }
}
