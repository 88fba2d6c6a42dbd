//! End-to-end flows: parsed documents feeding the recurrence engine, the
//! timezone resolver, and the validator.

use crate::ical::core::{ComponentKind, DateTime};
use crate::ical::expand::{
    Anchor, CalendarRegistry, build_timezone_resolver, expand, to_utc,
};
use crate::ical::parse::{ParseMode, ParseOptions, parse, parse_with};
use crate::ical::validate::validate;

use super::fixtures::*;

#[test]
fn recurring_event_expands_from_parsed_document() {
    let ical = parse(VEVENT_RECURRING).unwrap();
    let event = ical.events()[0];

    let rule = event.rrule().unwrap();
    let dtstart = event.dtstart().unwrap().as_datetime().unwrap();
    let exdate = event
        .get_property("EXDATE")
        .and_then(|p| p.as_datetime())
        .unwrap();

    let registry = CalendarRegistry::default();
    let anchor = Anchor::DateTime(dtstart.clone());
    let occurrences: Vec<Anchor> = expand(rule, &anchor, &registry)
        .unwrap()
        .with_exdates(&[Anchor::DateTime(exdate.clone())])
        .collect();

    // COUNT=10, Mon/Wed/Fri from 2026-01-05, with Wed Jan 7 excluded.
    let days: Vec<u8> = occurrences.iter().map(Anchor::day).collect();
    assert_eq!(days, vec![5, 9, 12, 14, 16, 19, 21, 23, 26, 28]);
    assert!(occurrences.iter().all(|o| o.month() == 1));
}

#[test]
fn available_block_recurs_on_weekdays() {
    let ical = parse(VAVAILABILITY_BASIC).unwrap();
    let availability = ical.root.children_of_kind(ComponentKind::Availability)[0];
    let available = availability.children_of_kind(ComponentKind::Available)[0];

    let rule = available.rrule().unwrap();
    let dtstart = available.dtstart().unwrap().as_datetime().unwrap();

    let registry = CalendarRegistry::default();
    let anchor = Anchor::DateTime(dtstart.clone());
    let days: Vec<u8> = expand(rule, &anchor, &registry)
        .unwrap()
        .take(5)
        .map(|o| o.day())
        .collect();

    // 2026-01-05 is a Monday.
    assert_eq!(days, vec![5, 6, 7, 8, 9]);
}

#[test]
fn zoned_event_converts_to_utc_via_vtimezone() {
    let ical = parse(VEVENT_WITH_TIMEZONE).unwrap();
    let mut resolver = build_timezone_resolver(&ical).unwrap();

    let event = ical.events()[0];
    let dtstart = event.dtstart().unwrap().as_datetime().unwrap();
    assert_eq!(dtstart.tzid(), Some("America/New_York"));

    // July 14 falls inside the DAYLIGHT observance, offset -0400.
    let utc = to_utc(dtstart, &mut resolver).unwrap();
    assert_eq!(utc, DateTime::utc(2026, 7, 14, 13, 0, 0));
}

#[test]
fn fixtures_validate_cleanly() {
    for input in [
        VEVENT_MINIMAL,
        VEVENT_RECURRING,
        VTODO_BASIC,
        VJOURNAL_BASIC,
        VFREEBUSY_REQUEST,
        VEVENT_WITH_ALARM,
        VEVENT_WITH_TIMEZONE,
        VEVENT_ALL_DAY,
        VEVENT_WITH_GEO,
        VAVAILABILITY_BASIC,
    ] {
        let ical = parse(input).unwrap();
        let result = validate(&ical);
        assert!(result.is_valid(), "unexpected issues: {:?}", result.issues());
    }
}

#[test]
fn lenient_parse_keeps_the_document_and_records_warnings() {
    let input = concat!(
        "BEGIN:VCALENDAR\r\n",
        "VERSION:2.0\r\n",
        "PRODID:-//Kalends//Test//EN\r\n",
        "BEGIN:VEVENT\r\n",
        "UID:lenient@example.com\r\n",
        "DTSTAMP:20260101T120000Z\r\n",
        "DTSTART:20260115T090000Z\r\n",
        "GEO:not-a-geo\r\n",
        "END:VEVENT\r\n",
        "END:VCALENDAR\r\n",
    );

    assert!(parse(input).is_err());

    let options = ParseOptions {
        mode: ParseMode::Lenient,
    };
    let parsed = parse_with(input, &options).unwrap();
    assert!(!parsed.warnings.is_empty());
    assert_eq!(parsed.calendar.events().len(), 1);
}
