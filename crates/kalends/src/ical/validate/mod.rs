//! Structural validation of iCalendar trees (RFC 5545 §3.6).
//!
//! Validation is read-only and total: it walks the whole tree, collects
//! every finding into a [`ValidationResult`], and never aborts early.

mod result;
mod rules;

pub use result::{Issue, Severity, ValidationResult};

use crate::ical::core::{Component, ICalendar};

/// Validates a whole document.
#[must_use]
#[tracing::instrument(skip(ical))]
pub fn validate(ical: &ICalendar) -> ValidationResult {
    validate_component(&ical.root)
}

/// Validates one component and its descendants.
#[must_use]
pub fn validate_component(component: &Component) -> ValidationResult {
    let mut result = match component.kind.and_then(rules::rules_for) {
        Some(rules) => rules::check_cardinality(component, rules),
        // Unknown components carry no cardinality rules
        None => ValidationResult::ok(),
    };
    result = result.combine(rules::check_conditionals(component));

    for child in &component.children {
        result = result.combine(validate_component(child));
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::core::{
        ComponentKind, DateTime, Frequency, Property, RRule,
    };

    fn minimal_event() -> Component {
        let mut event = Component::event();
        event.add_property(Property::text("UID", "x@example.com"));
        event.add_property(Property::datetime(
            "DTSTAMP",
            DateTime::utc(2026, 1, 1, 0, 0, 0),
        ));
        event
    }

    #[test]
    fn valid_minimal_calendar() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        ical.add_event(minimal_event());
        let result = validate(&ical);
        assert!(result.is_valid(), "unexpected issues: {:?}", result.issues());
    }

    #[test]
    fn missing_uid_is_an_error() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        let mut event = Component::event();
        event.add_property(Property::datetime(
            "DTSTAMP",
            DateTime::utc(2026, 1, 1, 0, 0, 0),
        ));
        ical.add_event(event);

        let result = validate(&ical);
        assert!(!result.is_valid());
        assert!(result.issues().iter().any(|i| {
            i.property.as_deref() == Some("UID") && i.severity == Severity::Error
        }));
    }

    #[test]
    fn freebusy_without_periods_is_an_error() {
        let mut freebusy = Component::new(ComponentKind::FreeBusy);
        freebusy.add_property(Property::text("UID", "fb@example.com"));
        freebusy.add_property(Property::datetime(
            "DTSTAMP",
            DateTime::utc(2026, 1, 1, 0, 0, 0),
        ));

        let result = validate_component(&freebusy);
        assert!(result.issues().iter().any(|i| {
            i.property.as_deref() == Some("FREEBUSY")
                && i.message.contains("at least once")
        }));

        // Repetition satisfies the rule
        freebusy.add_property(Property::text(
            "FREEBUSY",
            "20260202T090000Z/20260202T100000Z",
        ));
        freebusy.add_property(Property::text(
            "FREEBUSY",
            "20260203T090000Z/20260203T100000Z",
        ));
        assert!(validate_component(&freebusy).is_valid());
    }

    #[test]
    fn duplicate_summary_is_an_error() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        let mut event = minimal_event();
        event.add_property(Property::text("SUMMARY", "one"));
        event.add_property(Property::text("SUMMARY", "two"));
        ical.add_event(event);

        assert!(!validate(&ical).is_valid());
    }

    #[test]
    fn dtend_and_duration_are_exclusive() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        let mut event = minimal_event();
        event.add_property(Property::datetime(
            "DTEND",
            DateTime::utc(2026, 1, 1, 1, 0, 0),
        ));
        event.add_property(Property::text("DURATION", "PT1H"));
        ical.add_event(event);

        let result = validate(&ical);
        assert!(result.issues().iter().any(|i| {
            i.message.contains("mutually exclusive")
        }));
    }

    #[test]
    fn start_end_form_mismatch_is_critical() {
        let mut ical = ICalendar::new("-//Test//Test//EN");
        let mut event = minimal_event();
        event.add_property(Property::date(
            "DTSTART",
            crate::ical::core::Date {
                year: 2026,
                month: 1,
                day: 1,
            },
        ));
        event.add_property(Property::datetime(
            "DTEND",
            DateTime::utc(2026, 1, 1, 12, 0, 0),
        ));
        ical.add_event(event);

        let result = validate(&ical);
        assert!(result.has_critical());
    }

    #[test]
    fn alarm_duration_requires_repeat() {
        let mut alarm = Component::new(ComponentKind::Alarm);
        alarm.add_property(Property::text("ACTION", "DISPLAY"));
        alarm.add_property(Property::text("TRIGGER", "-PT15M"));
        alarm.add_property(Property::text("DURATION", "PT5M"));

        let mut event = minimal_event();
        event.add_child(alarm);

        let result = validate_component(&event);
        assert!(result.issues().iter().any(|i| {
            i.message.contains("DURATION and REPEAT")
        }));
    }

    #[test]
    fn alarm_outside_event_or_todo_is_rejected() {
        let mut alarm = Component::new(ComponentKind::Alarm);
        alarm.add_property(Property::text("ACTION", "DISPLAY"));
        alarm.add_property(Property::text("TRIGGER", "-PT15M"));

        let mut journal = Component::new(ComponentKind::Journal);
        journal.add_property(Property::text("UID", "j@example.com"));
        journal.add_property(Property::datetime(
            "DTSTAMP",
            DateTime::utc(2026, 1, 1, 0, 0, 0),
        ));
        journal.add_child(alarm);

        let result = validate_component(&journal);
        assert!(result.issues().iter().any(|i| {
            i.message.contains("VALARM is only allowed")
        }));
    }

    #[test]
    fn empty_vtimezone_is_an_error() {
        let mut timezone = Component::new(ComponentKind::Timezone);
        timezone.add_property(Property::text("TZID", "Test/Zone"));
        let result = validate_component(&timezone);
        assert!(result.issues().iter().any(|i| {
            i.message.contains("STANDARD or DAYLIGHT")
        }));
    }

    #[test]
    fn invalid_rrule_is_surfaced() {
        let mut rule = RRule::new(Frequency::Daily);
        rule.interval = 0;

        let mut event = minimal_event();
        event.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(2026, 1, 1, 9, 0, 0),
        ));
        event.add_property(Property::rrule(rule));

        let result = validate_component(&event);
        assert!(result.issues().iter().any(|i| {
            i.property.as_deref() == Some("RRULE") && i.severity == Severity::Error
        }));
    }

    #[test]
    fn rrule_without_dtstart_warns() {
        let mut event = minimal_event();
        event.add_property(Property::rrule(RRule::new(Frequency::Daily)));

        let result = validate_component(&event);
        assert!(result.is_valid());
        assert_eq!(result.worst(), Some(Severity::Warning));
    }

    #[test]
    fn unknown_component_kinds_pass() {
        let component = Component::custom("X-CUSTOM");
        assert!(validate_component(&component).is_valid());
    }
}
