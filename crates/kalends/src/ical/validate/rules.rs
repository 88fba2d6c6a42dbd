//! Per-component validation rules (RFC 5545 §3.6, RFC 7953).
//!
//! Property cardinality is table-driven; everything that depends on more
//! than one property or on nesting is a predicate check.

use crate::ical::core::{Component, ComponentKind, Value};

use super::result::{Issue, Severity, ValidationResult};

/// Cardinality table for one component kind.
pub(crate) struct ComponentRules {
    /// Must appear at least once; repetition is allowed.
    pub required: &'static [&'static str],
    /// Must appear exactly once.
    pub required_once: &'static [&'static str],
    /// May appear at most once.
    pub optional_once: &'static [&'static str],
    /// At most one property of each set may appear.
    pub exclusive: &'static [&'static [&'static str]],
}

const CALENDAR: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["PRODID", "VERSION"],
    optional_once: &["CALSCALE", "METHOD"],
    exclusive: &[],
};

const EVENT: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["DTSTAMP", "UID"],
    optional_once: &[
        "CLASS",
        "CREATED",
        "DESCRIPTION",
        "DTSTART",
        "GEO",
        "LAST-MODIFIED",
        "LOCATION",
        "ORGANIZER",
        "PRIORITY",
        "RECURRENCE-ID",
        "RRULE",
        "SEQUENCE",
        "STATUS",
        "SUMMARY",
        "TRANSP",
        "URL",
    ],
    exclusive: &[&["DTEND", "DURATION"]],
};

const TODO: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["DTSTAMP", "UID"],
    optional_once: &[
        "CLASS",
        "COMPLETED",
        "CREATED",
        "DESCRIPTION",
        "DTSTART",
        "GEO",
        "LAST-MODIFIED",
        "LOCATION",
        "ORGANIZER",
        "PERCENT-COMPLETE",
        "PRIORITY",
        "RECURRENCE-ID",
        "RRULE",
        "SEQUENCE",
        "STATUS",
        "SUMMARY",
        "URL",
    ],
    exclusive: &[&["DUE", "DURATION"]],
};

const JOURNAL: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["DTSTAMP", "UID"],
    optional_once: &[
        "CLASS",
        "CREATED",
        "DTSTART",
        "LAST-MODIFIED",
        "ORGANIZER",
        "RECURRENCE-ID",
        "RRULE",
        "SEQUENCE",
        "STATUS",
        "SUMMARY",
        "URL",
    ],
    exclusive: &[],
};

const FREEBUSY: ComponentRules = ComponentRules {
    required: &["FREEBUSY"],
    required_once: &["DTSTAMP", "UID"],
    optional_once: &["CONTACT", "DTEND", "DTSTART", "ORGANIZER", "URL"],
    exclusive: &[],
};

const TIMEZONE: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["TZID"],
    optional_once: &["LAST-MODIFIED", "TZURL"],
    exclusive: &[],
};

const OBSERVANCE: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["DTSTART", "TZOFFSETFROM", "TZOFFSETTO"],
    optional_once: &["RRULE"],
    exclusive: &[],
};

const ALARM: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["ACTION", "TRIGGER"],
    optional_once: &["DESCRIPTION", "DURATION", "REPEAT", "SUMMARY"],
    exclusive: &[],
};

const AVAILABILITY: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["DTSTAMP", "UID"],
    optional_once: &[
        "BUSYTYPE",
        "CREATED",
        "DTSTART",
        "LAST-MODIFIED",
        "ORGANIZER",
        "SUMMARY",
        "URL",
    ],
    exclusive: &[&["DTEND", "DURATION"]],
};

const AVAILABLE: ComponentRules = ComponentRules {
    required: &[],
    required_once: &["DTSTAMP", "DTSTART", "UID"],
    optional_once: &["CREATED", "LAST-MODIFIED", "RECURRENCE-ID", "RRULE", "SUMMARY"],
    exclusive: &[&["DTEND", "DURATION"]],
};

pub(crate) fn rules_for(kind: ComponentKind) -> Option<&'static ComponentRules> {
    match kind {
        ComponentKind::Calendar => Some(&CALENDAR),
        ComponentKind::Event => Some(&EVENT),
        ComponentKind::Todo => Some(&TODO),
        ComponentKind::Journal => Some(&JOURNAL),
        ComponentKind::FreeBusy => Some(&FREEBUSY),
        ComponentKind::Timezone => Some(&TIMEZONE),
        ComponentKind::Standard | ComponentKind::Daylight => Some(&OBSERVANCE),
        ComponentKind::Alarm => Some(&ALARM),
        ComponentKind::Availability => Some(&AVAILABILITY),
        ComponentKind::Available => Some(&AVAILABLE),
        _ => None,
    }
}

fn issue(component: &Component, property: Option<&str>, severity: Severity, message: String) -> Issue {
    Issue {
        severity,
        component: component.name.clone(),
        property: property.map(str::to_owned),
        message,
    }
}

/// Applies the cardinality table to one component.
pub(crate) fn check_cardinality(
    component: &Component,
    rules: &ComponentRules,
) -> ValidationResult {
    let count = |name: &str| component.get_properties(name).len();
    let mut result = ValidationResult::ok();

    for &name in rules.required {
        if count(name) == 0 {
            result.push(issue(
                component,
                Some(name),
                Severity::Error,
                "property must appear at least once".into(),
            ));
        }
    }

    for &name in rules.required_once {
        match count(name) {
            0 => result.push(issue(
                component,
                Some(name),
                Severity::Error,
                "required property is missing".into(),
            )),
            1 => {}
            n => result.push(issue(
                component,
                Some(name),
                Severity::Error,
                format!("property must appear exactly once, found {n}"),
            )),
        }
    }

    for &name in rules.optional_once {
        let n = count(name);
        if n > 1 {
            result.push(issue(
                component,
                Some(name),
                Severity::Error,
                format!("property may appear at most once, found {n}"),
            ));
        }
    }

    for &set in rules.exclusive {
        let present: Vec<&str> = set.iter().copied().filter(|n| count(n) > 0).collect();
        if present.len() > 1 {
            result.push(issue(
                component,
                None,
                Severity::Error,
                format!("properties are mutually exclusive: {}", present.join(", ")),
            ));
        }
    }

    result
}

/// Checks that go beyond per-property counting.
pub(crate) fn check_conditionals(component: &Component) -> ValidationResult {
    let mut result = ValidationResult::ok();

    match component.kind {
        Some(ComponentKind::Event) => check_start_end_forms(component, &mut result),
        Some(ComponentKind::Alarm) => check_alarm_repeat(component, &mut result),
        Some(ComponentKind::Timezone) => check_timezone_observances(component, &mut result),
        _ => {}
    }

    check_alarm_placement(component, &mut result);
    check_rrules(component, &mut result);

    result
}

/// DTSTART and DTEND must agree on DATE vs DATE-TIME form. Consumers that
/// mix the two silently compute wrong durations, hence Critical.
fn check_start_end_forms(component: &Component, result: &mut ValidationResult) {
    let form = |name: &str| {
        component.get_property(name).map(|p| match &p.value {
            Value::Date(_) | Value::DateList(_) => Some(true),
            Value::DateTime(_) | Value::DateTimeList(_) => Some(false),
            _ => None,
        })
    };
    if let (Some(Some(start_is_date)), Some(Some(end_is_date))) = (form("DTSTART"), form("DTEND"))
        && start_is_date != end_is_date
    {
        result.push(issue(
            component,
            Some("DTEND"),
            Severity::Critical,
            "DTSTART and DTEND disagree on DATE vs DATE-TIME form".into(),
        ));
    }
}

/// `DURATION` and `REPEAT` configure alarm re-triggering and are only
/// meaningful as a pair.
fn check_alarm_repeat(component: &Component, result: &mut ValidationResult) {
    let has_duration = component.get_property("DURATION").is_some();
    let has_repeat = component.get_property("REPEAT").is_some();
    if has_duration != has_repeat {
        result.push(issue(
            component,
            None,
            Severity::Error,
            "DURATION and REPEAT must appear together".into(),
        ));
    }
}

fn check_timezone_observances(component: &Component, result: &mut ValidationResult) {
    let has_observance = component.children.iter().any(|c| {
        matches!(
            c.kind,
            Some(ComponentKind::Standard | ComponentKind::Daylight)
        )
    });
    if !has_observance {
        result.push(issue(
            component,
            None,
            Severity::Error,
            "VTIMEZONE requires at least one STANDARD or DAYLIGHT observance".into(),
        ));
    }
}

/// VALARM is only valid inside VEVENT and VTODO.
fn check_alarm_placement(component: &Component, result: &mut ValidationResult) {
    if matches!(
        component.kind,
        Some(ComponentKind::Event | ComponentKind::Todo)
    ) {
        return;
    }
    for child in &component.children {
        if child.kind == Some(ComponentKind::Alarm) {
            result.push(issue(
                component,
                None,
                Severity::Error,
                "VALARM is only allowed inside VEVENT or VTODO".into(),
            ));
        }
    }
}

/// Surfaces recurrence rule problems for builder-constructed trees that
/// never went through the parser.
fn check_rrules(component: &Component, result: &mut ValidationResult) {
    for prop in component.get_properties("RRULE") {
        if let Value::Recur(rule) = &prop.value
            && let Err(e) = rule.validate()
        {
            result.push(issue(
                component,
                Some("RRULE"),
                Severity::Error,
                e.to_string(),
            ));
        }
    }
    if !component.get_properties("RRULE").is_empty()
        && component.get_property("DTSTART").is_none()
        && component.kind != Some(ComponentKind::Calendar)
    {
        result.push(issue(
            component,
            Some("RRULE"),
            Severity::Warning,
            "recurrence rule without DTSTART has no anchor".into(),
        ));
    }
}
