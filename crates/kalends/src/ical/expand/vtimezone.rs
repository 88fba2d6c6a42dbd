//! VTIMEZONE parsing and offset calculation (RFC 5545 §3.6.5).
//!
//! Turns a `VTIMEZONE` component into an offset oracle for its `TZID`, so
//! calendars can ship proprietary zone definitions that no IANA database
//! knows. Observance transitions are expanded with the regular recurrence
//! engine rather than a special-cased evaluator.

use crate::ical::core::{
    Component, ComponentKind, DateTime, DateTimeForm, RRule, UtcOffset, Value,
};
use crate::ical::parse::parse_utc_offset;

use super::calendar::{CalendarRegistry, CalendarSystem, CivilDate, Gregorian};
use super::recur::{Anchor, expand};

const SECS_PER_DAY: i64 = 86_400;

/// Error during VTIMEZONE parsing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VTimezoneError {
    /// The component is not a VTIMEZONE or lacks the required TZID.
    #[error("VTIMEZONE is missing the required TZID property")]
    MissingTzid,

    /// A VTIMEZONE needs at least one STANDARD or DAYLIGHT child.
    #[error("VTIMEZONE has no STANDARD or DAYLIGHT observances")]
    NoObservances,

    /// A required observance property is absent.
    #[error("missing required property {0} in {1} observance")]
    MissingProperty(&'static str, &'static str),

    /// A property value could not be interpreted.
    #[error("invalid {0} value: {1}")]
    InvalidValue(&'static str, String),
}

/// Kind of observance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservanceKind {
    Standard,
    Daylight,
}

impl ObservanceKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Standard => "STANDARD",
            Self::Daylight => "DAYLIGHT",
        }
    }
}

impl std::fmt::Display for ObservanceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One STANDARD or DAYLIGHT rule: when it first applies and which offset it
/// switches the zone to.
#[derive(Debug, Clone, PartialEq)]
pub struct Observance {
    pub kind: ObservanceKind,
    /// Offset in effect once this observance applies.
    pub offset_to: UtcOffset,
    /// Offset in effect just before the transition.
    pub offset_from: UtcOffset,
    /// First transition, as local wall-clock time.
    pub dtstart: DateTime,
    /// Annual transition rule, if recurring.
    pub rrule: Option<RRule>,
    /// Explicit extra transitions.
    pub rdates: Vec<DateTime>,
    /// Zone abbreviation such as `EST`.
    pub tzname: Option<String>,
}

impl Observance {
    /// Wall-clock position of the latest transition of this observance at
    /// or before `target`, if it applies at all by then.
    fn effective_at(&self, target: i64, registry: &CalendarRegistry) -> Option<i64> {
        let start = wall_secs(&self.dtstart);
        if target < start {
            return None;
        }

        let mut best = start;
        for rdate in &self.rdates {
            let k = wall_secs(rdate);
            if k <= target && k > best {
                best = k;
            }
        }

        if let Some(rule) = &self.rrule
            && let Ok(iter) = expand(rule, &Anchor::DateTime(self.dtstart.clone()), registry)
        {
            for occurrence in iter {
                let Anchor::DateTime(dt) = occurrence else {
                    break;
                };
                let k = wall_secs(&dt);
                if k > target {
                    break;
                }
                if k > best {
                    best = k;
                }
            }
        }

        Some(best)
    }
}

/// A parsed VTIMEZONE: everything needed to map this zone's local times to
/// UTC offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct VTimezone {
    pub tzid: String,
    pub observances: Vec<Observance>,
    pub last_modified: Option<DateTime>,
    pub tzurl: Option<String>,
}

impl VTimezone {
    /// Parses a `VTIMEZONE` component.
    ///
    /// # Errors
    ///
    /// [`VTimezoneError`] when the TZID is missing, no observances are
    /// present, or an observance lacks DTSTART/TZOFFSETTO/TZOFFSETFROM.
    pub fn parse(component: &Component) -> Result<Self, VTimezoneError> {
        if component.kind != Some(ComponentKind::Timezone) {
            return Err(VTimezoneError::MissingTzid);
        }

        let tzid = component
            .get_property("TZID")
            .and_then(|p| p.as_text())
            .ok_or(VTimezoneError::MissingTzid)?
            .to_owned();

        let mut observances = Vec::new();
        for child in &component.children {
            let kind = match child.kind {
                Some(ComponentKind::Standard) => ObservanceKind::Standard,
                Some(ComponentKind::Daylight) => ObservanceKind::Daylight,
                _ => continue,
            };
            observances.push(Self::parse_observance(child, kind)?);
        }
        if observances.is_empty() {
            return Err(VTimezoneError::NoObservances);
        }

        let last_modified = component
            .get_property("LAST-MODIFIED")
            .and_then(|p| p.as_datetime())
            .cloned();
        let tzurl = component
            .get_property("TZURL")
            .and_then(|p| p.as_text())
            .map(String::from);

        Ok(Self {
            tzid,
            observances,
            last_modified,
            tzurl,
        })
    }

    fn parse_observance(
        component: &Component,
        kind: ObservanceKind,
    ) -> Result<Observance, VTimezoneError> {
        let kind_str = kind.as_str();

        let dtstart_prop = component
            .get_property("DTSTART")
            .ok_or(VTimezoneError::MissingProperty("DTSTART", kind_str))?;
        let dtstart = dtstart_prop
            .as_datetime()
            .cloned()
            .ok_or_else(|| {
                VTimezoneError::InvalidValue("DTSTART", dtstart_prop.raw_value.clone())
            })?;

        let offset_to = required_offset(component, "TZOFFSETTO", kind_str)?;
        let offset_from = required_offset(component, "TZOFFSETFROM", kind_str)?;

        let rrule = component
            .get_property("RRULE")
            .and_then(|p| p.as_recur())
            .cloned();

        let mut rdates = Vec::new();
        for prop in component.get_properties("RDATE") {
            match &prop.value {
                Value::DateTime(dt) => rdates.push(dt.clone()),
                Value::DateTimeList(list) => rdates.extend(list.iter().cloned()),
                _ => {}
            }
        }

        let tzname = component
            .get_property("TZNAME")
            .and_then(|p| p.as_text())
            .map(String::from);

        Ok(Observance {
            kind,
            offset_to,
            offset_from,
            dtstart,
            rrule,
            rdates,
            tzname,
        })
    }

    /// The UTC offset in effect at the given local wall-clock time.
    ///
    /// Picks the observance with the most recent transition at or before
    /// the time. Times before every transition fall back to the earliest
    /// observance's `offset_from`.
    #[must_use]
    pub fn offset_at(&self, local: &DateTime, registry: &CalendarRegistry) -> UtcOffset {
        let target = wall_secs(local);
        let mut best: Option<(i64, UtcOffset)> = None;

        for obs in &self.observances {
            if let Some(effective) = obs.effective_at(target, registry)
                && best.is_none_or(|(b, _)| effective > b)
            {
                best = Some((effective, obs.offset_to));
            }
        }

        best.map_or_else(
            || {
                self.observances
                    .iter()
                    .min_by_key(|o| wall_secs(&o.dtstart))
                    .map_or(UtcOffset::from_seconds(0), |o| o.offset_from)
            },
            |(_, offset)| offset,
        )
    }

    /// Converts a local wall-clock time in this zone to a UTC instant.
    #[must_use]
    pub fn to_utc(&self, local: &DateTime, registry: &CalendarRegistry) -> DateTime {
        let offset = self.offset_at(local, registry);
        dt_from_secs(
            wall_secs(local) - i64::from(offset.as_seconds()),
            DateTimeForm::Utc,
        )
    }

    /// Converts a UTC instant to this zone's local wall-clock time.
    #[must_use]
    pub fn from_utc(&self, utc: &DateTime, registry: &CalendarRegistry) -> DateTime {
        // First approximation with the offset at the UTC time, then refine
        // with the offset at the approximated local time
        let utc_secs = wall_secs(utc);
        let approx = dt_from_secs(
            utc_secs + i64::from(self.offset_at(utc, registry).as_seconds()),
            DateTimeForm::Floating,
        );
        let offset = self.offset_at(&approx, registry);
        dt_from_secs(
            utc_secs + i64::from(offset.as_seconds()),
            DateTimeForm::Floating,
        )
    }
}

fn required_offset(
    component: &Component,
    name: &'static str,
    kind_str: &'static str,
) -> Result<UtcOffset, VTimezoneError> {
    let prop = component
        .get_property(name)
        .ok_or(VTimezoneError::MissingProperty(name, kind_str))?;
    if let Value::UtcOffset(offset) = &prop.value {
        return Ok(*offset);
    }
    parse_utc_offset(&prop.raw_value, 0, 0)
        .map_err(|_e| VTimezoneError::InvalidValue(name, prop.raw_value.clone()))
}

/// Wall-clock position as seconds on the civil timeline, ignoring the zone
/// disposition.
fn wall_secs(dt: &DateTime) -> i64 {
    let fixed = Gregorian.fixed_from_civil(CivilDate::new(i32::from(dt.year), dt.month, dt.day));
    fixed * SECS_PER_DAY + i64::from(dt.seconds_of_day())
}

#[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn dt_from_secs(total: i64, form: DateTimeForm) -> DateTime {
    let civil = Gregorian.civil_from_fixed(total.div_euclid(SECS_PER_DAY));
    let secs = total.rem_euclid(SECS_PER_DAY);
    DateTime {
        year: u16::try_from(civil.year).unwrap_or(u16::MAX),
        month: civil.month,
        day: civil.day,
        hour: (secs / 3600) as u8,
        minute: (secs / 60 % 60) as u8,
        second: (secs % 60) as u8,
        form,
    }
}
