//! Recurrence expansion and timezone resolution.
//!
//! - Calendar: calendar systems and the RSCALE registry (RFC 7529)
//! - Recur: lazy recurrence expansion (RFC 5545 §3.8.5)
//! - VTimezone: offset rules from embedded VTIMEZONE components
//! - Timezone: TZID normalization and UTC conversion

mod calendar;
mod recur;
mod timezone;
mod vtimezone;

pub use calendar::{
    CalendarRegistry, CalendarSystem, CivilDate, Gregorian, Hebrew, IslamicCivil,
    weekday_from_fixed,
};
pub use recur::{Anchor, RecurIter, expand};
pub use timezone::{
    ConversionError, TimeZoneResolver, build_timezone_resolver, convert_to_utc,
    convert_to_utc_lenient, normalize_tzid, to_utc,
};
pub use vtimezone::{Observance, ObservanceKind, VTimezone, VTimezoneError};
