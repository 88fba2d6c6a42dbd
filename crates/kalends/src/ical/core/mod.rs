//! iCalendar core models (RFC 5545).
//!
//! These types are designed for:
//! - Round-trip fidelity: raw value strings and unknown properties are
//!   preserved through a parse/serialize cycle
//! - Deterministic serialization: insertion order is kept, with an opt-in
//!   stable sort
//! - Type safety: each value type has a dedicated Rust representation

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm, Time, UtcOffset};
pub use duration::Duration;
pub use parameter::Parameter;
pub use property::{ContentLine, Property, names};
pub use rrule::{Frequency, RRule, RRuleUntil, RuleError, Weekday, WeekdayNum};
pub use value::{Date, Geo, Period, Value};
