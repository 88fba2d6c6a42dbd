//! kalends — iCalendar (RFC 5545) and vCard (RFC 6350) parsing, validation,
//! serialization, and recurrence expansion.
//!
//! Both formats share one grammar family: folded content lines made of a
//! name, optional parameters, and an escaped value. This crate provides:
//!
//! - A round-trip-exact content-line codec (unfolding/folding, parameter
//!   quoting and RFC 6868 caret encoding, per-type value codecs).
//! - A component tree builder with strict BEGIN/END matching.
//! - A native recurrence engine ([`ical::expand`]) with BY-rule filters,
//!   BYSETPOS selection, and non-Gregorian calendar scales (RFC 7529).
//! - A rule-based validator producing severity-classified findings.
//!
//! ## Parsing a calendar
//!
//! ```rust
//! let input = "\
//! BEGIN:VCALENDAR\r\n\
//! VERSION:2.0\r\n\
//! PRODID:-//Test//Test//EN\r\n\
//! BEGIN:VEVENT\r\n\
//! UID:demo@example.com\r\n\
//! DTSTAMP:20260123T120000Z\r\n\
//! DTSTART:20260123T140000Z\r\n\
//! SUMMARY:Team Meeting\r\n\
//! END:VEVENT\r\n\
//! END:VCALENDAR\r\n";
//!
//! let ical = kalends::ical::parse::parse(input).unwrap();
//! assert_eq!(ical.events()[0].summary(), Some("Team Meeting"));
//! ```
//!
//! ## Expanding a recurrence rule
//!
//! ```rust
//! use kalends::ical::core::DateTime;
//! use kalends::ical::expand::{Anchor, CalendarRegistry, expand};
//! use kalends::ical::parse::parse_rrule;
//!
//! let rule = parse_rrule("FREQ=DAILY;COUNT=3", false, 1, 1).unwrap();
//! let anchor = Anchor::DateTime(DateTime::utc(2024, 1, 1, 9, 0, 0));
//! let registry = CalendarRegistry::default();
//!
//! let days: Vec<u8> = expand(&rule, &anchor, &registry)
//!     .unwrap()
//!     .map(|occ| occ.day())
//!     .collect();
//! assert_eq!(days, vec![1, 2, 3]);
//! ```
//!
//! ## Parsing a contact card
//!
//! ```rust
//! let input = "\
//! BEGIN:VCARD\r\n\
//! VERSION:4.0\r\n\
//! FN:Grace Hopper\r\n\
//! EMAIL;TYPE=work:grace@example.com\r\n\
//! END:VCARD\r\n";
//!
//! let card = kalends::vcard::parse::parse_single(input).unwrap();
//! assert_eq!(card.formatted_name(), Some("Grace Hopper"));
//! assert_eq!(card.emails(), vec!["grace@example.com"]);
//! ```
//!
//! All codec and expansion operations are pure functions over their inputs;
//! independent documents can be processed concurrently without coordination.

pub mod error;
pub mod ical;
pub mod vcard;

pub use error::{Error, Result};
