//! Crate-level error type.

use thiserror::Error;

/// Errors surfaced by the public API.
#[derive(Error, Debug)]
pub enum Error {
    /// iCalendar parse error (structural, grammar, or value level).
    #[error("iCalendar parse error: {0}")]
    IcalParse(#[from] crate::ical::parse::ParseError),

    /// vCard parse error.
    #[error("vCard parse error: {0}")]
    VCardParse(#[from] crate::vcard::parse::ParseError),

    /// Recurrence rule construction/validation error.
    #[error("recurrence rule error: {0}")]
    Rule(#[from] crate::ical::core::RuleError),

    /// Timezone resolution or UTC conversion error.
    #[error("timezone conversion error: {0}")]
    Conversion(#[from] crate::ical::expand::ConversionError),

    /// Invalid VTIMEZONE component.
    #[error("timezone definition error: {0}")]
    Timezone(#[from] crate::ical::expand::VTimezoneError),
}

pub type Result<T> = std::result::Result<T, Error>;
