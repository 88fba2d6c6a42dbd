//! iCalendar parse error types.

use std::fmt;

/// Result type for iCalendar parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred during iCalendar parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    /// The kind of error.
    pub kind: ParseErrorKind,
    /// Line number where the error occurred (1-based).
    pub line: usize,
    /// Column where the error occurred (1-based).
    pub col: usize,
    /// Additional context, if any.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub fn new(kind: ParseErrorKind, line: usize, col: usize) -> Self {
        Self {
            kind,
            line,
            col,
            context: None,
        }
    }

    /// Attaches a context message to this error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Returns whether this error is structural (malformed component tree)
    /// rather than a grammar or value problem. Structural errors are fatal
    /// in every parse mode.
    #[must_use]
    pub fn is_structural(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::MissingBegin
                | ParseErrorKind::MissingEnd
                | ParseErrorKind::MismatchedComponent
        )
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, col {}: {}", self.line, self.col, self.kind)?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// The kind of parse error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Document or component does not start with BEGIN.
    MissingBegin,
    /// Input ended with open components.
    MissingEnd,
    /// END name does not match the open component.
    MismatchedComponent,
    /// Content line has no property name.
    MissingPropertyName,
    /// Property name contains an invalid character.
    InvalidPropertyName,
    /// Malformed parameter.
    InvalidParameter,
    /// Quoted parameter value never closed.
    UnclosedQuote,
    /// Content line has no value separator.
    MissingColon,
    /// Invalid DATE value.
    InvalidDate,
    /// Invalid TIME value.
    InvalidTime,
    /// Invalid DATE-TIME value.
    InvalidDateTime,
    /// Invalid UTC-OFFSET value.
    InvalidUtcOffset,
    /// Invalid DURATION value.
    InvalidDuration,
    /// Invalid PERIOD value.
    InvalidPeriod,
    /// Invalid RECUR rule.
    InvalidRRule,
    /// Invalid FREQ value in a RECUR rule.
    InvalidFrequency,
    /// Invalid weekday code.
    InvalidWeekday,
    /// RECUR rule specifies both COUNT and UNTIL.
    UntilCountConflict,
    /// Invalid BOOLEAN value.
    InvalidBoolean,
    /// Invalid INTEGER value.
    InvalidInteger,
    /// Invalid FLOAT value.
    InvalidFloat,
    /// Invalid GEO value.
    InvalidGeo,
    /// Generic invalid value.
    InvalidValue,
    /// Content after the final END:VCALENDAR.
    TrailingContent,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingBegin => write!(f, "missing BEGIN"),
            Self::MissingEnd => write!(f, "missing END"),
            Self::MismatchedComponent => write!(f, "mismatched component"),
            Self::MissingPropertyName => write!(f, "missing property name"),
            Self::InvalidPropertyName => write!(f, "invalid property name"),
            Self::InvalidParameter => write!(f, "invalid parameter"),
            Self::UnclosedQuote => write!(f, "unclosed quote"),
            Self::MissingColon => write!(f, "missing ':' separator"),
            Self::InvalidDate => write!(f, "invalid DATE value"),
            Self::InvalidTime => write!(f, "invalid TIME value"),
            Self::InvalidDateTime => write!(f, "invalid DATE-TIME value"),
            Self::InvalidUtcOffset => write!(f, "invalid UTC-OFFSET value"),
            Self::InvalidDuration => write!(f, "invalid DURATION value"),
            Self::InvalidPeriod => write!(f, "invalid PERIOD value"),
            Self::InvalidRRule => write!(f, "invalid recurrence rule"),
            Self::InvalidFrequency => write!(f, "invalid FREQ value"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
            Self::UntilCountConflict => write!(f, "COUNT and UNTIL are mutually exclusive"),
            Self::InvalidBoolean => write!(f, "invalid BOOLEAN value"),
            Self::InvalidInteger => write!(f, "invalid INTEGER value"),
            Self::InvalidFloat => write!(f, "invalid FLOAT value"),
            Self::InvalidGeo => write!(f, "invalid GEO value"),
            Self::InvalidValue => write!(f, "invalid value"),
            Self::TrailingContent => write!(f, "content after end of calendar"),
        }
    }
}

/// A non-fatal finding recorded during lenient parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseWarning {
    /// Line number the warning refers to (1-based).
    pub line: usize,
    /// Property name the warning refers to, if known.
    pub property: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}", self.line)?;
        if let Some(property) = &self.property {
            write!(f, " ({property})")?;
        }
        write!(f, ": {}", self.message)
    }
}
