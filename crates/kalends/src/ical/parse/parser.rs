//! iCalendar document parser (RFC 5545).
//!
//! Parses complete iCalendar documents into typed structures. Structural
//! errors (BEGIN/END mismatches, truncated input) are fatal in every mode;
//! grammar and value errors are fatal in strict mode and downgraded to
//! warnings in lenient mode.

use super::error::{ParseError, ParseErrorKind, ParseResult, ParseWarning};
use super::lexer::{parse_content_line, split_lines};
use super::values::{
    parse_boolean, parse_date, parse_datetime, parse_duration, parse_float, parse_geo,
    parse_integer, parse_period, parse_rrule, parse_time, parse_utc_offset, unescape_text,
};
use crate::ical::core::{
    Component, ComponentKind, ContentLine, Date, DateTime, ICalendar, Period, Property, Value,
};

/// How non-structural errors are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Any error aborts the parse.
    #[default]
    Strict,
    /// Malformed lines are dropped and bad values kept raw, each recorded
    /// as a warning.
    Lenient,
}

/// Options controlling a parse.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    pub mode: ParseMode,
}

/// The outcome of a parse: the calendar plus any warnings recorded in
/// lenient mode. Strict parses always carry an empty warning list.
#[derive(Debug, Clone)]
pub struct Parsed {
    pub calendar: ICalendar,
    pub warnings: Vec<ParseWarning>,
}

/// Parses an iCalendar document in strict mode.
///
/// ## Errors
///
/// Returns an error if the input is not valid iCalendar.
pub fn parse(input: &str) -> ParseResult<ICalendar> {
    parse_with(input, &ParseOptions::default()).map(|parsed| parsed.calendar)
}

/// Parses an iCalendar document with explicit options.
///
/// ## Errors
///
/// Structural errors are returned in every mode; grammar and value errors
/// only in [`ParseMode::Strict`].
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse_with(input: &str, options: &ParseOptions) -> ParseResult<Parsed> {
    tracing::debug!("Parsing iCalendar document");

    let lines = split_lines(input);
    if lines.is_empty() {
        tracing::warn!("Empty iCalendar input");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    }

    let mut warnings = Vec::new();
    let mut content_lines: Vec<(usize, ContentLine)> = Vec::with_capacity(lines.len());
    for (line_num, line) in lines {
        match parse_content_line(&line, line_num) {
            Ok(cl) => content_lines.push((line_num, cl)),
            Err(e) if options.mode == ParseMode::Lenient => {
                tracing::warn!(line = line_num, error = %e, "Dropping malformed content line");
                warnings.push(ParseWarning {
                    line: line_num,
                    property: None,
                    message: format!("dropped malformed line: {e}"),
                });
            }
            Err(e) => return Err(e),
        }
    }

    let mut iter = content_lines.into_iter().peekable();

    let Some((line_num, begin_line)) = iter.next() else {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, 1, 1));
    };
    if begin_line.name != "BEGIN" {
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1));
    }
    let root_name = begin_line.raw_value.to_ascii_uppercase();
    if root_name != "VCALENDAR" {
        tracing::warn!(component = %root_name, "Root component is not VCALENDAR");
        return Err(ParseError::new(ParseErrorKind::MissingBegin, line_num, 1)
            .with_context("expected VCALENDAR"));
    }

    let root = parse_component_body(&mut iter, line_num, &root_name, options, &mut warnings)?;

    if let Some((trailing_line, _)) = iter.peek() {
        let trailing_line = *trailing_line;
        if options.mode == ParseMode::Strict {
            return Err(ParseError::new(
                ParseErrorKind::TrailingContent,
                trailing_line,
                1,
            ));
        }
        tracing::warn!(line = trailing_line, "Ignoring content after END:VCALENDAR");
        warnings.push(ParseWarning {
            line: trailing_line,
            property: None,
            message: "content after END:VCALENDAR ignored".to_string(),
        });
    }

    tracing::debug!(
        warnings = warnings.len(),
        "iCalendar document parsed successfully"
    );

    Ok(Parsed {
        calendar: ICalendar { root },
        warnings,
    })
}

/// Parses a component body given that its BEGIN line was already consumed.
fn parse_component_body(
    iter: &mut std::iter::Peekable<impl Iterator<Item = (usize, ContentLine)>>,
    begin_line_num: usize,
    component_name: &str,
    options: &ParseOptions,
    warnings: &mut Vec<ParseWarning>,
) -> ParseResult<Component> {
    let kind = ComponentKind::parse(component_name);
    let mut component = Component {
        kind: Some(kind),
        name: component_name.to_string(),
        properties: Vec::new(),
        children: Vec::new(),
    };

    let mut last_line_num = begin_line_num;

    loop {
        let Some((line_num, content_line)) = iter.next() else {
            return Err(
                ParseError::new(ParseErrorKind::MissingEnd, last_line_num, 1)
                    .with_context(format!("missing END:{component_name}")),
            );
        };
        last_line_num = line_num;

        match content_line.name.as_str() {
            "BEGIN" => {
                let nested_name = content_line.raw_value.to_ascii_uppercase();
                let nested =
                    parse_component_body(iter, line_num, &nested_name, options, warnings)?;
                component.children.push(nested);
            }
            "END" => {
                let end_name = content_line.raw_value.to_ascii_uppercase();
                if end_name != component_name {
                    return Err(
                        ParseError::new(ParseErrorKind::MismatchedComponent, line_num, 1)
                            .with_context(format!(
                                "expected END:{component_name}, got END:{end_name}"
                            )),
                    );
                }
                break;
            }
            _ => match parse_property(content_line, line_num, options.mode) {
                Ok(property) => component.properties.push(property),
                Err((cl, e)) => {
                    if options.mode == ParseMode::Strict {
                        return Err(e);
                    }
                    tracing::warn!(
                        line = line_num,
                        property = %cl.name,
                        error = %e,
                        "Keeping raw value for undecodable property"
                    );
                    warnings.push(ParseWarning {
                        line: line_num,
                        property: Some(cl.name.clone()),
                        message: format!("value kept raw: {e}"),
                    });
                    component.properties.push(Property::from_content_line(cl));
                }
            },
        }
    }

    Ok(component)
}

/// Parses a property from a content line, resolving the value type.
///
/// On failure the content line is handed back so lenient mode can keep it
/// with an undecoded value.
fn parse_property(
    cl: ContentLine,
    line_num: usize,
    mode: ParseMode,
) -> Result<Property, (ContentLine, ParseError)> {
    let value_type = determine_value_type(&cl);
    let tzid = cl.tzid().map(ToOwned::to_owned);

    match parse_value(&cl.raw_value, value_type, tzid.as_deref(), line_num, mode) {
        Ok(value) => Ok(Property {
            name: cl.name,
            params: cl.params,
            value,
            raw_value: cl.raw_value,
        }),
        Err(e) => Err((cl, e)),
    }
}

/// Determines the value type for a property.
fn determine_value_type(cl: &ContentLine) -> ValueType {
    // Explicit VALUE parameter wins
    if let Some(value_type) = cl.value_type() {
        return ValueType::from_param(value_type);
    }

    // Property-specific defaults
    match cl.name.as_str() {
        "DTSTART" | "DTEND" | "DTSTAMP" | "CREATED" | "LAST-MODIFIED" | "COMPLETED" | "DUE"
        | "RECURRENCE-ID" => ValueType::DateTime,

        "EXDATE" | "RDATE" => {
            // Heuristic when VALUE is absent: bare dates have no 'T'
            if cl.raw_value.contains('/') {
                ValueType::Period
            } else if !cl.raw_value.contains('T') && cl.raw_value.len() >= 8 {
                ValueType::Date
            } else {
                ValueType::DateTime
            }
        }

        "DURATION" | "TRIGGER" => {
            if cl.raw_value.starts_with(['P', '-', '+']) {
                ValueType::Duration
            } else {
                ValueType::DateTime
            }
        }

        "PERCENT-COMPLETE" | "PRIORITY" | "REPEAT" | "SEQUENCE" => ValueType::Integer,

        "RRULE" | "EXRULE" => ValueType::Recur,

        "TZOFFSETFROM" | "TZOFFSETTO" => ValueType::UtcOffset,

        "URL" | "TZURL" | "SOURCE" => ValueType::Uri,

        "FREEBUSY" => ValueType::Period,

        "ATTENDEE" | "ORGANIZER" => ValueType::CalAddress,

        "GEO" => ValueType::Geo,

        _ => ValueType::Text,
    }
}

/// Internal enum for value type handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueType {
    Binary,
    Boolean,
    CalAddress,
    Date,
    DateTime,
    Duration,
    Float,
    Geo,
    Integer,
    Period,
    Recur,
    Text,
    Time,
    Uri,
    UtcOffset,
    Unknown,
}

impl ValueType {
    fn from_param(s: &str) -> Self {
        match s.to_ascii_uppercase().as_str() {
            "BINARY" => Self::Binary,
            "BOOLEAN" => Self::Boolean,
            "CAL-ADDRESS" => Self::CalAddress,
            "DATE" => Self::Date,
            "DATE-TIME" => Self::DateTime,
            "DURATION" => Self::Duration,
            "FLOAT" => Self::Float,
            "INTEGER" => Self::Integer,
            "PERIOD" => Self::Period,
            "RECUR" => Self::Recur,
            "TEXT" => Self::Text,
            "TIME" => Self::Time,
            "URI" => Self::Uri,
            "UTC-OFFSET" => Self::UtcOffset,
            _ => Self::Unknown,
        }
    }
}

/// Parses a raw value string into a typed Value.
#[expect(clippy::too_many_lines)]
fn parse_value(
    raw: &str,
    value_type: ValueType,
    tzid: Option<&str>,
    line_num: usize,
    mode: ParseMode,
) -> ParseResult<Value> {
    match value_type {
        ValueType::Text => Ok(Value::Text(unescape_text(raw))),
        ValueType::DateTime => {
            // Comma-separated lists arrive via EXDATE/RDATE
            if raw.contains(',') {
                let dts: Vec<DateTime> = raw
                    .split(',')
                    .map(|s| parse_datetime(s.trim(), tzid, line_num, 1))
                    .collect::<ParseResult<_>>()?;
                Ok(Value::DateTimeList(dts))
            } else {
                Ok(Value::DateTime(parse_datetime(raw, tzid, line_num, 1)?))
            }
        }
        ValueType::Date => {
            if raw.contains(',') {
                let dates: Vec<Date> = raw
                    .split(',')
                    .map(|s| parse_date(s.trim(), line_num, 1))
                    .collect::<ParseResult<_>>()?;
                Ok(Value::DateList(dates))
            } else {
                Ok(Value::Date(parse_date(raw, line_num, 1)?))
            }
        }
        ValueType::Duration => Ok(Value::Duration(parse_duration(raw, line_num, 1)?)),
        ValueType::Period => {
            if raw.contains(',') {
                let periods: Vec<Period> = raw
                    .split(',')
                    .map(|s| parse_period(s.trim(), tzid, line_num, 1))
                    .collect::<ParseResult<_>>()?;
                Ok(Value::PeriodList(periods))
            } else {
                Ok(Value::Period(parse_period(raw, tzid, line_num, 1)?))
            }
        }
        ValueType::Integer => Ok(Value::Integer(parse_integer(raw, line_num, 1)?)),
        ValueType::Float => Ok(Value::Float(parse_float(raw, line_num, 1)?)),
        ValueType::Boolean => Ok(Value::Boolean(parse_boolean(raw, line_num, 1)?)),
        ValueType::Geo => Ok(Value::Geo(parse_geo(raw, line_num, 1)?)),
        ValueType::Recur => Ok(Value::Recur(Box::new(parse_rrule(
            raw,
            mode == ParseMode::Strict,
            line_num,
            1,
        )?))),
        ValueType::UtcOffset => Ok(Value::UtcOffset(parse_utc_offset(raw, line_num, 1)?)),
        ValueType::Uri | ValueType::CalAddress => Ok(Value::Uri(raw.to_string())),
        ValueType::Binary => {
            use base64::{Engine, engine::general_purpose::STANDARD};
            let decoded = STANDARD.decode(raw).map_err(|e| {
                ParseError::new(ParseErrorKind::InvalidValue, line_num, 1)
                    .with_context(format!("invalid Base64 encoding: {e}"))
            })?;
            Ok(Value::Binary(decoded))
        }
        ValueType::Time => Ok(Value::Time(parse_time(raw, line_num, 1)?)),
        ValueType::Unknown => Ok(Value::Unknown(raw.to_string())),
    }
}
