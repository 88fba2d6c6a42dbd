//! vCard document parser.
//!
//! Walks the logical lines of a document and assembles [`VCard`] values,
//! dispatching each property to a typed value by name or by an explicit
//! `VALUE=` parameter.

use crate::vcard::core::{VCard, VCardProperty, VCardValue, VCardVersion};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::lexer::{ContentLine, parse_content_line, split_lines};
use super::values::{
    parse_address, parse_gender, parse_organization, parse_structured_name, split_list,
    unescape_text,
};

/// Property names whose default value type is URI.
const URI_PROPERTIES: &[&str] = &[
    "URL", "PHOTO", "LOGO", "SOUND", "KEY", "FBURL", "CALADRURI", "CALURI", "SOURCE", "MEMBER",
    "IMPP", "GEO",
];

/// Parses a document containing one or more vCards.
///
/// ## Errors
///
/// Returns an error when a content line is malformed, a VERSION names an
/// unsupported version, or input ends inside an open card.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<Vec<VCard>> {
    let lines = split_lines(input);
    let mut parser = Parser { lines, pos: 0 };
    let mut cards = Vec::new();

    while !parser.at_end() {
        cards.push(parser.parse_card()?);
    }

    tracing::debug!(cards = cards.len(), "parsed vCard document");
    Ok(cards)
}

/// Parses a document expected to contain exactly one vCard.
///
/// ## Errors
///
/// Returns an error when the document is malformed or does not contain
/// exactly one card.
pub fn parse_single(input: &str) -> ParseResult<VCard> {
    let mut cards = parse(input)?;
    if cards.len() != 1 {
        return Err(ParseError::new(ParseErrorKind::InvalidValue, 1)
            .with_context(format!("expected 1 vCard, found {}", cards.len())));
    }
    Ok(cards.swap_remove(0))
}

struct Parser {
    lines: Vec<(usize, String)>,
    pos: usize,
}

impl Parser {
    fn at_end(&self) -> bool {
        self.pos >= self.lines.len()
    }

    fn next_line(&mut self) -> Option<(usize, &str)> {
        let (num, text) = self.lines.get(self.pos)?;
        self.pos += 1;
        Some((*num, text.as_str()))
    }

    fn parse_card(&mut self) -> ParseResult<VCard> {
        let (line_num, first) = self
            .next_line()
            .ok_or_else(|| ParseError::new(ParseErrorKind::UnexpectedEof, 0))?;
        if !first.eq_ignore_ascii_case("BEGIN:VCARD") {
            return Err(ParseError::new(ParseErrorKind::InvalidValue, line_num)
                .with_context(format!("expected BEGIN:VCARD, found {first:?}")));
        }

        let mut card = VCard::new();

        loop {
            let Some((line_num, text)) = self.next_line() else {
                return Err(ParseError::new(ParseErrorKind::UnexpectedEof, line_num)
                    .with_context("missing END:VCARD"));
            };

            if text.eq_ignore_ascii_case("END:VCARD") {
                return Ok(card);
            }

            let line = parse_content_line(text, line_num)?;
            if line.name == "VERSION" {
                card.version = VCardVersion::parse(&line.raw_value).ok_or_else(|| {
                    ParseError::new(ParseErrorKind::UnsupportedVersion, line_num)
                        .with_context(line.raw_value.clone())
                })?;
                continue;
            }

            card.add_property(build_property(line, line_num)?);
        }
    }
}

/// Turns a content line into a typed property.
fn build_property(line: ContentLine, line_num: usize) -> ParseResult<VCardProperty> {
    let ContentLine {
        group,
        name,
        params,
        raw_value,
    } = line;

    let value_override = params
        .iter()
        .find(|p| p.name == "VALUE")
        .and_then(|p| p.value())
        .map(str::to_ascii_lowercase);

    let value = match value_override.as_deref() {
        Some("text") => VCardValue::Text(unescape_text(&raw_value)),
        Some("uri") => VCardValue::Uri(raw_value.clone()),
        Some("boolean") => match raw_value.to_ascii_lowercase().as_str() {
            "true" => VCardValue::Boolean(true),
            "false" => VCardValue::Boolean(false),
            _ => {
                return Err(ParseError::new(ParseErrorKind::InvalidValue, line_num)
                    .with_context(format!("invalid boolean {raw_value:?}")));
            }
        },
        Some("integer") => {
            let n = raw_value.parse().map_err(|_e| {
                ParseError::new(ParseErrorKind::InvalidValue, line_num)
                    .with_context(format!("invalid integer {raw_value:?}"))
            })?;
            VCardValue::Integer(n)
        }
        Some("float") => {
            let f = raw_value.parse().map_err(|_e| {
                ParseError::new(ParseErrorKind::InvalidValue, line_num)
                    .with_context(format!("invalid float {raw_value:?}"))
            })?;
            VCardValue::Float(f)
        }
        Some("language-tag") => VCardValue::LanguageTag(raw_value.clone()),
        Some(_) => VCardValue::Unknown(raw_value.clone()),
        None => default_value(&name, &raw_value, line_num)?,
    };

    Ok(VCardProperty {
        group,
        name,
        params,
        value,
        raw_value,
    })
}

/// Chooses a value type from the property name when no `VALUE=` parameter
/// overrides it.
fn default_value(name: &str, raw_value: &str, line_num: usize) -> ParseResult<VCardValue> {
    let value = match name {
        "N" => VCardValue::StructuredName(parse_structured_name(raw_value)),
        "ADR" => VCardValue::Address(parse_address(raw_value)),
        "ORG" => VCardValue::Organization(parse_organization(raw_value)),
        "GENDER" => VCardValue::Gender(parse_gender(raw_value, line_num)?),
        "NICKNAME" | "CATEGORIES" => VCardValue::TextList(split_list(raw_value)),
        // BDAY, ANNIVERSARY, and REV carry date-and-or-time values the
        // codec does not model; they round-trip verbatim.
        "BDAY" | "ANNIVERSARY" | "REV" => VCardValue::Unknown(raw_value.to_string()),
        _ if URI_PROPERTIES.contains(&name) => VCardValue::Uri(raw_value.to_string()),
        _ => VCardValue::Text(unescape_text(raw_value)),
    };
    Ok(value)
}
