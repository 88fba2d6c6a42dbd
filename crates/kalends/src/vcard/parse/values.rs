//! vCard value parsers: text escaping and structured value splitting.

use crate::vcard::core::{Address, Gender, Organization, Sex, StructuredName};

use super::error::{ParseError, ParseErrorKind, ParseResult};

/// Unescapes a vCard text value.
///
/// Escape sequences: `\n`/`\N` (newline), `\,`, `\;`, `\\`.
#[must_use]
pub fn unescape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            result.push(c);
            continue;
        }
        match chars.next() {
            Some('n' | 'N') => result.push('\n'),
            Some(escaped @ (',' | ';' | '\\')) => result.push(escaped),
            Some(other) => {
                result.push('\\');
                result.push(other);
            }
            None => result.push('\\'),
        }
    }

    result
}

/// Splits a structured value on unescaped semicolons. Escapes are kept
/// intact; components are unescaped later, per component.
#[must_use]
pub fn split_structured(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut escaped = false;

    for (i, c) in s.char_indices() {
        if escaped {
            escaped = false;
        } else if c == '\\' {
            escaped = true;
        } else if c == ';' {
            parts.push(&s[start..i]);
            start = i + 1;
        }
    }

    parts.push(&s[start..]);
    parts
}

/// Splits a component on unescaped commas, unescaping each element.
/// An empty input yields an empty list, not one empty element.
#[must_use]
pub fn split_list(s: &str) -> Vec<String> {
    if s.is_empty() {
        return Vec::new();
    }

    let mut parts = Vec::new();
    let mut current = String::new();
    let mut chars = s.chars();

    while let Some(c) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some('n' | 'N') => current.push('\n'),
                Some(escaped @ (',' | ';' | '\\')) => current.push(escaped),
                Some(other) => {
                    current.push('\\');
                    current.push(other);
                }
                None => current.push('\\'),
            },
            ',' => parts.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    parts.push(current);
    parts
}

/// Parses an `N` value: `family;given;additional;prefixes;suffixes`.
#[must_use]
pub fn parse_structured_name(value: &str) -> StructuredName {
    let parts = split_structured(value);
    let component = |idx: usize| parts.get(idx).map(|s| split_list(s)).unwrap_or_default();

    StructuredName {
        family: component(0),
        given: component(1),
        additional: component(2),
        prefixes: component(3),
        suffixes: component(4),
    }
}

/// Parses an `ADR` value:
/// `pobox;extended;street;locality;region;postal;country`.
#[must_use]
pub fn parse_address(value: &str) -> Address {
    let parts = split_structured(value);
    let component = |idx: usize| parts.get(idx).map(|s| split_list(s)).unwrap_or_default();

    Address {
        po_box: component(0),
        extended: component(1),
        street: component(2),
        locality: component(3),
        region: component(4),
        postal_code: component(5),
        country: component(6),
    }
}

/// Parses an `ORG` value: name, then units.
#[must_use]
pub fn parse_organization(value: &str) -> Organization {
    let parts = split_structured(value);
    Organization {
        name: parts.first().map(|s| unescape_text(s)).unwrap_or_default(),
        units: parts.iter().skip(1).map(|s| unescape_text(s)).collect(),
    }
}

/// Parses a `GENDER` value: `[sex][;identity]`.
///
/// ## Errors
///
/// Returns an error when the sex component is present but not one of the
/// five single-letter codes.
pub fn parse_gender(value: &str, line_num: usize) -> ParseResult<Gender> {
    let parts = split_structured(value);

    let sex = match parts.first().copied().filter(|s| !s.is_empty()) {
        Some(s) => {
            let mut chars = s.chars();
            let code = chars.next().and_then(Sex::from_char);
            if code.is_none() || chars.next().is_some() {
                return Err(ParseError::new(ParseErrorKind::InvalidValue, line_num)
                    .with_context(format!("invalid sex component {s:?}")));
            }
            code
        }
        None => None,
    };

    let identity = parts
        .get(1)
        .filter(|s| !s.is_empty())
        .map(|s| unescape_text(s));

    Ok(Gender { sex, identity })
}
