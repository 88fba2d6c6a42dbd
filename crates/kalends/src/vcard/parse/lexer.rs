//! vCard line transport and content-line grammar.
//!
//! vCard folding follows the same rules as iCalendar: a CRLF (or bare LF)
//! followed by one space or tab continues the previous logical line. The
//! content-line grammar adds one twist over iCalendar, an optional group
//! prefix (`item1.TEL`).

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::vcard::core::VCardParameter;

/// Unfolds a document by removing line continuations.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                } else {
                    result.push('\n');
                }
            }
            '\n' => {
                if matches!(chars.peek(), Some(' ' | '\t')) {
                    chars.next();
                } else {
                    result.push('\n');
                }
            }
            _ => result.push(c),
        }
    }

    result
}

/// Splits input into logical lines tagged with their physical line number.
///
/// Continuation lines are merged into their predecessor; empty lines are
/// skipped.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (idx, raw) in input.split('\n').enumerate() {
        let physical = raw.strip_suffix('\r').unwrap_or(raw);
        if physical.is_empty() {
            continue;
        }

        if let Some(rest) = physical
            .strip_prefix(' ')
            .or_else(|| physical.strip_prefix('\t'))
            && let Some((_, prev)) = lines.last_mut()
        {
            prev.push_str(rest);
            continue;
        }

        lines.push((idx + 1, physical.to_string()));
    }

    lines
}

/// One logical line split into its grammar parts, value uninterpreted.
#[derive(Debug, Clone)]
pub struct ContentLine {
    /// Optional group prefix.
    pub group: Option<String>,
    /// Property name (uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Raw value string.
    pub raw_value: String,
}

/// Parses one logical line: `[group.]NAME[;PARAM=value]*:value`.
///
/// ## Errors
///
/// Returns an error when the colon separator is missing, the property
/// name is malformed, or a parameter is malformed.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let colon = find_unquoted_colon(line)
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line_num))?;
    let (head, value) = line.split_at(colon);
    let raw_value = value[1..].to_string();

    let (group, head) = split_group(head);
    let (name, params_str) = match head.find(';') {
        Some(semi) => (&head[..semi], Some(&head[semi + 1..])),
        None => (head, None),
    };

    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(ParseError::new(ParseErrorKind::InvalidPropertyName, line_num)
            .with_context(format!("{name:?}")));
    }

    let params = match params_str {
        Some(s) => parse_parameters(s, line_num)?,
        None => Vec::new(),
    };

    Ok(ContentLine {
        group: group.map(str::to_owned),
        name: name.to_ascii_uppercase(),
        params,
        raw_value,
    })
}

/// Finds the first colon outside double quotes.
fn find_unquoted_colon(line: &str) -> Option<usize> {
    let mut in_quotes = false;
    for (i, c) in line.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ':' if !in_quotes => return Some(i),
            _ => {}
        }
    }
    None
}

/// Splits an optional group prefix off the name-and-parameters part.
///
/// The dot must come before any parameter, and the group itself must be
/// alphanumeric-or-hyphen; otherwise the dot belongs to something else.
fn split_group(head: &str) -> (Option<&str>, &str) {
    let Some(dot) = head.find('.') else {
        return (None, head);
    };
    if head[..dot].find(';').is_some() {
        return (None, head);
    }
    let group = &head[..dot];
    if group.is_empty() || !group.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return (None, head);
    }
    (Some(group), &head[dot + 1..])
}

fn parse_parameters(s: &str, line_num: usize) -> ParseResult<Vec<VCardParameter>> {
    let mut params = Vec::new();
    let mut rest = s;

    while !rest.is_empty() {
        let eq = rest.find('=').ok_or_else(|| {
            ParseError::new(ParseErrorKind::InvalidParameter, line_num)
                .with_context("missing '='")
        })?;
        let name = &rest[..eq];
        if name.is_empty() {
            return Err(ParseError::new(ParseErrorKind::InvalidParameter, line_num)
                .with_context("empty parameter name"));
        }

        let (values, remaining) = parse_param_values(&rest[eq + 1..]);
        params.push(VCardParameter::with_values(name, values));
        rest = remaining;
    }

    Ok(params)
}

/// Consumes comma-separated parameter values up to the next `;`, handling
/// double quotes and RFC 6868 caret decoding. Returns the values and the
/// unconsumed remainder (after a `;`, or empty at end of parameters).
fn parse_param_values(s: &str) -> (Vec<String>, &str) {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = s.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => values.push(std::mem::take(&mut current)),
            ';' if !in_quotes => {
                values.push(current);
                return (values, &s[i + 1..]);
            }
            '^' => match chars.peek().map(|&(_, next)| next) {
                Some('n') => {
                    chars.next();
                    current.push('\n');
                }
                Some('\'') => {
                    chars.next();
                    current.push('"');
                }
                Some('^') => {
                    chars.next();
                    current.push('^');
                }
                _ => current.push('^'),
            },
            _ => current.push(c),
        }
    }

    values.push(current);
    (values, "")
}
