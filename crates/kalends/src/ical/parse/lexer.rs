//! Content line lexer for iCalendar (RFC 5545 §3.1).
//!
//! Handles line unfolding and tokenization of content lines.

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::ical::core::{ContentLine, Parameter};

/// Unfolds content lines by removing line breaks followed by whitespace.
///
/// Per RFC 5545 §3.1:
/// - Lines are folded by inserting CRLF followed by whitespace (SPACE or HTAB)
/// - Unfolding removes the CRLF and the single whitespace character
/// - A fold may land between the octets of a UTF-8 sequence on the wire, but
///   any `&str` input is already whole characters, so unfolding at char level
///   is safe here
///
/// Bare LF is accepted and normalized to CRLF for lenient inputs.
#[must_use]
pub fn unfold(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\r' && chars.peek() == Some(&'\n') {
            chars.next();
            if matches!(chars.peek(), Some(' ' | '\t')) {
                chars.next();
            } else {
                result.push_str("\r\n");
            }
        } else if c == '\n' {
            if matches!(chars.peek(), Some(' ' | '\t')) {
                chars.next();
            } else {
                result.push_str("\r\n");
            }
        } else {
            result.push(c);
        }
    }

    result
}

/// Splits input into logical content lines, merging folded continuations.
///
/// Handles both CRLF and bare LF line endings. Lines starting with SP/HTAB
/// are continuations of the previous line; exactly one whitespace octet is
/// stripped (no space is inserted). Returns each logical line with the
/// physical line number where it started (1-based). Empty lines are skipped.
#[must_use]
pub fn split_lines(input: &str) -> Vec<(usize, String)> {
    let mut lines: Vec<(usize, String)> = Vec::new();

    for (i, raw_line) in input.lines().enumerate() {
        let line = raw_line.strip_suffix('\r').unwrap_or(raw_line);
        if line.is_empty() {
            continue;
        }

        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some((_, prev)) = lines.last_mut() {
                prev.push_str(continuation);
            } else {
                // Continuation with nothing to continue: keep it as its own
                // line so the grammar stage reports the real problem.
                lines.push((i + 1, continuation.to_string()));
            }
        } else {
            lines.push((i + 1, line.to_string()));
        }
    }

    lines
}

/// Parses a single content line.
///
/// Format: `name *(";" param) ":" value`
///
/// The name and parameter names are normalized to uppercase; parameter values
/// are caret-decoded (RFC 6868); the value is kept raw.
///
/// ## Errors
/// Returns an error if the line is malformed or contains invalid characters.
pub fn parse_content_line(line: &str, line_num: usize) -> ParseResult<ContentLine> {
    let mut chars = line.char_indices().peekable();
    let mut name_end = 0;
    let mut value_start = None;

    // Property name ends at ';' or ':'
    while let Some(&(i, c)) = chars.peek() {
        if c == ';' || c == ':' {
            name_end = i;
            if c == ':' {
                value_start = Some(i + 1);
            }
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidPropertyName,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    if name_end == 0 {
        return Err(ParseError::new(
            ParseErrorKind::MissingPropertyName,
            line_num,
            1,
        ));
    }

    let name = line[..name_end].to_ascii_uppercase();

    // Parameters, if we stopped at ';'
    let mut params = Vec::new();
    while value_start.is_none() {
        let (param, after_colon) = parse_parameter(&mut chars, line, line_num)?;
        params.push(param);
        value_start = after_colon;
    }

    let value_start = value_start
        .ok_or_else(|| ParseError::new(ParseErrorKind::MissingColon, line_num, line.len()))?;

    Ok(ContentLine {
        name,
        params,
        raw_value: line[value_start..].to_string(),
    })
}

/// Parses a single parameter from the character stream.
///
/// Returns the parameter and, when the terminating character was ':', the
/// index where the property value starts.
fn parse_parameter(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<(Parameter, Option<usize>)> {
    let start = chars.peek().map_or(line.len(), |&(i, _)| i);

    // Parameter name, up to '='
    let mut name_end = start;
    while let Some(&(i, c)) = chars.peek() {
        if c == '=' {
            name_end = i;
            chars.next();
            break;
        }
        if !c.is_ascii_alphanumeric() && c != '-' {
            return Err(ParseError::new(
                ParseErrorKind::InvalidParameter,
                line_num,
                i + 1,
            ));
        }
        chars.next();
    }

    if name_end == start {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            start + 1,
        ));
    }

    let param_name = line[start..name_end].to_ascii_uppercase();

    // Comma-separated, possibly quoted values
    let mut values = Vec::new();
    loop {
        let value = parse_param_value(chars, line, line_num)?;
        values.push(value);

        match chars.next() {
            Some((_, ',')) => {}
            Some((_, ';')) => {
                return Ok((Parameter::with_values(param_name, values), None));
            }
            Some((i, ':')) => {
                return Ok((Parameter::with_values(param_name, values), Some(i + 1)));
            }
            Some((i, c)) => {
                return Err(
                    ParseError::new(ParseErrorKind::InvalidParameter, line_num, i + 1)
                        .with_context(format!("unexpected character '{c}'")),
                );
            }
            None => {
                return Err(ParseError::new(
                    ParseErrorKind::MissingColon,
                    line_num,
                    line.len(),
                ));
            }
        }
    }
}

/// Parses a parameter value (possibly quoted), applying RFC 6868 caret
/// decoding (`^^` → `^`, `^n` → newline, `^'` → `"`).
fn parse_param_value(
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
    line: &str,
    line_num: usize,
) -> ParseResult<String> {
    let Some(&(start, first)) = chars.peek() else {
        return Err(ParseError::new(
            ParseErrorKind::InvalidParameter,
            line_num,
            line.len(),
        ));
    };

    let mut value = String::new();

    if first == '"' {
        chars.next();
        let mut closed = false;

        while let Some((_, c)) = chars.next() {
            if c == '"' {
                closed = true;
                break;
            }
            if c == '^' {
                push_caret_decoded(&mut value, chars);
            } else {
                value.push(c);
            }
        }

        if !closed {
            return Err(ParseError::new(
                ParseErrorKind::UnclosedQuote,
                line_num,
                start + 1,
            ));
        }
    } else {
        // Unquoted value ends at ',' ';' or ':'
        while let Some(&(_, c)) = chars.peek() {
            if c == ',' || c == ';' || c == ':' {
                break;
            }
            chars.next();
            if c == '^' {
                push_caret_decoded(&mut value, chars);
            } else {
                value.push(c);
            }
        }
    }

    Ok(value)
}

/// Decodes the character after a '^'. Invalid escapes keep the caret as-is.
fn push_caret_decoded(
    value: &mut String,
    chars: &mut std::iter::Peekable<std::str::CharIndices<'_>>,
) {
    match chars.peek() {
        Some(&(_, '^')) => {
            value.push('^');
            chars.next();
        }
        Some(&(_, 'n')) => {
            value.push('\n');
            chars.next();
        }
        Some(&(_, '\'')) => {
            value.push('"');
            chars.next();
        }
        _ => value.push('^'),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfold_simple() {
        let input = "DESCRIPTION:This is a long description\r\n that continues here";
        assert_eq!(
            unfold(input),
            "DESCRIPTION:This is a long descriptionthat continues here"
        );
    }

    #[test]
    fn unfold_multiple() {
        let input = "DESCRIPTION:First\r\n Second\r\n Third";
        assert_eq!(unfold(input), "DESCRIPTION:FirstSecondThird");
    }

    #[test]
    fn unfold_bare_lf() {
        let input = "DESCRIPTION:First\n Second";
        assert_eq!(unfold(input), "DESCRIPTION:FirstSecond");
    }

    #[test]
    fn unfold_preserves_newlines() {
        let input = "LINE1:Value1\r\nLINE2:Value2\r\n";
        assert_eq!(unfold(input), "LINE1:Value1\r\nLINE2:Value2\r\n");
    }

    #[test]
    fn unfold_multibyte_at_boundary() {
        let input = "SUMMARY:caf\r\n é au lait";
        assert_eq!(unfold(input), "SUMMARY:café au lait");
    }

    #[test]
    fn split_lines_continuation_strips_one_octet() {
        let input = "SUMMARY:one\r\n  two\r\n";
        let lines = split_lines(input);
        assert_eq!(lines.len(), 1);
        // Two spaces folded: one is the fold marker, one is content.
        assert_eq!(lines[0].1, "SUMMARY:one two");
    }

    #[test]
    fn split_lines_tracks_line_numbers() {
        let input = "A:1\r\nB:2\r\n cont\r\nC:3\r\n";
        let lines = split_lines(input);
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].0, 1);
        assert_eq!(lines[1], (2, "B:2cont".to_string()));
        assert_eq!(lines[2].0, 4);
    }

    #[test]
    fn parse_simple_line() {
        let result = parse_content_line("SUMMARY:Team Meeting", 1).unwrap();
        assert_eq!(result.name, "SUMMARY");
        assert!(result.params.is_empty());
        assert_eq!(result.raw_value, "Team Meeting");
    }

    #[test]
    fn parse_line_with_params() {
        let line = "DTSTART;TZID=America/New_York:20260123T120000";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.name, "DTSTART");
        assert_eq!(result.params.len(), 1);
        assert_eq!(result.params[0].name, "TZID");
        assert_eq!(result.params[0].value(), Some("America/New_York"));
        assert_eq!(result.raw_value, "20260123T120000");
    }

    #[test]
    fn parse_line_with_quoted_param() {
        let line = "ATTENDEE;CN=\"Doe, Jane\":mailto:jane@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.params[0].value(), Some("Doe, Jane"));
        assert_eq!(result.raw_value, "mailto:jane@example.com");
    }

    #[test]
    fn parse_line_with_multiple_param_values() {
        let line = "ATTENDEE;ROLE=REQ-PARTICIPANT,OPT-PARTICIPANT:mailto:test@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.params[0].values.len(), 2);
        assert_eq!(result.params[0].values[0], "REQ-PARTICIPANT");
        assert_eq!(result.params[0].values[1], "OPT-PARTICIPANT");
    }

    #[test]
    fn parse_line_with_caret_encoding() {
        let line = "ATTENDEE;CN=\"Test^nName^^x^'q^'\":mailto:test@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.params[0].value(), Some("Test\nName^x\"q\""));
    }

    #[test]
    fn parse_line_caret_in_unquoted_param() {
        let line = "X-PROP;X-NOTE=a^nb:v";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.params[0].value(), Some("a\nb"));
    }

    #[test]
    fn parse_line_unclosed_quote() {
        let line = "ATTENDEE;CN=\"Unclosed:mailto:test@example.com";
        let err = parse_content_line(line, 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::UnclosedQuote);
    }

    #[test]
    fn parse_line_missing_colon() {
        let err = parse_content_line("INVALID", 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingPropertyName);

        let err = parse_content_line("NAME;PARAM=X", 1).unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::MissingColon);
    }

    #[test]
    fn parse_line_empty_value_after_params() {
        let result = parse_content_line("DTSTART;TZID=X:", 1).unwrap();
        assert_eq!(result.raw_value, "");
    }

    #[test]
    fn parse_line_colon_in_quoted_param() {
        let line = "ATTENDEE;DIR=\"ldap://host:6666/o=x\":mailto:a@example.com";
        let result = parse_content_line(line, 1).unwrap();
        assert_eq!(result.params[0].value(), Some("ldap://host:6666/o=x"));
        assert_eq!(result.raw_value, "mailto:a@example.com");
    }
}
