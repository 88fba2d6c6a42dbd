//! Text and parameter value escaping (RFC 5545 §3.3.11, RFC 6868).

use crate::ical::core::Parameter;

/// Escapes a TEXT value for serialization.
///
/// Escape sequences: `\\` `\;` `\,` `\n`. The inverse of
/// [`crate::ical::parse::unescape_text`].
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            ';' => result.push_str("\\;"),
            ',' => result.push_str("\\,"),
            '\n' => result.push_str("\\n"),
            '\r' => {}
            _ => result.push(c),
        }
    }
    result
}

/// Encodes a parameter value, applying RFC 6868 caret encoding and quoting
/// when required.
///
/// Caret encoding: `^` → `^^`, newline → `^n`, `"` → `^'`. The value is
/// double-quoted iff it contains `:`, `;`, `,`, or needed caret encoding,
/// which keeps already-plain values byte-identical.
#[must_use]
pub fn escape_param_value(s: &str) -> String {
    let mut encoded = String::with_capacity(s.len());
    let mut needs_quotes = false;

    for c in s.chars() {
        match c {
            '^' => {
                encoded.push_str("^^");
                needs_quotes = true;
            }
            '\n' => {
                encoded.push_str("^n");
                needs_quotes = true;
            }
            '"' => {
                encoded.push_str("^'");
                needs_quotes = true;
            }
            ':' | ';' | ',' => {
                encoded.push(c);
                needs_quotes = true;
            }
            '\r' => {}
            _ => encoded.push(c),
        }
    }

    if needs_quotes {
        format!("\"{encoded}\"")
    } else {
        encoded
    }
}

/// Formats a parameter as `NAME=value[,value...]` with each value encoded.
#[must_use]
pub fn format_parameter(param: &Parameter) -> String {
    let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
    format!("{}={}", param.name, values.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::parse::unescape_text;

    #[test]
    fn escape_text_special_chars() {
        assert_eq!(escape_text("a,b;c\\d"), "a\\,b\\;c\\\\d");
        assert_eq!(escape_text("line1\nline2"), "line1\\nline2");
    }

    #[test]
    fn escape_unescape_round_trip() {
        let original = "Meeting, room 3; notes:\nbring\\laptop";
        assert_eq!(unescape_text(&escape_text(original)), original);
    }

    #[test]
    fn param_value_plain_stays_bare() {
        assert_eq!(escape_param_value("America/New_York"), "America/New_York");
    }

    #[test]
    fn param_value_with_separators_is_quoted() {
        assert_eq!(escape_param_value("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(
            escape_param_value("ldap://host:6666"),
            "\"ldap://host:6666\""
        );
    }

    #[test]
    fn param_value_caret_encoding() {
        assert_eq!(escape_param_value("a\"b"), "\"a^'b\"");
        assert_eq!(escape_param_value("x^y"), "\"x^^y\"");
        assert_eq!(escape_param_value("l1\nl2"), "\"l1^nl2\"");
    }

    #[test]
    fn format_parameter_multi_value() {
        let param = Parameter::with_values("MEMBER", vec!["a@x.com".into(), "b@x.com".into()]);
        assert_eq!(format_parameter(&param), "MEMBER=a@x.com,b@x.com");
    }
}
