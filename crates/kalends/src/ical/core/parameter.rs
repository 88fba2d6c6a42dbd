//! iCalendar property parameters (RFC 5545 §3.2).

/// A property parameter.
///
/// Parameters can carry multiple values (e.g. `MEMBER` or a multi-valued
/// `TYPE`); value order is significant and preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    /// Parameter name (normalized to uppercase).
    pub name: String,
    /// Parameter values, in order of appearance.
    pub values: Vec<String>,
}

impl Parameter {
    /// Creates a parameter with a single value.
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values: vec![value.into()],
        }
    }

    /// Creates a parameter with multiple values.
    #[must_use]
    pub fn with_values(name: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            name: name.into().to_ascii_uppercase(),
            values,
        }
    }

    /// Returns the first value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.values.first().map(String::as_str)
    }

    /// Returns whether the parameter carries the given value (case-insensitive).
    #[must_use]
    pub fn has_value(&self, value: &str) -> bool {
        self.values.iter().any(|v| v.eq_ignore_ascii_case(value))
    }

    /// Creates a `TZID` parameter.
    #[must_use]
    pub fn tzid(value: impl Into<String>) -> Self {
        Self::new("TZID", value)
    }

    /// Creates a `VALUE` parameter declaring the value type.
    #[must_use]
    pub fn value_type(type_name: impl Into<String>) -> Self {
        Self::new("VALUE", type_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parameter_normalizes_name() {
        let param = Parameter::new("tzid", "Europe/Berlin");
        assert_eq!(param.name, "TZID");
        assert_eq!(param.value(), Some("Europe/Berlin"));
    }

    #[test]
    fn parameter_has_value_case_insensitive() {
        let param = Parameter::with_values("TYPE", vec!["WORK".into(), "HOME".into()]);
        assert!(param.has_value("work"));
        assert!(!param.has_value("CELL"));
    }
}
