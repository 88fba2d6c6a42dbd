//! vCard properties (RFC 6350 §6).

use super::parameter::VCardParameter;
use super::value::VCardValue;

/// A vCard property.
///
/// The raw value string is kept alongside the parsed value so verbatim
/// value types serialize byte-identically.
#[derive(Debug, Clone, PartialEq)]
pub struct VCardProperty {
    /// Property group ("item1" in `item1.TEL`), if any.
    pub group: Option<String>,
    /// Property name (normalized to uppercase).
    pub name: String,
    /// Parameters in order of appearance.
    pub params: Vec<VCardParameter>,
    /// Parsed value.
    pub value: VCardValue,
    /// Raw value string as it appeared on the wire.
    pub raw_value: String,
}

impl VCardProperty {
    /// Creates a text property.
    #[must_use]
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        let raw = value.into();
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: VCardValue::Text(raw.clone()),
            raw_value: raw,
        }
    }

    /// Creates a grouped text property.
    #[must_use]
    pub fn grouped_text(
        group: impl Into<String>,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        let mut prop = Self::text(name, value);
        prop.group = Some(group.into());
        prop
    }

    /// Creates a URI property.
    #[must_use]
    pub fn uri(name: impl Into<String>, value: impl Into<String>) -> Self {
        let raw = value.into();
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value: VCardValue::Uri(raw.clone()),
            raw_value: raw,
        }
    }

    /// Creates a property with an explicit typed value.
    #[must_use]
    pub fn with_value(name: impl Into<String>, value: VCardValue, raw: impl Into<String>) -> Self {
        Self {
            group: None,
            name: name.into().to_ascii_uppercase(),
            params: Vec::new(),
            value,
            raw_value: raw.into(),
        }
    }

    /// Returns the parameter with the given name.
    #[must_use]
    pub fn get_param(&self, name: &str) -> Option<&VCardParameter> {
        self.params.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns the first value of a parameter.
    #[must_use]
    pub fn get_param_value(&self, name: &str) -> Option<&str> {
        self.get_param(name)?.value()
    }

    /// Returns whether this property carries the given TYPE value.
    #[must_use]
    pub fn has_type(&self, type_value: &str) -> bool {
        self.get_param("TYPE").is_some_and(|p| p.has_value(type_value))
    }

    /// Returns the PREF priority if present (1-100, lower is preferred).
    #[must_use]
    pub fn pref(&self) -> Option<u8> {
        self.get_param_value("PREF").and_then(|v| v.parse().ok())
    }

    /// Returns the value as text if it is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        self.value.as_text()
    }

    /// Adds a parameter.
    pub fn add_param(&mut self, param: VCardParameter) {
        self.params.push(param);
    }

    /// Adds a TYPE value, merging into an existing TYPE parameter.
    pub fn add_type(&mut self, type_value: impl Into<String>) {
        if let Some(param) = self.params.iter_mut().find(|p| p.name == "TYPE") {
            param.values.push(type_value.into());
        } else {
            self.params.push(VCardParameter::type_param(type_value));
        }
    }
}
