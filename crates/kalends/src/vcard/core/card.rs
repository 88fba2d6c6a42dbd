//! The vCard wrapper type and version tag.

use super::property::VCardProperty;
use super::structured::{Address, Organization, StructuredName};
use super::value::VCardValue;

/// vCard version. Version is a serialization-time concern: both versions
/// share one grammar, but 3.0 differs in parameter syntax and legal
/// properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VCardVersion {
    /// vCard 3.0 (RFC 2426).
    V3,
    /// vCard 4.0 (RFC 6350).
    #[default]
    V4,
}

impl VCardVersion {
    /// Parses a VERSION property value.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "3.0" => Some(Self::V3),
            "4.0" => Some(Self::V4),
            _ => None,
        }
    }

    /// Returns the VERSION property value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::V3 => "3.0",
            Self::V4 => "4.0",
        }
    }
}

impl std::str::FromStr for VCardVersion {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or(())
    }
}

/// A complete contact card.
#[derive(Debug, Clone, PartialEq)]
pub struct VCard {
    /// Card version.
    pub version: VCardVersion,
    /// Properties in order of appearance. Insertion order is preserved
    /// for round-trip fidelity.
    pub properties: Vec<VCardProperty>,
}

impl VCard {
    /// Creates an empty vCard 4.0.
    #[must_use]
    pub fn new() -> Self {
        Self::with_version(VCardVersion::V4)
    }

    /// Creates an empty vCard with the given version.
    #[must_use]
    pub const fn with_version(version: VCardVersion) -> Self {
        Self {
            version,
            properties: Vec::new(),
        }
    }

    /// Appends a property.
    pub fn add_property(&mut self, prop: VCardProperty) {
        self.properties.push(prop);
    }

    /// Returns the first property with the given name.
    #[must_use]
    pub fn get_property(&self, name: &str) -> Option<&VCardProperty> {
        self.properties
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns all properties with the given name, in order.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> Vec<&VCardProperty> {
        self.properties
            .iter()
            .filter(|p| p.name.eq_ignore_ascii_case(name))
            .collect()
    }

    /// Returns the FN (formatted name) value.
    #[must_use]
    pub fn formatted_name(&self) -> Option<&str> {
        self.get_property("FN")?.as_text()
    }

    /// Returns the N (structured name) value.
    #[must_use]
    pub fn name(&self) -> Option<&StructuredName> {
        self.get_property("N")?.value.as_structured_name()
    }

    /// Returns the UID value.
    #[must_use]
    pub fn uid(&self) -> Option<&str> {
        self.get_property("UID")?.as_text()
    }

    /// Returns all EMAIL values.
    #[must_use]
    pub fn emails(&self) -> Vec<&str> {
        self.get_properties("EMAIL")
            .iter()
            .filter_map(|p| p.as_text())
            .collect()
    }

    /// Returns all TEL values, whether text or tel: URI form.
    #[must_use]
    pub fn telephones(&self) -> Vec<&str> {
        self.get_properties("TEL")
            .iter()
            .filter_map(|p| match &p.value {
                VCardValue::Text(s) | VCardValue::Uri(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Returns all ADR values.
    #[must_use]
    pub fn addresses(&self) -> Vec<&Address> {
        self.get_properties("ADR")
            .iter()
            .filter_map(|p| p.value.as_address())
            .collect()
    }

    /// Returns the ORG value.
    #[must_use]
    pub fn organization(&self) -> Option<&Organization> {
        self.get_property("ORG")?.value.as_organization()
    }

    /// Returns all CATEGORIES values, flattened across properties.
    #[must_use]
    pub fn categories(&self) -> Vec<&str> {
        self.get_properties("CATEGORIES")
            .iter()
            .filter_map(|p| p.value.as_text_list())
            .flat_map(|list| list.iter().map(String::as_str))
            .collect()
    }

    /// Returns the NOTE value.
    #[must_use]
    pub fn note(&self) -> Option<&str> {
        self.get_property("NOTE")?.as_text()
    }
}

impl Default for VCard {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_parse() {
        assert_eq!(VCardVersion::parse("3.0"), Some(VCardVersion::V3));
        assert_eq!(VCardVersion::parse("4.0"), Some(VCardVersion::V4));
        assert_eq!(VCardVersion::parse("2.1"), None);
    }

    #[test]
    fn accessors() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::text("FN", "Grace Hopper"));
        card.add_property(VCardProperty::text("EMAIL", "grace@example.com"));
        card.add_property(VCardProperty::text("EMAIL", "hopper@example.org"));

        assert_eq!(card.formatted_name(), Some("Grace Hopper"));
        assert_eq!(card.emails().len(), 2);
        assert!(card.name().is_none());
    }

    #[test]
    fn categories_flatten() {
        let mut card = VCard::new();
        card.add_property(VCardProperty::with_value(
            "CATEGORIES",
            VCardValue::TextList(vec!["friend".into(), "vip".into()]),
            "friend,vip",
        ));
        assert_eq!(card.categories(), vec!["friend", "vip"]);
    }
}
