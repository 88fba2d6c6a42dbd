//! vCard property values (RFC 6350 §4).

use super::structured::{Address, Gender, Organization, StructuredName};

/// A typed vCard property value.
///
/// Values the codec does not interpret (extension types, calendar dates on
/// BDAY-style properties) are carried verbatim so serialization reproduces
/// the original text.
#[derive(Debug, Clone, PartialEq)]
pub enum VCardValue {
    /// Escaped text (RFC 6350 §4.1).
    Text(String),
    /// Comma-separated text list (NICKNAME, CATEGORIES).
    TextList(Vec<String>),
    /// URI, stored verbatim (RFC 6350 §4.2).
    Uri(String),
    /// Structured name (N).
    StructuredName(StructuredName),
    /// Delivery address (ADR).
    Address(Address),
    /// Organization (ORG).
    Organization(Organization),
    /// Gender (GENDER).
    Gender(Gender),
    /// Boolean (RFC 6350 §4.4).
    Boolean(bool),
    /// Integer (RFC 6350 §4.5).
    Integer(i64),
    /// Float (RFC 6350 §4.6).
    Float(f64),
    /// Language tag, stored verbatim (RFC 6350 §4.8).
    LanguageTag(String),
    /// Unrecognized value, stored verbatim.
    Unknown(String),
}

impl VCardValue {
    /// Returns the value as text if applicable.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) | Self::Unknown(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a URI if applicable.
    #[must_use]
    pub fn as_uri(&self) -> Option<&str> {
        match self {
            Self::Uri(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the value as a structured name if applicable.
    #[must_use]
    pub fn as_structured_name(&self) -> Option<&StructuredName> {
        match self {
            Self::StructuredName(n) => Some(n),
            _ => None,
        }
    }

    /// Returns the value as an address if applicable.
    #[must_use]
    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(a) => Some(a),
            _ => None,
        }
    }

    /// Returns the value as an organization if applicable.
    #[must_use]
    pub fn as_organization(&self) -> Option<&Organization> {
        match self {
            Self::Organization(o) => Some(o),
            _ => None,
        }
    }

    /// Returns the value as a text list if applicable.
    #[must_use]
    pub fn as_text_list(&self) -> Option<&[String]> {
        match self {
            Self::TextList(list) => Some(list),
            _ => None,
        }
    }
}

impl From<&str> for VCardValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for VCardValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<StructuredName> for VCardValue {
    fn from(n: StructuredName) -> Self {
        Self::StructuredName(n)
    }
}

impl From<Address> for VCardValue {
    fn from(a: Address) -> Self {
        Self::Address(a)
    }
}

impl From<Organization> for VCardValue {
    fn from(o: Organization) -> Self {
        Self::Organization(o)
    }
}

impl From<Gender> for VCardValue {
    fn from(g: Gender) -> Self {
        Self::Gender(g)
    }
}
