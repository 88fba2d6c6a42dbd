//! Structured vCard values: N, ADR, ORG, and GENDER (RFC 6350 §6).
//!
//! Structured values are `;`-delimited component lists; individual
//! components may themselves be `,`-delimited lists. All components are
//! optional per the RFC, so every type here has an "empty" state.

/// Structured name (`N` property, RFC 6350 §6.2.2).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructuredName {
    /// Family names (surnames).
    pub family: Vec<String>,
    /// Given names.
    pub given: Vec<String>,
    /// Additional (middle) names.
    pub additional: Vec<String>,
    /// Honorific prefixes ("Dr.", "Ms.").
    pub prefixes: Vec<String>,
    /// Honorific suffixes ("Jr.", "PhD").
    pub suffixes: Vec<String>,
}

impl StructuredName {
    /// Creates a name with one family and one given component.
    #[must_use]
    pub fn simple(family: impl Into<String>, given: impl Into<String>) -> Self {
        Self {
            family: vec![family.into()],
            given: vec![given.into()],
            ..Self::default()
        }
    }

    /// Returns whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.family.is_empty()
            && self.given.is_empty()
            && self.additional.is_empty()
            && self.prefixes.is_empty()
            && self.suffixes.is_empty()
    }

    /// Formats as "given family" for display.
    #[must_use]
    pub fn display_name(&self) -> String {
        let mut parts = Vec::new();
        if !self.given.is_empty() {
            parts.push(self.given.join(" "));
        }
        if !self.family.is_empty() {
            parts.push(self.family.join(" "));
        }
        parts.join(" ")
    }
}

/// Delivery address (`ADR` property, RFC 6350 §6.3.1).
///
/// Seven positional components: po box, extended, street, locality,
/// region, postal code, country.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    pub po_box: Vec<String>,
    pub extended: Vec<String>,
    pub street: Vec<String>,
    pub locality: Vec<String>,
    pub region: Vec<String>,
    pub postal_code: Vec<String>,
    pub country: Vec<String>,
}

impl Address {
    /// Returns whether every component is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.po_box.is_empty()
            && self.extended.is_empty()
            && self.street.is_empty()
            && self.locality.is_empty()
            && self.region.is_empty()
            && self.postal_code.is_empty()
            && self.country.is_empty()
    }

    /// Formats the address on one comma-separated line.
    #[must_use]
    pub fn one_line(&self) -> String {
        [
            &self.street,
            &self.locality,
            &self.region,
            &self.postal_code,
            &self.country,
        ]
        .iter()
        .flat_map(|component| component.iter())
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
    }
}

/// Organization (`ORG` property, RFC 6350 §6.6.4).
///
/// The first component is the organization name; the rest are units in
/// decreasing order of specificity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub units: Vec<String>,
}

impl Organization {
    /// Creates an organization with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: Vec::new(),
        }
    }
}

/// Gender (`GENDER` property, RFC 6350 §6.2.7).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Gender {
    /// Sex component, if given.
    pub sex: Option<Sex>,
    /// Free-form identity text, if given.
    pub identity: Option<String>,
}

/// Sex component of the GENDER property.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
    Other,
    None,
    Unknown,
}

impl Sex {
    /// Parses the single-letter code, case-insensitively.
    #[must_use]
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'M' => Some(Self::Male),
            'F' => Some(Self::Female),
            'O' => Some(Self::Other),
            'N' => Some(Self::None),
            'U' => Some(Self::Unknown),
            _ => Option::None,
        }
    }

    /// Returns the single-letter code.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Male => 'M',
            Self::Female => 'F',
            Self::Other => 'O',
            Self::None => 'N',
            Self::Unknown => 'U',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_name_display() {
        let name = StructuredName::simple("Curie", "Marie");
        assert_eq!(name.display_name(), "Marie Curie");
        assert!(!name.is_empty());
        assert!(StructuredName::default().is_empty());
    }

    #[test]
    fn address_one_line() {
        let addr = Address {
            street: vec!["123 Main St".into()],
            locality: vec!["Anytown".into()],
            region: vec!["CA".into()],
            postal_code: vec!["12345".into()],
            country: vec!["USA".into()],
            ..Address::default()
        };
        assert_eq!(addr.one_line(), "123 Main St, Anytown, CA, 12345, USA");
    }

    #[test]
    fn sex_codes() {
        assert_eq!(Sex::from_char('m'), Some(Sex::Male));
        assert_eq!(Sex::from_char('F'), Some(Sex::Female));
        assert_eq!(Sex::from_char('x'), None);
        assert_eq!(Sex::Other.as_char(), 'O');
    }
}
