//! vCard serialization.
//!
//! Properties serialize in insertion order so a parsed card round-trips
//! without reordering. The card's version drives two differences: 3.0
//! emits one `TYPE=` parameter per value and cannot carry 4.0-only
//! properties, 4.0 groups `TYPE=a,b`.

use crate::ical::build::{escape_param_value, escape_text, fold_line};
use crate::vcard::core::{
    Gender, VCard, VCardParameter, VCardProperty, VCardValue, VCardVersion,
};

/// Properties defined in RFC 6350 with no vCard 3.0 counterpart. They are
/// dropped, with a warning, when serializing as 3.0.
const V4_ONLY_PROPERTIES: &[&str] = &[
    "KIND",
    "GENDER",
    "ANNIVERSARY",
    "LANG",
    "MEMBER",
    "RELATED",
    "CLIENTPIDMAP",
    "XML",
];

/// Serializes a sequence of cards into one document.
#[must_use]
pub fn serialize(cards: &[VCard]) -> String {
    cards.iter().map(serialize_single).collect()
}

/// Serializes one card, CRLF line endings, folded at 75 octets.
#[must_use]
pub fn serialize_single(card: &VCard) -> String {
    let mut output = String::new();
    output.push_str("BEGIN:VCARD\r\n");
    output.push_str("VERSION:");
    output.push_str(card.version.as_str());
    output.push_str("\r\n");

    for prop in &card.properties {
        if card.version == VCardVersion::V3 && V4_ONLY_PROPERTIES.contains(&prop.name.as_str()) {
            tracing::warn!(property = %prop.name, "property has no vCard 3.0 form, dropping");
            continue;
        }
        output.push_str(&fold_line(&serialize_property(prop, card.version)));
        output.push_str("\r\n");
    }

    output.push_str("END:VCARD\r\n");
    output
}

/// Serializes one property as an unfolded content line.
#[must_use]
pub fn serialize_property(prop: &VCardProperty, version: VCardVersion) -> String {
    let mut line = String::new();
    if let Some(group) = &prop.group {
        line.push_str(group);
        line.push('.');
    }
    line.push_str(&prop.name);

    for param in &prop.params {
        if version == VCardVersion::V3 && param.name == "TYPE" {
            // 3.0 predates multi-valued TYPE; repeat the parameter.
            for value in &param.values {
                line.push(';');
                line.push_str("TYPE=");
                line.push_str(&escape_param_value(value));
            }
        } else {
            line.push(';');
            line.push_str(&format_parameter(param));
        }
    }

    line.push(':');
    line.push_str(&serialize_value(&prop.value));
    line
}

fn format_parameter(param: &VCardParameter) -> String {
    let values: Vec<String> = param.values.iter().map(|v| escape_param_value(v)).collect();
    format!("{}={}", param.name, values.join(","))
}

fn serialize_value(value: &VCardValue) -> String {
    match value {
        VCardValue::Text(s) => escape_text(s),
        VCardValue::TextList(list) => join_components(list),
        VCardValue::Uri(s) | VCardValue::LanguageTag(s) | VCardValue::Unknown(s) => s.clone(),
        VCardValue::StructuredName(n) => [
            &n.family,
            &n.given,
            &n.additional,
            &n.prefixes,
            &n.suffixes,
        ]
        .iter()
        .map(|part| join_components(part))
        .collect::<Vec<_>>()
        .join(";"),
        VCardValue::Address(a) => [
            &a.po_box,
            &a.extended,
            &a.street,
            &a.locality,
            &a.region,
            &a.postal_code,
            &a.country,
        ]
        .iter()
        .map(|part| join_components(part))
        .collect::<Vec<_>>()
        .join(";"),
        VCardValue::Organization(o) => {
            let mut parts = vec![escape_component(&o.name)];
            parts.extend(o.units.iter().map(|u| escape_component(u)));
            parts.join(";")
        }
        VCardValue::Gender(Gender { sex, identity }) => {
            let mut out = String::new();
            if let Some(sex) = sex {
                out.push(sex.as_char());
            }
            if let Some(identity) = identity {
                out.push(';');
                out.push_str(&escape_component(identity));
            }
            out
        }
        VCardValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        VCardValue::Integer(n) => n.to_string(),
        VCardValue::Float(f) => f.to_string(),
    }
}

fn join_components(list: &[String]) -> String {
    list.iter()
        .map(|item| escape_component(item))
        .collect::<Vec<_>>()
        .join(",")
}

/// Escapes one component of a structured or list value. Unlike plain text,
/// components must also escape the `;` and `,` separators.
fn escape_component(s: &str) -> String {
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
