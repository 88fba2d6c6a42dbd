//! iCalendar document serialization (RFC 5545).

use super::escape::format_parameter;
use super::fold::fold_line_width;
use crate::ical::core::{Component, ICalendar, Property};

/// Options controlling serialization.
#[derive(Debug, Clone, Copy)]
pub struct SerializeOptions {
    /// Fold width in octets.
    pub fold_width: usize,
    /// Sort properties by name within each component (stable, so multiple
    /// properties with the same name keep their relative order).
    pub sort_properties: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            fold_width: 75,
            sort_properties: false,
        }
    }
}

/// Serializes an iCalendar document with default options.
#[must_use]
pub fn serialize(ical: &ICalendar) -> String {
    serialize_with(ical, &SerializeOptions::default())
}

/// Serializes an iCalendar document with explicit options.
#[must_use]
#[tracing::instrument(skip(ical, options))]
pub fn serialize_with(ical: &ICalendar, options: &SerializeOptions) -> String {
    let mut out = String::new();
    serialize_component(&ical.root, options, &mut out);
    out
}

/// Serializes a component depth-first in insertion order.
pub fn serialize_component(component: &Component, options: &SerializeOptions, out: &mut String) {
    out.push_str("BEGIN:");
    out.push_str(&component.name);
    out.push_str("\r\n");

    if options.sort_properties {
        let mut sorted: Vec<&Property> = component.properties.iter().collect();
        sorted.sort_by(|a, b| a.name.cmp(&b.name));
        for prop in sorted {
            serialize_property(prop, options, out);
        }
    } else {
        for prop in &component.properties {
            serialize_property(prop, options, out);
        }
    }

    for child in &component.children {
        serialize_component(child, options, out);
    }

    out.push_str("END:");
    out.push_str(&component.name);
    out.push_str("\r\n");
}

/// Serializes a single property as a folded content line.
///
/// Emits the preserved raw value, so a parse/serialize cycle is wire-exact
/// modulo folding positions.
pub fn serialize_property(prop: &Property, options: &SerializeOptions, out: &mut String) {
    let mut line = String::with_capacity(prop.name.len() + prop.raw_value.len() + 16);
    line.push_str(&prop.name);
    for param in &prop.params {
        line.push(';');
        line.push_str(&format_parameter(param));
    }
    line.push(':');
    line.push_str(&prop.raw_value);

    out.push_str(&fold_line_width(&line, options.fold_width));
    out.push_str("\r\n");
}
