//! iCalendar serialization (RFC 5545).
//!
//! This module provides serializers for iCalendar content:
//! - Escape: Text and parameter value escaping
//! - Fold: Content line folding at 75 octets (configurable)
//! - Serializer: Full document serialization

mod escape;
mod fold;
mod serializer;

pub use escape::{escape_param_value, escape_text, format_parameter};
pub use fold::{fold_line, fold_line_width};
pub use serializer::{
    SerializeOptions, serialize, serialize_component, serialize_property, serialize_with,
};
