//! vCard serialization (RFC 6350, RFC 2426).

mod fold;
mod serializer;

pub use fold::{fold_line, fold_line_width};
pub use serializer::{serialize, serialize_property, serialize_single};
