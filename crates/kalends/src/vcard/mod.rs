//! vCard (RFC 6350, RFC 2426) support: core model, parsing, and
//! version-aware serialization.

pub mod build;
pub mod core;
pub mod parse;
