//! iCalendar (RFC 5545) support: core model, parsing, serialization,
//! recurrence expansion, and validation.

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
pub mod validate;

#[cfg(test)]
mod tests;
