//! Whole-document tests that exercise parse, build, expand, and validate
//! together on shared fixtures.

mod fixtures;
mod pipeline;
