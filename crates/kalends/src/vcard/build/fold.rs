//! Line folding for vCard output.
//!
//! RFC 6350 §3.2 folding is identical to RFC 5545 §3.1: lines longer than
//! 75 octets are split at a UTF-8 boundary and continued with a leading
//! space. The iCalendar implementation is shared here.

pub use crate::ical::build::{fold_line, fold_line_width};
