//! iCalendar parsing: line transport, content-line grammar, value codecs,
//! and the component tree builder.

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult, ParseWarning};
pub use lexer::{parse_content_line, split_lines, unfold};
pub use parser::{Parsed, ParseMode, ParseOptions, parse, parse_with};
pub use values::{
    parse_boolean, parse_date, parse_datetime, parse_duration, parse_float, parse_geo,
    parse_integer, parse_period, parse_rrule, parse_time, parse_utc_offset, unescape_text,
};
