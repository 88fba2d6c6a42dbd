//! vCard parsing: unfolding, content-line grammar, value parsers, and the
//! document parser.

mod error;
mod lexer;
mod parser;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use lexer::{ContentLine, parse_content_line, split_lines, unfold};
pub use parser::{parse, parse_single};
pub use values::{
    parse_address, parse_gender, parse_organization, parse_structured_name, split_list,
    split_structured, unescape_text,
};
