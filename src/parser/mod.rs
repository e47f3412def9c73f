//! Parser for coordinate tokens such as `(2103, 167)`

mod grammar;
pub mod lexer;

pub use grammar::parse_coordinate;
