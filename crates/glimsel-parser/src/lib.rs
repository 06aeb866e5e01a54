pub mod ast;
pub mod chain;
pub mod parser;

pub use ast::*;
pub use chain::{parse_chain, ChainError};
pub use parser::{parse_query, ParseError, QueryParser, Rule};
