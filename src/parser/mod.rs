mod date;
mod error;
mod grammar;
mod lexer;
mod token;

pub use date::Date;
pub use error::{ParserError, ParserErrorKind};
pub use grammar::{parse_command, parse_command_at};
pub use lexer::Lexer;
pub use token::{Token, TokenKind};
