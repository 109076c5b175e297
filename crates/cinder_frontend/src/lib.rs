#[macro_use]
extern crate macro_rules_attribute;

mod lexer;
mod parser;

pub mod ast;
pub mod print;
pub mod token;

pub use lexer::{LexerError, LexerErrorKind, LexerResult};
pub use parser::ParseError;

use ast::Program;
use lexer::Lexer;
use parser::Parser;
use token::Token;

derive_alias! {
    #[derive(Node!)] = #[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)];
    #[derive(NodeCopy!)] = #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)];
}

/// Splits a preprocessed source buffer into tokens.
///
/// Lexing carries on past errors so that every bad character is reported,
/// but the tokens are only meaningful if no errors were returned.
pub fn lex(source: &[u8]) -> (Vec<Token>, Vec<LexerError>) {
    Lexer::new(source).lex()
}

/// Derives a [`Program`] from the whole token sequence.
pub fn parse(tokens: &[Token]) -> Result<Program, ParseError> {
    Parser::new(tokens).parse()
}
