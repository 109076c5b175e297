use cinder_diagnostic::span::Span;

use crate::{Node, NodeCopy};

#[derive(Node!)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

#[derive(Node!)]
pub enum TokenKind {
    Keyword(Keyword),
    Identifier(String),
    Constant(i32),

    LParen,
    RParen,
    LBrace,
    RBrace,
    Semicolon,
}

#[derive(NodeCopy!)]
pub enum Keyword {
    Int,
    Void,
    Return,
}

impl Keyword {
    pub const ALL: [Keyword; 3] = [Keyword::Int, Keyword::Void, Keyword::Return];

    pub fn spelling(self) -> &'static str {
        match self {
            Keyword::Int => "int",
            Keyword::Void => "void",
            Keyword::Return => "return",
        }
    }
}

impl TokenKind {
    pub fn token_name(&self) -> &'static str {
        match self {
            TokenKind::Keyword(kw) => match kw {
                Keyword::Int => "keyword `int`",
                Keyword::Void => "keyword `void`",
                Keyword::Return => "keyword `return`",
            },
            TokenKind::Identifier(_) => "identifier",
            TokenKind::Constant(_) => "integer constant",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBrace => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Semicolon => "`;`",
        }
    }

    /// Like [`TokenKind::token_name`], including the payload if there is one.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier `{name}`"),
            TokenKind::Constant(value) => format!("integer constant `{value}`"),
            other => other.token_name().to_owned(),
        }
    }
}
