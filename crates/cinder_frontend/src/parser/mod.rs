
use cinder_session::diagnostics::prelude::*;

use crate::ast::*;
use crate::token::{Keyword, Token, TokenKind};

#[derive(serde::Serialize, thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected {expected}, found {found}")]
    Expected {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unexpected {found} after the end of the program")]
    TrailingTokens {
        found: String,
        span: Span,
        program_end: Span,
    },
}

impl IntoDiagnostic for ParseError {
    fn into_diagnostic(self) -> Diagnostic {
        let diagnostic = Diagnostic::error()
            .with_id("parse")
            .with_message(self.to_string());

        match self {
            ParseError::Expected { expected, span, .. } => {
                diagnostic.with_snippet(Snippet::primary(format!("expected {expected} here"), span))
            }

            ParseError::TrailingTokens {
                span, program_end, ..
            } => diagnostic
                .with_snippet(Snippet::primary("unexpected token", span))
                .with_snippet(Snippet::secondary("the program ends here", program_end))
                .with_note("a program consists of exactly one function"),
        }
    }
}

/// Where the parse got furthest before failing, and what would have let it
/// continue there.
#[derive(Debug)]
struct Expectation {
    pos: usize,
    expected: Vec<&'static str>,
}

/// Backtracking recursive descent parser.
///
/// Every production is a `try_*` method that either consumes the tokens of a
/// whole node and returns it, or returns `None` and leaves the position where
/// it was.
pub struct Parser<'t> {
    tokens: &'t [Token],
    pos: usize,

    furthest: Option<Expectation>,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [Token]) -> Self {
        Self {
            tokens,
            pos: 0,

            furthest: None,
        }
    }

    pub fn parse(mut self) -> Result<Program, ParseError> {
        let program = self
            .try_program()
            .ok_or_else(|| self.error_at_furthest())?;

        match self.tokens.get(self.pos) {
            Some(token) => Err(ParseError::TrailingTokens {
                found: token.kind.describe(),
                span: token.span,
                program_end: self.tokens[..self.pos]
                    .last()
                    .map_or(Span::empty(0), |last| last.span),
            }),
            None => Ok(program),
        }
    }

    // Program := Function
    fn try_program(&mut self) -> Option<Program> {
        self.attempt(|parser| {
            let function = parser.try_function()?;
            Some(Program { function })
        })
    }

    // Function := "int" Identifier "(" "void" ")" "{" Statement "}"
    fn try_function(&mut self) -> Option<Function> {
        self.attempt(|parser| {
            parser.expect_kind(&TokenKind::Keyword(Keyword::Int))?;
            let name = parser.expect_identifier()?;

            parser.expect_kind(&TokenKind::LParen)?;
            parser.expect_kind(&TokenKind::Keyword(Keyword::Void))?;
            parser.expect_kind(&TokenKind::RParen)?;

            parser.expect_kind(&TokenKind::LBrace)?;
            let body = parser.try_statement()?;
            parser.expect_kind(&TokenKind::RBrace)?;

            Some(Function {
                name,
                return_type: ReturnType::Int,
                params: Params::Void,
                body,
            })
        })
    }

    // Statement := "return" Expression ";"
    fn try_statement(&mut self) -> Option<Statement> {
        self.attempt(|parser| {
            parser.expect_kind(&TokenKind::Keyword(Keyword::Return))?;
            let expr = parser.try_expression()?;
            parser.expect_kind(&TokenKind::Semicolon)?;

            Some(Statement::Return(expr))
        })
    }

    // Expression := IntegerConstant
    fn try_expression(&mut self) -> Option<Expression> {
        self.attempt(|parser| parser.expect_constant().map(Expression::Constant))
    }

    /// Runs a production, rewinding to the starting position if it fails.
    fn attempt<T>(&mut self, production: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let checkpoint = self.pos;

        let node = production(self);
        if node.is_none() {
            self.pos = checkpoint;
        }

        node
    }

    fn expect_kind(&mut self, kind: &TokenKind) -> Option<Span> {
        self.expect_token(kind.token_name(), |k| k == kind)
            .map(|token| token.span)
    }

    fn expect_identifier(&mut self) -> Option<Identifier> {
        let token = self.expect_token("an identifier", |k| {
            matches!(k, TokenKind::Identifier(_))
        })?;

        match &token.kind {
            TokenKind::Identifier(name) => Some(Identifier {
                name: name.clone(),
                span: token.span,
            }),
            _ => None,
        }
    }

    fn expect_constant(&mut self) -> Option<IntegerConstant> {
        let token = self.expect_token("an integer constant", |k| {
            matches!(k, TokenKind::Constant(_))
        })?;

        match token.kind {
            TokenKind::Constant(value) => Some(IntegerConstant {
                value,
                span: token.span,
            }),
            _ => None,
        }
    }

    /// Consumes the current token if it matches, otherwise records what was
    /// expected at this position.
    fn expect_token(
        &mut self,
        expected: &'static str,
        matches: impl FnOnce(&TokenKind) -> bool,
    ) -> Option<&'t Token> {
        match self.tokens.get(self.pos) {
            Some(token) if matches(&token.kind) => {
                self.pos += 1;
                Some(token)
            }

            _ => {
                self.record_failure(expected);
                None
            }
        }
    }

    fn record_failure(&mut self, expected: &'static str) {
        let pos = self.pos;

        if let Some(furthest) = &mut self.furthest {
            if furthest.pos > pos {
                return;
            }

            if furthest.pos == pos {
                if !furthest.expected.contains(&expected) {
                    furthest.expected.push(expected);
                }
                return;
            }
        }

        self.furthest = Some(Expectation {
            pos,
            expected: vec![expected],
        });
    }

    fn error_at_furthest(&self) -> ParseError {
        let (pos, expected) = match &self.furthest {
            Some(furthest) => (furthest.pos, join_alternatives(&furthest.expected)),
            None => (self.pos, "a function".to_owned()),
        };

        match self.tokens.get(pos) {
            Some(token) => ParseError::Expected {
                expected,
                found: token.kind.describe(),
                span: token.span,
            },

            None => ParseError::Expected {
                expected,
                found: "end of input".to_owned(),
                span: self.eof_span(),
            },
        }
    }

    fn eof_span(&self) -> Span {
        self.tokens
            .last()
            .map_or(Span::empty(0), |token| Span::empty(token.span.end))
    }
}

fn join_alternatives(alternatives: &[&str]) -> String {
    match alternatives {
        [] => String::new(),
        [only] => (*only).to_owned(),
        [init @ .., last] => format!("{} or {last}", init.join(", ")),
    }
}
