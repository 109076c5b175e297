
use cinder_session::diagnostics::prelude::*;
use cinder_utils::peek::Peek;

use crate::token::*;

#[derive(serde::Serialize, Debug, Clone, PartialEq, Eq)]
pub struct LexerError {
    pub kind: LexerErrorKind,
    pub span: Span,
}

#[derive(serde::Serialize, thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexerErrorKind {
    #[error("unexpected character {}", describe_byte(.0))]
    UnexpectedChar(u8),

    #[error("invalid integer constant: {} cannot follow a digit", describe_byte(.found))]
    MalformedConstant { found: u8 },

    #[error("invalid identifier: {} is not allowed in identifiers", describe_byte(.found))]
    MalformedIdentifier { found: u8 },

    #[error("invalid digit {} in octal constant", describe_byte(.0))]
    InvalidOctalDigit(u8),

    #[error("integer constant is too large for `int`")]
    IntegerOverflow,
}

impl IntoDiagnostic for LexerError {
    fn into_diagnostic(self) -> Diagnostic {
        let label = match self.kind {
            LexerErrorKind::UnexpectedChar(_) => "this character",
            LexerErrorKind::MalformedConstant { .. } | LexerErrorKind::MalformedIdentifier { .. } => {
                "this token"
            }
            LexerErrorKind::InvalidOctalDigit(_) | LexerErrorKind::IntegerOverflow => {
                "this constant"
            }
        };

        Diagnostic::error()
            .with_id("lex")
            .with_message(self.kind.to_string())
            .with_snippet(Snippet::primary(label, self.span))
    }
}

pub type LexerResult<T> = Result<T, LexerErrorKind>;

pub struct Lexer<'src> {
    cursor: Cursor<'src>,
    errors: Vec<LexerError>,

    token_start: usize,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src [u8]) -> Self {
        Self {
            cursor: Cursor::new(source),
            errors: vec![],

            token_start: 0,
        }
    }

    pub fn lex(mut self) -> (Vec<Token>, Vec<LexerError>) {
        let mut tokens = vec![];
        while let Some(token) = self.lex_token() {
            tokens.push(token);
        }

        (tokens, self.errors)
    }

    fn lex_token(&mut self) -> Option<Token> {
        loop {
            macro_rules! try_lex {
                ($e:expr) => {{
                    match $e {
                        Ok(kind) => kind,
                        Err(err) => {
                            self.report_error(err);
                            continue;
                        }
                    }
                }};
            }

            self.token_start = self.cursor.pos();

            let kind = match self.cursor.peek()? {
                b' ' | b'\t' | b'\n' | b'\r' => {
                    self.cursor.next();
                    continue;
                }

                b'(' => self.bump(TokenKind::LParen),
                b')' => self.bump(TokenKind::RParen),
                b'{' => self.bump(TokenKind::LBrace),
                b'}' => self.bump(TokenKind::RBrace),
                b';' => self.bump(TokenKind::Semicolon),

                b'0'..=b'9' => try_lex!(self.lex_constant()),

                ch if is_ident_start(ch) => try_lex!(self.lex_word()),

                ch => {
                    self.cursor.next();

                    // report a multi-byte character once
                    while let Some(0x80..=0xbf) = self.cursor.peek() {
                        self.cursor.next();
                    }

                    self.report_error(LexerErrorKind::UnexpectedChar(ch));
                    continue;
                }
            };

            let token = Token {
                kind,
                span: Span::new(self.token_start, self.cursor.pos()),
            };

            return Some(token);
        }
    }

    fn bump(&mut self, kind: TokenKind) -> TokenKind {
        self.cursor.next();
        kind
    }

    fn lex_constant(&mut self) -> LexerResult<TokenKind> {
        // a leading zero makes the constant octal, as in C
        let radix = if self.cursor.peek() == Some(b'0') { 8 } else { 10 };

        let mut n = Some(0i32);
        let mut bad_digit = None;

        while let Some(ch @ b'0'..=b'9') = self.cursor.peek() {
            self.cursor.next();

            let digit = i32::from(ch - b'0');
            if digit >= radix {
                bad_digit.get_or_insert(ch);
            }

            n = n.and_then(|n| n.checked_mul(radix));
            n = n.and_then(|n| n.checked_add(digit));
        }

        self.expect_word_boundary(|found| LexerErrorKind::MalformedConstant { found })?;

        if let Some(ch) = bad_digit {
            return Err(LexerErrorKind::InvalidOctalDigit(ch));
        }

        n.map(TokenKind::Constant)
            .ok_or(LexerErrorKind::IntegerOverflow)
    }

    fn lex_word(&mut self) -> LexerResult<TokenKind> {
        // Each keyword is matched on its own from the token start, so a
        // failed attempt never eats into the next one or into the identifier.
        for keyword in Keyword::ALL {
            if self.eat_keyword(keyword) {
                return Ok(TokenKind::Keyword(keyword));
            }
        }

        self.lex_identifier()
    }

    fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        let spelling = keyword.spelling().as_bytes();

        let spelled = spelling
            .iter()
            .enumerate()
            .all(|(i, &b)| self.cursor.peek_nth(i) == Some(b));

        let bounded = self
            .cursor
            .peek_nth(spelling.len())
            .map_or(true, is_word_boundary);

        if spelled && bounded {
            self.cursor.advance(spelling.len());
            true
        } else {
            false
        }
    }

    fn lex_identifier(&mut self) -> LexerResult<TokenKind> {
        while matches!(self.cursor.peek(), Some(ch) if is_ident(ch)) {
            self.cursor.next();
        }

        self.expect_word_boundary(|found| LexerErrorKind::MalformedIdentifier { found })?;

        let name = self.cursor.slice_from(self.token_start);
        Ok(TokenKind::Identifier(
            name.iter().map(|&b| char::from(b)).collect(),
        ))
    }

    /// Fails if the scanned run is glued to a byte that could continue a
    /// word. The rest of that word is skipped so lexing resumes after it.
    fn expect_word_boundary(&mut self, error: impl FnOnce(u8) -> LexerErrorKind) -> LexerResult<()> {
        match self.cursor.peek() {
            Some(found) if !is_word_boundary(found) => {
                while matches!(self.cursor.peek(), Some(ch) if !is_word_boundary(ch)) {
                    self.cursor.next();
                }

                Err(error(found))
            }

            _ => Ok(()),
        }
    }

    fn report_error(&mut self, kind: LexerErrorKind) {
        let span = Span::new(self.token_start, self.cursor.pos());
        self.errors.push(LexerError { kind, span });
    }
}

/// Byte cursor with unlimited non-consuming lookahead. Peeking past the end
/// yields `None`.
#[derive(Debug, Clone)]
struct Cursor<'src> {
    bytes: &'src [u8],
    pos: usize,
}

impl<'src> Cursor<'src> {
    fn new(bytes: &'src [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn pos(&self) -> usize {
        self.pos
    }

    fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.bytes.len());
    }

    fn slice_from(&self, start: usize) -> &'src [u8] {
        &self.bytes[start..self.pos]
    }
}

impl Iterator for Cursor<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<Self::Item> {
        let byte = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(byte)
    }
}

impl Peek for Cursor<'_> {
    fn peek(&self) -> Option<Self::Item> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_nth(&self, n: usize) -> Option<Self::Item> {
        self.bytes.get(self.pos + n).copied()
    }
}

fn is_ident_start(ch: u8) -> bool {
    ch.is_ascii_alphabetic() || ch == b'_'
}

fn is_ident(ch: u8) -> bool {
    ch.is_ascii_alphanumeric() || ch == b'_'
}

/// Bytes that may end a word. Non-ASCII bytes could be part of a multi-byte
/// letter, so they never count as a boundary.
fn is_word_boundary(ch: u8) -> bool {
    ch.is_ascii() && !is_ident(ch)
}

fn describe_byte(&ch: &u8) -> String {
    if ch.is_ascii_graphic() {
        format!("`{}` (0x{ch:02x})", char::from(ch))
    } else {
        format!("byte 0x{ch:02x}")
    }
}
