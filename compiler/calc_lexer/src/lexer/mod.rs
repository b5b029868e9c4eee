//! Character-level state machine turning expression source into tokens.
//!
//! The lexer never fails: bytes it cannot place become inline error
//! tokens and lexing resumes at the next character.

use log::trace;

use crate::config::{CaretMode, LexerConfig};
use crate::token::{Token, TokenKind};

/// Sub-state while inside a number literal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    Integer,
    Decimal,
    Exponent,
}

/// The synchronous lexer
pub struct Lexer<'a> {
    /// The source being lexed
    source: &'a str,
    /// Current byte offset in the source
    offset: usize,
    /// Configuration for the lexer
    config: LexerConfig,
    /// Kind of the last emitted token
    previous: Option<TokenKind>,
    /// Whether the end of input marker has been produced
    finished: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer with default configuration
    pub fn new(source: &'a str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    /// Create a new lexer with custom configuration
    pub fn with_config(source: &'a str, config: LexerConfig) -> Self {
        Self {
            source,
            offset: 0,
            config,
            previous: None,
            finished: false,
        }
    }

    /// Produce the next token. Once the input is exhausted every call
    /// returns an [`TokenKind::Eof`] token.
    pub fn next_token(&mut self) -> Token {
        let token = self.scan();
        if token.is_eof() {
            self.finished = true;
        } else {
            trace!("lexed {}", token);
            self.previous = Some(token.kind);
        }
        token
    }

    fn scan(&mut self) -> Token {
        loop {
            let Some(byte) = self.peek() else {
                return Token::eof(self.offset);
            };

            match byte {
                b if b.is_ascii_whitespace() => self.offset += 1,
                b'0'..=b'9' => return self.lex_number(),
                b'-' if self.starts_signed_literal() => return self.lex_number(),
                b'a'..=b'z' | b'A'..=b'Z' => return self.lex_identifier(),
                b'(' => return self.single(TokenKind::ParenL),
                b')' => return self.single(TokenKind::ParenR),
                b => {
                    return match TokenKind::operator(b) {
                        Some(kind) if self.is_operator_byte(b) => self.single(kind),
                        _ => self.invalid(TokenKind::InvalidCharacter),
                    };
                }
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.offset).copied()
    }

    fn peek_at(&self, ahead: usize) -> Option<u8> {
        self.source.as_bytes().get(self.offset + ahead).copied()
    }

    fn is_operator_byte(&self, byte: u8) -> bool {
        match byte {
            b'^' => self.config.caret == CaretMode::Xor,
            b => TokenKind::operator(b).is_some(),
        }
    }

    /// Whether `byte` legitimately ends a number or variable
    fn is_terminator(&self, byte: Option<u8>) -> bool {
        match byte {
            None => true,
            Some(b) => b.is_ascii_whitespace() || b == b')' || self.is_operator_byte(b),
        }
    }

    /// A `-` followed by a digit starts a signed literal unless it can be
    /// read as a binary minus.
    fn starts_signed_literal(&self) -> bool {
        if !matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            return false;
        }
        match self.previous {
            None => true,
            Some(kind) => kind.is_operator() || kind.is_function() || kind == TokenKind::ParenL,
        }
    }

    /// Emit an operator or punctuation token for the byte under the cursor
    fn single(&mut self, kind: TokenKind) -> Token {
        let start = self.offset;
        self.offset += 1;
        Token::new(kind, "", start, self.offset)
    }

    /// Consume the character under the cursor as an error token
    fn invalid(&mut self, kind: TokenKind) -> Token {
        let start = self.offset;
        let ch = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
        self.offset += ch.len_utf8().max(1);
        Token::new(kind, ch.to_string(), start, self.offset)
    }

    fn emit(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, &self.source[start..self.offset], start, self.offset)
    }

    fn lex_number(&mut self) -> Token {
        let start = self.offset;
        if self.peek() == Some(b'-') {
            self.offset += 1;
        }

        if self.peek() == Some(b'0') {
            match self.peek_at(1) {
                Some(b'x') => {
                    self.offset += 2;
                    return self.lex_radix(start, TokenKind::Hex, |b| b.is_ascii_hexdigit());
                }
                Some(b'b') => {
                    self.offset += 2;
                    return self.lex_radix(start, TokenKind::Bin, |b| b == b'0' || b == b'1');
                }
                _ => {}
            }
        }

        let mut state = NumberState::Integer;
        loop {
            match self.peek() {
                Some(b'0'..=b'9') => self.offset += 1,
                Some(b'.') if state == NumberState::Integer => {
                    state = NumberState::Decimal;
                    self.offset += 1;
                }
                Some(b'^')
                    if state != NumberState::Exponent
                        && self.config.caret == CaretMode::Exponent =>
                {
                    state = NumberState::Exponent;
                    self.offset += 1;
                    if self.peek() == Some(b'-') {
                        self.offset += 1;
                    }
                }
                None => break,
                next if self.is_terminator(next) => break,
                Some(_) => return self.invalid(TokenKind::InvalidCharacterInNumber),
            }
        }

        let kind = match state {
            NumberState::Integer => TokenKind::Int,
            NumberState::Decimal => TokenKind::Dec,
            NumberState::Exponent => TokenKind::Exp,
        };
        self.emit(kind, start)
    }

    /// Hex or binary digits after the `0x`/`0b` prefix
    fn lex_radix(&mut self, start: usize, kind: TokenKind, is_digit: fn(u8) -> bool) -> Token {
        loop {
            match self.peek() {
                Some(b) if is_digit(b) => self.offset += 1,
                None => return self.emit(kind, start),
                next if self.is_terminator(next) => return self.emit(kind, start),
                Some(_) => return self.invalid(TokenKind::InvalidCharacterInNumber),
            }
        }
    }

    fn lex_identifier(&mut self) -> Token {
        let start = self.offset;
        while matches!(self.peek(), Some(b) if b.is_ascii_alphabetic()) {
            self.offset += 1;
        }

        match self.peek() {
            Some(b'(') => {
                self.offset += 1;
                let text = &self.source[start..self.offset];
                Token::new(TokenKind::function(text), text, start, self.offset)
            }
            None => self.emit(TokenKind::Var, start),
            next if self.is_terminator(next) => self.emit(TokenKind::Var, start),
            Some(_) => self.invalid(TokenKind::InvalidCharacterInVariable),
        }
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        if token.is_eof() {
            None
        } else {
            Some(token)
        }
    }
}

/// Lex `source` into a fully materialized token sequence, without the
/// end of input marker.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).collect()
}

/// [`tokenize`] with a custom configuration
pub fn tokenize_with_config(source: &str, config: LexerConfig) -> Vec<Token> {
    Lexer::with_config(source, config).collect()
}
