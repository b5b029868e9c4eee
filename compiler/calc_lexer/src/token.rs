//! Token kinds, tokens and source spans

use std::collections::HashMap;
use std::fmt;

use lazy_static::lazy_static;

/// Half-open byte range `[start, end)` into the source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    /// Offset of the first byte covered by the span
    pub start: usize,
    /// Offset one past the last byte covered by the span
    pub end: usize,
}

impl Span {
    /// Create a span from its two offsets
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of bytes covered
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Whether the span covers no bytes
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// The kind of a token produced by the lexer.
///
/// Kinds fall into literal, operator, function, punctuation and error
/// categories; the classification predicates below are the only logic
/// attached to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input sentinel
    Eof,

    // Literals
    /// Decimal integer, optionally signed (`42`, `-7`)
    Int,
    /// Number with a fractional part (`3.25`)
    Dec,
    /// Binary literal with a `0b` prefix
    Bin,
    /// Hexadecimal literal with a `0x` prefix
    Hex,
    /// Base and exponent joined by `^` (`2^10`)
    Exp,
    /// Variable name
    Var,

    // Operators
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Mult,
    /// `/`
    Div,
    /// `%`
    Mod,
    /// Bitwise `|`
    Or,
    /// Bitwise `^`, only produced in [`CaretMode::Xor`](crate::CaretMode::Xor)
    Xor,
    /// Bitwise `&`
    And,

    // Function calls, the token text includes the opening parenthesis
    /// `sqrt(`
    Sqrt,
    /// `sin(`
    Sin,
    /// `cos(`
    Cos,
    /// `tan(`
    Tan,
    /// A name followed by `(` that is not a known function
    UnknownFunction,

    // Punctuation
    /// `(`
    ParenL,
    /// `)`
    ParenR,

    // Lexical errors, recorded inline
    /// A character that cannot start any token
    InvalidCharacter,
    /// A character that cannot continue the current number
    InvalidCharacterInNumber,
    /// A character that cannot continue the current variable name
    InvalidCharacterInVariable,
}

lazy_static! {
    static ref FUNCTIONS: HashMap<&'static str, TokenKind> = {
        let mut m = HashMap::new();
        m.insert("sqrt(", TokenKind::Sqrt);
        m.insert("sin(", TokenKind::Sin);
        m.insert("cos(", TokenKind::Cos);
        m.insert("tan(", TokenKind::Tan);
        m
    };
}

impl TokenKind {
    /// Look up a function-call token by its text including the `(`.
    ///
    /// Unrecognized names map to [`TokenKind::UnknownFunction`].
    pub fn function(text: &str) -> TokenKind {
        FUNCTIONS
            .get(text)
            .copied()
            .unwrap_or(TokenKind::UnknownFunction)
    }

    /// Numeric literal kinds, without variables
    pub fn is_number(&self) -> bool {
        matches!(
            self,
            TokenKind::Int | TokenKind::Dec | TokenKind::Bin | TokenKind::Hex | TokenKind::Exp
        )
    }

    /// Literal kinds, variables included
    pub fn is_literal(&self) -> bool {
        self.is_number() || *self == TokenKind::Var
    }

    /// Binary operator kinds
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Mult
                | TokenKind::Div
                | TokenKind::Mod
                | TokenKind::Or
                | TokenKind::Xor
                | TokenKind::And
        )
    }

    /// Function-call kinds, unknown functions included
    pub fn is_function(&self) -> bool {
        matches!(
            self,
            TokenKind::Sqrt
                | TokenKind::Sin
                | TokenKind::Cos
                | TokenKind::Tan
                | TokenKind::UnknownFunction
        )
    }

    /// Lexical error kinds
    pub fn is_error(&self) -> bool {
        matches!(
            self,
            TokenKind::InvalidCharacter
                | TokenKind::InvalidCharacterInNumber
                | TokenKind::InvalidCharacterInVariable
        )
    }

    /// Operator kind for a single operator byte, if it is one
    pub fn operator(byte: u8) -> Option<TokenKind> {
        match byte {
            b'+' => Some(TokenKind::Plus),
            b'-' => Some(TokenKind::Minus),
            b'*' => Some(TokenKind::Mult),
            b'/' => Some(TokenKind::Div),
            b'%' => Some(TokenKind::Mod),
            b'|' => Some(TokenKind::Or),
            b'^' => Some(TokenKind::Xor),
            b'&' => Some(TokenKind::And),
            _ => None,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TokenKind::Eof => "end of input",
            TokenKind::Int => "integer",
            TokenKind::Dec => "decimal",
            TokenKind::Bin => "binary number",
            TokenKind::Hex => "hexadecimal number",
            TokenKind::Exp => "exponential number",
            TokenKind::Var => "variable",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Mult => "'*'",
            TokenKind::Div => "'/'",
            TokenKind::Mod => "'%'",
            TokenKind::Or => "'|'",
            TokenKind::Xor => "'^'",
            TokenKind::And => "'&'",
            TokenKind::Sqrt => "sqrt(",
            TokenKind::Sin => "sin(",
            TokenKind::Cos => "cos(",
            TokenKind::Tan => "tan(",
            TokenKind::UnknownFunction => "unknown function",
            TokenKind::ParenL => "'('",
            TokenKind::ParenR => "')'",
            TokenKind::InvalidCharacter => "invalid character",
            TokenKind::InvalidCharacterInNumber => "invalid character in number",
            TokenKind::InvalidCharacterInVariable => "invalid character in variable",
        };
        f.write_str(s)
    }
}

/// A classified lexical unit with its source span.
///
/// Tokens are immutable once emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The source text of the token; empty for operators and punctuation
    pub text: String,
    /// Offset of the first consumed byte
    pub start: usize,
    /// Offset one past the last consumed byte
    pub end: usize,
}

impl Token {
    /// Create a new token
    pub fn new(kind: TokenKind, text: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            start,
            end,
        }
    }

    /// End of input marker positioned at `offset`
    pub fn eof(offset: usize) -> Self {
        Self::new(TokenKind::Eof, "", offset, offset)
    }

    /// Source range covered by the token
    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Whether this is the end of input marker
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::Eof
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.text.is_empty() {
            write!(f, "{} at {}", self.kind, self.span())
        } else {
            write!(f, "{} '{}' at {}", self.kind, self.text, self.span())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_lookup() {
        assert_eq!(TokenKind::function("sqrt("), TokenKind::Sqrt);
        assert_eq!(TokenKind::function("tan("), TokenKind::Tan);
        assert_eq!(TokenKind::function("log("), TokenKind::UnknownFunction);
        assert_eq!(TokenKind::function("sqrt"), TokenKind::UnknownFunction);
    }

    #[test]
    fn classification() {
        assert!(TokenKind::Hex.is_literal());
        assert!(TokenKind::Var.is_literal());
        assert!(!TokenKind::Var.is_number());
        assert!(TokenKind::Xor.is_operator());
        assert!(!TokenKind::ParenL.is_operator());
        assert!(TokenKind::UnknownFunction.is_function());
        assert!(TokenKind::InvalidCharacterInNumber.is_error());
        assert!(!TokenKind::Eof.is_error());
    }
}
