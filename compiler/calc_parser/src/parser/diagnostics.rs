use calc_lexer::{Span, Token, TokenKind};

/// The structural and lexical problems the parser reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseErrorKind {
    ExpectedNumberOrVariable,
    ExpectedOperator,
    ExpectedFunction,
    UnexpectedClosingBracket,
    MissingClosingBracket,
    InvalidCharacter,
    InvalidCharacterInNumber,
    InvalidCharacterInVariable,
    /// Brackets nested, or operators chained, beyond the parser's depth limit
    NestingTooDeep,
}

impl ParseErrorKind {
    /// The diagnostic kind reporting a lexical error token
    pub fn from_lexical(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::InvalidCharacter => Some(ParseErrorKind::InvalidCharacter),
            TokenKind::InvalidCharacterInNumber => Some(ParseErrorKind::InvalidCharacterInNumber),
            TokenKind::InvalidCharacterInVariable => {
                Some(ParseErrorKind::InvalidCharacterInVariable)
            }
            _ => None,
        }
    }
}

/// A user-facing diagnostic describing a problem in an expression
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct Diagnostic {
    pub kind: ParseErrorKind,
    pub message: String,
    pub span: Span,
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a diagnostic at a specific token, deriving the message from both
    pub fn at_token(kind: ParseErrorKind, token: &Token) -> Self {
        Self {
            kind,
            message: message_for_token(kind, token),
            span: token.span(),
            help: default_help(kind),
        }
    }

    /// Create a diagnostic with an explicit span
    pub fn at_span<S: Into<String>>(kind: ParseErrorKind, span: Span, message: S) -> Self {
        Self {
            kind,
            message: message.into(),
            span,
            help: default_help(kind),
        }
    }

    /// An operand was expected but the input ended
    pub fn unexpected_end(span: Span) -> Self {
        Self::at_span(
            ParseErrorKind::ExpectedNumberOrVariable,
            span,
            "Expected a number or variable, found end of input",
        )
    }

    /// A bracket or function call opened at `opening` was never closed
    pub fn missing_closing_bracket(opening: &Token) -> Self {
        let what = if opening.kind == TokenKind::ParenL {
            "'('".to_string()
        } else {
            format!("'{}'", opening.text)
        };
        Self::at_span(
            ParseErrorKind::MissingClosingBracket,
            opening.span(),
            format!("Missing closing bracket for {what}"),
        )
    }

    /// Input at `token` exceeds the depth limit of `max_depth`
    pub fn too_deep(token: &Token, max_depth: usize) -> Self {
        Self::at_span(
            ParseErrorKind::NestingTooDeep,
            token.span(),
            format!("Expression is nested deeper than {max_depth} levels"),
        )
        .with_help(format!(
            "Split the expression or remove redundant brackets; at most {max_depth} levels are supported"
        ))
    }

    pub fn with_help<S: Into<String>>(mut self, help: S) -> Self {
        self.help = Some(help.into());
        self
    }
}

fn message_for_token(kind: ParseErrorKind, token: &Token) -> String {
    use ParseErrorKind::*;
    match kind {
        ExpectedNumberOrVariable => format!("Expected a number or variable, found {}", token.kind),
        ExpectedOperator => format!("Expected an operator, found {}", describe(token)),
        ExpectedFunction => format!(
            "Unknown function '{}'",
            token.text.trim_end_matches('(')
        ),
        UnexpectedClosingBracket => "Unexpected closing bracket".to_string(),
        MissingClosingBracket => "Missing closing bracket".to_string(),
        InvalidCharacter => format!("Invalid character '{}'", token.text),
        InvalidCharacterInNumber => format!("Invalid character '{}' in number", token.text),
        InvalidCharacterInVariable => {
            format!("Invalid character '{}' in variable name", token.text)
        }
        NestingTooDeep => "Expression is nested too deeply".to_string(),
    }
}

fn describe(token: &Token) -> String {
    if token.kind.is_literal() {
        format!("{} '{}'", token.kind, token.text)
    } else {
        token.kind.to_string()
    }
}

/// Provide a default help message for a diagnostic kind
fn default_help(kind: ParseErrorKind) -> Option<String> {
    use ParseErrorKind::*;
    match kind {
        ExpectedOperator => Some("Separate operands with an operator such as '+' or '*'".to_string()),
        ExpectedFunction => Some("Available functions are sqrt, sin, cos and tan".to_string()),
        UnexpectedClosingBracket => Some("Did you forget a matching '(' earlier?".to_string()),
        MissingClosingBracket => Some("Add a ')' to close this bracket".to_string()),
        InvalidCharacterInNumber => {
            Some("Numbers look like 42, 4.2, 0x2A, 0b101010 or 2^10".to_string())
        }
        InvalidCharacterInVariable => Some("Variable names consist of letters only".to_string()),
        ExpectedNumberOrVariable | InvalidCharacter | NestingTooDeep => None,
    }
}

/// Render a diagnostic with the offending source line and an underline.
///
/// ```text
/// error: Unexpected closing bracket
///  --> line 1, col 2
/// 1 | 1)
///   |  ^
/// ```
pub fn render_snippet(diagnostic: &Diagnostic, source: &str) -> String {
    let start = diagnostic.span.start.min(source.len());
    let line_start = source[..start].rfind('\n').map_or(0, |i| i + 1);
    let line_end = source[start..]
        .find('\n')
        .map_or(source.len(), |i| start + i);
    let line_no = source[..line_start].matches('\n').count() + 1;
    let line = &source[line_start..line_end];

    let column = source[line_start..start].chars().count();
    let end = diagnostic.span.end.clamp(start, line_end);
    let width = source[start..end].chars().count();
    let underline = if width <= 1 {
        "^".to_string()
    } else {
        "~".repeat(width)
    };

    let gutter = " ".repeat(line_no.to_string().len());
    let mut out = format!(
        "error: {}\n{gutter}--> line {line_no}, col {}\n{line_no} | {line}\n{gutter} | {}{underline}",
        diagnostic.message,
        column + 1,
        " ".repeat(column),
    );
    if let Some(help) = &diagnostic.help {
        out.push_str(&format!("\n{gutter} = help: {help}"));
    }
    out
}
