//! Token-driven parser building a binary expression tree.
//!
//! Each bracket level (a parenthesized group or a function argument) is
//! parsed by a nested invocation over the same token stream, which returns
//! once it consumes the matching `)` or the stream runs dry. Structural
//! problems are collected as diagnostics and parsing carries on; the tree
//! built so far is always returned.
//!
//! Bracket nesting and the height of the tree are capped. Input exceeding
//! the cap is reported once and the remaining tokens are skipped, which
//! keeps every later tree walk within a bounded recursion depth.

mod builder;
pub mod diagnostics;
pub mod test_utils;
pub mod token_stream;

use calc_ast::{Function, InvalidKind, Node, Operator};
use calc_lexer::{Lexer, LexerConfig, StreamingLexer, Token, TokenKind};
use log::debug;

use builder::TreeBuilder;
pub use diagnostics::{render_snippet, Diagnostic, ParseErrorKind};
pub use token_stream::TokenStream;

/// The tree built from a token sequence plus everything that went wrong
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOutput {
    /// `None` only for input without any usable operand
    pub tree: Option<Node>,
    pub errors: Vec<Diagnostic>,
}

impl ParseOutput {
    /// Whether the parse produced no diagnostics
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Default limit for both bracket nesting and tree height
pub const DEFAULT_MAX_DEPTH: usize = 512;

/// Recursive parser over a token source
pub struct Parser<I: Iterator<Item = Token>> {
    stream: TokenStream<I>,
    errors: Vec<Diagnostic>,
    /// Current bracket nesting
    depth: usize,
    max_depth: usize,
    /// Set once the depth limit is hit; the rest of the input is skipped
    aborted: bool,
}

impl<I: Iterator<Item = Token>> Parser<I> {
    pub fn new(tokens: impl IntoIterator<IntoIter = I, Item = Token>) -> Self {
        Self::with_max_depth(tokens, DEFAULT_MAX_DEPTH)
    }

    /// Limit bracket nesting and the height of the built tree to `max_depth`
    pub fn with_max_depth(
        tokens: impl IntoIterator<IntoIter = I, Item = Token>,
        max_depth: usize,
    ) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            errors: Vec::new(),
            depth: 0,
            max_depth,
            aborted: false,
        }
    }

    /// Consume the whole token source
    pub fn parse(mut self) -> ParseOutput {
        let (tree, _) = self.parse_level(None);
        debug!(
            "parsed {} tokens with {} diagnostics",
            self.stream.position(),
            self.errors.len()
        );
        ParseOutput {
            tree,
            errors: self.errors,
        }
    }

    fn report(&mut self, diagnostic: Diagnostic) {
        debug!("recovering from: {diagnostic}");
        self.errors.push(diagnostic);
    }

    /// Report the depth limit at `token` and drop the remaining input
    fn abort_too_deep(&mut self, token: &Token) {
        self.report(Diagnostic::too_deep(token, self.max_depth));
        self.aborted = true;
        while !self.stream.is_exhausted() {
            self.stream.next();
        }
    }

    /// Parse the contents of a bracket level opened by `token`
    fn parse_nested(&mut self, token: &Token) -> (Option<Node>, usize) {
        self.depth += 1;
        let level = self.parse_level(Some(token));
        self.depth -= 1;
        level
    }

    /// Parse one bracket level. `opening` is the token that opened it, or
    /// `None` at the outermost level. Returns the tree with its height.
    fn parse_level(&mut self, opening: Option<&Token>) -> (Option<Node>, usize) {
        let mut builder = TreeBuilder::new();

        loop {
            if self.aborted {
                let height = builder.height();
                return (builder.finish(), height);
            }

            let Some(token) = self.stream.next() else {
                if let Some(opening) = opening {
                    self.report(Diagnostic::missing_closing_bracket(opening));
                }
                if !builder.is_empty() && builder.expects_operand() {
                    self.report(Diagnostic::unexpected_end(self.stream.end_of_input()));
                }
                let height = builder.height();
                return (builder.finish(), height);
            };

            let opens_level = token.kind == TokenKind::ParenL || token.kind.is_function();
            if opens_level && self.depth >= self.max_depth {
                self.abort_too_deep(&token);
                continue;
            }

            match token.kind {
                kind if kind.is_literal() => {
                    if let Some(node) = Node::from_token(&token) {
                        self.push_operand(&mut builder, node, 1, &token, false);
                    }
                }
                TokenKind::ParenL => {
                    if let (Some(group), height) = self.parse_nested(&token) {
                        self.push_operand(&mut builder, group, height, &token, true);
                    }
                }
                kind if kind.is_function() => {
                    let (argument, height) = self.parse_nested(&token);
                    let node = match Function::from_token(kind) {
                        Some(function) => Node::function(function, argument),
                        None => {
                            self.report(Diagnostic::at_token(ParseErrorKind::ExpectedFunction, &token));
                            Node::invalid(InvalidKind::Function, token.text.trim_end_matches('('))
                        }
                    };
                    self.push_operand(&mut builder, node, height + 1, &token, true);
                }
                kind if kind.is_operator() => {
                    match Operator::from_token(kind) {
                        Some(op) if !builder.expects_operand() => {
                            builder.push_operator(op);
                            self.check_height(&builder, &token);
                        }
                        _ => self.report(Diagnostic::at_token(
                            ParseErrorKind::ExpectedNumberOrVariable,
                            &token,
                        )),
                    }
                }
                TokenKind::ParenR => {
                    if opening.is_some() {
                        if builder.expects_operand() {
                            self.report(Diagnostic::at_token(
                                ParseErrorKind::ExpectedNumberOrVariable,
                                &token,
                            ));
                        }
                        let height = builder.height();
                        return (builder.finish(), height);
                    }
                    self.report(Diagnostic::at_token(
                        ParseErrorKind::UnexpectedClosingBracket,
                        &token,
                    ));
                }
                kind => {
                    if let Some(error) = ParseErrorKind::from_lexical(kind) {
                        self.report(Diagnostic::at_token(error, &token));
                    }
                    // a malformed operand still occupies its place in the tree
                    let placeholder = match kind {
                        TokenKind::InvalidCharacterInNumber => Some(InvalidKind::Number),
                        TokenKind::InvalidCharacterInVariable => Some(InvalidKind::Variable),
                        _ => None,
                    };
                    if let Some(invalid) = placeholder {
                        if builder.expects_operand() {
                            builder.push_operand(Node::invalid(invalid, token.text.clone()), 1, false);
                        }
                    }
                }
            }
        }
    }

    fn push_operand(
        &mut self,
        builder: &mut TreeBuilder,
        node: Node,
        height: usize,
        token: &Token,
        group: bool,
    ) {
        if builder.expects_operand() {
            builder.push_operand(node, height, group);
            self.check_height(builder, token);
        } else {
            self.report(Diagnostic::at_token(ParseErrorKind::ExpectedOperator, token));
        }
    }

    fn check_height(&mut self, builder: &TreeBuilder, token: &Token) {
        if builder.height() > self.max_depth && !self.aborted {
            self.abort_too_deep(token);
        }
    }
}

/// Parse any token source into a tree and diagnostics
pub fn parse<T: IntoIterator<Item = Token>>(tokens: T) -> ParseOutput {
    Parser::new(tokens).parse()
}

/// [`parse`] with a custom depth limit
pub fn parse_with_max_depth<T: IntoIterator<Item = Token>>(tokens: T, max_depth: usize) -> ParseOutput {
    Parser::with_max_depth(tokens, max_depth).parse()
}

/// Lex and parse `source` on the current thread
pub fn parse_source(source: &str) -> ParseOutput {
    parse_source_with_config(source, LexerConfig::default())
}

/// [`parse_source`] with a custom lexer configuration
pub fn parse_source_with_config(source: &str, config: LexerConfig) -> ParseOutput {
    parse(Lexer::with_config(source, config))
}

/// Parse while a lexer thread produces tokens concurrently
pub fn parse_streaming(source: impl Into<String>, config: LexerConfig) -> ParseOutput {
    parse(StreamingLexer::spawn_with_config(source, config))
}
