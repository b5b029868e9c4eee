use calc_lexer::{Span, Token};

/// A stream of tokens from the lexer, shared by nested parse levels
pub struct TokenStream<I: Iterator<Item = Token>> {
    /// The token source, a materialized sequence or a live lexer
    tokens: I,
    /// Number of tokens consumed so far
    position: usize,
    /// End offset of the last consumed token
    last_end: usize,
    /// Whether the source is exhausted
    exhausted: bool,
}

impl<I: Iterator<Item = Token>> TokenStream<I> {
    /// Create a new token stream over any token source
    pub fn new(tokens: impl IntoIterator<IntoIter = I, Item = Token>) -> Self {
        TokenStream {
            tokens: tokens.into_iter(),
            position: 0,
            last_end: 0,
            exhausted: false,
        }
    }

    /// Get the next token and advance the position.
    ///
    /// An end of input marker ends the stream like exhaustion does.
    pub fn next(&mut self) -> Option<Token> {
        if self.exhausted {
            return None;
        }
        match self.tokens.next() {
            Some(token) if !token.is_eof() => {
                self.position += 1;
                self.last_end = token.end;
                Some(token)
            }
            _ => {
                self.exhausted = true;
                None
            }
        }
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.position
    }

    /// Empty span just past the last consumed token
    pub fn end_of_input(&self) -> Span {
        Span::new(self.last_end, self.last_end)
    }

    /// Check if we're at the end of input
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
