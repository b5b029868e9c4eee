//! Lexer configuration

/// Meaning of the `^` character for one lexer instance.
///
/// The two readings are mutually exclusive: a lexer never treats `^` as
/// both an exponent marker and an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaretMode {
    /// `^` directly after a number's digits starts the exponent of an
    /// exponential literal (`2^10`); anywhere else it is invalid.
    #[default]
    Exponent,
    /// `^` is always the bitwise `Xor` operator.
    Xor,
}

/// Configuration shared by the synchronous and streaming lexers
#[derive(Debug, Clone, Copy)]
pub struct LexerConfig {
    /// Capacity of the bounded token channel used by the streaming lexer
    pub channel_capacity: usize,
    /// How `^` is lexed
    pub caret: CaretMode,
}

impl Default for LexerConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 1024,
            caret: CaretMode::Exponent,
        }
    }
}

impl LexerConfig {
    /// Default configuration with `^` lexed as `Xor`
    pub fn xor() -> Self {
        Self {
            caret: CaretMode::Xor,
            ..Self::default()
        }
    }
}
