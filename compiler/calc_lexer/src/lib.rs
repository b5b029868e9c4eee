//! Lexical analysis for the calc expression language
//!
//! This crate turns expression source text into a sequence of tokens for the
//! parser, either synchronously or from a producer thread feeding a bounded
//! channel.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod lexer;
pub mod streaming_lexer;
pub mod token;

// Re-export the main types for convenience
pub use config::{CaretMode, LexerConfig};
pub use lexer::{tokenize, tokenize_with_config, Lexer};
pub use streaming_lexer::StreamingLexer;
pub use token::{Span, Token, TokenKind};
