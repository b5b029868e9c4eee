//! Parser for the calc expression language.
//!
//! Builds an expression tree from lexer tokens, collecting diagnostics
//! instead of stopping at the first problem.

pub mod parser;

pub use parser::{
    parse, parse_source, parse_source_with_config, parse_streaming, parse_with_max_depth,
    render_snippet, Diagnostic, ParseErrorKind, ParseOutput, Parser, DEFAULT_MAX_DEPTH,
};


#[cfg(test)]
pub(crate) use tests::init_test_logger;
