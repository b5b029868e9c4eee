//! Arithmetic expression interpreter.
//!
//! Ties the pipeline together: the lexer feeds the parser, the optional
//! optimizer folds constant subtrees and the evaluator computes the result
//! against the session's bindings.
//!
//! ```
//! use calc::{interpret, Interpreter};
//!
//! assert_eq!(interpret("1 + 2 * 3"), Ok(7.0));
//!
//! let mut session = Interpreter::new("x * 2");
//! session.set_var("x", 21.0);
//! assert_eq!(session.get_result(), Ok(42.0));
//! ```

mod session;

pub use calc_ast::{Node, OptimizedNode};
pub use calc_eval::{Bindings, EvalError};
pub use calc_lexer::{CaretMode, LexerConfig};
pub use calc_parser::{render_snippet, Diagnostic, ParseErrorKind};
pub use session::{Interpreter, Tree};

use calc_eval::Evaluate;

/// Any error an interpretation can produce
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InterpretError {
    #[error("parse error: {0}")]
    Parse(#[from] Diagnostic),
    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),
}

impl InterpretError {
    /// The parse diagnostic, if this is one
    pub fn diagnostic(&self) -> Option<&Diagnostic> {
        match self {
            InterpretError::Parse(diagnostic) => Some(diagnostic),
            InterpretError::Eval(_) => None,
        }
    }
}

/// Evaluate `expression` without variables or optimization.
///
/// The empty expression evaluates to `0`. Any parse diagnostic stops the
/// interpretation before evaluation.
pub fn interpret(expression: &str) -> Result<f64, Vec<InterpretError>> {
    Interpreter::new(expression).get_result()
}

/// Evaluate a caller-built tree directly, with no bindings.
pub fn interpret_ast(tree: &Node) -> Result<f64, EvalError> {
    tree.evaluate(&Bindings::new())
}
