use calc_ast::ConversionError;
use thiserror::Error;

/// Errors that abort an evaluation or optimization.
///
/// The first error found in the tree is returned; no partial value
/// accompanies it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("operator or function is missing its left operand")]
    MissingLeftChild,
    #[error("operator is missing its right operand")]
    MissingRightChild,
    #[error("invalid node '{0}' cannot be evaluated")]
    InvalidNodeType(String),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("variable '{0}' is not defined")]
    VariableNotDefined(String),
    #[error("division by zero")]
    DivisionByZero,
}
