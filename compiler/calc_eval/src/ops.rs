//! Numeric semantics shared by the evaluator and the optimizer.

use calc_ast::{Function, Operator};

use crate::EvalError;

/// Apply a binary operator to two evaluated operands.
///
/// `/` and `%` reject an exactly zero divisor. The bitwise operators
/// truncate both operands toward zero to `i64` first.
pub fn apply_operator(op: Operator, left: f64, right: f64) -> Result<f64, EvalError> {
    let value = match op {
        Operator::Add => left + right,
        Operator::Sub => left - right,
        Operator::Mult => left * right,
        Operator::Div => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            left / right
        }
        Operator::Mod => {
            if right == 0.0 {
                return Err(EvalError::DivisionByZero);
            }
            left % right
        }
        Operator::Or => bitwise(left, right, |a, b| a | b),
        Operator::Xor => bitwise(left, right, |a, b| a ^ b),
        Operator::And => bitwise(left, right, |a, b| a & b),
    };
    Ok(value)
}

fn bitwise(left: f64, right: f64, op: fn(i64, i64) -> i64) -> f64 {
    op(left as i64, right as i64) as f64
}

/// Apply a built-in function. `sqrt` of a negative number is NaN.
pub fn apply_function(function: Function, argument: f64) -> f64 {
    match function {
        Function::Sqrt => argument.sqrt(),
        Function::Sin => argument.sin(),
        Function::Cos => argument.cos(),
        Function::Tan => argument.tan(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_arithmetic() {
        assert_eq!(apply_operator(Operator::Add, 1.5, 2.0), Ok(3.5));
        assert_eq!(apply_operator(Operator::Sub, 1.0, 3.0), Ok(-2.0));
        assert_eq!(apply_operator(Operator::Mult, -2.0, 4.0), Ok(-8.0));
        assert_eq!(apply_operator(Operator::Div, 7.0, 2.0), Ok(3.5));
        assert_eq!(apply_operator(Operator::Mod, 7.5, 2.0), Ok(1.5));
        assert_eq!(apply_operator(Operator::Mod, -7.0, 3.0), Ok(-1.0));
    }

    #[test]
    fn test_zero_divisor() {
        assert_eq!(apply_operator(Operator::Div, 1.0, 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(apply_operator(Operator::Div, 0.0, -0.0), Err(EvalError::DivisionByZero));
        assert_eq!(apply_operator(Operator::Mod, 1.0, 0.0), Err(EvalError::DivisionByZero));
        assert_eq!(apply_operator(Operator::Div, 0.0, 4.0), Ok(0.0));
    }

    #[test]
    fn test_bitwise_truncates() {
        assert_eq!(apply_operator(Operator::Or, 4.0, 1.9), Ok(5.0));
        assert_eq!(apply_operator(Operator::Xor, 6.0, 3.0), Ok(5.0));
        assert_eq!(apply_operator(Operator::And, 6.7, 3.2), Ok(2.0));
        assert_eq!(apply_operator(Operator::And, -1.5, 7.0), Ok(7.0));
    }

    #[test]
    fn test_functions() {
        assert_eq!(apply_function(Function::Sqrt, 9.0), 3.0);
        assert_eq!(apply_function(Function::Sin, 0.0), 0.0);
        assert_eq!(apply_function(Function::Cos, 0.0), 1.0);
        assert_eq!(apply_function(Function::Tan, 0.0), 0.0);
        assert!(apply_function(Function::Sqrt, -4.0).is_nan());
    }
}
