use tracing::trace;

use crate::{
    ast::{Ast, Op},
    error::{Error, EvalError},
    parse::parse,
};

/// Walks `tree` and computes its value with `f64` arithmetic.
///
/// The left operand is evaluated before the right one. Dividing by zero (or
/// negative zero) fails; every other result, including infinities from
/// overflow, is returned as IEEE-754 produces it.
pub fn evaluate(tree: &Ast) -> Result<f64, EvalError> {
    match tree {
        Ast::Literal { value } => Ok(*value),
        Ast::BinaryOp {
            operator,
            left,
            right,
        } => {
            let lhs = evaluate(left)?;
            let rhs = evaluate(right)?;
            let value = match operator {
                Op::Plus => lhs + rhs,
                Op::Minus => lhs - rhs,
                Op::Star => lhs * rhs,
                Op::Slash => {
                    if rhs == 0.0 {
                        return Err(EvalError::DivisionByZero);
                    }
                    lhs / rhs
                }
            };
            trace!(%operator, lhs, rhs, value, "apply");
            Ok(value)
        }
    }
}

/// Parses and evaluates `source` in one go.
pub fn eval_str(source: &str) -> Result<f64, Error> {
    let tree = parse(source)?;
    Ok(evaluate(&tree)?)
}
