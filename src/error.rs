use miette::{Diagnostic, SourceSpan};
use thiserror::Error;

/// Failures raised while turning source text into an [`Ast`](crate::Ast).
///
/// Spans are byte ranges into the text handed to the lexer. The source itself
/// is not stored; attach it with [`miette::Report::with_source_code`] when
/// rendering.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Unexpected character '{character}' in input")]
    #[diagnostic(
        code(arith_expr::lex::unexpected_character),
        help("only digits, `.`, `+ - * /`, parentheses and whitespace are allowed")
    )]
    UnexpectedCharacter {
        character: char,
        #[label("this character")]
        span: SourceSpan,
    },

    #[error("Malformed numeric literal")]
    #[diagnostic(
        code(arith_expr::lex::malformed_number),
        help("a number is a run of digits with at most one `.`")
    )]
    MalformedNumber {
        #[label("this numeric literal")]
        span: SourceSpan,
    },

    #[error("Expected a number or `(`")]
    #[diagnostic(code(arith_expr::parse::unexpected_end_of_expression))]
    UnexpectedEndOfExpression {
        #[label("an operand is missing here")]
        span: SourceSpan,
    },

    #[error("Unmatched parenthesis")]
    #[diagnostic(
        code(arith_expr::parse::unmatched_parenthesis),
        help("add a `)` to close the group")
    )]
    UnmatchedParenthesis {
        #[label("this parenthesis is never closed")]
        open: SourceSpan,
        #[label("expected `)` here")]
        found: SourceSpan,
    },

    #[error("Unexpected input after the end of the expression")]
    #[diagnostic(
        code(arith_expr::parse::trailing_input),
        help("remove everything from here on, or join it with an operator")
    )]
    TrailingInput {
        #[label("the expression already ended")]
        span: SourceSpan,
    },

    #[error("Unexpected end of input")]
    #[diagnostic(code(arith_expr::parse::unexpected_end_of_input))]
    UnexpectedEndOfInput {
        #[label("no tokens are left after this point")]
        span: SourceSpan,
    },
}

impl ParseError {
    /// Byte offset in the source that the error points at.
    pub fn offset(&self) -> usize {
        match self {
            ParseError::UnexpectedCharacter { span, .. }
            | ParseError::MalformedNumber { span }
            | ParseError::UnexpectedEndOfExpression { span }
            | ParseError::TrailingInput { span }
            | ParseError::UnexpectedEndOfInput { span } => span.offset(),
            ParseError::UnmatchedParenthesis { open, .. } => open.offset(),
        }
    }
}

#[derive(Error, Diagnostic, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvalError {
    #[error("Division by zero")]
    #[diagnostic(
        code(arith_expr::eval::division_by_zero),
        help("the right operand of `/` evaluated to zero")
    )]
    DivisionByZero,
}

/// Any failure of the parse-then-evaluate pipeline.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq)]
pub enum Error {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Eval(#[from] EvalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_of_unmatched_parenthesis_is_the_opening_one() {
        let err = ParseError::UnmatchedParenthesis {
            open: SourceSpan::from(2..3),
            found: SourceSpan::from(7..7),
        };
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn pipeline_error_keeps_the_message() {
        let err: Error = EvalError::DivisionByZero.into();
        assert_eq!(err.to_string(), "Division by zero");
        assert!(matches!(err, Error::Eval(EvalError::DivisionByZero)));
    }
}
