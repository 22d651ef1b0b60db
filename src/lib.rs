//! Parsing and evaluation of arithmetic expressions over `+ - * /` and
//! parentheses.
//!
//! ```
//! let tree = arith_expr::parse("2 + 3 * 4")?;
//! assert_eq!(tree.to_string(), "(+ 2 (* 3 4))");
//! assert_eq!(arith_expr::evaluate(&tree)?, 14.0);
//! # Ok::<(), arith_expr::Error>(())
//! ```

pub mod ast;
pub mod error;
pub mod eval;
pub mod lex;
pub mod parse;

pub use ast::{Ast, Op};
pub use error::{Error, EvalError, ParseError};
pub use eval::{eval_str, evaluate};
pub use lex::{Lexer, Token, TokenKind, tokenize};
pub use parse::{Parser, parse};
