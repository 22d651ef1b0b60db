use std::iter::Peekable;

use miette::SourceSpan;
use tracing::{debug, trace};

use crate::{
    ast::{Ast, Op},
    error::ParseError,
    lex::{Lexer, Token, TokenKind},
};

/// Recursive descent parser for
///
/// ```text
/// expression := term ( ('+' | '-') term )*
/// term       := factor ( ('*' | '/') factor )*
/// factor     := NUMBER | '(' expression ')'
/// ```
///
/// One token of lookahead is enough to pick every production.
pub struct Parser<'de> {
    whole: &'de str,
    lexer: Peekable<Lexer<'de>>,
}

impl<'de> Parser<'de> {
    pub fn new(whole: &'de str) -> Self {
        Parser {
            whole,
            lexer: Lexer::new(whole).peekable(),
        }
    }

    /// Parses the whole input; anything after a complete expression is an error.
    pub fn parse(mut self) -> Result<Ast, ParseError> {
        let tree = self.parse_expression()?;
        let next = self.advance()?;
        if next.kind != TokenKind::End {
            return Err(ParseError::TrailingInput { span: next.span() });
        }
        debug!(depth = tree.depth(), %tree, "parsed expression");
        Ok(tree)
    }

    pub fn parse_expression(&mut self) -> Result<Ast, ParseError> {
        let mut lhs = self.parse_term()?;
        loop {
            let operator = match self.peek()?.kind {
                TokenKind::Plus => Op::Plus,
                TokenKind::Minus => Op::Minus,
                _ => break,
            };
            self.advance()?;
            let rhs = self.parse_term()?;
            lhs = Ast::binary(operator, lhs, rhs);
        }
        Ok(lhs)
    }

    pub fn parse_term(&mut self) -> Result<Ast, ParseError> {
        let mut lhs = self.parse_factor()?;
        loop {
            let operator = match self.peek()?.kind {
                TokenKind::Star => Op::Star,
                TokenKind::Slash => Op::Slash,
                _ => break,
            };
            self.advance()?;
            let rhs = self.parse_factor()?;
            lhs = Ast::binary(operator, lhs, rhs);
        }
        Ok(lhs)
    }

    pub fn parse_factor(&mut self) -> Result<Ast, ParseError> {
        let token = self.advance()?;
        match token.kind {
            TokenKind::Number(value) => Ok(Ast::Literal { value }),
            TokenKind::LeftParen => {
                let inner = self.parse_expression()?;
                let close = self.advance()?;
                if close.kind != TokenKind::RightParen {
                    return Err(ParseError::UnmatchedParenthesis {
                        open: token.span(),
                        found: close.span(),
                    });
                }
                Ok(inner)
            }
            _ => Err(ParseError::UnexpectedEndOfExpression { span: token.span() }),
        }
    }

    fn peek(&mut self) -> Result<Token<'de>, ParseError> {
        match self.lexer.peek() {
            Some(Ok(token)) => Ok(*token),
            Some(Err(e)) => Err(e.clone()),
            None => Err(self.past_end()),
        }
    }

    fn advance(&mut self) -> Result<Token<'de>, ParseError> {
        match self.lexer.next() {
            Some(Ok(token)) => {
                trace!(offset = token.offset, literal = token.literal, "consume");
                Ok(token)
            }
            Some(Err(e)) => Err(e),
            None => Err(self.past_end()),
        }
    }

    fn past_end(&self) -> ParseError {
        ParseError::UnexpectedEndOfInput {
            span: SourceSpan::from(self.whole.len()..self.whole.len()),
        }
    }
}

/// Parses `source` into an [`Ast`].
pub fn parse(source: &str) -> Result<Ast, ParseError> {
    Parser::new(source).parse()
}
