use std::fmt::Display;

use miette::SourceSpan;
use tracing::trace;

use crate::error::ParseError;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Token<'de> {
    pub kind: TokenKind,
    pub literal: &'de str,
    /// Byte offset of the first byte of `literal` in the source.
    pub offset: usize,
}

impl Token<'_> {
    pub fn span(&self) -> SourceSpan {
        SourceSpan::from(self.offset..self.offset + self.literal.len())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TokenKind {
    Number(f64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    End,
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let lit = self.literal;
        match self.kind {
            TokenKind::Number(n) => {
                if n == n.trunc() {
                    write!(f, "NUMBER {lit} {n}.0")
                } else {
                    write!(f, "NUMBER {lit} {n}")
                }
            }
            TokenKind::Plus => write!(f, "PLUS {lit} null"),
            TokenKind::Minus => write!(f, "MINUS {lit} null"),
            TokenKind::Star => write!(f, "STAR {lit} null"),
            TokenKind::Slash => write!(f, "SLASH {lit} null"),
            TokenKind::LeftParen => write!(f, "LEFT_PAREN {lit} null"),
            TokenKind::RightParen => write!(f, "RIGHT_PAREN {lit} null"),
            TokenKind::End => write!(f, "EOF  null"),
        }
    }
}

/// Lazy tokenizer over a borrowed source string.
///
/// Yields exactly one [`TokenKind::End`] once the input is exhausted and then
/// stops. A fresh `Lexer` over the same text produces the same tokens.
pub struct Lexer<'de> {
    rest: &'de str,
    byte: usize,
    finished: bool,
}

impl<'de> Lexer<'de> {
    pub fn new(input: &'de str) -> Self {
        Lexer {
            rest: input,
            byte: 0,
            finished: false,
        }
    }

    fn number(&mut self, cur: &'de str, offset: usize) -> Result<Token<'de>, ParseError> {
        let run_end = cur
            .find(|c| !matches!(c, '0'..='9' | '.'))
            .unwrap_or(cur.len());

        let literal = &cur[..run_end];

        // the first byte was already consumed by `next`
        let extra_bytes = literal.len() - 1;
        self.byte += extra_bytes;
        self.rest = &self.rest[extra_bytes..];

        let span = SourceSpan::from(offset..self.byte);
        let has_digit = literal.bytes().any(|b| b.is_ascii_digit());
        if literal.matches('.').count() > 1 || !has_digit {
            return Err(ParseError::MalformedNumber { span });
        }

        let n = literal
            .parse()
            .map_err(|_| ParseError::MalformedNumber { span })?;

        Ok(Token {
            kind: TokenKind::Number(n),
            literal,
            offset,
        })
    }
}

impl<'de> Iterator for Lexer<'de> {
    type Item = Result<Token<'de>, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let mut chars = self.rest.chars();
            let Some(c) = chars.next() else {
                if self.finished {
                    return None;
                }
                self.finished = true;
                trace!(offset = self.byte, "end of input");
                return Some(Ok(Token {
                    kind: TokenKind::End,
                    literal: "",
                    offset: self.byte,
                }));
            };
            let literal = &self.rest[..c.len_utf8()];
            let cur = self.rest;
            let offset = self.byte;
            self.rest = chars.as_str();
            self.byte += c.len_utf8();

            let process = |kind: TokenKind| {
                trace!(offset, literal, "token");
                Some(Ok(Token {
                    kind,
                    literal,
                    offset,
                }))
            };

            return match c {
                '(' => process(TokenKind::LeftParen),
                ')' => process(TokenKind::RightParen),
                '+' => process(TokenKind::Plus),
                '-' => process(TokenKind::Minus),
                '*' => process(TokenKind::Star),
                '/' => process(TokenKind::Slash),
                '0'..='9' | '.' => Some(self.number(cur, offset)),
                c if c.is_whitespace() => continue,
                c => Some(Err(ParseError::UnexpectedCharacter {
                    character: c,
                    span: SourceSpan::from(offset..self.byte),
                })),
            };
        }
    }
}

/// Scans all of `source`, including the trailing [`TokenKind::End`].
pub fn tokenize(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    Lexer::new(source).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source)
            .expect("valid input")
            .into_iter()
            .map(|token| token.kind)
            .collect()
    }

    #[test]
    fn operators_and_parens() {
        assert_eq!(
            kinds("(1+2)*3/4-5"),
            vec![
                TokenKind::LeftParen,
                TokenKind::Number(1.0),
                TokenKind::Plus,
                TokenKind::Number(2.0),
                TokenKind::RightParen,
                TokenKind::Star,
                TokenKind::Number(3.0),
                TokenKind::Slash,
                TokenKind::Number(4.0),
                TokenKind::Minus,
                TokenKind::Number(5.0),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn whitespace_is_skipped() {
        assert_eq!(kinds(" \t3 \n+\r\n 4 "), kinds("3+4"));
    }

    #[test]
    fn end_is_yielded_once() {
        let mut lexer = Lexer::new("7");
        assert!(matches!(lexer.next(), Some(Ok(Token { kind: TokenKind::Number(_), .. }))));
        let end = lexer.next().expect("end token").expect("no error");
        assert_eq!(end.kind, TokenKind::End);
        assert_eq!(end.offset, 1);
        assert!(lexer.next().is_none());
    }

    #[test]
    fn empty_input_is_just_end() {
        assert_eq!(kinds(""), vec![TokenKind::End]);
        assert_eq!(kinds("   "), vec![TokenKind::End]);
    }

    #[test]
    fn decimal_numbers() {
        assert_eq!(
            kinds("3.25 10. .5"),
            vec![
                TokenKind::Number(3.25),
                TokenKind::Number(10.0),
                TokenKind::Number(0.5),
                TokenKind::End,
            ]
        );
    }

    #[test]
    fn number_literal_and_offset() {
        let tokens = tokenize("12 + 345").unwrap();
        assert_eq!(tokens[2].literal, "345");
        assert_eq!(tokens[2].offset, 5);
        assert_eq!(tokens[2].span(), SourceSpan::from(5..8));
    }

    #[test]
    fn two_decimal_points_are_malformed() {
        let err = tokenize("1 + 1.2.3").unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedNumber {
                span: SourceSpan::from(4..9)
            }
        );
    }

    #[test]
    fn lone_dot_is_malformed() {
        let err = tokenize("2 * .").unwrap_err();
        assert!(matches!(err, ParseError::MalformedNumber { .. }));
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn unexpected_character_reports_char_and_position() {
        let err = tokenize("3 + x").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedCharacter {
                character: 'x',
                span: SourceSpan::from(4..5)
            }
        );
    }

    #[test]
    fn multibyte_character_span() {
        let err = tokenize("1 ÷ 2").unwrap_err();
        assert_eq!(
            err,
            ParseError::UnexpectedCharacter {
                character: '÷',
                span: SourceSpan::from(2..4)
            }
        );
    }

    #[test]
    fn retokenizing_is_idempotent() {
        let source = "(4 - 1.5) * 2";
        assert_eq!(tokenize(source).unwrap(), tokenize(source).unwrap());
    }

    #[test]
    fn display_matches_dump_format() {
        let tokens = tokenize("3.5 + 2").unwrap();
        let lines: Vec<String> = tokens.iter().map(ToString::to_string).collect();
        assert_eq!(
            lines,
            vec!["NUMBER 3.5 3.5", "PLUS + null", "NUMBER 2 2.0", "EOF  null"]
        );
    }
}
