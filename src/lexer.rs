//! The lexer module.

use crate::error::{Error, Loc, Result};
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    chars: Vec<char>,
    source_lines: &'a [String],
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &str, source_lines: &'a [String]) -> Self {
        Lexer {
            chars: source.chars().collect(),
            source_lines,
            pos: 0,
            line: 0,
            column: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn loc(&self) -> Loc {
        Loc::with_source(self.line, self.column, self.source_lines)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
            self.column = 0;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn is_ident_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    /// Tokenises the whole source, consuming the lexer.
    pub fn tokenize(mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(c) = self.peek() {
            let line = self.line;
            let column = self.column;
            match c {
                '(' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::LParen, line, column));
                }
                ')' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::RParen, line, column));
                }
                '[' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::LBrack, line, column));
                }
                ']' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::RBrack, line, column));
                }
                ':' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Colon, line, column));
                }
                '`' => {
                    self.advance();
                    tokens.push(Token::new(TokenKind::Grave, line, column));
                }
                '-' => {
                    if self.peek_at(1).is_some() {
                        self.advance();
                        self.advance();
                        tokens.push(Token::new(TokenKind::Arrow, line, column));
                    } else {
                        return Err(Error::lex("unexpected end of input after `-`", self.loc()));
                    }
                }
                c if Self::is_ident_char(c) => {
                    let mut text = String::new();
                    while let Some(c) = self.peek() {
                        if Self::is_ident_char(c) {
                            text.push(c);
                            self.advance();
                        } else {
                            break;
                        }
                    }
                    tokens.push(Token::new(TokenKind::Symbol(text), line, column));
                }
                c if c.is_whitespace() => {
                    self.advance();
                }
                c => {
                    return Err(Error::lex(format!("unexpected character `{c}`"), self.loc()));
                }
            }
        }
        Ok(tokens)
    }
}

/// Splits `source` into lines for location reporting, without stripping the
/// final empty line semantics that `str::lines` already handles correctly.
pub fn source_lines(source: &str) -> Vec<String> {
    source.lines().map(str::to_string).collect()
}
