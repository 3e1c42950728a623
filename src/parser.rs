//! The parser module.
//!
//! The grammar (see `SPEC_FULL.md` §4.C):
//!
//! ```text
//! stmt := 'let'    SYMBOL ':' expr
//!       | 'form'   SYMBOL ':' expr '->' expr
//!       | 'unlink' SYMBOL
//!       | 'show'   expr
//! expr := '`' expr
//!       | SYMBOL ( '`' '[' expr ']'   -- CTCall
//!                |     '[' expr ']'   -- Call
//!                |                )   -- Symbol
//!       | '(' expr* ')'               -- Tuple
//! ```
//!
//! Parsing is a pure function of the token list: the parser holds no
//! mutable state beyond its read cursor, and never touches a rule store.

use crate::ast::{Expr, Stmt};
use crate::error::{Error, Loc, Result};
use crate::token::{Token, TokenKind};

pub struct Parser<'a> {
    tokens: Vec<Token>,
    pos: usize,
    source_lines: &'a [String],
}

impl<'a> Parser<'a> {
    pub fn new(tokens: Vec<Token>, source_lines: &'a [String]) -> Self {
        Parser {
            tokens,
            pos: 0,
            source_lines,
        }
    }

    fn loc_of(&self, token: &Token) -> Loc {
        Loc::with_source(token.line, token.column, self.source_lines)
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn eof_loc(&self) -> Loc {
        match self.tokens.last() {
            Some(t) => Loc::with_source(t.line, t.column + 1, self.source_lines),
            None => Loc::new(0, 0),
        }
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token> {
        match self.peek() {
            Some(t) if &t.kind == kind => Ok(self.advance().unwrap()),
            Some(t) => Err(Error::parse(
                format!("expected {kind}, found {}", t.kind),
                self.loc_of(t),
            )),
            None => Err(Error::parse(
                format!("expected {kind}, found end of input"),
                self.eof_loc(),
            )),
        }
    }

    fn expect_symbol(&mut self) -> Result<(Token, String)> {
        match self.peek() {
            Some(t) if t.as_symbol().is_some() => {
                let token = self.advance().unwrap();
                let name = token.as_symbol().unwrap().to_string();
                Ok((token, name))
            }
            Some(t) => Err(Error::parse(
                format!("expected symbol, found {}", t.kind),
                self.loc_of(t),
            )),
            None => Err(Error::parse(
                "expected symbol, found end of input",
                self.eof_loc(),
            )),
        }
    }

    fn starts_expr(token: &Token) -> bool {
        matches!(token.kind, TokenKind::Symbol(_) | TokenKind::LParen)
    }

    /// Parses a program: a sequence of statements consuming every token.
    pub fn parse_program(mut self) -> Result<Vec<Stmt>> {
        let mut stmts = Vec::new();
        while self.peek().is_some() {
            stmts.push(self.parse_stmt()?);
        }
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt> {
        let (token, keyword) = self.expect_symbol()?;
        match keyword.as_str() {
            "let" => {
                let (_, name) = self.expect_symbol()?;
                self.expect(&TokenKind::Colon)?;
                let expr = self.parse_expr()?;
                Ok(Stmt::Let { token, name, expr })
            }
            "form" => {
                let (_, name) = self.expect_symbol()?;
                self.expect(&TokenKind::Colon)?;
                let lhs = self.parse_expr()?;
                self.expect(&TokenKind::Arrow)?;
                let rhs = self.parse_expr()?;
                Ok(Stmt::DefForm {
                    token,
                    name,
                    lhs,
                    rhs,
                })
            }
            "unlink" => {
                let (_, name) = self.expect_symbol()?;
                Ok(Stmt::Unlink { token, name })
            }
            "show" => {
                let expr = self.parse_expr()?;
                Ok(Stmt::Show { token, expr })
            }
            other => Err(Error::parse(
                format!("expected `let`, `form`, `unlink`, or `show`, found `{other}`"),
                self.loc_of(&token),
            )),
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        match self.peek() {
            Some(t) if t.kind == TokenKind::Grave => {
                let token = self.advance().unwrap();
                let sentence = Box::new(self.parse_expr()?);
                Ok(Expr::Quote { token, sentence })
            }
            Some(t) if t.as_symbol().is_some() => self.parse_symbol_or_call(),
            Some(t) if t.kind == TokenKind::LParen => self.parse_tuple(),
            Some(t) => Err(Error::parse(
                format!("expected expression, found {}", t.kind),
                self.loc_of(t),
            )),
            None => Err(Error::parse(
                "expected expression, found end of input",
                self.eof_loc(),
            )),
        }
    }

    fn parse_symbol_or_call(&mut self) -> Result<Expr> {
        let token = self.advance().unwrap();
        let name = token.as_symbol().unwrap().to_string();

        let is_ct_call = matches!(self.peek(), Some(t) if t.kind == TokenKind::Grave)
            && matches!(self.peek_at(1), Some(t) if t.kind == TokenKind::LBrack);
        if is_ct_call {
            self.advance(); // grave
            self.advance(); // lbrack
            let arg = Box::new(self.parse_expr()?);
            self.expect(&TokenKind::RBrack)?;
            return Ok(Expr::CTCall {
                token,
                fun: name,
                arg,
            });
        }

        if matches!(self.peek(), Some(t) if t.kind == TokenKind::LBrack) {
            self.advance(); // lbrack
            let arg = Box::new(self.parse_expr()?);
            self.expect(&TokenKind::RBrack)?;
            return Ok(Expr::Call {
                token,
                fun: name,
                arg,
            });
        }

        Ok(Expr::Symbol { token, name })
    }

    fn parse_tuple(&mut self) -> Result<Expr> {
        let token = self.advance().unwrap(); // lparen
        let mut elements = Vec::new();
        while matches!(self.peek(), Some(t) if Self::starts_expr(t)) {
            elements.push(self.parse_expr()?);
        }
        self.expect(&TokenKind::RParen)?;
        Ok(Expr::Tuple { token, elements })
    }
}
