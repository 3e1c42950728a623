//! Core library: lexer, parser, semantic tree, rewriter, and evaluator
//! for the rewrite language. The CLI driver in `main.rs` is the only
//! part of the crate that touches the filesystem.

pub mod ast;
pub mod builtins;
pub mod error;
pub mod eval;
pub mod lexer;
pub mod logger;
pub mod parser;
pub mod rewrite;
pub mod sexpr;
pub mod store;
pub mod token;

use error::Result;

/// Lexes, parses, and interprets `source`, returning the stringified
/// output of every `show` statement in order.
pub fn run_source(source: &str) -> Result<Vec<String>> {
    let lines = lexer::source_lines(source);
    let tokens = lexer::Lexer::new(source, &lines).tokenize()?;
    let stmts = parser::Parser::new(tokens, &lines).parse_program()?;
    eval::interpret_program(&stmts, &lines)
}
