//! Built-in transformations: forms that exist without a user-written
//! `form` statement, implemented directly in Rust instead of via
//! pattern-matching rules.

use std::collections::HashMap;

use crate::error::{Loc, Result};
use crate::sexpr::SExpr;

/// A built-in receives the already-evaluated argument, whether the
/// call site is in compile-time mode, and its source location (for any
/// error it might need to raise).
pub type Builtin = fn(arg: &SExpr, compile_time: bool, loc: &Loc) -> Result<SExpr>;

/// `_ISCOMPTIME[anything]`: `TRUE` in compile-time mode, `FALSE`
/// otherwise. The argument is never inspected.
fn iscomptime(_arg: &SExpr, compile_time: bool, _loc: &Loc) -> Result<SExpr> {
    Ok(SExpr::symbol(if compile_time { "TRUE" } else { "FALSE" }))
}

/// The table of every builtin known to the evaluator, keyed by name.
pub fn builtin_table() -> HashMap<&'static str, Builtin> {
    let mut table: HashMap<&'static str, Builtin> = HashMap::new();
    table.insert("_ISCOMPTIME", iscomptime);
    table
}
