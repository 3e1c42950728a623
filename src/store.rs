//! The rule store: the process-wide mutable state a program builds up
//! as its statements execute.
//!
//! A name never inhabits both `symbols` and `transformations` at once;
//! every mutating method enforces this and returns a [`Error::Conflict`]
//! citing whichever table already holds the name.

use std::collections::HashMap;

use crate::builtins::{Builtin, builtin_table};
use crate::error::{Error, Loc, Result};
use crate::sexpr::SExpr;
use crate::token::Token;

pub struct RuleStore {
    symbols: HashMap<String, (SExpr, Token)>,
    transformations: HashMap<String, Vec<(SExpr, SExpr, Token)>>,
    meta_transformations: HashMap<String, Vec<(SExpr, SExpr)>>,
    builtins: HashMap<&'static str, Builtin>,
}

impl RuleStore {
    pub fn new() -> Self {
        RuleStore {
            symbols: HashMap::new(),
            transformations: HashMap::new(),
            meta_transformations: HashMap::new(),
            builtins: builtin_table(),
        }
    }

    pub fn symbol(&self, name: &str) -> Option<&SExpr> {
        self.symbols.get(name).map(|(value, _)| value)
    }

    pub fn is_transformation(&self, name: &str) -> bool {
        self.transformations.contains_key(name)
    }

    pub fn transformation_rules(&self, name: &str) -> Option<&[(SExpr, SExpr, Token)]> {
        self.transformations.get(name).map(Vec::as_slice)
    }

    pub fn meta_transformation_rules(&self, name: &str) -> Option<&[(SExpr, SExpr)]> {
        self.meta_transformations.get(name).map(Vec::as_slice)
    }

    pub fn builtin(&self, name: &str) -> Option<&Builtin> {
        self.builtins.get(name)
    }

    /// `let name := value`.
    pub fn define_symbol(
        &mut self,
        name: &str,
        value: SExpr,
        token: Token,
        source_lines: &[String],
    ) -> Result<()> {
        if let Some(rules) = self.transformations.get(name) {
            let (_, _, defining_token) = &rules[0];
            return Err(Error::conflict(
                format!("`{name}` is already defined as a form"),
                Loc::with_source(defining_token.line, defining_token.column, source_lines),
            ));
        }
        self.symbols.insert(name.to_string(), (value, token));
        Ok(())
    }

    /// `form name : lhs -> rhs`. Appends to both `transformations` (for
    /// runtime Calls) and `meta_transformations` (for CTCalls inside
    /// later form definitions).
    pub fn define_form(
        &mut self,
        name: &str,
        lhs: SExpr,
        rhs: SExpr,
        token: Token,
        source_lines: &[String],
    ) -> Result<()> {
        if let Some((_, defining_token)) = self.symbols.get(name) {
            return Err(Error::conflict(
                format!("`{name}` is already defined as a symbol"),
                Loc::with_source(defining_token.line, defining_token.column, source_lines),
            ));
        }
        self.meta_transformations
            .entry(name.to_string())
            .or_default()
            .push((lhs.clone(), rhs.clone()));
        self.transformations
            .entry(name.to_string())
            .or_default()
            .push((lhs, rhs, token));
        Ok(())
    }

    /// `unlink name`: drops a transformation or a symbol, whichever
    /// exists.
    pub fn unlink(&mut self, name: &str, loc: Loc) -> Result<()> {
        if self.transformations.remove(name).is_some() {
            self.meta_transformations.remove(name);
            return Ok(());
        }
        if self.symbols.remove(name).is_some() {
            return Ok(());
        }
        Err(Error::name(format!("nothing to unlink: `{name}`"), loc))
    }
}

impl Default for RuleStore {
    fn default() -> Self {
        Self::new()
    }
}
