//! The evaluator: turns surface statements into rule-store mutations
//! and `show` output.
//!
//! Evaluation happens in two passes. [`interpret_expr`] walks the
//! surface tree once, in one of two modes (runtime or compile-time),
//! producing a semantic [`SExpr`]. [`interpret_sexpr`] then re-descends
//! that result, executing any `SExprCall` nodes it finds — this catches
//! calls that were never surface `Call` nodes at all, but arrived as
//! literal subtrees substituted in from a form's right-hand side. It
//! only recurses into a call's *argument* before dispatching, never
//! into the substitution's output — a rule whose RHS itself contains a
//! call is left as-is, to be expanded (if at all) the next time this
//! pass runs over it.

use crate::ast::{Expr, Stmt};
use crate::error::{Error, Loc, Result};
use crate::rewrite::substitute_compatible;
use crate::sexpr::{SExpr, lower, stringify};
use crate::store::RuleStore;

fn loc_of(token: &crate::token::Token, source_lines: &[String]) -> Loc {
    Loc::with_source(token.line, token.column, source_lines)
}

/// Evaluates a surface expression into an `SExpr`, in either runtime
/// or compile-time mode. Does not execute calls introduced by
/// substitution — see [`interpret_sexpr`] for that.
pub fn interpret_expr(
    expr: &Expr,
    compile_time: bool,
    store: &RuleStore,
    source_lines: &[String],
) -> Result<SExpr> {
    match expr {
        Expr::Symbol { name, .. } => {
            if compile_time {
                Ok(SExpr::symbol(name.clone()))
            } else {
                Ok(store.symbol(name).cloned().unwrap_or_else(|| SExpr::symbol(name.clone())))
            }
        }
        Expr::Tuple { elements, .. } => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(interpret_expr(element, compile_time, store, source_lines)?);
            }
            Ok(SExpr::Tuple {
                wrapped: false,
                elements: values,
            })
        }
        Expr::Quote { sentence, .. } => Ok(lower(sentence)),
        Expr::Call { token, fun, arg } => {
            let loc = loc_of(token, source_lines);
            if compile_time {
                let arg_value = interpret_expr(arg, true, store, source_lines)?;
                return Ok(SExpr::Call {
                    wrapped: false,
                    fun: fun.clone(),
                    arg: Box::new(arg_value),
                });
            }
            let arg_value = interpret_expr(arg, false, store, source_lines)?;
            if let Some(rules) = store.transformation_rules(fun) {
                let rules: Vec<(SExpr, SExpr)> =
                    rules.iter().map(|(l, r, _)| (l.clone(), r.clone())).collect();
                substitute_compatible(&arg_value, &rules, &loc)
            } else if let Some(builtin) = store.builtin(fun) {
                builtin(&arg_value, false, &loc)
            } else {
                Err(Error::name(
                    format!("unknown transformation or builtin `{fun}`"),
                    loc,
                ))
            }
        }
        Expr::CTCall { token, fun, arg } => {
            let loc = loc_of(token, source_lines);
            if !compile_time {
                return Err(Error::mode(
                    format!("`{fun}` called at compile time outside a form definition"),
                    loc,
                ));
            }
            let arg_value = interpret_expr(arg, true, store, source_lines)?;
            if let Some(rules) = store.meta_transformation_rules(fun) {
                let rules = rules.to_vec();
                substitute_compatible(&arg_value, &rules, &loc)
            } else if let Some(builtin) = store.builtin(fun) {
                builtin(&arg_value, true, &loc)
            } else {
                Err(Error::name(
                    format!("unknown transformation or builtin `{fun}`"),
                    loc,
                ))
            }
        }
    }
}

/// Re-descends a semantic tree, executing every `SExprCall` it finds.
/// At compile time this is the identity on `Call` nodes: a form
/// definition's rules are stored literally, not executed. Recursion
/// only reaches into a call's argument, never into the value a
/// dispatch produces — that value is returned as-is even if it
/// contains further `SExprCall` nodes.
pub fn interpret_sexpr(expr: &SExpr, compile_time: bool, store: &RuleStore, loc: &Loc) -> Result<SExpr> {
    match expr {
        SExpr::Symbol { .. } => Ok(expr.clone()),
        SExpr::Tuple { wrapped, elements } => {
            let mut values = Vec::with_capacity(elements.len());
            for element in elements {
                values.push(interpret_sexpr(element, compile_time, store, loc)?);
            }
            Ok(SExpr::Tuple {
                wrapped: *wrapped,
                elements: values,
            })
        }
        SExpr::Call { fun, arg, .. } => {
            if compile_time {
                return Ok(expr.clone());
            }
            let arg_value = interpret_sexpr(arg, false, store, loc)?;
            if let Some(rules) = store.transformation_rules(fun) {
                let rules: Vec<(SExpr, SExpr)> =
                    rules.iter().map(|(l, r, _)| (l.clone(), r.clone())).collect();
                substitute_compatible(&arg_value, &rules, loc)
            } else if let Some(builtin) = store.builtin(fun) {
                builtin(&arg_value, false, loc)
            } else {
                Err(Error::name(
                    format!("unknown transformation or builtin `{fun}`"),
                    loc.clone(),
                ))
            }
        }
    }
}

/// Evaluates `expr` and runs the normalisation pass over the result.
fn eval_and_normalize(
    expr: &Expr,
    compile_time: bool,
    store: &RuleStore,
    source_lines: &[String],
) -> Result<SExpr> {
    let loc = loc_of(expr.token(), source_lines);
    let value = interpret_expr(expr, compile_time, store, source_lines)?;
    interpret_sexpr(&value, compile_time, store, &loc)
}

/// Runs every statement in order against a fresh rule store, returning
/// the stringified result of each `show` statement in order.
///
/// An error aborts interpretation at the offending statement; the
/// `Vec` already collected for earlier `show` statements is discarded
/// along with the `Err`, so callers that need output preserved up to
/// the failure point should use [`interpret_program_streaming`]
/// instead — this wrapper exists for callers (tests, `lib.rs`) that
/// only care about the all-or-nothing result.
pub fn interpret_program(stmts: &[Stmt], source_lines: &[String]) -> Result<Vec<String>> {
    let mut output = Vec::new();
    interpret_program_streaming(stmts, source_lines, &mut |line| output.push(line.to_string()))?;
    Ok(output)
}

/// Runs every statement in order, invoking `on_show` with each `show`
/// statement's stringified result as soon as it is produced — so a
/// caller writing those lines straight to standard output preserves
/// everything printed before a later statement fails.
pub fn interpret_program_streaming(
    stmts: &[Stmt],
    source_lines: &[String],
    on_show: &mut dyn FnMut(&str),
) -> Result<()> {
    let mut store = RuleStore::new();
    for stmt in stmts {
        execute_stmt(stmt, &mut store, source_lines, on_show)?;
    }
    Ok(())
}

fn execute_stmt(
    stmt: &Stmt,
    store: &mut RuleStore,
    source_lines: &[String],
    on_show: &mut dyn FnMut(&str),
) -> Result<()> {
    match stmt {
        Stmt::Let { token, name, expr } => {
            let value = eval_and_normalize(expr, false, store, source_lines)?;
            store.define_symbol(name, value, token.clone(), source_lines)
        }
        Stmt::DefForm {
            token,
            name,
            lhs,
            rhs,
        } => {
            let lhs_value = eval_and_normalize(lhs, true, store, source_lines)?;
            let rhs_value = eval_and_normalize(rhs, true, store, source_lines)?;
            store.define_form(name, lhs_value, rhs_value, token.clone(), source_lines)
        }
        Stmt::Unlink { token, name } => {
            let loc = loc_of(token, source_lines);
            store.unlink(name, loc)
        }
        Stmt::Show { expr, .. } => {
            let value = eval_and_normalize(expr, false, store, source_lines)?;
            on_show(&stringify(&value));
            Ok(())
        }
    }
}
