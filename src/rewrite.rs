//! Pattern matching and substitution over [`SExpr`] trees.
//!
//! This is the hard part of the language: binding capital-letter
//! metavariables against a subject tree (`walk`), and substituting
//! bound values into a right-hand-side template while keeping the
//! substitution hygienic (`substitute`), so that a value bound to one
//! metavariable is never itself rewritten by a later substitution in
//! the same pass.

use std::collections::HashMap;

use crate::error::{Error, Loc, Result};
use crate::sexpr::SExpr;

pub type Bindings = HashMap<String, SExpr>;

/// Binds pattern metavariables in `form` against the subject `expr`.
///
/// Fails with a [`Error::Match`] carrying `loc` (the subject's source
/// location, supplied by the caller since `SExpr` itself carries none)
/// when `form` is not compatible with `expr`.
pub fn walk(expr: &SExpr, form: &SExpr, loc: &Loc) -> Result<Bindings> {
    let mut bindings = Bindings::new();
    walk_into(expr, form, &mut bindings, loc)?;
    Ok(bindings)
}

fn walk_into(expr: &SExpr, form: &SExpr, bindings: &mut Bindings, loc: &Loc) -> Result<()> {
    if let SExpr::Symbol { name, .. } = form {
        if SExpr::is_metavariable_symbol(name) {
            bindings.insert(name.clone(), expr.clone());
            return Ok(());
        }
    }
    match (form, expr) {
        (SExpr::Tuple { elements: fs, .. }, SExpr::Tuple { elements: es, .. }) => {
            if fs.len() != es.len() {
                return Err(Error::match_fail(
                    format!(
                        "tuple of {} element(s) is incompatible with pattern of {} element(s)",
                        es.len(),
                        fs.len()
                    ),
                    loc.clone(),
                ));
            }
            for (e, f) in es.iter().zip(fs.iter()) {
                walk_into(e, f, bindings, loc)?;
            }
            Ok(())
        }
        _ if form == expr => Ok(()),
        _ => Err(Error::match_fail(
            format!(
                "`{}` is incompatible with pattern `{}`",
                crate::sexpr::stringify(expr),
                crate::sexpr::stringify(form)
            ),
            loc.clone(),
        )),
    }
}

/// A non-erroring mirror of [`walk`], used to pick a rule from an
/// ordered list without having a location to report an error at.
pub fn is_compatible(expr: &SExpr, form: &SExpr) -> bool {
    let dummy = Loc::new(0, 0);
    walk(expr, form, &dummy).is_ok()
}

/// Replaces every subtree of `e` structurally equal to `a` with `b`,
/// not descending into any node whose `wrapped` flag is set.
pub fn replace(e: &SExpr, a: &SExpr, b: &SExpr) -> SExpr {
    if e == a {
        return b.clone();
    }
    if e.wrapped() {
        return e.clone();
    }
    match e {
        SExpr::Symbol { .. } => e.clone(),
        SExpr::Call { fun, arg, .. } => SExpr::Call {
            wrapped: false,
            fun: fun.clone(),
            arg: Box::new(replace(arg, a, b)),
        },
        SExpr::Tuple { elements, .. } => SExpr::Tuple {
            wrapped: false,
            elements: elements.iter().map(|el| replace(el, a, b)).collect(),
        },
    }
}

/// Marks the topmost node of `e` opaque to [`replace`]. Idempotent.
pub fn wrap(e: &SExpr) -> SExpr {
    let mut copy = e.clone();
    copy.set_wrapped(true);
    copy
}

/// Clears the topmost `wrapped` flag. Recurses into a Call's argument
/// only (never its function name); for a Tuple, sets the *top* flag to
/// `true` while unwrapping every element — this asymmetry is
/// deliberate and must not be "fixed".
pub fn unwrap(e: &SExpr) -> SExpr {
    match e {
        SExpr::Symbol { name, .. } => SExpr::Symbol {
            wrapped: false,
            name: name.clone(),
        },
        SExpr::Call { fun, arg, .. } => SExpr::Call {
            wrapped: false,
            fun: fun.clone(),
            arg: Box::new(unwrap(arg)),
        },
        SExpr::Tuple { elements, .. } => SExpr::Tuple {
            wrapped: true,
            elements: elements.iter().map(unwrap).collect(),
        },
    }
}

/// Matches `expr` against `lhs`, then substitutes the resulting
/// bindings into `rhs`, wrapping each bound value so that the
/// substitution of one metavariable cannot be disturbed by another.
pub fn substitute(expr: &SExpr, lhs: &SExpr, rhs: &SExpr, loc: &Loc) -> Result<SExpr> {
    let bindings = walk(expr, lhs, loc)?;
    let mut result = rhs.clone();
    for (name, value) in &bindings {
        result = replace(&result, &SExpr::symbol(name.clone()), &wrap(value));
    }
    Ok(unwrap(&result))
}

/// Tries every rule in `rules` in order, applying [`substitute`] with
/// the first whose `lhs` is compatible with `expr`.
pub fn substitute_compatible(expr: &SExpr, rules: &[(SExpr, SExpr)], loc: &Loc) -> Result<SExpr> {
    for (lhs, rhs) in rules {
        if is_compatible(expr, lhs) {
            return substitute(expr, lhs, rhs, loc);
        }
    }
    let candidates: Vec<String> = rules
        .iter()
        .map(|(lhs, _)| crate::sexpr::stringify(lhs))
        .collect();
    Err(Error::match_fail(
        format!(
            "`{}` is incompatible with any form; tried [{}]",
            crate::sexpr::stringify(expr),
            candidates.join(", ")
        ),
        loc.clone(),
    ))
}
