use formrw::error::{Error, Result};
use formrw::eval::interpret_program;
use formrw::lexer::{Lexer, source_lines};
use formrw::parser::Parser;

fn run(src: &str) -> Result<Vec<String>> {
    let lines = source_lines(src);
    let tokens = Lexer::new(src, &lines).tokenize()?;
    let stmts = Parser::new(tokens, &lines).parse_program()?;
    interpret_program(&stmts, &lines)
}

#[test]
fn let_and_show_a_bound_symbol() {
    let out = run("let x : a\nshow x").unwrap();
    assert_eq!(out, vec!["a"]);
}

#[test]
fn identity_form_round_trips_its_argument() {
    let out = run("form id : X -> X\nshow id[a]").unwrap();
    assert_eq!(out, vec!["a"]);
}

#[test]
fn unbound_symbol_stringifies_as_itself() {
    let out = run("show a").unwrap();
    assert_eq!(out, vec!["a"]);
}

#[test]
fn tuple_swap_form() {
    let out = run("form swap : (X Y) -> (Y X)\nshow swap[(a b)]").unwrap();
    assert_eq!(out, vec!["(b a)"]);
}

#[test]
fn first_compatible_rule_wins() {
    let out = run("form f : zero -> matched_zero\nform f : X -> matched_other\nshow f[zero]").unwrap();
    assert_eq!(out, vec!["matched_zero"]);
}

#[test]
fn iscomptime_is_false_outside_any_form_definition() {
    let out = run("show _ISCOMPTIME[a]").unwrap();
    assert_eq!(out, vec!["FALSE"]);
}

#[test]
fn ctcall_bakes_iscomptime_true_into_the_rhs_template_at_elaboration() {
    let out = run("form ct : X -> _ISCOMPTIME`[X]\nshow ct[anything]").unwrap();
    assert_eq!(out, vec!["TRUE"]);
}

#[test]
fn a_plain_call_to_iscomptime_in_a_rhs_is_not_baked_in_and_runs_at_show_time() {
    // A plain Call inside a form's RHS is stored literally at elaboration
    // time and only executed once the normalisation pass walks the
    // substituted result, by which point evaluation is back in runtime mode.
    let out = run("form f : X -> _ISCOMPTIME[X]\nshow f[a]").unwrap();
    assert_eq!(out, vec!["FALSE"]);
}

#[test]
fn ctcall_outside_a_form_definition_is_a_mode_error() {
    let err = run("show _ISCOMPTIME`[a]").unwrap_err();
    assert!(matches!(err, Error::Mode { .. }));
}

#[test]
fn unlink_removes_a_form_so_later_calls_fail() {
    let err = run("form id : X -> X\nunlink id\nshow id[a]").unwrap_err();
    assert!(matches!(err, Error::Name { .. }));
}

#[test]
fn redefining_a_symbol_as_a_form_is_a_conflict() {
    let err = run("let f : a\nform f : X -> X").unwrap_err();
    assert!(matches!(err, Error::Conflict { .. }));
}

#[test]
fn calls_introduced_by_substitution_are_themselves_expanded() {
    let out = run("form id : X -> X\nform wrap_id : X -> id[X]\nshow wrap_id[a]").unwrap();
    assert_eq!(out, vec!["a"]);
}

#[test]
fn quote_of_a_plain_symbol_is_unaffected() {
    let out = run("show `a").unwrap();
    assert_eq!(out, vec!["a"]);
}

#[test]
fn quote_only_blocks_the_immediate_translation_not_the_normalisation_pass() {
    // `` ` `` stops `id[a]` from being read as a surface Call, it becomes
    // a literal SExprCall instead, but the normalisation pass still finds
    // and executes that literal Call afterwards.
    let out = run("form id : X -> X\nshow `id[a]").unwrap();
    assert_eq!(out, vec!["a"]);
}

#[test]
fn unknown_call_target_is_a_name_error() {
    let err = run("show nosuch[a]").unwrap_err();
    assert!(matches!(err, Error::Name { .. }));
}

#[test]
fn chained_rewrites_only_descend_into_the_next_call_argument() {
    // The normalisation pass recurses into a call's argument before
    // dispatching, never into the value the dispatch produces, so a
    // chain of forms only unwinds one call per show statement's single
    // outer pass, with each rewrite's result itself carrying the next
    // literal call onward.
    let out = run(
        "form f : X -> g[X]\nform g : Y -> h[Y]\nform h : Z -> Z\nshow f[a]",
    )
    .unwrap();
    assert_eq!(out, vec!["h[a]"]);
}

#[test]
fn a_form_whose_rhs_calls_itself_does_not_recurse_without_bound() {
    let out = run("form loop : X -> loop[X]\nshow loop[a]").unwrap();
    assert_eq!(out, vec!["loop[a]"]);
}
