use formrw::run_source;

#[test]
fn run_source_executes_a_small_program() {
    let out = run_source("let x : a\nshow x\nshow (x x)").unwrap();
    assert_eq!(out, vec!["a", "(a a)"]);
}
