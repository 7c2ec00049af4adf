//==============================================
// File: tests/math.rs
//==============================================
// Goal: Arithmetic operator semantics
// Objective: Validate precedence, grouping, unary negation, comparisons,
//            and the division-by-zero policy
//==============================================

mod common;

use common::{boolean, number, run};
use mini_script::interpreter::RuntimeError;

#[test]
fn precedence_multiplication_binds_tighter() {
    let interp = run("var v = 2 + 3 * 4;").unwrap();
    assert_eq!(number(&interp, "v"), 14.0);
}

#[test]
fn grouping_overrides_precedence() {
    let interp = run("var v = (2 + 3) * 4;").unwrap();
    assert_eq!(number(&interp, "v"), 20.0);
}

#[test]
fn unary_minus_and_not() {
    let interp = run("var a = -5 + 2; var b = !true; var c = !nil;").unwrap();
    assert_eq!(number(&interp, "a"), -3.0);
    assert!(!boolean(&interp, "b"));
    assert!(boolean(&interp, "c"));
}

#[test]
fn division_produces_fractions() {
    let interp = run("var v = 7 / 2;").unwrap();
    assert_eq!(number(&interp, "v"), 3.5);
}

#[test]
fn division_by_zero_is_an_error() {
    let err = run("var v = 1 / 0;").unwrap_err();
    assert!(matches!(err, RuntimeError::DivisionByZero { line: 1 }));
}

#[test]
fn comparisons_yield_booleans() {
    let interp = run(
        "var a = 1 < 2; var b = 2 <= 2; var c = 3 > 4; var d = 4 >= 5;",
    )
    .unwrap();
    assert!(boolean(&interp, "a"));
    assert!(boolean(&interp, "b"));
    assert!(!boolean(&interp, "c"));
    assert!(!boolean(&interp, "d"));
}

#[test]
fn comparison_requires_numbers() {
    let err = run("var v = \"a\" < \"b\";").unwrap_err();
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

#[test]
fn subtraction_requires_numbers() {
    let err = run("var v = \"a\" - 1;").unwrap_err();
    assert!(matches!(err, RuntimeError::TypeMismatch { .. }));
}

//==============================================
// End of file
//==============================================
