mod common;

use common::{global, number, run};
use mini_script::interpreter::{RuntimeError, Value};

#[test]
fn for_loop_counts() {
    let interp = run(
        "var total = 0;\n\
         for (var i = 0; i < 5; i = i + 1) { total = total + i; }",
    )
    .unwrap();
    assert_eq!(number(&interp, "total"), 10.0);
}

#[test]
fn for_initializer_is_loop_scoped() {
    let err = run("for (var i = 0; i < 2; i = i + 1) { } var v = i;").unwrap_err();
    assert!(matches!(err, RuntimeError::UndefinedVariable { .. }));
}

#[test]
fn for_clauses_are_optional() {
    let interp = run(
        "var n = 0;\n\
         for (;;) { n = n + 1; if (n == 3) { return; } }",
    )
    .unwrap();
    assert_eq!(number(&interp, "n"), 3.0);
}

#[test]
fn list_literal_and_indexing() {
    let interp = run("var xs = [10, 20, 30]; var v = xs[1];").unwrap();
    assert_eq!(number(&interp, "v"), 20.0);
}

#[test]
fn index_of_expression_result() {
    let interp = run("var v = [10, 20, 30][2];").unwrap();
    assert_eq!(number(&interp, "v"), 30.0);
}

#[test]
fn out_of_bounds_raises() {
    let err = run("var v = [10, 20, 30][5];").unwrap_err();
    assert!(matches!(err, RuntimeError::IndexOutOfBounds { .. }));
    let err = run("var xs = [1]; var v = xs[-1];").unwrap_err();
    assert!(matches!(err, RuntimeError::IndexOutOfBounds { .. }));
}

#[test]
fn fractional_index_truncates() {
    let interp = run("var v = [10, 20, 30][1.9];").unwrap();
    assert_eq!(number(&interp, "v"), 20.0);
}

#[test]
fn element_assignment_writes_through_binding() {
    let interp = run("var xs = [1, 2, 3]; xs[1] = 99; var v = xs[1];").unwrap();
    assert_eq!(number(&interp, "v"), 99.0);
}

#[test]
fn element_assignment_returns_the_value() {
    let interp = run("var xs = [1, 2, 3]; var v = xs[0] = 7;").unwrap();
    assert_eq!(number(&interp, "v"), 7.0);
}

#[test]
fn lists_are_value_types() {
    // Copying a list then mutating the copy leaves the original alone.
    let interp = run(
        "var xs = [1, 2]; var ys = xs; ys[0] = 9;\n\
         var from_xs = xs[0]; var from_ys = ys[0];",
    )
    .unwrap();
    assert_eq!(number(&interp, "from_xs"), 1.0);
    assert_eq!(number(&interp, "from_ys"), 9.0);
}

#[test]
fn nested_lists_deep_copy() {
    let interp = run(
        "var grid = [[1, 2], [3, 4]];\n\
         var copy = grid; copy[0][0] = 99;\n\
         var original = grid[0][0];",
    )
    .unwrap();
    assert_eq!(number(&interp, "original"), 1.0);
}

#[test]
fn len_counts_elements() {
    let interp = run("var v = len([1, 2, 3, 4]);").unwrap();
    assert_eq!(number(&interp, "v"), 4.0);
}

#[test]
fn list_iteration_with_index() {
    let interp = run(
        "var xs = [2, 4, 6]; var total = 0;\n\
         for (var i = 0; i < len(xs); i = i + 1) { total = total + xs[i]; }",
    )
    .unwrap();
    assert_eq!(number(&interp, "total"), 12.0);
}

#[test]
fn heterogeneous_lists() {
    let interp = run("var xs = [1, \"two\", nil, true];").unwrap();
    assert_eq!(
        global(&interp, "xs"),
        Value::List(vec![
            Value::Number(1.0),
            Value::String("two".into()),
            Value::Nil,
            Value::Boolean(true),
        ])
    );
}
