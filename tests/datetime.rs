//==============================================
// File: tests/datetime.rs
//==============================================
// Goal: Time builtins
// Objective: Validate epoch arithmetic, parsing, formatting, and
//            component extraction in UTC
//==============================================

mod common;

use common::{boolean, number, run, string};

#[test]
fn time_now_is_recent() {
    let interp = run("var now = time_now(); var plausible = now > 1500000000;").unwrap();
    assert!(boolean(&interp, "plausible"));
}

#[test]
fn parse_date_only_format() {
    let interp = run(
        "var epoch = time_parse(\"2024-03-01\", \"%Y-%m-%d\");\n\
         var y = time_year(epoch); var m = time_month(epoch); var d = time_day(epoch);\n\
         var h = time_hour(epoch);",
    )
    .unwrap();
    assert_eq!(number(&interp, "y"), 2024.0);
    assert_eq!(number(&interp, "m"), 3.0);
    assert_eq!(number(&interp, "d"), 1.0);
    assert_eq!(number(&interp, "h"), 0.0);
}

#[test]
fn parse_datetime_format() {
    let interp = run(
        "var epoch = time_parse(\"2024-03-01 12:30:45\", \"%Y-%m-%d %H:%M:%S\");\n\
         var h = time_hour(epoch); var mi = time_minute(epoch); var s = time_second(epoch);",
    )
    .unwrap();
    assert_eq!(number(&interp, "h"), 12.0);
    assert_eq!(number(&interp, "mi"), 30.0);
    assert_eq!(number(&interp, "s"), 45.0);
}

#[test]
fn parse_failure_yields_nil() {
    let interp = run(
        "var bad = time_parse(\"garbage\", \"%Y-%m-%d\");\n\
         var is_nil = bad == nil;",
    )
    .unwrap();
    assert!(boolean(&interp, "is_nil"));
}

#[test]
fn format_round_trips_through_parse() {
    let interp = run(
        "var epoch = time_parse(\"2024-03-01 12:30:45\", \"%Y-%m-%d %H:%M:%S\");\n\
         var text = time_format(epoch, \"%Y-%m-%d %H:%M:%S\");",
    )
    .unwrap();
    assert_eq!(string(&interp, "text"), "2024-03-01 12:30:45");
}

#[test]
fn weekday_is_monday_based() {
    // 2024-03-01 was a Friday; Monday is 0.
    let interp = run(
        "var epoch = time_parse(\"2024-03-01\", \"%Y-%m-%d\");\n\
         var w = time_weekday(epoch);",
    )
    .unwrap();
    assert_eq!(number(&interp, "w"), 4.0);
}

#[test]
fn add_and_diff_are_plain_seconds() {
    let interp = run(
        "var a = time_parse(\"2024-03-01\", \"%Y-%m-%d\");\n\
         var b = time_add(a, 86400);\n\
         var day = time_day(b);\n\
         var delta = time_diff(b, a);",
    )
    .unwrap();
    assert_eq!(number(&interp, "day"), 2.0);
    assert_eq!(number(&interp, "delta"), 86400.0);
}

//==============================================
// End of file
//==============================================
