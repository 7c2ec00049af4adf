//==============================================
// File: tests/fs.rs
//==============================================
// Goal: File I/O builtins
// Objective: Validate fopen/fwrite/fread/freadline/fwriteline/fexists
//            against real files in a temp directory
//==============================================

mod common;

use common::{boolean, number, run, string};
use std::fs;
use tempfile::tempdir;

#[test]
fn write_then_read_whole_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("out.txt");
    let script = format!(
        "var f = fopen(\"{p}\", \"w\");\n\
         var written = fwrite(f, \"hello\");\n\
         fclose(f);\n\
         var g = fopen(\"{p}\", \"r\");\n\
         var content = fread(g);\n\
         var status = fclose(g);",
        p = path.display()
    );
    let interp = run(&script).unwrap();
    assert_eq!(number(&interp, "written"), 5.0);
    assert_eq!(string(&interp, "content"), "hello");
    assert_eq!(number(&interp, "status"), 0.0);
}

#[test]
fn writeline_appends_newline() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("lines.txt");
    let script = format!(
        "var f = fopen(\"{p}\", \"w\");\n\
         fwriteline(f, \"one\");\n\
         fwriteline(f, \"two\");\n\
         fclose(f);",
        p = path.display()
    );
    run(&script).unwrap();
    assert_eq!(fs::read_to_string(&path).expect("read back"), "one\ntwo\n");
}

#[test]
fn readline_returns_lines_then_nil() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("input.txt");
    fs::write(&path, "first\nsecond\n").expect("seed file");
    let script = format!(
        "var f = fopen(\"{p}\", \"r\");\n\
         var a = freadline(f);\n\
         var b = freadline(f);\n\
         var c = freadline(f);\n\
         var at_eof = c == nil;\n\
         fclose(f);",
        p = path.display()
    );
    let interp = run(&script).unwrap();
    assert_eq!(string(&interp, "a"), "first");
    assert_eq!(string(&interp, "b"), "second");
    assert!(boolean(&interp, "at_eof"));
}

#[test]
fn readline_strips_carriage_returns() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("crlf.txt");
    fs::write(&path, "dos line\r\n").expect("seed file");
    let script = format!(
        "var f = fopen(\"{p}\", \"r\");\n\
         var line = freadline(f);\n\
         fclose(f);",
        p = path.display()
    );
    let interp = run(&script).unwrap();
    assert_eq!(string(&interp, "line"), "dos line");
}

#[test]
fn append_mode_extends_file() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("log.txt");
    fs::write(&path, "start\n").expect("seed file");
    let script = format!(
        "var f = fopen(\"{p}\", \"a\");\n\
         fwriteline(f, \"more\");\n\
         fclose(f);",
        p = path.display()
    );
    run(&script).unwrap();
    assert_eq!(
        fs::read_to_string(&path).expect("read back"),
        "start\nmore\n"
    );
}

#[test]
fn fopen_missing_file_returns_nil() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("missing.txt");
    let script = format!(
        "var f = fopen(\"{p}\", \"r\");\n\
         var failed = f == nil;",
        p = path.display()
    );
    let interp = run(&script).unwrap();
    assert!(boolean(&interp, "failed"));
}

#[test]
fn fexists_reflects_the_filesystem() {
    let dir = tempdir().expect("create temp dir");
    let present = dir.path().join("here.txt");
    fs::write(&present, "x").expect("seed file");
    let absent = dir.path().join("gone.txt");
    let script = format!(
        "var a = fexists(\"{p}\"); var b = fexists(\"{q}\");",
        p = present.display(),
        q = absent.display()
    );
    let interp = run(&script).unwrap();
    assert!(boolean(&interp, "a"));
    assert!(!boolean(&interp, "b"));
}

#[test]
fn closed_handle_rejects_further_io() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("closed.txt");
    let script = format!(
        "var f = fopen(\"{p}\", \"w\");\n\
         fwrite(f, \"before\");\n\
         var first = fclose(f);\n\
         var late_write = fwrite(f, \"after\");\n\
         var again = fclose(f);\n\
         var g = fopen(\"{p}\", \"r\");\n\
         fclose(g);\n\
         var late_read = fread(g);\n\
         var read_is_nil = late_read == nil;",
        p = path.display()
    );
    let interp = run(&script).unwrap();
    assert_eq!(number(&interp, "first"), 0.0);
    assert_eq!(number(&interp, "late_write"), -1.0);
    assert_eq!(number(&interp, "again"), -1.0);
    assert!(boolean(&interp, "read_is_nil"));
    // The write against the closed handle never reached the file.
    assert_eq!(fs::read_to_string(&path).expect("read back"), "before");
}

#[test]
fn close_is_shared_across_handle_copies() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("alias.txt");
    let script = format!(
        "var f = fopen(\"{p}\", \"w\");\n\
         var alias = f;\n\
         fclose(alias);\n\
         var status = fwrite(f, \"late\");",
        p = path.display()
    );
    let interp = run(&script).unwrap();
    assert_eq!(number(&interp, "status"), -1.0);
}

#[test]
fn readline_preserves_multibyte_text() {
    let dir = tempdir().expect("create temp dir");
    let path = dir.path().join("utf8.txt");
    fs::write(&path, "caf\u{e9}\nna\u{ef}ve\n").expect("seed file");
    let script = format!(
        "var f = fopen(\"{p}\", \"r\");\n\
         var a = freadline(f);\n\
         var b = freadline(f);\n\
         fclose(f);",
        p = path.display()
    );
    let interp = run(&script).unwrap();
    assert_eq!(string(&interp, "a"), "caf\u{e9}");
    assert_eq!(string(&interp, "b"), "na\u{ef}ve");
}

#[test]
fn fclose_of_non_handle_reports_failure_status() {
    let interp = run("var status = fclose(nil);").unwrap();
    assert_eq!(number(&interp, "status"), -1.0);
}

//==============================================
// End of file
//==============================================
