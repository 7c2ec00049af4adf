#![allow(dead_code)]

use mini_script::interpreter::{Interpreter, RuntimeError, Value};
use mini_script::parser::Parser;
use mini_script::tokenizer::Tokenizer;

/// Tokenize, parse, and execute a source string in a fresh interpreter.
pub fn run(source: &str) -> Result<Interpreter, RuntimeError> {
    let tokens = Tokenizer::new(source).tokenize().expect("tokenize");
    let program = Parser::new(tokens).parse().expect("parse");
    let mut interpreter = Interpreter::new();
    interpreter.interpret(&program)?;
    Ok(interpreter)
}

pub fn global(interpreter: &Interpreter, name: &str) -> Value {
    interpreter
        .globals()
        .borrow()
        .get(name)
        .expect("global binding")
}

pub fn number(interpreter: &Interpreter, name: &str) -> f64 {
    match global(interpreter, name) {
        Value::Number(n) => n,
        other => panic!("expected number in '{}', got {:?}", name, other),
    }
}

pub fn string(interpreter: &Interpreter, name: &str) -> String {
    match global(interpreter, name) {
        Value::String(s) => s,
        other => panic!("expected string in '{}', got {:?}", name, other),
    }
}

pub fn boolean(interpreter: &Interpreter, name: &str) -> bool {
    match global(interpreter, name) {
        Value::Boolean(b) => b,
        other => panic!("expected boolean in '{}', got {:?}", name, other),
    }
}
