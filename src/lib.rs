pub mod ast;
pub mod interpreter;
pub mod modules;
pub mod parser;
pub mod tokenizer;
