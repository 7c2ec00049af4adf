//=============================================
// mini_script/main.rs
//=============================================
// Goal: mini-script CLI entrypoint for running .ms scripts
// Objective: Provide script execution, AST pretty-printing, and a
//            line-oriented REPL with sysexits-style status codes
//=============================================

use anyhow::{Context, Result};
use clap::error::ErrorKind;
use clap::Parser as ClapParser;
use mini_script::ast::pretty_print;
use mini_script::interpreter::Interpreter;
use mini_script::parser::Parser;
use mini_script::tokenizer::Tokenizer;
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;

// sysexits-style status codes, matching the language's reference CLI.
const EXIT_USAGE: i32 = 64;
const EXIT_DATA: i32 = 65;
const EXIT_SOFTWARE: i32 = 70;
const EXIT_NOINPUT: i32 = 74;

//=============================================
//            Section 1: CLI Definition
//=============================================

#[derive(Debug, ClapParser)]
#[command(
    name = "mini_script",
    about = "Runs mini-script files or an interactive REPL.",
    version
)]
struct Args {
    /// Path to the mini-script file to execute. Starts a REPL when omitted.
    script: Option<PathBuf>,

    /// Pretty-print the parsed AST instead of executing.
    #[arg(long)]
    print_ast: bool,
}

//=============================================
//            Section 2: Entry Point
//=============================================

fn main() -> Result<()> {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err)
            if matches!(
                err.kind(),
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion
            ) =>
        {
            let _ = err.print();
            return Ok(());
        }
        Err(err) => {
            let _ = err.print();
            process::exit(EXIT_USAGE);
        }
    };

    match args.script {
        Some(path) => run_file(&path, args.print_ast),
        None => run_repl(),
    }
}

fn run_file(path: &Path, print_ast: bool) -> Result<()> {
    let source = match fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))
    {
        Ok(source) => source,
        Err(err) => {
            eprintln!("{:#}", err);
            process::exit(EXIT_NOINPUT);
        }
    };

    let program = match parse_source(&source) {
        Ok(program) => program,
        Err(message) => {
            eprintln!("{}", message);
            process::exit(EXIT_DATA);
        }
    };

    if print_ast {
        print!("{}", pretty_print(&program));
        return Ok(());
    }

    let mut interpreter = Interpreter::new();
    interpreter.set_script_path(path);
    if let Err(err) = interpreter.interpret(&program) {
        eprintln!("{}", err);
        process::exit(EXIT_SOFTWARE);
    }
    Ok(())
}

//=============================================
//            Section 3: REPL
//=============================================

fn run_repl() -> Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut interpreter = Interpreter::new();

    loop {
        print!("> ");
        io::stdout().flush().context("Failed to flush stdout")?;

        let line = match lines.next() {
            Some(line) => line.context("Failed to read from stdin")?,
            None => break,
        };
        if line.trim() == "exit" {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        // An error abandons this line only; the session keeps its state.
        match parse_source(&line) {
            Ok(program) => {
                if let Err(err) = interpreter.interpret(&program) {
                    eprintln!("{}", err);
                }
            }
            Err(message) => eprintln!("{}", message),
        }
    }
    Ok(())
}

fn parse_source(source: &str) -> std::result::Result<Vec<mini_script::ast::Stmt>, String> {
    let tokens = Tokenizer::new(source)
        .tokenize()
        .map_err(|err| err.to_string())?;
    Parser::new(tokens).parse().map_err(|err| err.to_string())
}
