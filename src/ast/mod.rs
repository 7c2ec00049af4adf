//=====================================================
// File: ast.rs
//=====================================================
// Goal: mini-script Abstract Syntax Tree definitions
// Objective: Define AST node types for programs, statements, and expressions,
//            plus the source pretty-printer used by --print-ast
//=====================================================

use crate::tokenizer::{LiteralValue, Token};
use std::fmt;

/// Expression nodes. Each variant owns its sub-expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Literal {
        value: LiteralValue,
        line: usize,
    },
    Variable {
        name: Token,
    },
    Assign {
        name: Token,
        value: Box<Expr>,
    },
    Binary {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Logical {
        left: Box<Expr>,
        operator: Token,
        right: Box<Expr>,
    },
    Unary {
        operator: Token,
        right: Box<Expr>,
    },
    Call {
        callee: Box<Expr>,
        paren: Token,
        arguments: Vec<Expr>,
    },
    Grouping {
        expression: Box<Expr>,
    },
    ListLiteral {
        elements: Vec<Expr>,
        line: usize,
    },
    Get {
        object: Box<Expr>,
        index: Box<Expr>,
        bracket: Token,
    },
    Set {
        object: Box<Expr>,
        index: Box<Expr>,
        value: Box<Expr>,
        bracket: Token,
    },
}

impl Expr {
    /// Source line of the expression, for diagnostics.
    pub fn line(&self) -> usize {
        match self {
            Expr::Literal { line, .. } => *line,
            Expr::Variable { name } => name.line,
            Expr::Assign { name, .. } => name.line,
            Expr::Binary { operator, .. } => operator.line,
            Expr::Logical { operator, .. } => operator.line,
            Expr::Unary { operator, .. } => operator.line,
            Expr::Call { paren, .. } => paren.line,
            Expr::Grouping { expression } => expression.line(),
            Expr::ListLiteral { line, .. } => *line,
            Expr::Get { bracket, .. } => bracket.line,
            Expr::Set { bracket, .. } => bracket.line,
        }
    }
}

/// Statement nodes.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expression {
        expression: Expr,
    },
    Print {
        expressions: Vec<Expr>,
    },
    Var {
        name: Token,
        initializer: Option<Expr>,
    },
    Block {
        statements: Vec<Stmt>,
    },
    If {
        condition: Expr,
        then_branch: Box<Stmt>,
        else_branch: Option<Box<Stmt>>,
    },
    While {
        condition: Expr,
        body: Box<Stmt>,
    },
    For {
        initializer: Option<Box<Stmt>>,
        condition: Option<Expr>,
        increment: Option<Expr>,
        body: Box<Stmt>,
    },
    Function {
        name: Token,
        params: Vec<Token>,
        body: Vec<Stmt>,
    },
    Return {
        keyword: Token,
        value: Option<Expr>,
    },
    Assert {
        keyword: Token,
        condition: Expr,
        message: Option<Expr>,
    },
    Import {
        path: Token,
    },
}

/// A parsed program: the top-level statement list.
pub type Program = Vec<Stmt>;

fn escape_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            other => out.push(other),
        }
    }
    out
}

impl fmt::Display for LiteralValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LiteralValue::Nil => f.write_str("nil"),
            LiteralValue::Boolean(b) => write!(f, "{}", b),
            LiteralValue::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            LiteralValue::String(s) => write!(f, "\"{}\"", escape_string(s)),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Literal { value, .. } => write!(f, "{}", value),
            Expr::Variable { name } => f.write_str(&name.lexeme),
            Expr::Assign { name, value } => write!(f, "{} = {}", name.lexeme, value),
            Expr::Binary {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator.lexeme, right),
            Expr::Logical {
                left,
                operator,
                right,
            } => write!(f, "{} {} {}", left, operator.lexeme, right),
            Expr::Unary { operator, right } => write!(f, "{}{}", operator.lexeme, right),
            Expr::Call {
                callee, arguments, ..
            } => {
                write!(f, "{}(", callee)?;
                for (i, arg) in arguments.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(")")
            }
            Expr::Grouping { expression } => write!(f, "({})", expression),
            Expr::ListLiteral { elements, .. } => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Expr::Get { object, index, .. } => write!(f, "{}[{}]", object, index),
            Expr::Set {
                object,
                index,
                value,
                ..
            } => write!(f, "{}[{}] = {}", object, index, value),
        }
    }
}

impl Stmt {
    fn fmt_indented(&self, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
        let pad = "    ".repeat(indent);
        match self {
            Stmt::Expression { expression } => writeln!(f, "{}{};", pad, expression),
            Stmt::Print { expressions } => {
                write!(f, "{}print ", pad)?;
                for (i, expr) in expressions.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", expr)?;
                }
                writeln!(f, ";")
            }
            Stmt::Var { name, initializer } => match initializer {
                Some(init) => writeln!(f, "{}var {} = {};", pad, name.lexeme, init),
                None => writeln!(f, "{}var {};", pad, name.lexeme),
            },
            Stmt::Block { statements } => {
                writeln!(f, "{}{{", pad)?;
                for stmt in statements {
                    stmt.fmt_indented(f, indent + 1)?;
                }
                writeln!(f, "{}}}", pad)
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                writeln!(f, "{}if ({})", pad, condition)?;
                then_branch.fmt_indented(f, indent)?;
                if let Some(else_branch) = else_branch {
                    writeln!(f, "{}else", pad)?;
                    else_branch.fmt_indented(f, indent)?;
                }
                Ok(())
            }
            Stmt::While { condition, body } => {
                writeln!(f, "{}while ({})", pad, condition)?;
                body.fmt_indented(f, indent)
            }
            Stmt::For {
                initializer,
                condition,
                increment,
                body,
            } => {
                write!(f, "{}for (", pad)?;
                match initializer.as_deref() {
                    Some(Stmt::Var { name, initializer }) => match initializer {
                        Some(init) => write!(f, "var {} = {};", name.lexeme, init)?,
                        None => write!(f, "var {};", name.lexeme)?,
                    },
                    Some(Stmt::Expression { expression }) => write!(f, "{};", expression)?,
                    _ => write!(f, ";")?,
                }
                match condition {
                    Some(cond) => write!(f, " {};", cond)?,
                    None => write!(f, ";")?,
                }
                match increment {
                    Some(inc) => writeln!(f, " {})", inc)?,
                    None => writeln!(f, ")")?,
                }
                body.fmt_indented(f, indent)
            }
            Stmt::Function { name, params, body } => {
                write!(f, "{}function {}(", pad, name.lexeme)?;
                for (i, param) in params.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    f.write_str(&param.lexeme)?;
                }
                writeln!(f, ") {{")?;
                for stmt in body {
                    stmt.fmt_indented(f, indent + 1)?;
                }
                writeln!(f, "{}}}", pad)
            }
            Stmt::Return { value, .. } => match value {
                Some(value) => writeln!(f, "{}return {};", pad, value),
                None => writeln!(f, "{}return;", pad),
            },
            Stmt::Assert {
                condition, message, ..
            } => match message {
                Some(message) => writeln!(f, "{}assert({}, {});", pad, condition, message),
                None => writeln!(f, "{}assert({});", pad, condition),
            },
            Stmt::Import { path } => {
                writeln!(f, "{}import {};", pad, path.lexeme)
            }
        }
    }
}

impl fmt::Display for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_indented(f, 0)
    }
}

/// Render a whole program back to source form.
pub fn pretty_print(program: &[Stmt]) -> String {
    let mut out = String::new();
    for stmt in program {
        out.push_str(&stmt.to_string());
    }
    out
}
