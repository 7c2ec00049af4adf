//=============================================
// mini_script/interpreter.rs
//=============================================
// Goal: mini-script tree-walking evaluator
// Objective: Execute AST statements against chained lexical environments,
//            with value copy semantics and explicit control-flow signals
//=============================================

//=============================================
//            Section 1: Imports
//=============================================

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::ast::{Expr, Stmt};
use crate::modules::{self, ModuleError};
use crate::tokenizer::{LiteralValue, Token, TokenKind};

pub mod builtins;
pub mod errors;

use builtins::BuiltinRegistry;
pub use errors::RuntimeError;

//=============================================
//            Section 2: Runtime Values
//=============================================

/// A user-defined function: its declaration parts plus the environment
/// captured at declaration time.
#[derive(Debug)]
pub struct ScriptFunction {
    pub name: String,
    pub params: Vec<Token>,
    pub body: Vec<Stmt>,
    pub closure: Rc<RefCell<Environment>>,
}

/// mini-script runtime value types.
///
/// `Clone` is the copy operation of the language: structural deep copy for
/// the value types (Nil/Boolean/Number/String/List), shared reference for
/// the resource types (Function/FileHandle).
///
/// A file handle holds `None` once `fclose` has run; every alias of the
/// handle observes the closed state.
#[derive(Debug, Clone)]
pub enum Value {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Function(Rc<ScriptFunction>),
    Builtin(&'static str),
    FileHandle(Rc<RefCell<Option<File>>>),
}

impl PartialEq for Value {
    // Rust-level structural equality, used by tests. The language's `==`
    // operator goes through `values_equal` instead.
    fn eq(&self, other: &Self) -> bool {
        use Value::*;

        match (self, other) {
            (Nil, Nil) => true,
            (Boolean(a), Boolean(b)) => a == b,
            (Number(a), Number(b)) => a == b,
            (String(a), String(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Function(a), Function(b)) => Rc::ptr_eq(a, b),
            (Builtin(a), Builtin(b)) => a == b,
            (FileHandle(a), FileHandle(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Value {
    /// Truthiness: nil and false are falsy, everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Nil => false,
            Value::Boolean(b) => *b,
            _ => true,
        }
    }

    /// Human-readable name for the underlying runtime variant.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "nil",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::List(_) => "list",
            Value::Function(_) => "function",
            Value::Builtin(_) => "builtin",
            Value::FileHandle(_) => "file",
        }
    }

    /// The language's `==` semantics: defined for nil, booleans, numbers
    /// (IEEE equality) and strings; every other pairing is unequal,
    /// including a value compared with itself.
    pub fn values_equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            _ => false,
        }
    }
}

impl From<&LiteralValue> for Value {
    fn from(literal: &LiteralValue) -> Self {
        match literal {
            LiteralValue::Nil => Value::Nil,
            LiteralValue::Boolean(b) => Value::Boolean(*b),
            LiteralValue::Number(n) => Value::Number(*n),
            LiteralValue::String(s) => Value::String(s.clone()),
        }
    }
}

/// Display form used by `print`, string coercion, and `fwrite`.
pub fn stringify(value: &Value) -> String {
    value.to_string()
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => f.write_str("nil"),
            Value::Boolean(b) => write!(f, "{}", b),
            Value::Number(n) => {
                if n.fract() == 0.0 && n.is_finite() {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => f.write_str(s),
            Value::List(elements) => {
                f.write_str("[")?;
                for (i, element) in elements.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", element)?;
                }
                f.write_str("]")
            }
            Value::Function(func) => write!(f, "<fn {}>", func.name),
            Value::Builtin(name) => write!(f, "<builtin {}>", name),
            Value::FileHandle(_) => f.write_str("<file>"),
        }
    }
}

//=============================================
//            Section 3: Environments
//=============================================

/// A lexical scope: name bindings plus a link to the enclosing scope.
#[derive(Debug, Default)]
pub struct Environment {
    bindings: HashMap<String, Value>,
    enclosing: Option<Rc<RefCell<Environment>>>,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_enclosing(enclosing: Rc<RefCell<Environment>>) -> Self {
        Self {
            bindings: HashMap::new(),
            enclosing: Some(enclosing),
        }
    }

    /// Insert or overwrite a binding in this scope only. Defining a name
    /// bound in an enclosing scope shadows it rather than mutating it.
    pub fn define(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    /// Resolve a name through the scope chain. Returns a copy of the stored
    /// value (copy-on-read; resource types stay aliased via their Rc).
    pub fn get(&self, name: &str) -> Option<Value> {
        if let Some(value) = self.bindings.get(name) {
            return Some(value.clone());
        }
        self.enclosing
            .as_ref()
            .and_then(|parent| parent.borrow().get(name))
    }

    /// Replace an existing binding, searching outward through the chain.
    /// Returns false if the name is unbound everywhere; assignment never
    /// declares.
    pub fn assign(&mut self, name: &str, value: Value) -> bool {
        if let Some(slot) = self.bindings.get_mut(name) {
            *slot = value;
            return true;
        }
        match &self.enclosing {
            Some(parent) => parent.borrow_mut().assign(name, value),
            None => false,
        }
    }
}

//=============================================
//            Section 4: Control Flow
//=============================================

/// Outcome of executing a statement. `Return` unwinds to the nearest
/// function call frame; errors travel separately through `Result`.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Normal,
    Return(Value),
}

//=============================================
//            Section 5: Interpreter State
//=============================================

const MAX_CALL_DEPTH: usize = 100;

#[derive(Debug)]
pub struct Interpreter {
    globals: Rc<RefCell<Environment>>,
    environment: Rc<RefCell<Environment>>,
    builtins: BuiltinRegistry,
    call_depth: usize,
    max_call_depth: usize,
    // Directories of the scripts currently executing, innermost last.
    // Imports resolve relative to the top of this stack.
    script_dir_stack: Vec<PathBuf>,
    // Canonical paths of modules currently being imported (cycle guard).
    loading: HashSet<PathBuf>,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}

impl Interpreter {
    pub fn new() -> Self {
        let globals = Rc::new(RefCell::new(Environment::new()));
        let builtins = BuiltinRegistry::new();
        for name in builtins.names() {
            globals.borrow_mut().define(name, Value::Builtin(name));
        }
        Self {
            environment: globals.clone(),
            globals,
            builtins,
            call_depth: 0,
            max_call_depth: MAX_CALL_DEPTH,
            script_dir_stack: Vec::new(),
            loading: HashSet::new(),
        }
    }

    /// Record the path of the script about to run so imports resolve
    /// relative to its directory.
    pub fn set_script_path(&mut self, path: &Path) {
        if let Some(dir) = path.parent() {
            self.script_dir_stack = vec![dir.to_path_buf()];
        }
    }

    pub fn globals(&self) -> Rc<RefCell<Environment>> {
        self.globals.clone()
    }

    /// Execute a whole program. A top-level `return` stops execution
    /// without error; its value is discarded.
    pub fn interpret(&mut self, program: &[Stmt]) -> Result<(), RuntimeError> {
        for stmt in program {
            if let Flow::Return(_) = self.execute(stmt)? {
                break;
            }
        }
        Ok(())
    }

    //=============================================
    //            Section 6: Statement Execution
    //=============================================

    pub fn execute(&mut self, stmt: &Stmt) -> Result<Flow, RuntimeError> {
        match stmt {
            Stmt::Expression { expression } => {
                self.evaluate(expression)?;
                Ok(Flow::Normal)
            }
            Stmt::Print { expressions } => {
                let mut parts = Vec::with_capacity(expressions.len());
                for expr in expressions {
                    parts.push(stringify(&self.evaluate(expr)?));
                }
                write_line_to_stdout(&parts.join(" "))?;
                Ok(Flow::Normal)
            }
            Stmt::Var { name, initializer } => {
                let value = match initializer {
                    Some(init) => self.evaluate(init)?,
                    None => Value::Nil,
                };
                self.environment
                    .borrow_mut()
                    .define(name.lexeme.clone(), value);
                Ok(Flow::Normal)
            }
            Stmt::Block { statements } => {
                let child = Rc::new(RefCell::new(Environment::with_enclosing(
                    self.environment.clone(),
                )));
                let previous = std::mem::replace(&mut self.environment, child);
                let flow = self.execute_statements(statements);
                self.environment = previous;
                flow
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
            } => {
                if self.evaluate(condition)?.is_truthy() {
                    self.execute(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute(else_branch)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While { condition, body } => {
                while self.evaluate(condition)?.is_truthy() {
                    if let Flow::Return(value) = self.execute(body)? {
                        return Ok(Flow::Return(value));
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::For {
                initializer,
                condition,
                increment,
                body,
            } => {
                // One scope hosts the initializer binding and every
                // iteration; no fresh scope per iteration.
                let child = Rc::new(RefCell::new(Environment::with_enclosing(
                    self.environment.clone(),
                )));
                let previous = std::mem::replace(&mut self.environment, child);
                let flow = self.execute_for(
                    initializer.as_deref(),
                    condition.as_ref(),
                    increment.as_ref(),
                    body,
                );
                self.environment = previous;
                flow
            }
            Stmt::Function { name, params, body } => {
                let function = ScriptFunction {
                    name: name.lexeme.clone(),
                    params: params.clone(),
                    body: body.clone(),
                    closure: self.environment.clone(),
                };
                self.environment
                    .borrow_mut()
                    .define(name.lexeme.clone(), Value::Function(Rc::new(function)));
                Ok(Flow::Normal)
            }
            Stmt::Return { value, .. } => {
                let result = match value {
                    Some(expr) => self.evaluate(expr)?,
                    None => Value::Nil,
                };
                Ok(Flow::Return(result))
            }
            Stmt::Assert {
                keyword,
                condition,
                message,
            } => {
                if !self.evaluate(condition)?.is_truthy() {
                    let text = match message {
                        Some(expr) => stringify(&self.evaluate(expr)?),
                        None => "Assertion failed".to_string(),
                    };
                    return Err(RuntimeError::AssertionFailed {
                        message: text,
                        line: keyword.line,
                    });
                }
                Ok(Flow::Normal)
            }
            Stmt::Import { path } => self.execute_import(path),
        }
    }

    fn execute_statements(&mut self, statements: &[Stmt]) -> Result<Flow, RuntimeError> {
        for stmt in statements {
            match self.execute(stmt)? {
                Flow::Normal => {}
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_for(
        &mut self,
        initializer: Option<&Stmt>,
        condition: Option<&Expr>,
        increment: Option<&Expr>,
        body: &Stmt,
    ) -> Result<Flow, RuntimeError> {
        if let Some(init) = initializer {
            if let Flow::Return(value) = self.execute(init)? {
                return Ok(Flow::Return(value));
            }
        }
        loop {
            if let Some(cond) = condition {
                if !self.evaluate(cond)?.is_truthy() {
                    break;
                }
            }
            if let Flow::Return(value) = self.execute(body)? {
                return Ok(Flow::Return(value));
            }
            if let Some(inc) = increment {
                self.evaluate(inc)?;
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_import(&mut self, path_token: &Token) -> Result<Flow, RuntimeError> {
        let line = path_token.line;
        let spec = match &path_token.literal {
            Some(LiteralValue::String(s)) => s.clone(),
            _ => {
                return Err(RuntimeError::ImportParseError {
                    message: "Import path must be a string literal".to_string(),
                    line,
                })
            }
        };

        let script_dir = self.script_dir_stack.last().map(PathBuf::as_path);
        let resolved = modules::resolve_module_path(&spec, script_dir).ok_or_else(|| {
            RuntimeError::ImportNotFound {
                path: spec.clone(),
                line,
            }
        })?;
        let canonical = resolved
            .canonicalize()
            .unwrap_or_else(|_| resolved.clone());

        // Re-importing a module already on the load stack is a no-op.
        if self.loading.contains(&canonical) {
            return Ok(Flow::Normal);
        }

        let program = modules::load_module(&resolved).map_err(|err| match err {
            ModuleError::NotFound { path } => RuntimeError::ImportNotFound { path, line },
            other => RuntimeError::ImportParseError {
                message: other.to_string(),
                line,
            },
        })?;

        self.loading.insert(canonical.clone());
        if let Some(dir) = resolved.parent() {
            self.script_dir_stack.push(dir.to_path_buf());
        }

        // Top-level statements run in the importing environment; a
        // top-level return ends the module body early.
        let result = self.execute_statements(&program);

        if resolved.parent().is_some() {
            self.script_dir_stack.pop();
        }
        self.loading.remove(&canonical);

        result?;
        Ok(Flow::Normal)
    }

    //=============================================
    //            Section 7: Expression Evaluation
    //=============================================

    pub fn evaluate(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name } => {
                self.environment
                    .borrow()
                    .get(&name.lexeme)
                    .ok_or_else(|| RuntimeError::UndefinedVariable {
                        name: name.lexeme.clone(),
                        line: name.line,
                    })
            }
            Expr::Assign { name, value } => {
                let value = self.evaluate(value)?;
                if !self
                    .environment
                    .borrow_mut()
                    .assign(&name.lexeme, value.clone())
                {
                    return Err(RuntimeError::UndefinedVariable {
                        name: name.lexeme.clone(),
                        line: name.line,
                    });
                }
                Ok(value)
            }
            Expr::Binary {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                self.eval_binary_op(&left, operator, &right)
            }
            Expr::Logical {
                left,
                operator,
                right,
            } => {
                let left = self.evaluate(left)?;
                match operator.kind {
                    TokenKind::AndAnd => {
                        if !left.is_truthy() {
                            return Ok(Value::Boolean(false));
                        }
                    }
                    _ => {
                        if left.is_truthy() {
                            return Ok(Value::Boolean(true));
                        }
                    }
                }
                let right = self.evaluate(right)?;
                Ok(Value::Boolean(right.is_truthy()))
            }
            Expr::Unary { operator, right } => {
                let operand = self.evaluate(right)?;
                match operator.kind {
                    TokenKind::Minus => match operand {
                        Value::Number(n) => Ok(Value::Number(-n)),
                        other => Err(RuntimeError::TypeMismatch {
                            message: format!(
                                "Operator '-' not supported for {}",
                                other.type_name()
                            ),
                            line: operator.line,
                        }),
                    },
                    _ => Ok(Value::Boolean(!operand.is_truthy())),
                }
            }
            Expr::Grouping { expression } => self.evaluate(expression),
            Expr::ListLiteral { elements, .. } => {
                let mut values = Vec::with_capacity(elements.len());
                for element in elements {
                    values.push(self.evaluate(element)?);
                }
                Ok(Value::List(values))
            }
            Expr::Get {
                object,
                index,
                bracket,
            } => {
                let object = self.evaluate(object)?;
                let index = self.evaluate(index)?;
                let elements = match object {
                    Value::List(elements) => elements,
                    other => {
                        return Err(RuntimeError::TypeMismatch {
                            message: format!("Cannot index into {}", other.type_name()),
                            line: bracket.line,
                        })
                    }
                };
                let idx = expect_index(&index, elements.len(), bracket.line)?;
                Ok(elements[idx].clone())
            }
            Expr::Set {
                object,
                index,
                value,
                bracket,
            } => self.eval_set(object, index, value, bracket.line),
            Expr::Call {
                callee,
                paren,
                arguments,
            } => {
                let callee = self.evaluate(callee)?;
                let mut args = Vec::with_capacity(arguments.len());
                for argument in arguments {
                    args.push(self.evaluate(argument)?);
                }
                self.call_function(callee, args, paren.line)
            }
        }
    }

    fn eval_binary_op(
        &mut self,
        left: &Value,
        operator: &Token,
        right: &Value,
    ) -> Result<Value, RuntimeError> {
        let line = operator.line;
        match operator.kind {
            TokenKind::Plus => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
                (Value::String(_), _) | (_, Value::String(_)) => {
                    Ok(Value::String(format!("{}{}", stringify(left), stringify(right))))
                }
                _ => Err(type_mismatch("+", left, right, line)),
            },
            TokenKind::Minus => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a - b)),
                _ => Err(type_mismatch("-", left, right, line)),
            },
            TokenKind::Star => match (left, right) {
                (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a * b)),
                _ => Err(type_mismatch("*", left, right, line)),
            },
            TokenKind::Slash => match (left, right) {
                (Value::Number(a), Value::Number(b)) => {
                    if *b == 0.0 {
                        Err(RuntimeError::DivisionByZero { line })
                    } else {
                        Ok(Value::Number(a / b))
                    }
                }
                _ => Err(type_mismatch("/", left, right, line)),
            },
            TokenKind::Greater => compare_numbers(left, right, line, ">", |a, b| a > b),
            TokenKind::GreaterEqual => compare_numbers(left, right, line, ">=", |a, b| a >= b),
            TokenKind::Less => compare_numbers(left, right, line, "<", |a, b| a < b),
            TokenKind::LessEqual => compare_numbers(left, right, line, "<=", |a, b| a <= b),
            TokenKind::EqualEqual => Ok(Value::Boolean(left.values_equal(right))),
            _ => Ok(Value::Boolean(!left.values_equal(right))),
        }
    }

    // Element assignment with value-type lists: evaluate the index chain,
    // bounds-check the existing structure, evaluate the new value last,
    // then write the updated list back through the base binding.
    fn eval_set(
        &mut self,
        object: &Expr,
        index: &Expr,
        value: &Expr,
        line: usize,
    ) -> Result<Value, RuntimeError> {
        let mut chain: Vec<&Expr> = vec![index];
        let mut base = object;
        while let Expr::Get { object, index, .. } = base {
            chain.push(index);
            base = object;
        }
        chain.reverse();

        let mut list = match base {
            Expr::Variable { name } => self.environment.borrow().get(&name.lexeme).ok_or_else(
                || RuntimeError::UndefinedVariable {
                    name: name.lexeme.clone(),
                    line: name.line,
                },
            )?,
            other => self.evaluate(other)?,
        };

        let mut indices = Vec::with_capacity(chain.len());
        {
            let mut current = &list;
            for index_expr in &chain {
                let index_value = self.evaluate(index_expr)?;
                let elements = match current {
                    Value::List(elements) => elements,
                    other => {
                        return Err(RuntimeError::TypeMismatch {
                            message: format!("Cannot index into {}", other.type_name()),
                            line,
                        })
                    }
                };
                let idx = expect_index(&index_value, elements.len(), line)?;
                indices.push(idx);
                current = &elements[idx];
            }
        }

        let new_value = self.evaluate(value)?;

        {
            let mut slot = &mut list;
            for idx in &indices {
                match slot {
                    Value::List(elements) => slot = &mut elements[*idx],
                    // Structure was validated above.
                    _ => unreachable!("index chain descends through lists"),
                }
            }
            *slot = new_value.clone();
        }

        if let Expr::Variable { name } = base {
            self.environment.borrow_mut().assign(&name.lexeme, list);
        }
        // A non-variable base is a temporary; the mutation is discarded
        // with it.

        Ok(new_value)
    }

    //=============================================
    //            Section 8: Function Calls
    //=============================================

    pub fn call_function(
        &mut self,
        callee: Value,
        args: Vec<Value>,
        line: usize,
    ) -> Result<Value, RuntimeError> {
        match callee {
            Value::Builtin(name) => self.call_builtin(name, &args, line),
            Value::Function(func) => {
                if args.len() != func.params.len() {
                    return Err(RuntimeError::ArityMismatch {
                        message: format!(
                            "Function '{}' expected {} arguments but got {}",
                            func.name,
                            func.params.len(),
                            args.len()
                        ),
                        line,
                    });
                }
                if self.call_depth + 1 > self.max_call_depth {
                    return Err(RuntimeError::StackOverflow {
                        line,
                        limit: self.max_call_depth,
                    });
                }

                let frame = Rc::new(RefCell::new(Environment::with_enclosing(
                    func.closure.clone(),
                )));
                for (param, arg) in func.params.iter().zip(args) {
                    frame.borrow_mut().define(param.lexeme.clone(), arg);
                }

                self.call_depth += 1;
                let previous = std::mem::replace(&mut self.environment, frame);
                let result = self.execute_statements(&func.body);
                self.environment = previous;
                self.call_depth -= 1;

                match result? {
                    Flow::Return(value) => Ok(value),
                    Flow::Normal => Ok(Value::Nil),
                }
            }
            other => Err(RuntimeError::TypeMismatch {
                message: format!("Can only call functions, got {}", other.type_name()),
                line,
            }),
        }
    }

    fn call_builtin(
        &mut self,
        name: &str,
        args: &[Value],
        line: usize,
    ) -> Result<Value, RuntimeError> {
        let entry = self
            .builtins
            .lookup(name)
            .ok_or_else(|| RuntimeError::UnknownBuiltin {
                name: name.to_string(),
                line,
            })?;
        if !entry.arity.accepts(args.len()) {
            return Err(RuntimeError::ArityMismatch {
                message: format!(
                    "Builtin '{}' expects {} but got {}",
                    name,
                    entry.arity.describe(),
                    args.len()
                ),
                line,
            });
        }
        (entry.func)(self, args, line)
    }
}

//=============================================
//            Section 9: Helpers
//=============================================

fn type_mismatch(op: &str, left: &Value, right: &Value, line: usize) -> RuntimeError {
    RuntimeError::TypeMismatch {
        message: format!(
            "Operator '{}' not supported for {} and {}",
            op,
            left.type_name(),
            right.type_name()
        ),
        line,
    }
}

fn compare_numbers(
    left: &Value,
    right: &Value,
    line: usize,
    op: &str,
    cmp: fn(f64, f64) -> bool,
) -> Result<Value, RuntimeError> {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Boolean(cmp(*a, *b))),
        _ => Err(type_mismatch(op, left, right, line)),
    }
}

/// List index contract: the value must be a number; it is truncated to an
/// integer and must land inside the list.
fn expect_index(value: &Value, len: usize, line: usize) -> Result<usize, RuntimeError> {
    let number = match value {
        Value::Number(n) => *n,
        other => {
            return Err(RuntimeError::TypeMismatch {
                message: format!("List index must be a number, got {}", other.type_name()),
                line,
            })
        }
    };
    let idx = number.trunc() as i64;
    if idx < 0 || idx as usize >= len {
        return Err(RuntimeError::IndexOutOfBounds {
            message: format!("Index {} out of bounds for list of length {}", idx, len),
            line,
        });
    }
    Ok(idx as usize)
}

fn write_line_to_stdout(text: &str) -> Result<(), RuntimeError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", text)?;
    Ok(())
}

//=============================================
//            Section 10: Tests
//=============================================
