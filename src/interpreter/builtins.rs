//=============================================
// mini_script/builtins.rs
//=============================================
// Goal: Host-provided builtin functions
// Objective: Register and implement the print/len/assert, file I/O, and
//            time builtin surface dispatched by name at call time
//=============================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::{Read, Write};
use std::path::Path;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Timelike, Utc};

use super::{stringify, Interpreter, RuntimeError, Value};

//=============================================
//            Section 1: Native Arity
//=============================================

/// Supported arity constraints for builtin functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeArity {
    /// The function expects exactly this many arguments.
    Exact(usize),
    /// The function accepts a range of arguments defined by the inclusive
    /// minimum and an optional maximum. `None` indicates "no upper bound".
    Range { min: usize, max: Option<usize> },
}

impl NativeArity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            NativeArity::Exact(n) => *n == count,
            NativeArity::Range { min, max } => {
                if count < *min {
                    return false;
                }
                match max {
                    Some(max) => count <= *max,
                    None => true,
                }
            }
        }
    }

    pub fn describe(&self) -> String {
        match self {
            NativeArity::Exact(n) => format!("{} arguments", n),
            NativeArity::Range { min, max } => match max {
                Some(max) if min == max => format!("{} arguments", min),
                Some(max) => format!("{}..={} arguments", min, max),
                None => {
                    if *min == 0 {
                        "any number of arguments".to_string()
                    } else {
                        format!("at least {} arguments", min)
                    }
                }
            },
        }
    }
}

//=============================================
//            Section 2: Registry
//=============================================

pub type BuiltinFn = fn(&mut Interpreter, &[Value], usize) -> Result<Value, RuntimeError>;

#[derive(Clone, Copy, Debug)]
pub struct BuiltinEntry {
    pub arity: NativeArity,
    pub func: BuiltinFn,
}

#[derive(Debug)]
pub struct BuiltinRegistry {
    entries: HashMap<&'static str, BuiltinEntry>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            entries: HashMap::new(),
        };
        registry.init_builtins();
        registry
    }

    fn init_builtins(&mut self) {
        self.register("print", NativeArity::Range { min: 0, max: None }, builtin_print);
        self.register("len", NativeArity::Exact(1), builtin_len);
        self.register(
            "assert",
            NativeArity::Range { min: 1, max: Some(2) },
            builtin_assert,
        );

        self.register("fopen", NativeArity::Exact(2), builtin_fopen);
        self.register("fclose", NativeArity::Exact(1), builtin_fclose);
        self.register("fwrite", NativeArity::Exact(2), builtin_fwrite);
        self.register("fread", NativeArity::Exact(1), builtin_fread);
        self.register("freadline", NativeArity::Exact(1), builtin_freadline);
        self.register("fwriteline", NativeArity::Exact(2), builtin_fwriteline);
        self.register("fexists", NativeArity::Exact(1), builtin_fexists);

        self.register("time_now", NativeArity::Exact(0), builtin_time_now);
        self.register("time_parse", NativeArity::Exact(2), builtin_time_parse);
        self.register("time_format", NativeArity::Exact(2), builtin_time_format);
        self.register("time_year", NativeArity::Exact(1), builtin_time_year);
        self.register("time_month", NativeArity::Exact(1), builtin_time_month);
        self.register("time_day", NativeArity::Exact(1), builtin_time_day);
        self.register("time_hour", NativeArity::Exact(1), builtin_time_hour);
        self.register("time_minute", NativeArity::Exact(1), builtin_time_minute);
        self.register("time_second", NativeArity::Exact(1), builtin_time_second);
        self.register("time_weekday", NativeArity::Exact(1), builtin_time_weekday);
        self.register("time_add", NativeArity::Exact(2), builtin_time_add);
        self.register("time_diff", NativeArity::Exact(2), builtin_time_diff);

        self.register("sleep", NativeArity::Exact(1), builtin_sleep);
    }

    fn register(&mut self, name: &'static str, arity: NativeArity, func: BuiltinFn) {
        self.entries.insert(name, BuiltinEntry { arity, func });
    }

    pub fn lookup(&self, name: &str) -> Option<BuiltinEntry> {
        self.entries.get(name).copied()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.entries.keys().copied().collect()
    }
}

//=============================================
//            Section 3: Argument Helpers
//=============================================

fn expect_number(value: &Value, builtin: &str, line: usize) -> Result<f64, RuntimeError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(RuntimeError::TypeMismatch {
            message: format!(
                "{}() expects a number argument, got {}",
                builtin,
                other.type_name()
            ),
            line,
        }),
    }
}

fn expect_string<'a>(value: &'a Value, builtin: &str, line: usize) -> Result<&'a str, RuntimeError> {
    match value {
        Value::String(s) => Ok(s.as_str()),
        other => Err(RuntimeError::TypeMismatch {
            message: format!(
                "{}() expects a string argument, got {}",
                builtin,
                other.type_name()
            ),
            line,
        }),
    }
}

fn timestamp_to_datetime(epoch: f64, builtin: &str, line: usize) -> Result<DateTime<Utc>, RuntimeError> {
    DateTime::<Utc>::from_timestamp(epoch as i64, 0).ok_or_else(|| RuntimeError::TypeMismatch {
        message: format!("{}() received an invalid timestamp", builtin),
        line,
    })
}

//=============================================
//            Section 4: Core Builtins
//=============================================

fn builtin_print(_: &mut Interpreter, args: &[Value], _line: usize) -> Result<Value, RuntimeError> {
    let parts: Vec<String> = args.iter().map(stringify).collect();
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{}", parts.join(" "))?;
    Ok(Value::Nil)
}

fn builtin_len(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::String(s) => Ok(Value::Number(s.len() as f64)),
        Value::List(elements) => Ok(Value::Number(elements.len() as f64)),
        other => Err(RuntimeError::TypeMismatch {
            message: format!("len() expects a string or a list, got {}", other.type_name()),
            line,
        }),
    }
}

fn builtin_assert(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    if args[0].is_truthy() {
        return Ok(Value::Nil);
    }
    let message = match args.get(1) {
        Some(value) => stringify(value),
        None => "Assertion failed".to_string(),
    };
    Err(RuntimeError::AssertionFailed { message, line })
}

fn builtin_sleep(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    let seconds = expect_number(&args[0], "sleep", line)?;
    if seconds.is_nan() || seconds < 0.0 {
        return Err(RuntimeError::TypeMismatch {
            message: "sleep() duration must be a non-negative number".to_string(),
            line,
        });
    }
    std::thread::sleep(Duration::from_secs_f64(seconds));
    Ok(Value::Nil)
}

//=============================================
//            Section 5: File Builtins
//=============================================

fn builtin_fopen(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    let path = expect_string(&args[0], "fopen", line)?;
    let mode = expect_string(&args[1], "fopen", line)?;

    let mut options = OpenOptions::new();
    match mode {
        "r" => options.read(true),
        "w" => options.write(true).create(true).truncate(true),
        "a" => options.append(true).create(true),
        other => {
            return Err(RuntimeError::TypeMismatch {
                message: format!("fopen() mode must be \"r\", \"w\", or \"a\", got \"{}\"", other),
                line,
            })
        }
    };

    // Open failure is not an error: scripts test the result against nil.
    match options.open(path) {
        Ok(file) => Ok(Value::FileHandle(Rc::new(RefCell::new(Some(file))))),
        Err(_) => Ok(Value::Nil),
    }
}

fn builtin_fclose(_: &mut Interpreter, args: &[Value], _line: usize) -> Result<Value, RuntimeError> {
    // Closing an already-closed or non-handle value reports status -1.
    match &args[0] {
        Value::FileHandle(handle) => match handle.borrow_mut().take() {
            // Dropping the taken File releases the OS handle.
            Some(file) => {
                drop(file);
                Ok(Value::Number(0.0))
            }
            None => Ok(Value::Number(-1.0)),
        },
        _ => Ok(Value::Number(-1.0)),
    }
}

fn builtin_fwrite(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    write_to_handle(&args[0], &args[1], false, line)
}

fn builtin_fwriteline(
    _: &mut Interpreter,
    args: &[Value],
    line: usize,
) -> Result<Value, RuntimeError> {
    write_to_handle(&args[0], &args[1], true, line)
}

fn write_to_handle(
    handle: &Value,
    payload: &Value,
    newline: bool,
    line: usize,
) -> Result<Value, RuntimeError> {
    let file = match handle {
        Value::FileHandle(file) => file,
        other => {
            return Err(RuntimeError::TypeMismatch {
                message: format!("fwrite() expects a file handle, got {}", other.type_name()),
                line,
            })
        }
    };

    let mut content = stringify(payload);
    if newline {
        content.push('\n');
    }

    let mut guard = file.borrow_mut();
    let file = match guard.as_mut() {
        Some(file) => file,
        // Writing to a closed handle reports status -1.
        None => return Ok(Value::Number(-1.0)),
    };
    match file.write_all(content.as_bytes()) {
        Ok(()) => {
            let _ = file.flush();
            Ok(Value::Number(content.len() as f64))
        }
        Err(_) => Ok(Value::Number(-1.0)),
    }
}

fn builtin_fread(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    let file = match &args[0] {
        Value::FileHandle(file) => file,
        other => {
            return Err(RuntimeError::TypeMismatch {
                message: format!("fread() expects a file handle, got {}", other.type_name()),
                line,
            })
        }
    };

    let mut guard = file.borrow_mut();
    let file = match guard.as_mut() {
        Some(file) => file,
        None => return Ok(Value::Nil),
    };
    let mut contents = String::new();
    match file.read_to_string(&mut contents) {
        Ok(_) => Ok(Value::String(contents)),
        Err(_) => Ok(Value::Nil),
    }
}

fn builtin_freadline(
    _: &mut Interpreter,
    args: &[Value],
    line: usize,
) -> Result<Value, RuntimeError> {
    let file = match &args[0] {
        Value::FileHandle(file) => file,
        other => {
            return Err(RuntimeError::TypeMismatch {
                message: format!("freadline() expects a file handle, got {}", other.type_name()),
                line,
            })
        }
    };

    let mut guard = file.borrow_mut();
    let file = match guard.as_mut() {
        Some(file) => file,
        None => return Ok(Value::Nil),
    };

    // Byte-at-a-time keeps the handle's position exact for the next call.
    // The line is gathered as raw bytes and decoded once, so multi-byte
    // UTF-8 sequences survive intact.
    let mut bytes = Vec::new();
    let mut buffer = [0u8; 1];
    let mut read_any = false;
    loop {
        match file.read(&mut buffer) {
            Ok(0) => break,
            Ok(_) => {
                read_any = true;
                match buffer[0] {
                    b'\n' => break,
                    b'\r' => {}
                    byte => bytes.push(byte),
                }
            }
            Err(_) => return Ok(Value::Nil),
        }
    }

    if read_any {
        Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    } else {
        Ok(Value::Nil)
    }
}

fn builtin_fexists(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    let path = expect_string(&args[0], "fexists", line)?;
    Ok(Value::Boolean(Path::new(path).is_file()))
}

//=============================================
//            Section 6: Time Builtins
//=============================================

fn builtin_time_now(_: &mut Interpreter, _: &[Value], _line: usize) -> Result<Value, RuntimeError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_secs_f64();
    Ok(Value::Number(now.trunc()))
}

fn builtin_time_parse(
    _: &mut Interpreter,
    args: &[Value],
    line: usize,
) -> Result<Value, RuntimeError> {
    let text = expect_string(&args[0], "time_parse", line)?;
    let format = expect_string(&args[1], "time_parse", line)?;

    if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
        return Ok(Value::Number(dt.and_utc().timestamp() as f64));
    }
    // A date-only format parses as midnight UTC.
    if let Some(dt) = NaiveDate::parse_from_str(text, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(Value::Number(dt.and_utc().timestamp() as f64));
    }
    Ok(Value::Nil)
}

fn builtin_time_format(
    _: &mut Interpreter,
    args: &[Value],
    line: usize,
) -> Result<Value, RuntimeError> {
    let epoch = expect_number(&args[0], "time_format", line)?;
    let format = expect_string(&args[1], "time_format", line)?;
    let datetime = timestamp_to_datetime(epoch, "time_format", line)?;
    Ok(Value::String(datetime.format(format).to_string()))
}

macro_rules! time_component_builtin {
    ($func:ident, $name:literal, $method:ident) => {
        fn $func(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
            let epoch = expect_number(&args[0], $name, line)?;
            let datetime = timestamp_to_datetime(epoch, $name, line)?;
            Ok(Value::Number(datetime.$method() as f64))
        }
    };
}

time_component_builtin!(builtin_time_year, "time_year", year);
time_component_builtin!(builtin_time_month, "time_month", month);
time_component_builtin!(builtin_time_day, "time_day", day);
time_component_builtin!(builtin_time_hour, "time_hour", hour);
time_component_builtin!(builtin_time_minute, "time_minute", minute);
time_component_builtin!(builtin_time_second, "time_second", second);

fn builtin_time_weekday(
    _: &mut Interpreter,
    args: &[Value],
    line: usize,
) -> Result<Value, RuntimeError> {
    let epoch = expect_number(&args[0], "time_weekday", line)?;
    let datetime = timestamp_to_datetime(epoch, "time_weekday", line)?;
    // Monday is 0, Sunday is 6.
    Ok(Value::Number(
        datetime.weekday().num_days_from_monday() as f64
    ))
}

fn builtin_time_add(_: &mut Interpreter, args: &[Value], line: usize) -> Result<Value, RuntimeError> {
    let epoch = expect_number(&args[0], "time_add", line)?;
    let seconds = expect_number(&args[1], "time_add", line)?;
    Ok(Value::Number(epoch + seconds))
}

fn builtin_time_diff(
    _: &mut Interpreter,
    args: &[Value],
    line: usize,
) -> Result<Value, RuntimeError> {
    let a = expect_number(&args[0], "time_diff", line)?;
    let b = expect_number(&args[1], "time_diff", line)?;
    Ok(Value::Number(a - b))
}

//=============================================
//            Section 7: Tests
//=============================================

#[cfg(test)]
mod tests {
    use super::*;

    fn call_builtin(name: &'static str, args: &[Value]) -> Result<Value, RuntimeError> {
        let mut interpreter = Interpreter::new();
        interpreter.call_function(Value::Builtin(name), args.to_vec(), 1)
    }

    #[test]
    fn test_len_string_and_list() {
        assert_eq!(
            call_builtin("len", &[Value::String("abc".into())]).unwrap(),
            Value::Number(3.0)
        );
        assert_eq!(
            call_builtin("len", &[Value::List(vec![Value::Nil, Value::Nil])]).unwrap(),
            Value::Number(2.0)
        );
        assert!(call_builtin("len", &[Value::Number(1.0)]).is_err());
    }

    #[test]
    fn test_assert_builtin() {
        assert_eq!(
            call_builtin("assert", &[Value::Boolean(true)]).unwrap(),
            Value::Nil
        );
        let err = call_builtin(
            "assert",
            &[Value::Boolean(false), Value::String("boom".into())],
        )
        .unwrap_err();
        assert!(matches!(err, RuntimeError::AssertionFailed { message, .. } if message == "boom"));
    }

    #[test]
    fn test_builtin_arity_checked() {
        let err = call_builtin("len", &[]).unwrap_err();
        assert!(matches!(err, RuntimeError::ArityMismatch { .. }));
    }

    #[test]
    fn test_unknown_builtin() {
        let err = call_builtin("nope", &[]).unwrap_err();
        assert!(matches!(err, RuntimeError::UnknownBuiltin { .. }));
    }

    #[test]
    fn test_time_parse_supported_formats() {
        let date = call_builtin(
            "time_parse",
            &[
                Value::String("2024-03-01".into()),
                Value::String("%Y-%m-%d".into()),
            ],
        )
        .unwrap();
        assert!(matches!(date, Value::Number(n) if n > 0.0));

        let datetime = call_builtin(
            "time_parse",
            &[
                Value::String("2024-03-01 12:30:45".into()),
                Value::String("%Y-%m-%d %H:%M:%S".into()),
            ],
        )
        .unwrap();
        assert!(matches!(datetime, Value::Number(n) if n > 0.0));

        let bad = call_builtin(
            "time_parse",
            &[
                Value::String("not a date".into()),
                Value::String("%Y-%m-%d".into()),
            ],
        )
        .unwrap();
        assert_eq!(bad, Value::Nil);
    }

    #[test]
    fn test_time_components_roundtrip() {
        let epoch = match call_builtin(
            "time_parse",
            &[
                Value::String("2024-03-01 12:30:45".into()),
                Value::String("%Y-%m-%d %H:%M:%S".into()),
            ],
        )
        .unwrap()
        {
            Value::Number(n) => n,
            other => panic!("expected number, got {:?}", other),
        };

        let component = |name: &'static str| match call_builtin(name, &[Value::Number(epoch)]).unwrap() {
            Value::Number(n) => n,
            other => panic!("expected number, got {:?}", other),
        };
        assert_eq!(component("time_year"), 2024.0);
        assert_eq!(component("time_month"), 3.0);
        assert_eq!(component("time_day"), 1.0);
        assert_eq!(component("time_hour"), 12.0);
        assert_eq!(component("time_minute"), 30.0);
        assert_eq!(component("time_second"), 45.0);
        // 2024-03-01 was a Friday.
        assert_eq!(component("time_weekday"), 4.0);
    }

    #[test]
    fn test_time_add_and_diff() {
        assert_eq!(
            call_builtin("time_add", &[Value::Number(100.0), Value::Number(50.0)]).unwrap(),
            Value::Number(150.0)
        );
        assert_eq!(
            call_builtin("time_diff", &[Value::Number(100.0), Value::Number(40.0)]).unwrap(),
            Value::Number(60.0)
        );
    }

    #[test]
    fn test_time_format() {
        let formatted = call_builtin(
            "time_format",
            &[Value::Number(0.0), Value::String("%Y-%m-%d".into())],
        )
        .unwrap();
        assert_eq!(formatted, Value::String("1970-01-01".into()));
    }

    #[test]
    fn test_fclose_non_handle() {
        assert_eq!(
            call_builtin("fclose", &[Value::Nil]).unwrap(),
            Value::Number(-1.0)
        );
    }
}
