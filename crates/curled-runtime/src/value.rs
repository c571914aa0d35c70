//! Host values exchanged with sessions
//!
//! `Value` is what callers pass to `Session::set_option` and what
//! `Session::get_info` hands back. Callback variants own the host side of a
//! trampoline and move into the session on a successful set.

use std::fmt;
use std::io::{self, Read, Write};

/// Data source for a `ReadFn` option (uploads)
pub enum ReadCallback {
    /// Any buffered reader
    Source(Box<dyn Read>),
    /// Called with the number of bytes libcurl can take; an empty
    /// vector ends the upload
    Function(Box<dyn FnMut(usize) -> io::Result<Vec<u8>>>),
}

impl ReadCallback {
    pub fn source(reader: impl Read + 'static) -> Self {
        ReadCallback::Source(Box::new(reader))
    }

    pub fn function(f: impl FnMut(usize) -> io::Result<Vec<u8>> + 'static) -> Self {
        ReadCallback::Function(Box::new(f))
    }
}

/// Data sink for a `WriteFn` option (body and header delivery)
pub enum WriteCallback {
    /// Any writer; each chunk is written in full
    Sink(Box<dyn Write>),
    /// Called once per chunk libcurl delivers
    Function(Box<dyn FnMut(&[u8]) -> io::Result<()>>),
}

impl WriteCallback {
    pub fn sink(writer: impl Write + 'static) -> Self {
        WriteCallback::Sink(Box::new(writer))
    }

    pub fn function(f: impl FnMut(&[u8]) -> io::Result<()> + 'static) -> Self {
        WriteCallback::Function(Box::new(f))
    }
}

/// A dynamically-typed host value
pub enum Value {
    /// Clears pointer options
    Null,
    Bool(bool),
    Int(i64),
    Double(f64),
    String(String),
    /// Raw bytes for string options whose value is not UTF-8
    Bytes(Vec<u8>),
    List(Vec<String>),
    ReadFn(ReadCallback),
    WriteFn(WriteCallback),
}

impl Value {
    /// Name of the value's shape, used in type mismatch errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::String(_) => "string",
            Value::Bytes(_) => "bytes",
            Value::List(_) => "list",
            Value::ReadFn(_) => "read callback",
            Value::WriteFn(_) => "write callback",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self {
            Value::Double(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Consume the value as an optional string (`Null` maps to `None`)
    pub fn into_opt_string(self) -> Option<String> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => f.debug_tuple("Bool").field(b).finish(),
            Value::Int(n) => f.debug_tuple("Int").field(n).finish(),
            Value::Double(d) => f.debug_tuple("Double").field(d).finish(),
            Value::String(s) => f.debug_tuple("String").field(s).finish(),
            Value::Bytes(b) => f.debug_tuple("Bytes").field(b).finish(),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::ReadFn(_) => f.write_str("ReadFn(..)"),
            Value::WriteFn(_) => f.write_str("WriteFn(..)"),
        }
    }
}

// Callbacks never compare equal
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Double(a), Value::Double(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n as i64)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl From<Vec<String>> for Value {
    fn from(items: Vec<String>) -> Self {
        Value::List(items)
    }
}

impl From<&[&str]> for Value {
    fn from(items: &[&str]) -> Self {
        Value::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl From<ReadCallback> for Value {
    fn from(cb: ReadCallback) -> Self {
        Value::ReadFn(cb)
    }
}

impl From<WriteCallback> for Value {
    fn from(cb: WriteCallback) -> Self {
        Value::WriteFn(cb)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_option_none_is_null() {
        let value: Value = Option::<&str>::None.into();
        assert!(value.is_null());
        let value: Value = Some("x").into();
        assert_eq!(value, Value::String("x".to_string()));
    }

    #[test]
    fn test_callbacks_never_equal() {
        let a = Value::WriteFn(WriteCallback::function(|_| Ok(())));
        let b = Value::WriteFn(WriteCallback::function(|_| Ok(())));
        assert_ne!(a, b);
        assert_eq!(a.type_name(), "write callback");
    }

    #[test]
    fn test_list_from_slice() {
        let value = Value::from(&["a", "b"][..]);
        assert_eq!(value.as_list(), Some(&["a".to_string(), "b".to_string()][..]));
    }
}
