//! Dynamic values carried by attributes, styles, class descriptors and lazy
//! payloads.
//!
//! A [`Value`] is pure data with one exception: [`Value::Handler`] stands in
//! for a function-valued attribute (an event binding). Handlers only exist so
//! that trees built for the browser can be rendered unchanged on the server;
//! the serializer never emits them.

use compact_str::CompactString;
use indexmap::IndexMap;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Ordered string-keyed mapping of values.
pub type Map = IndexMap<CompactString, Value>;

/// Opaque function-valued attribute.
#[derive(Clone)]
pub struct Handler(Arc<dyn Any + Send + Sync>);

impl Handler {
    /// Wrap any callable (or any value at all) as an event binding.
    pub fn new<F: Any + Send + Sync>(f: F) -> Self {
        Self(Arc::new(f))
    }

    /// Borrow the wrapped callable if it has type `F`.
    pub fn downcast_ref<F: Any>(&self) -> Option<&F> {
        self.0.downcast_ref()
    }
}

impl fmt::Debug for Handler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Handler")
    }
}

impl PartialEq for Handler {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A dynamically typed value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// Absent value (`null`/`undefined`).
    #[default]
    Null,
    /// A boolean.
    Bool(bool),
    /// Any number; integers are stored as `f64` too.
    Number(f64),
    /// A string.
    String(CompactString),
    /// An ordered sequence.
    List(Vec<Value>),
    /// An ordered mapping.
    Map(Map),
    /// An event binding; never rendered.
    Handler(Handler),
}

impl Value {
    /// Build a [`Value::Handler`].
    pub fn handler<F: Any + Send + Sync>(f: F) -> Self {
        Value::Handler(Handler::new(f))
    }

    /// Build a [`Value::Map`] from key/value pairs, keeping their order.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<CompactString>,
        V: Into<Value>,
        I: IntoIterator<Item = (K, V)>,
    {
        Value::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Build a [`Value::List`].
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Value>,
        I: IntoIterator<Item = V>,
    {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    /// Capture anything printable as a string value.
    pub fn from_display(value: impl fmt::Display) -> Self {
        Value::String(compact_str::format_compact!("{value}"))
    }

    /// Returns true for [`Value::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true for [`Value::Handler`].
    pub fn is_handler(&self) -> bool {
        matches!(self, Value::Handler(_))
    }

    /// Null and booleans render as nothing when they appear as a child.
    pub fn is_blank(&self) -> bool {
        matches!(self, Value::Null | Value::Bool(_))
    }

    /// Host truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::List(_) | Value::Map(_) | Value::Handler(_) => true,
        }
    }

    /// Get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get as number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Get as map reference.
    pub fn as_map(&self) -> Option<&Map> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Get a map entry by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|m| m.get(key))
    }
}

/// Write `n` the way a JavaScript host converts numbers to strings.
pub(crate) fn write_number<W: fmt::Write>(out: &mut W, n: f64) -> fmt::Result {
    if n.is_nan() {
        out.write_str("NaN")
    } else if n.is_infinite() {
        out.write_str(if n > 0.0 { "Infinity" } else { "-Infinity" })
    } else if n == 0.0 {
        // covers -0
        out.write_str("0")
    } else {
        let abs = n.abs();
        if (1e-6..1e21).contains(&abs) {
            write!(out, "{n}")
        } else {
            let exp = format!("{n:e}");
            match exp.split_once('e') {
                Some((mantissa, power)) if !power.starts_with('-') => {
                    write!(out, "{mantissa}e+{power}")
                }
                _ => out.write_str(&exp),
            }
        }
    }
}

/// Format a number the way [`write_number`] does.
pub fn format_number(n: f64) -> CompactString {
    let mut out = CompactString::default();
    let _ = write_number(&mut out, n);
    out
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write_number(f, *n),
            Value::String(s) => f.write_str(s),
            Value::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    if !item.is_null() {
                        fmt::Display::fmt(item, f)?;
                    }
                }
                Ok(())
            }
            Value::Map(_) => f.write_str("[object Object]"),
            Value::Handler(_) => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::String(s.as_str().into())
    }
}

impl From<CompactString> for Value {
    fn from(s: CompactString) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<Map> for Value {
    fn from(m: Map) -> Self {
        Value::Map(m)
    }
}

impl From<Handler> for Value {
    fn from(h: Handler) -> Self {
        Value::Handler(h)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::list(v)
    }
}

macro_rules! number_from {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(n: $t) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

number_from!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
