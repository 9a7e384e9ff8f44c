//! Scalar values attached to tree nodes.

use std::fmt;

use crate::domain::error::DomainError;
use crate::domain::nested::Nested;

/// A scalar that can be listed under a node.
///
/// Richer host types must be converted before they reach the tree; the
/// only fallible conversion is from [`Nested`], which rejects lists and maps.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Null,
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => f.write_str(s),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Null => Ok(()),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<&String> for Value {
    fn from(s: &String) -> Self {
        Value::Text(s.clone())
    }
}

impl From<char> for Value {
    fn from(c: char) -> Self {
        Value::Text(c.to_string())
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<f32> for Value {
    fn from(x: f32) -> Self {
        Value::Float(f64::from(x))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    Value::Integer(i64::from(i))
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_from_wide_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Value {
                fn from(i: $t) -> Self {
                    i64::try_from(i)
                        .map(Value::Integer)
                        .unwrap_or_else(|_| Value::Text(i.to_string()))
                }
            }
        )*
    };
}

impl_from_wide_int!(u64, usize, isize);

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

impl TryFrom<Nested> for Value {
    type Error = DomainError;

    fn try_from(n: Nested) -> Result<Self, Self::Error> {
        match n {
            Nested::Scalar(v) => Ok(v),
            Nested::List(_) => Err(DomainError::UnsupportedValueType { found: "list" }),
            Nested::Map(_) => Err(DomainError::UnsupportedValueType { found: "map" }),
        }
    }
}

impl TryFrom<&Nested> for Value {
    type Error = DomainError;

    fn try_from(n: &Nested) -> Result<Self, Self::Error> {
        Value::try_from(n.clone())
    }
}
