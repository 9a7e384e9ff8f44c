//! Nested key/value input used for bulk construction.

use crate::domain::value::Value;

/// An ordered nested structure: scalars, sequences, and string-keyed maps.
///
/// Maps are kept as ordered pairs so that document order survives into the
/// tree. Keys may repeat.
#[derive(Debug, Clone, PartialEq)]
pub enum Nested {
    Scalar(Value),
    List(Vec<Nested>),
    Map(Vec<(String, Nested)>),
}

impl Nested {
    /// Builds a map from `(key, value)` pairs, in order.
    pub fn map<K, V, I>(entries: I) -> Self
    where
        K: Into<String>,
        V: Into<Nested>,
        I: IntoIterator<Item = (K, V)>,
    {
        Nested::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Builds a list of scalars or nested values.
    pub fn list<V, I>(items: I) -> Self
    where
        V: Into<Nested>,
        I: IntoIterator<Item = V>,
    {
        Nested::List(items.into_iter().map(Into::into).collect())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Nested::Scalar(_) => "scalar",
            Nested::List(_) => "list",
            Nested::Map(_) => "map",
        }
    }
}

impl From<Value> for Nested {
    fn from(v: Value) -> Self {
        Nested::Scalar(v)
    }
}

macro_rules! impl_from_scalar {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Nested {
                fn from(v: $t) -> Self {
                    Nested::Scalar(Value::from(v))
                }
            }
        )*
    };
}

impl_from_scalar!(&str, String, char, bool, f64, i32, i64, u32, usize);
