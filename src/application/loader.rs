//! Reading nested tree documents (JSON, TOML) into [`Nested`] maps.
//!
//! Key order of the document is kept: both parsers are built with
//! `preserve_order`.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{Nested, Value};
use crate::infrastructure::traits::FileSystem;

/// Ordered top-level entries of a document.
pub type NestedMap = Vec<(String, Nested)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Json,
    Toml,
}

impl InputFormat {
    /// Guesses the format from the file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()?.to_ascii_lowercase().as_str() {
            "json" => Some(InputFormat::Json),
            "toml" => Some(InputFormat::Toml),
            _ => None,
        }
    }
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputFormat::Json => f.write_str("json"),
            InputFormat::Toml => f.write_str("toml"),
        }
    }
}

impl FromStr for InputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(InputFormat::Json),
            "toml" => Ok(InputFormat::Toml),
            other => Err(format!("unknown input format: {other}")),
        }
    }
}

/// Parses `text`; the top level must be a map.
pub fn parse_nested(text: &str, format: InputFormat, source_name: &str) -> ApplicationResult<NestedMap> {
    let invalid = |message: String| ApplicationError::Input {
        source_name: source_name.to_string(),
        message,
    };
    let nested = match format {
        InputFormat::Json => {
            let value: serde_json::Value =
                serde_json::from_str(text).map_err(|e| invalid(e.to_string()))?;
            from_json(value)
        }
        InputFormat::Toml => {
            let table: toml::Table = toml::from_str(text).map_err(|e| invalid(e.to_string()))?;
            from_toml(toml::Value::Table(table))
        }
    };
    match nested {
        Nested::Map(entries) => Ok(entries),
        other => Err(invalid(format!(
            "top level must be a map, found {}",
            other.kind()
        ))),
    }
}

/// Reads and parses a document, taking the format from the extension when
/// none is given.
#[instrument(level = "debug", skip(fs))]
pub fn load_nested(
    fs: &dyn FileSystem,
    path: &Path,
    format: Option<InputFormat>,
) -> ApplicationResult<NestedMap> {
    let source_name = path.display().to_string();
    let format = format
        .or_else(|| InputFormat::from_path(path))
        .ok_or_else(|| ApplicationError::Input {
            source_name: source_name.clone(),
            message: "cannot determine input format, pass --format".to_string(),
        })?;
    if fs.exists(path) && !fs.is_file(path) {
        return Err(ApplicationError::Input {
            source_name,
            message: "not a regular file".to_string(),
        });
    }
    let content = fs.read_to_string(path).with_path_context("read input", path)?;
    let entries = parse_nested(&content, format, &source_name)?;
    debug!(%format, entries = entries.len(), "loaded document");
    Ok(entries)
}

fn from_json(value: serde_json::Value) -> Nested {
    match value {
        serde_json::Value::Null => Nested::Scalar(Value::Null),
        serde_json::Value::Bool(b) => Nested::Scalar(Value::Boolean(b)),
        serde_json::Value::Number(n) => Nested::Scalar(if let Some(i) = n.as_i64() {
            Value::Integer(i)
        } else if let Some(u) = n.as_u64() {
            Value::from(u)
        } else {
            n.as_f64()
                .map_or_else(|| Value::Text(n.to_string()), Value::Float)
        }),
        serde_json::Value::String(s) => Nested::Scalar(Value::Text(s)),
        serde_json::Value::Array(items) => Nested::List(items.into_iter().map(from_json).collect()),
        serde_json::Value::Object(map) => {
            Nested::Map(map.into_iter().map(|(k, v)| (k, from_json(v))).collect())
        }
    }
}

fn from_toml(value: toml::Value) -> Nested {
    match value {
        toml::Value::String(s) => Nested::Scalar(Value::Text(s)),
        toml::Value::Integer(i) => Nested::Scalar(Value::Integer(i)),
        toml::Value::Float(x) => Nested::Scalar(Value::Float(x)),
        toml::Value::Boolean(b) => Nested::Scalar(Value::Boolean(b)),
        toml::Value::Datetime(dt) => Nested::Scalar(Value::Text(dt.to_string())),
        toml::Value::Array(items) => Nested::List(items.into_iter().map(from_toml).collect()),
        toml::Value::Table(table) => {
            Nested::Map(table.into_iter().map(|(k, v)| (k, from_toml(v))).collect())
        }
    }
}
