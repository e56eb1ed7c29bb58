//! # Type Guards
//!
//! A `Guard` is the predicate half of a field contract: a pure
//! `&Value -> bool` test. The built-in guards cover the value kinds of
//! [`Value`]; anything else is expressed with [`Guard::custom`].
//!
//! Guards are named in schema documents (`type_guard: is_integer`). Parsing
//! accepts the name with or without the `is_` prefix, and `binary` is an
//! alias for `string`.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::SchemaError;
use crate::value::Value;

type Predicate = dyn Fn(&Value) -> bool + Send + Sync;

/// The accepted-value predicate of a field.
#[derive(Clone)]
pub enum Guard {
    /// Accepts every value.
    Any,
    /// Accepts only `Nil`.
    Nil,
    /// Accepts booleans.
    Boolean,
    /// Accepts integers.
    Integer,
    /// Accepts floats.
    Float,
    /// Accepts integers and floats.
    Number,
    /// Accepts strings.
    String,
    /// Accepts lists.
    List,
    /// Accepts maps.
    Map,
    /// Accepts record instances of any type.
    Struct,
    /// A caller-supplied predicate.
    Custom {
        /// Name reported in diagnostics and descriptions.
        name: Arc<str>,
        /// The predicate itself.
        predicate: Arc<Predicate>,
    },
}

impl Guard {
    /// Build a named custom guard from a predicate.
    pub fn custom(
        name: impl Into<String>,
        predicate: impl Fn(&Value) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Custom {
            name: Arc::from(name.into()),
            predicate: Arc::new(predicate),
        }
    }

    /// Evaluate the guard against a value.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            Self::Any => true,
            Self::Nil => value.is_nil(),
            Self::Boolean => matches!(value, Value::Bool(_)),
            Self::Integer => matches!(value, Value::Int(_)),
            Self::Float => matches!(value, Value::Float(_)),
            Self::Number => matches!(value, Value::Int(_) | Value::Float(_)),
            Self::String => matches!(value, Value::Str(_)),
            Self::List => matches!(value, Value::List(_)),
            Self::Map => matches!(value, Value::Map(_)),
            Self::Struct => matches!(value, Value::Record(_)),
            Self::Custom { predicate, .. } => predicate(value),
        }
    }

    /// The guard's canonical name.
    pub fn name(&self) -> &str {
        match self {
            Self::Any => "any",
            Self::Nil => "is_nil",
            Self::Boolean => "is_boolean",
            Self::Integer => "is_integer",
            Self::Float => "is_float",
            Self::Number => "is_number",
            Self::String => "is_binary",
            Self::List => "is_list",
            Self::Map => "is_map",
            Self::Struct => "is_struct",
            Self::Custom { name, .. } => name.as_ref(),
        }
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Guard({})", self.name())
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Guard {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bare = s.strip_prefix("is_").unwrap_or(s);
        match bare {
            "any" => Ok(Self::Any),
            "nil" => Ok(Self::Nil),
            "boolean" => Ok(Self::Boolean),
            "integer" => Ok(Self::Integer),
            "float" => Ok(Self::Float),
            "number" => Ok(Self::Number),
            "binary" | "string" => Ok(Self::String),
            "list" => Ok(Self::List),
            "map" => Ok(Self::Map),
            "struct" => Ok(Self::Struct),
            _ => Err(SchemaError::UnknownGuard {
                name: s.to_string(),
            }),
        }
    }
}
