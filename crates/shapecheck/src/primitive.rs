//! # Primitive Descriptors
//!
//! The fixed registry of pre-built descriptors. Every other descriptor is
//! composed by callers from these through combinators and interfaces.
//!
//! Primitives are `Copy` enum constants: there is no global table to
//! initialise or mutate, and `match` over [`Primitive`] is exhaustive, so
//! adding a primitive forces every consumer to handle it.
//!
//! | Name | Aliases | Accepts |
//! |------|---------|---------|
//! | `bool` | `boolean` | booleans |
//! | `string` | | strings |
//! | `number` | | numbers other than NaN |
//! | `integer` | `int` | numbers with zero fractional part |
//! | `stringint` | `identifier` | strings or integers |
//! | `stringintbool` | | strings, integers or booleans |
//! | `scalar` | | anything that is not object-like |
//! | `method` | `func` | functions |
//! | `object` | | objects, lists and functions |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::descriptor::TypeDescriptor;
use crate::error::DescriptorDefinitionError;
use crate::value::Value;

/// A pre-built leaf descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    #[serde(alias = "boolean")]
    Bool,
    String,
    /// Numeric and not NaN. A bare kind test would wrongly admit NaN.
    Number,
    #[serde(alias = "int")]
    Integer,
    #[serde(alias = "identifier")]
    StringInt,
    StringIntBool,
    Scalar,
    #[serde(alias = "func")]
    Method,
    Object,
}

impl Primitive {
    pub const BOOLEAN: Self = Self::Bool;
    pub const INT: Self = Self::Integer;
    pub const IDENTIFIER: Self = Self::StringInt;
    pub const FUNC: Self = Self::Method;

    /// Every primitive, in registry order.
    pub fn all() -> &'static [Primitive] {
        &[
            Self::Bool,
            Self::String,
            Self::Number,
            Self::Integer,
            Self::StringInt,
            Self::StringIntBool,
            Self::Scalar,
            Self::Method,
            Self::Object,
        ]
    }

    /// Canonical name. Matches the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::StringInt => "stringint",
            Self::StringIntBool => "stringintbool",
            Self::Scalar => "scalar",
            Self::Method => "method",
            Self::Object => "object",
        }
    }

    fn accepts(&self, value: &Value) -> bool {
        match self {
            Self::Bool => matches!(value, Value::Bool(_)),
            Self::String => matches!(value, Value::String(_)),
            Self::Number => matches!(value, Value::Number(n) if !n.is_nan()),
            // Infinities fail too: inf % 1 is NaN.
            Self::Integer => matches!(value, Value::Number(n) if *n % 1.0 == 0.0),
            Self::StringInt => Self::String.accepts(value) || Self::Integer.accepts(value),
            Self::StringIntBool => Self::StringInt.accepts(value) || Self::Bool.accepts(value),
            Self::Scalar => !value.is_object_like(),
            Self::Method => matches!(value, Value::Function(_)),
            Self::Object => value.is_object_like(),
        }
    }
}

impl TypeDescriptor for Primitive {
    fn name(&self) -> &str {
        self.as_str()
    }

    fn satisfied(&self, value: &Value) -> bool {
        self.accepts(value)
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Primitive {
    type Err = DescriptorDefinitionError;

    /// Resolve a canonical name or alias.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bool" | "boolean" => Ok(Self::Bool),
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" | "int" => Ok(Self::Integer),
            "stringint" | "identifier" => Ok(Self::StringInt),
            "stringintbool" => Ok(Self::StringIntBool),
            "scalar" => Ok(Self::Scalar),
            "method" | "func" => Ok(Self::Method),
            "object" => Ok(Self::Object),
            other => Err(DescriptorDefinitionError::UnknownPrimitive(other.to_string())),
        }
    }
}
