//! Stable value-kind tagging.
//!
//! Every component of the diff engine keys its dispatch off [`ValueKind`],
//! a closed enumeration matched exhaustively. Kind names render lowercase
//! in user-facing messages ("Comparing two different types of values.
//! Expected number but received string.").

use core::fmt;

use crate::value::Value;

/// The closed set of value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// `null`
    Null,
    /// `undefined`
    Undefined,
    /// A boolean primitive.
    Bool,
    /// A number primitive.
    Number,
    /// A bigint primitive.
    BigInt,
    /// A string primitive.
    String,
    /// A symbol.
    Symbol,
    /// A function.
    Function,
    /// An array.
    Array,
    /// A regular expression.
    RegExp,
    /// A map.
    Map,
    /// A set (not supported by the diff engine).
    Set,
    /// A date.
    Date,
    /// An error value.
    Error,
    /// A boxed number wrapper.
    BoxedNumber,
    /// A boxed string wrapper.
    BoxedString,
    /// A boxed boolean wrapper.
    BoxedBool,
    /// Anything else: a plain object or class instance.
    Object,
}

impl ValueKind {
    /// Classify a value.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Undefined => ValueKind::Undefined,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(_) => ValueKind::Number,
            Value::BigInt(_) => ValueKind::BigInt,
            Value::Str(_) => ValueKind::String,
            Value::Symbol(_) => ValueKind::Symbol,
            Value::Function(_) => ValueKind::Function,
            Value::Date(_) => ValueKind::Date,
            Value::RegExp { .. } => ValueKind::RegExp,
            Value::Error { .. } => ValueKind::Error,
            Value::BoxedNumber(_) => ValueKind::BoxedNumber,
            Value::BoxedString(_) => ValueKind::BoxedString,
            Value::BoxedBool(_) => ValueKind::BoxedBool,
            Value::Array(_) => ValueKind::Array,
            Value::Object { .. } => ValueKind::Object,
            Value::Map(_) => ValueKind::Map,
            Value::Set(_) => ValueKind::Set,
        }
    }

    /// Whether values of this kind never recurse into child diffs.
    ///
    /// Strings are nominally leaves too; the orchestrator special-cases
    /// multi-line strings into a line-aligned child diff.
    pub fn is_leaf(self) -> bool {
        !matches!(self, ValueKind::Array | ValueKind::Object | ValueKind::Map)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueKind::Null => "null",
            ValueKind::Undefined => "undefined",
            ValueKind::Bool => "boolean",
            ValueKind::Number => "number",
            ValueKind::BigInt => "bigint",
            ValueKind::String => "string",
            ValueKind::Symbol => "symbol",
            ValueKind::Function => "function",
            ValueKind::Array => "array",
            ValueKind::RegExp => "regexp",
            ValueKind::Map => "map",
            ValueKind::Set => "set",
            ValueKind::Date => "date",
            ValueKind::Error => "error",
            ValueKind::BoxedNumber => "Number",
            ValueKind::BoxedString => "String",
            ValueKind::BoxedBool => "Boolean",
            ValueKind::Object => "object",
        };
        f.write_str(name)
    }
}
