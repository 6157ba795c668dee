//! The dynamic value universe.
//!
//! [`Value`] covers every shape the diff engine knows how to compare:
//! scalars, boxed primitive wrappers, and the composite containers
//! (array, object, map, set). Composites hold [`ValueId`] handles into the
//! owning [`ValueArena`](crate::ValueArena), so values form a graph rather
//! than a tree and cycles are representable.

use crate::ValueId;

/// A single value node.
///
/// Scalars carry their payload inline; composites reference children by
/// handle. The variant set is closed: the diff engine matches it
/// exhaustively and fails fatally on kinds it does not support (currently
/// [`Value::Set`]).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// The null value.
    Null,
    /// The undefined value (distinct from null, a type mismatch against it).
    Undefined,
    /// A boolean primitive.
    Bool(bool),
    /// A number primitive. Compared by bit identity, so `NaN` equals itself
    /// and `+0` does not equal `-0`.
    Number(f64),
    /// An arbitrary-precision integer primitive, compared by value.
    BigInt(i128),
    /// A string primitive.
    Str(String),
    /// A symbol with a description. Symbols compare by reference (handle
    /// identity): two separately allocated symbols are never equal.
    Symbol(String),
    /// A function with a name. Functions compare by reference.
    Function(String),
    /// A date, stored as milliseconds since the Unix epoch.
    Date(i64),
    /// A regular expression literal.
    RegExp {
        /// The pattern source, without delimiters.
        source: String,
        /// The flag characters, in canonical order.
        flags: String,
    },
    /// An error value. Errors compare by message only.
    Error {
        /// The error message.
        message: String,
    },
    /// A boxed number wrapper. Compares by the unwrapped primitive.
    BoxedNumber(f64),
    /// A boxed string wrapper. Compares by the unwrapped primitive.
    BoxedString(String),
    /// A boxed boolean wrapper. Compares by the unwrapped primitive.
    BoxedBool(bool),
    /// An ordered sequence of values.
    Array(Vec<ValueId>),
    /// A keyed record with string and symbol keys.
    Object {
        /// The class (prototype) name. `None` is a plain object literal;
        /// two objects with different classes are type-mismatched even
        /// though they share the `object` kind.
        class: Option<String>,
        /// Own properties, in insertion order.
        props: Vec<Prop>,
    },
    /// An ordered sequence of key/value entries.
    Map(Vec<(ValueId, ValueId)>),
    /// A set of values. Present in the universe but not supported by the
    /// diff engine; diffing one is a fatal error.
    Set(Vec<ValueId>),
}

/// One own property of an [`Value::Object`].
#[derive(Debug, Clone, PartialEq)]
pub struct Prop {
    /// The property key.
    pub key: PropKey,
    /// The property value.
    pub value: ValueId,
    /// Whether the property is enumerable. Non-enumerable properties are
    /// invisible to the diff: neither compared nor rendered.
    pub enumerable: bool,
}

/// An object property key: a string or a symbol description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropKey {
    /// A string key.
    Str(String),
    /// A symbol key, identified by its description.
    Symbol(String),
}

impl PropKey {
    /// The key rendered the way it appears in a diff prefix.
    pub fn display(&self) -> String {
        match self {
            PropKey::Str(s) => format!("\"{s}\""),
            PropKey::Symbol(s) => format!("Symbol({s})"),
        }
    }
}
