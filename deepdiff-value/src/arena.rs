//! The value arena.
//!
//! Every value lives in a [`ValueArena`] and is addressed by a [`ValueId`].
//! Handles are the identity of a value: two handles are "the same value" in
//! the reference-semantics sense exactly when they are equal. This replaces
//! the reference-keyed maps a garbage-collected host would use for cycle
//! detection with plain integer-keyed bookkeeping.

use crate::value::{Prop, PropKey, Value};

/// A handle to a value stored in a [`ValueArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ValueId(u32);

impl ValueId {
    /// The position of this value in its arena.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// An append-only arena of [`Value`] nodes.
///
/// Allocation helpers cover every scalar kind; composite values are either
/// allocated whole (`array`, `map_from`) or allocated empty and grown with
/// the mutation helpers (`array_push`, `set_prop`, `map_insert`), which is
/// how self-referential graphs are built:
///
/// ```
/// use deepdiff_value::ValueArena;
///
/// let mut arena = ValueArena::new();
/// let a = arena.object();
/// arena.set_prop(a, "x", a); // a.x = a
/// ```
#[derive(Debug, Default)]
pub struct ValueArena {
    nodes: Vec<Value>,
}

impl ValueArena {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a value and return its handle.
    pub fn alloc(&mut self, value: Value) -> ValueId {
        let id = ValueId(u32::try_from(self.nodes.len()).expect("arena overflow"));
        self.nodes.push(value);
        id
    }

    /// Look up a value by handle.
    ///
    /// # Panics
    ///
    /// Panics if the handle comes from a different arena and is out of
    /// bounds.
    pub fn get(&self, id: ValueId) -> &Value {
        &self.nodes[id.index()]
    }

    /// The number of values allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the arena is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a null value.
    pub fn null(&mut self) -> ValueId {
        self.alloc(Value::Null)
    }

    /// Allocate an undefined value.
    pub fn undefined(&mut self) -> ValueId {
        self.alloc(Value::Undefined)
    }

    /// Allocate a boolean.
    pub fn bool(&mut self, value: bool) -> ValueId {
        self.alloc(Value::Bool(value))
    }

    /// Allocate a number.
    pub fn number(&mut self, value: f64) -> ValueId {
        self.alloc(Value::Number(value))
    }

    /// Allocate a bigint.
    pub fn bigint(&mut self, value: i128) -> ValueId {
        self.alloc(Value::BigInt(value))
    }

    /// Allocate a string.
    pub fn string(&mut self, value: impl Into<String>) -> ValueId {
        self.alloc(Value::Str(value.into()))
    }

    /// Allocate a symbol with the given description.
    pub fn symbol(&mut self, description: impl Into<String>) -> ValueId {
        self.alloc(Value::Symbol(description.into()))
    }

    /// Allocate a named function.
    pub fn function(&mut self, name: impl Into<String>) -> ValueId {
        self.alloc(Value::Function(name.into()))
    }

    /// Allocate a date from milliseconds since the Unix epoch.
    pub fn date(&mut self, epoch_ms: i64) -> ValueId {
        self.alloc(Value::Date(epoch_ms))
    }

    /// Allocate a regular expression.
    pub fn regexp(&mut self, source: impl Into<String>, flags: impl Into<String>) -> ValueId {
        self.alloc(Value::RegExp {
            source: source.into(),
            flags: flags.into(),
        })
    }

    /// Allocate an error with the given message.
    pub fn error(&mut self, message: impl Into<String>) -> ValueId {
        self.alloc(Value::Error {
            message: message.into(),
        })
    }

    /// Allocate a boxed number wrapper.
    pub fn boxed_number(&mut self, value: f64) -> ValueId {
        self.alloc(Value::BoxedNumber(value))
    }

    /// Allocate a boxed string wrapper.
    pub fn boxed_string(&mut self, value: impl Into<String>) -> ValueId {
        self.alloc(Value::BoxedString(value.into()))
    }

    /// Allocate a boxed boolean wrapper.
    pub fn boxed_bool(&mut self, value: bool) -> ValueId {
        self.alloc(Value::BoxedBool(value))
    }

    /// Allocate an array from the given elements.
    pub fn array(&mut self, items: impl IntoIterator<Item = ValueId>) -> ValueId {
        let items = items.into_iter().collect();
        self.alloc(Value::Array(items))
    }

    /// Allocate an empty plain object.
    pub fn object(&mut self) -> ValueId {
        self.alloc(Value::Object {
            class: None,
            props: Vec::new(),
        })
    }

    /// Allocate a plain object with the given string-keyed properties.
    pub fn object_from<K: Into<String>>(
        &mut self,
        props: impl IntoIterator<Item = (K, ValueId)>,
    ) -> ValueId {
        let props = props
            .into_iter()
            .map(|(key, value)| Prop {
                key: PropKey::Str(key.into()),
                value,
                enumerable: true,
            })
            .collect();
        self.alloc(Value::Object { class: None, props })
    }

    /// Allocate an empty instance of the named class.
    pub fn instance(&mut self, class: impl Into<String>) -> ValueId {
        self.alloc(Value::Object {
            class: Some(class.into()),
            props: Vec::new(),
        })
    }

    /// Allocate a map from the given entries, in order.
    pub fn map_from(&mut self, entries: impl IntoIterator<Item = (ValueId, ValueId)>) -> ValueId {
        let entries = entries.into_iter().collect();
        self.alloc(Value::Map(entries))
    }

    /// Allocate an empty map.
    pub fn map(&mut self) -> ValueId {
        self.alloc(Value::Map(Vec::new()))
    }

    /// Allocate a set from the given elements.
    pub fn set(&mut self, items: impl IntoIterator<Item = ValueId>) -> ValueId {
        let items = items.into_iter().collect();
        self.alloc(Value::Set(items))
    }

    /// Append an element to an existing array.
    ///
    /// # Panics
    ///
    /// Panics if `array` is not an array.
    pub fn array_push(&mut self, array: ValueId, item: ValueId) {
        let Value::Array(items) = &mut self.nodes[array.index()] else {
            panic!("array_push on a non-array value");
        };
        items.push(item);
    }

    /// Set an enumerable string-keyed property on an existing object,
    /// replacing any property with the same key.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not an object.
    pub fn set_prop(&mut self, object: ValueId, key: impl Into<String>, value: ValueId) {
        self.insert_prop(
            object,
            Prop {
                key: PropKey::Str(key.into()),
                value,
                enumerable: true,
            },
        );
    }

    /// Set an enumerable symbol-keyed property on an existing object.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not an object.
    pub fn set_symbol_prop(
        &mut self,
        object: ValueId,
        description: impl Into<String>,
        value: ValueId,
    ) {
        self.insert_prop(
            object,
            Prop {
                key: PropKey::Symbol(description.into()),
                value,
                enumerable: true,
            },
        );
    }

    /// Set a non-enumerable property on an existing object. Non-enumerable
    /// properties are invisible to the diff engine.
    ///
    /// # Panics
    ///
    /// Panics if `object` is not an object.
    pub fn set_hidden_prop(&mut self, object: ValueId, key: PropKey, value: ValueId) {
        self.insert_prop(
            object,
            Prop {
                key,
                value,
                enumerable: false,
            },
        );
    }

    /// Append an entry to an existing map.
    ///
    /// # Panics
    ///
    /// Panics if `map` is not a map.
    pub fn map_insert(&mut self, map: ValueId, key: ValueId, value: ValueId) {
        let Value::Map(entries) = &mut self.nodes[map.index()] else {
            panic!("map_insert on a non-map value");
        };
        entries.push((key, value));
    }

    fn insert_prop(&mut self, object: ValueId, prop: Prop) {
        let Value::Object { props, .. } = &mut self.nodes[object.index()] else {
            panic!("property assignment on a non-object value");
        };
        if let Some(existing) = props.iter_mut().find(|p| p.key == prop.key) {
            *existing = prop;
        } else {
            props.push(prop);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn handles_are_identity() {
        let mut arena = ValueArena::new();
        let a = arena.number(1.0);
        let b = arena.number(1.0);
        assert_ne!(a, b);
        assert_eq!(arena.get(a), arena.get(b));
    }

    #[test]
    fn builds_cycles() {
        let mut arena = ValueArena::new();
        let a = arena.object();
        arena.set_prop(a, "x", a);
        let Value::Object { props, .. } = arena.get(a) else {
            unreachable!();
        };
        assert_eq!(props[0].value, a);
    }

    #[test]
    fn set_prop_replaces_existing_key() {
        let mut arena = ValueArena::new();
        let one = arena.number(1.0);
        let two = arena.number(2.0);
        let obj = arena.object_from([("a", one)]);
        arena.set_prop(obj, "a", two);
        let Value::Object { props, .. } = arena.get(obj) else {
            unreachable!();
        };
        assert_eq!(props.len(), 1);
        assert_eq!(props[0].value, two);
    }
}
