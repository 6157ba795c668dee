//! The diff orchestrator.
//!
//! [`diff`] compares two values and produces a [`DiffNode`] tree. Dispatch
//! order at every node: identity short-circuit, plugin hooks, kind
//! comparison, leaf strategies, class comparison, cycle check, composite
//! strategies. Cycle bookkeeping lives in per-call [`Memos`]; nothing
//! outlives the call.

use std::collections::HashMap;

use deepdiff_value::{Value, ValueArena, ValueId, ValueKind};

use crate::composites::{diff_arrays, diff_maps, diff_objects};
use crate::error::DiffError;
use crate::node::{DiffKind, DiffNode, DiffValue, PathSegment};
use crate::plugins::DiffPlugin;
use crate::primitives::{diff_leaf, diff_strings};

/// Per-call cycle bookkeeping.
///
/// Each composite value gets a visit position shared by both sides on
/// first entry. A revisit means a cycle: the two sides are equal at that
/// point iff they were first visited at the same position.
#[derive(Debug, Default)]
struct Memos {
    a: HashMap<ValueId, usize>,
    b: HashMap<ValueId, usize>,
    position: usize,
}

/// Shared state for one `diff` invocation. Plugins receive this to
/// recurse back into the orchestrator for nested values.
pub struct DiffCtx<'a> {
    arena: &'a ValueArena,
    plugins: &'a [Box<dyn DiffPlugin>],
    memos: Memos,
}

/// Compare two values with no plugins.
pub fn diff(arena: &ValueArena, a: ValueId, b: ValueId) -> Result<DiffNode, DiffError> {
    diff_with_plugins(arena, a, b, &[])
}

/// Compare two values, giving each plugin a chance to own any node whose
/// side it recognizes.
pub fn diff_with_plugins(
    arena: &ValueArena,
    a: ValueId,
    b: ValueId,
    plugins: &[Box<dyn DiffPlugin>],
) -> Result<DiffNode, DiffError> {
    log::trace!("diffing {a:?} against {b:?}");
    let mut ctx = DiffCtx {
        arena,
        plugins,
        memos: Memos::default(),
    };
    ctx.diff(a, b, None)
}

impl<'a> DiffCtx<'a> {
    /// The arena both compared values live in.
    pub fn arena(&self) -> &'a ValueArena {
        self.arena
    }

    /// Compare two values at the given path.
    pub fn diff(
        &mut self,
        a: ValueId,
        b: ValueId,
        path: Option<PathSegment>,
    ) -> Result<DiffNode, DiffError> {
        if a == b {
            return Ok(DiffNode::equal(DiffValue::Value(a), DiffValue::Value(b), path));
        }

        let plugins = self.plugins;
        for plugin in plugins {
            if plugin.test(self.arena, a) || plugin.test(self.arena, b) {
                return plugin.diff(self, a, b, path);
            }
        }

        let a_kind = ValueKind::of(self.arena.get(a));
        let b_kind = ValueKind::of(self.arena.get(b));
        if a_kind != b_kind {
            return Ok(self.unequal_type(a, b, path));
        }

        if a_kind == ValueKind::Set {
            return Err(DiffError::UnsupportedKind { kind: a_kind });
        }

        if a_kind.is_leaf() {
            if let (Value::Str(a_str), Value::Str(b_str)) = (self.arena.get(a), self.arena.get(b))
            {
                return Ok(diff_strings(a, b, a_str, b_str, path));
            }
            return Ok(diff_leaf(self.arena, a, b, path));
        }

        // Same kind, both composite. Objects of different classes are
        // type-mismatched even though they share the `object` kind.
        if let (
            Value::Object { class: a_class, .. },
            Value::Object { class: b_class, .. },
        ) = (self.arena.get(a), self.arena.get(b))
            && a_class != b_class
        {
            return Ok(self.unequal_type(a, b, path));
        }

        let memo_a = self.memos.a.get(&a).copied();
        let memo_b = self.memos.b.get(&b).copied();
        if memo_a.is_some() || memo_b.is_some() {
            let av = wrap_circular(a, memo_a);
            let bv = wrap_circular(b, memo_b);
            return Ok(if memo_a == memo_b {
                DiffNode::equal(av, bv, path)
            } else {
                DiffNode::updated(av, bv, path)
            });
        }
        let position = self.memos.position;
        self.memos.position += 1;
        self.memos.a.insert(a, position);
        self.memos.b.insert(b, position);

        match a_kind {
            ValueKind::Array => diff_arrays(self, a, b, path),
            ValueKind::Object => diff_objects(self, a, b, path),
            ValueKind::Map => diff_maps(self, a, b, path),
            kind => Err(DiffError::UnsupportedKind { kind }),
        }
    }

    /// Mark a whole subtree deleted, without comparing it to anything.
    pub fn mark_deleted(&self, value: ValueId, path: Option<PathSegment>) -> DiffNode {
        let mut marker = Marker::new(self.arena, self.plugins, DiffKind::Deleted);
        marker.mark(value, path)
    }

    /// Mark a whole subtree inserted, without comparing it to anything.
    pub fn mark_inserted(&self, value: ValueId, path: Option<PathSegment>) -> DiffNode {
        let mut marker = Marker::new(self.arena, self.plugins, DiffKind::Inserted);
        marker.mark(value, path)
    }

    fn unequal_type(&self, a: ValueId, b: ValueId, path: Option<PathSegment>) -> DiffNode {
        DiffNode::unequal_type(
            DiffValue::Value(a),
            DiffValue::Value(b),
            path.clone(),
            vec![self.mark_deleted(a, path.clone())],
            vec![self.mark_inserted(b, path)],
        )
    }
}

fn wrap_circular(value: ValueId, memo: Option<usize>) -> DiffValue {
    match memo {
        Some(depth) => DiffValue::Circular { depth, value },
        None => DiffValue::Value(value),
    }
}

/// One-sided recursive marking, with its own visit bookkeeping so cyclic
/// subtrees terminate in circular markers.
struct Marker<'a> {
    arena: &'a ValueArena,
    plugins: &'a [Box<dyn DiffPlugin>],
    kind: DiffKind,
    visited: HashMap<ValueId, usize>,
    position: usize,
}

impl<'a> Marker<'a> {
    fn new(arena: &'a ValueArena, plugins: &'a [Box<dyn DiffPlugin>], kind: DiffKind) -> Self {
        debug_assert!(kind.is_one_sided());
        Self {
            arena,
            plugins,
            kind,
            visited: HashMap::new(),
            position: 0,
        }
    }

    fn leaf(&self, side: DiffValue, path: Option<PathSegment>) -> DiffNode {
        match self.kind {
            DiffKind::Deleted => DiffNode::deleted(side, path),
            _ => DiffNode::inserted(side, path),
        }
    }

    fn mark(&mut self, value: ValueId, path: Option<PathSegment>) -> DiffNode {
        if self.plugins.iter().any(|plugin| plugin.test(self.arena, value)) {
            return self.leaf(DiffValue::Value(value), path);
        }

        match self.arena.get(value) {
            Value::Array(items) => {
                if let Some(node) = self.check_visited(value, &path) {
                    return node;
                }
                let children = items
                    .iter()
                    .enumerate()
                    .map(|(i, item)| self.mark(*item, Some(PathSegment::Index(i))))
                    .collect();
                self.leaf(DiffValue::Value(value), path).with_children(children)
            }
            Value::Object { props, .. } => {
                if let Some(node) = self.check_visited(value, &path) {
                    return node;
                }
                let children = props
                    .iter()
                    .filter(|prop| prop.enumerable)
                    .map(|prop| {
                        let segment = match &prop.key {
                            deepdiff_value::PropKey::Str(key) => PathSegment::Key(key.clone()),
                            deepdiff_value::PropKey::Symbol(desc) => {
                                PathSegment::Symbol(desc.clone())
                            }
                        };
                        self.mark(prop.value, Some(segment))
                    })
                    .collect();
                self.leaf(DiffValue::Value(value), path).with_children(children)
            }
            Value::Map(entries) => {
                if let Some(node) = self.check_visited(value, &path) {
                    return node;
                }
                let children = entries
                    .iter()
                    .enumerate()
                    .map(|(i, (key, val))| {
                        let pair = vec![self.mark(*key, None), self.mark(*val, None)];
                        self.leaf(DiffValue::Absent, Some(PathSegment::Entry(i)))
                            .with_children(pair)
                    })
                    .collect();
                self.leaf(DiffValue::Value(value), path).with_children(children)
            }
            _ => self.leaf(DiffValue::Value(value), path),
        }
    }

    fn check_visited(&mut self, value: ValueId, path: &Option<PathSegment>) -> Option<DiffNode> {
        if let Some(&depth) = self.visited.get(&value) {
            return Some(self.leaf(DiffValue::Circular { depth, value }, path.clone()));
        }
        self.visited.insert(value, self.position);
        self.position += 1;
        None
    }
}
