//! Composite reconciliation strategies.
//!
//! Arrays pair indices positionally and mark the excess tail of the longer
//! side. Objects are key-driven over enumerable own properties. Maps reuse
//! the array algorithm over their entry lists: entries pair by position,
//! not by key equality across reordered maps.

use deepdiff_value::{PropKey, Value, ValueArena, ValueId};

use crate::diff::DiffCtx;
use crate::error::DiffError;
use crate::node::{DiffNode, DiffValue, PathSegment, aggregate_kind};

fn expect_array<'a>(arena: &'a ValueArena, id: ValueId) -> &'a [ValueId] {
    match arena.get(id) {
        Value::Array(items) => items,
        _ => &[],
    }
}

pub(crate) fn diff_arrays(
    ctx: &mut DiffCtx<'_>,
    a: ValueId,
    b: ValueId,
    path: Option<PathSegment>,
) -> Result<DiffNode, DiffError> {
    let a_items = expect_array(ctx.arena(), a).to_vec();
    let b_items = expect_array(ctx.arena(), b).to_vec();
    let common = a_items.len().min(b_items.len());

    let mut children = Vec::with_capacity(a_items.len().max(b_items.len()));
    for i in 0..common {
        children.push(ctx.diff(a_items[i], b_items[i], Some(PathSegment::Index(i)))?);
    }
    for (i, item) in a_items.iter().enumerate().skip(common) {
        children.push(ctx.mark_deleted(*item, Some(PathSegment::Index(i))));
    }
    for (i, item) in b_items.iter().enumerate().skip(common) {
        children.push(ctx.mark_inserted(*item, Some(PathSegment::Index(i))));
    }

    Ok(DiffNode::composite(
        DiffValue::Value(a),
        DiffValue::Value(b),
        path,
        children,
    ))
}

fn key_segment(key: &PropKey) -> PathSegment {
    match key {
        PropKey::Str(key) => PathSegment::Key(key.clone()),
        PropKey::Symbol(desc) => PathSegment::Symbol(desc.clone()),
    }
}

fn enumerable_props(arena: &ValueArena, id: ValueId) -> Vec<(PropKey, ValueId)> {
    match arena.get(id) {
        Value::Object { props, .. } => props
            .iter()
            .filter(|prop| prop.enumerable)
            .map(|prop| (prop.key.clone(), prop.value))
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn diff_objects(
    ctx: &mut DiffCtx<'_>,
    a: ValueId,
    b: ValueId,
    path: Option<PathSegment>,
) -> Result<DiffNode, DiffError> {
    let a_props = enumerable_props(ctx.arena(), a);
    let b_props = enumerable_props(ctx.arena(), b);
    let mut b_consumed = vec![false; b_props.len()];

    let mut children = Vec::with_capacity(a_props.len().max(b_props.len()));
    for (key, a_value) in &a_props {
        let matched = b_props
            .iter()
            .enumerate()
            .find(|(i, (b_key, _))| !b_consumed[*i] && b_key == key)
            .map(|(i, _)| i);
        match matched {
            Some(i) => {
                b_consumed[i] = true;
                children.push(ctx.diff(*a_value, b_props[i].1, Some(key_segment(key)))?);
            }
            None => children.push(ctx.mark_deleted(*a_value, Some(key_segment(key)))),
        }
    }
    for (i, (key, b_value)) in b_props.iter().enumerate() {
        if !b_consumed[i] {
            children.push(ctx.mark_inserted(*b_value, Some(key_segment(key))));
        }
    }

    Ok(DiffNode::composite(
        DiffValue::Value(a),
        DiffValue::Value(b),
        path,
        children,
    ))
}

fn map_entries(arena: &ValueArena, id: ValueId) -> Vec<(ValueId, ValueId)> {
    match arena.get(id) {
        Value::Map(entries) => entries.clone(),
        _ => Vec::new(),
    }
}

pub(crate) fn diff_maps(
    ctx: &mut DiffCtx<'_>,
    a: ValueId,
    b: ValueId,
    path: Option<PathSegment>,
) -> Result<DiffNode, DiffError> {
    let a_entries = map_entries(ctx.arena(), a);
    let b_entries = map_entries(ctx.arena(), b);
    let common = a_entries.len().min(b_entries.len());

    let mut children = Vec::with_capacity(a_entries.len().max(b_entries.len()));
    for i in 0..common {
        let (a_key, a_value) = a_entries[i];
        let (b_key, b_value) = b_entries[i];
        let pair = vec![
            ctx.diff(a_key, b_key, None)?,
            ctx.diff(a_value, b_value, None)?,
        ];
        let kind = aggregate_kind(&pair);
        children.push(DiffNode {
            kind,
            path: Some(PathSegment::Entry(i)),
            a: DiffValue::Absent,
            b: DiffValue::Absent,
            children: crate::node::ChildDiffs::Paired(pair),
        });
    }
    for (i, (key, value)) in a_entries.iter().enumerate().skip(common) {
        let pair = vec![ctx.mark_deleted(*key, None), ctx.mark_deleted(*value, None)];
        children.push(
            DiffNode::deleted(DiffValue::Absent, Some(PathSegment::Entry(i))).with_children(pair),
        );
    }
    for (i, (key, value)) in b_entries.iter().enumerate().skip(common) {
        let pair = vec![ctx.mark_inserted(*key, None), ctx.mark_inserted(*value, None)];
        children.push(
            DiffNode::inserted(DiffValue::Absent, Some(PathSegment::Entry(i))).with_children(pair),
        );
    }

    Ok(DiffNode::composite(
        DiffValue::Value(a),
        DiffValue::Value(b),
        path,
        children,
    ))
}
