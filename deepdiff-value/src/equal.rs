//! Reference deep equality.
//!
//! The canonical strict deep-equality the diff engine must agree with:
//! `diff(a, b)` classifies `Equal` exactly when `deep_equal(a, b)` holds
//! (over the supported universe — sets and cross-order map matching are
//! documented gaps of both). Kept separate from the diff so property tests
//! have an independent oracle.

use std::collections::HashMap;

use crate::value::Value;
use crate::{ValueArena, ValueId};

/// Strict deep equality with the host's scalar semantics: numbers compare
/// by bit identity (`NaN` equals itself, `+0` differs from `-0`), symbols
/// and functions by reference, objects by enumerable own properties, maps
/// by positional entries. Terminates on cyclic graphs.
pub fn deep_equal(arena: &ValueArena, a: ValueId, b: ValueId) -> bool {
    let mut memos = Memos::default();
    equal_inner(arena, a, b, &mut memos)
}

#[derive(Default)]
struct Memos {
    a: HashMap<ValueId, usize>,
    b: HashMap<ValueId, usize>,
    position: usize,
}

/// Cycle bookkeeping shared with the diff orchestrator: record both sides
/// at the same position on first visit; on revisit of either side the pair
/// is equal only when both sides map to the same position.
fn check_cycle(memos: &mut Memos, a: ValueId, b: ValueId) -> Option<bool> {
    let memo_a = memos.a.get(&a).copied();
    let memo_b = memos.b.get(&b).copied();
    if memo_a.is_some() || memo_b.is_some() {
        return Some(memo_a == memo_b);
    }
    let position = memos.position;
    memos.position += 1;
    memos.a.insert(a, position);
    memos.b.insert(b, position);
    None
}

fn equal_inner(arena: &ValueArena, a: ValueId, b: ValueId, memos: &mut Memos) -> bool {
    if a == b {
        return true;
    }

    match (arena.get(a), arena.get(b)) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x.to_bits() == y.to_bits(),
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        // distinct handles are distinct symbols/functions
        (Value::Symbol(_), Value::Symbol(_)) | (Value::Function(_), Value::Function(_)) => false,
        (Value::Date(x), Value::Date(y)) => x == y,
        (
            Value::RegExp {
                source: sx,
                flags: fx,
            },
            Value::RegExp {
                source: sy,
                flags: fy,
            },
        ) => sx == sy && fx == fy,
        (Value::Error { message: x }, Value::Error { message: y }) => x == y,
        (Value::BoxedNumber(x), Value::BoxedNumber(y)) => x.to_bits() == y.to_bits(),
        (Value::BoxedString(x), Value::BoxedString(y)) => x == y,
        (Value::BoxedBool(x), Value::BoxedBool(y)) => x == y,
        (Value::Array(xs), Value::Array(ys)) => {
            if xs.len() != ys.len() {
                return false;
            }
            check_cycle(memos, a, b).unwrap_or_else(|| {
                xs.iter()
                    .zip(ys)
                    .all(|(x, y)| equal_inner(arena, *x, *y, memos))
            })
        }
        (
            Value::Object {
                class: ca,
                props: pa,
            },
            Value::Object {
                class: cb,
                props: pb,
            },
        ) => {
            if ca != cb {
                return false;
            }
            check_cycle(memos, a, b).unwrap_or_else(|| {
                let pa: Vec<_> = pa.iter().filter(|p| p.enumerable).collect();
                let pb: Vec<_> = pb.iter().filter(|p| p.enumerable).collect();
                pa.len() == pb.len()
                    && pa.iter().all(|prop| {
                        pb.iter()
                            .find(|q| q.key == prop.key)
                            .is_some_and(|q| equal_inner(arena, prop.value, q.value, memos))
                    })
            })
        }
        (Value::Map(xs), Value::Map(ys)) => {
            if xs.len() != ys.len() {
                return false;
            }
            check_cycle(memos, a, b).unwrap_or_else(|| {
                xs.iter().zip(ys).all(|((kx, vx), (ky, vy))| {
                    equal_inner(arena, *kx, *ky, memos) && equal_inner(arena, *vx, *vy, memos)
                })
            })
        }
        (Value::Set(xs), Value::Set(ys)) => {
            if xs.len() != ys.len() {
                return false;
            }
            check_cycle(memos, a, b).unwrap_or_else(|| {
                xs.iter()
                    .zip(ys)
                    .all(|(x, y)| equal_inner(arena, *x, *y, memos))
            })
        }
        _ => false,
    }
}
