//! Leaf comparison strategies.
//!
//! Every non-composite kind bottoms out here. Numbers compare by bit
//! pattern so `NaN` equals itself and `0.0` differs from `-0.0`; dates by
//! timestamp; regexps by source and flags; errors by message; boxed
//! wrappers by their unwrapped value. Symbols and functions are equal only
//! by identity, which the orchestrator checks before dispatching here, so
//! two distinct handles always compare as updated.
//!
//! Strings get their own strategy: multi-line strings are compared line by
//! line with a longest-common-subsequence alignment so the output shows
//! which lines changed instead of repeating both strings whole.

use deepdiff_value::{Value, ValueArena, ValueId};

use crate::node::{ChildDiffs, DiffNode, DiffValue, PathSegment, aggregate_kind};

/// Compare two same-kind leaf values (anything but a string).
pub(crate) fn diff_leaf(
    arena: &ValueArena,
    a: ValueId,
    b: ValueId,
    path: Option<PathSegment>,
) -> DiffNode {
    let equal = leaf_equal(arena.get(a), arena.get(b));
    let (av, bv) = (DiffValue::Value(a), DiffValue::Value(b));
    if equal {
        DiffNode::equal(av, bv, path)
    } else {
        DiffNode::updated(av, bv, path)
    }
}

fn leaf_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) | (Value::Undefined, Value::Undefined) => true,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(x), Value::Number(y)) => x.to_bits() == y.to_bits(),
        (Value::BigInt(x), Value::BigInt(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Date(x), Value::Date(y)) => x == y,
        (
            Value::RegExp { source: xs, flags: xf },
            Value::RegExp { source: ys, flags: yf },
        ) => xs == ys && xf == yf,
        (Value::Error { message: x }, Value::Error { message: y }) => x == y,
        (Value::BoxedNumber(x), Value::BoxedNumber(y)) => x.to_bits() == y.to_bits(),
        (Value::BoxedString(x), Value::BoxedString(y)) => x == y,
        (Value::BoxedBool(x), Value::BoxedBool(y)) => x == y,
        // Identity-compared kinds: distinct handles are never equal.
        (Value::Symbol(_), Value::Symbol(_)) | (Value::Function(_), Value::Function(_)) => false,
        _ => false,
    }
}

/// Compare two strings. Multi-line strings are aligned line by line and
/// produce a composite node whose children carry the individual lines.
pub(crate) fn diff_strings(
    a: ValueId,
    b: ValueId,
    a_str: &str,
    b_str: &str,
    path: Option<PathSegment>,
) -> DiffNode {
    let (av, bv) = (DiffValue::Value(a), DiffValue::Value(b));
    if a_str == b_str {
        return DiffNode::equal(av, bv, path);
    }
    if !a_str.contains('\n') && !b_str.contains('\n') {
        return DiffNode::updated(av, bv, path);
    }
    let children = diff_lines(a_str, b_str);
    let kind = aggregate_kind(&children);
    DiffNode {
        kind,
        path,
        a: av,
        b: bv,
        children: ChildDiffs::Paired(children),
    }
}

enum LineOp<'s> {
    Common(&'s str),
    Deleted(&'s str),
    Inserted(&'s str),
}

/// Line-level diff of two multi-line strings.
///
/// Common lines become equal children. Each maximal run of changed lines
/// is emitted as its deletions followed by its insertions; a run of
/// exactly one deletion and one insertion collapses into a single updated
/// node so the renderer pairs the two lines.
pub(crate) fn diff_lines(a_str: &str, b_str: &str) -> Vec<DiffNode> {
    let a_lines: Vec<&str> = a_str.split('\n').collect();
    let b_lines: Vec<&str> = b_str.split('\n').collect();
    let ops = align_lines(&a_lines, &b_lines);

    let mut nodes = Vec::with_capacity(ops.len());
    let mut deleted: Vec<&str> = Vec::new();
    let mut inserted: Vec<&str> = Vec::new();
    let mut flush = |nodes: &mut Vec<DiffNode>, deleted: &mut Vec<&str>, inserted: &mut Vec<&str>| {
        if deleted.len() == 1 && inserted.len() == 1 {
            nodes.push(DiffNode::updated(
                DiffValue::Line(deleted[0].to_owned()),
                DiffValue::Line(inserted[0].to_owned()),
                None,
            ));
        } else {
            nodes.extend(
                deleted
                    .iter()
                    .map(|line| DiffNode::deleted(DiffValue::Line((*line).to_owned()), None)),
            );
            nodes.extend(
                inserted
                    .iter()
                    .map(|line| DiffNode::inserted(DiffValue::Line((*line).to_owned()), None)),
            );
        }
        deleted.clear();
        inserted.clear();
    };

    for op in ops {
        match op {
            LineOp::Common(line) => {
                flush(&mut nodes, &mut deleted, &mut inserted);
                let side = DiffValue::Line(line.to_owned());
                nodes.push(DiffNode::equal(side.clone(), side, None));
            }
            LineOp::Deleted(line) => deleted.push(line),
            LineOp::Inserted(line) => inserted.push(line),
        }
    }
    flush(&mut nodes, &mut deleted, &mut inserted);
    nodes
}

/// Longest-common-subsequence alignment over lines. Ties during backtrack
/// prefer deletions, so changed regions list `a`'s lines before `b`'s.
fn align_lines<'s>(a: &[&'s str], b: &[&'s str]) -> Vec<LineOp<'s>> {
    let (m, n) = (a.len(), b.len());
    let mut dp = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if a[i - 1] == b[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut ops = Vec::with_capacity(m.max(n));
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            ops.push(LineOp::Common(a[i - 1]));
            i -= 1;
            j -= 1;
        } else if j == 0 || (i > 0 && dp[i - 1][j] >= dp[i][j - 1]) {
            ops.push(LineOp::Deleted(a[i - 1]));
            i -= 1;
        } else {
            ops.push(LineOp::Inserted(b[j - 1]));
            j -= 1;
        }
    }
    ops.reverse();
    ops
}
