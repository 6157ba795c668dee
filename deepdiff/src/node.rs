//! The diff-node model.
//!
//! This module is the vocabulary the rest of the engine shares: the tagged
//! result kind, the node type with its factories and predicates, and the
//! child-kind aggregation rule. It has no control flow of its own.

use deepdiff_value::ValueId;

/// Classification of one compared node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiffKind {
    /// Both sides are equal.
    Equal,
    /// Both sides are present but differ (directly, or through a child).
    Updated,
    /// The node exists only on the `b` side.
    Inserted,
    /// The node exists only on the `a` side.
    Deleted,
    /// The two sides have different kinds (or different prototypes) and are
    /// never compared against each other below this point.
    UnequalType,
}

impl DiffKind {
    /// Whether this kind marks a node wholly on one side.
    pub fn is_one_sided(self) -> bool {
        matches!(self, DiffKind::Inserted | DiffKind::Deleted)
    }
}

/// The key, index, or entry position connecting a child diff node to its
/// parent. Absent at the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// A string-keyed object property.
    Key(String),
    /// A symbol-keyed object property.
    Symbol(String),
    /// An array index.
    Index(usize),
    /// A map entry position (entries pair positionally).
    Entry(usize),
}

impl PathSegment {
    /// The rendered line prefix for this segment. Only object-valued
    /// parents attach one; array and map children render bare.
    pub fn key_prefix(&self) -> Option<String> {
        match self {
            PathSegment::Key(key) => Some(format!("\"{key}\": ")),
            PathSegment::Symbol(desc) => Some(format!("Symbol({desc}): ")),
            PathSegment::Index(_) | PathSegment::Entry(_) => None,
        }
    }
}

/// One side of a diff node.
#[derive(Debug, Clone, PartialEq)]
pub enum DiffValue {
    /// No value on this side (inserted/deleted nodes).
    Absent,
    /// A value in the arena.
    Value(ValueId),
    /// One line of a multi-line string.
    Line(String),
    /// A circular-reference marker: the value was already visited at
    /// `depth` during this traversal, so the formatter renders a
    /// placeholder instead of recursing.
    Circular {
        /// The visit position recorded when the value was first entered.
        depth: usize,
        /// The revisited value.
        value: ValueId,
    },
}

impl DiffValue {
    /// The underlying arena handle, looking through circular markers.
    pub fn id(&self) -> Option<ValueId> {
        match self {
            DiffValue::Value(id) | DiffValue::Circular { value: id, .. } => Some(*id),
            DiffValue::Absent | DiffValue::Line(_) => None,
        }
    }

    /// Whether this side is a circular-reference marker.
    pub fn is_circular(&self) -> bool {
        matches!(self, DiffValue::Circular { .. })
    }
}

/// Child diffs of a composite node.
#[derive(Debug, Clone, PartialEq)]
pub enum ChildDiffs {
    /// A leaf: no children.
    None,
    /// Paired children, ordered for rendering (ascending index for arrays,
    /// `a`'s keys then `b`-only keys for objects).
    Paired(Vec<DiffNode>),
    /// Two one-sided subtrees that were never compared against each other.
    /// Reserved for [`DiffKind::UnequalType`] nodes: `a` is an all-deleted
    /// tree, `b` an all-inserted one.
    Split {
        /// The fully-deleted subtree of the `a` value.
        a: Vec<DiffNode>,
        /// The fully-inserted subtree of the `b` value.
        b: Vec<DiffNode>,
    },
}

impl ChildDiffs {
    /// The paired children, if any.
    pub fn paired(&self) -> Option<&[DiffNode]> {
        match self {
            ChildDiffs::Paired(children) => Some(children),
            _ => None,
        }
    }
}

/// The result of comparing two values at one access path.
#[derive(Debug, Clone, PartialEq)]
pub struct DiffNode {
    /// The classification of this node.
    pub kind: DiffKind,
    /// The key/index linking this node to its parent; `None` at the root.
    pub path: Option<PathSegment>,
    /// The `a` (expected) side.
    pub a: DiffValue,
    /// The `b` (received) side.
    pub b: DiffValue,
    /// Child diffs, when this node is a composite.
    pub children: ChildDiffs,
}

impl DiffNode {
    /// An equal leaf node.
    pub fn equal(a: DiffValue, b: DiffValue, path: Option<PathSegment>) -> Self {
        Self {
            kind: DiffKind::Equal,
            path,
            a,
            b,
            children: ChildDiffs::None,
        }
    }

    /// An updated leaf node.
    pub fn updated(a: DiffValue, b: DiffValue, path: Option<PathSegment>) -> Self {
        Self {
            kind: DiffKind::Updated,
            path,
            a,
            b,
            children: ChildDiffs::None,
        }
    }

    /// An inserted node (present only on the `b` side).
    pub fn inserted(b: DiffValue, path: Option<PathSegment>) -> Self {
        Self {
            kind: DiffKind::Inserted,
            path,
            a: DiffValue::Absent,
            b,
            children: ChildDiffs::None,
        }
    }

    /// A deleted node (present only on the `a` side).
    pub fn deleted(a: DiffValue, path: Option<PathSegment>) -> Self {
        Self {
            kind: DiffKind::Deleted,
            path,
            a,
            b: DiffValue::Absent,
            children: ChildDiffs::None,
        }
    }

    /// A composite node whose kind is aggregated from its paired children.
    pub fn composite(
        a: DiffValue,
        b: DiffValue,
        path: Option<PathSegment>,
        children: Vec<DiffNode>,
    ) -> Self {
        let kind = aggregate_kind(&children);
        Self {
            kind,
            path,
            a,
            b,
            children: ChildDiffs::Paired(children),
        }
    }

    /// A type-mismatch node carrying two one-sided subtrees.
    pub fn unequal_type(
        a: DiffValue,
        b: DiffValue,
        path: Option<PathSegment>,
        a_children: Vec<DiffNode>,
        b_children: Vec<DiffNode>,
    ) -> Self {
        Self {
            kind: DiffKind::UnequalType,
            path,
            a,
            b,
            children: ChildDiffs::Split {
                a: a_children,
                b: b_children,
            },
        }
    }

    /// Attach paired children to a one-sided node, keeping its kind.
    pub fn with_children(mut self, children: Vec<DiffNode>) -> Self {
        self.children = ChildDiffs::Paired(children);
        self
    }

    /// Whether the two sides compared equal.
    pub fn is_equal(&self) -> bool {
        self.kind == DiffKind::Equal
    }

    /// Whether this node exists only on the `b` side.
    pub fn is_inserted(&self) -> bool {
        self.kind == DiffKind::Inserted
    }

    /// Whether this node exists only on the `a` side.
    pub fn is_deleted(&self) -> bool {
        self.kind == DiffKind::Deleted
    }

    /// Whether the two sides are type-mismatched.
    pub fn is_unequal_type(&self) -> bool {
        self.kind == DiffKind::UnequalType
    }
}

/// The aggregation invariant: a composite node is `Equal` iff every child
/// is `Equal`, otherwise `Updated`. One-sided and type-mismatch kinds are
/// reserved for nodes that are themselves wholly one-sided or mismatched.
pub fn aggregate_kind(children: &[DiffNode]) -> DiffKind {
    if children.iter().all(DiffNode::is_equal) {
        DiffKind::Equal
    } else {
        DiffKind::Updated
    }
}
