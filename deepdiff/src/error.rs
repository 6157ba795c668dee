//! Error types.

use deepdiff_value::ValueKind;

/// Failures raised by the diff and format passes.
///
/// Both passes are pure; a returned error leaves no partial state behind.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The diff was asked to compare a value kind it does not support.
    /// This is the explicit extension point for new composite kinds
    /// (currently `set`), not a recoverable condition.
    #[error("cannot diff values of unsupported kind `{kind}`")]
    UnsupportedKind {
        /// The offending kind.
        kind: ValueKind,
    },

    /// A rendering path that is a known feature gap, such as formatting an
    /// updated map.
    #[error("formatting {what} is not implemented")]
    UnimplementedFormat {
        /// What was being rendered.
        what: &'static str,
    },

    /// A diff node reached a renderer branch that none of its cases cover.
    /// Always a programmer error, never swallowed.
    #[error("internal diff invariant violated: {detail}")]
    Internal {
        /// Description of the violated invariant.
        detail: String,
    },
}
