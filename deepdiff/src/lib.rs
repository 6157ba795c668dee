#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod composites;
mod diff;
mod error;
mod format;
mod line;
mod node;
mod options;
mod plugins;
mod primitives;

pub use diff::{DiffCtx, diff, diff_with_plugins};
pub use error::DiffError;
pub use format::{FormatCtx, format};
pub use line::{Line, LineContext, LineType, print_lines};
pub use node::{ChildDiffs, DiffKind, DiffNode, DiffValue, PathSegment, aggregate_kind};
pub use options::{FormatOptions, SerializeFn};
pub use plugins::{DiffPlugin, UI_ELEMENT_MARKER, UiElementPlugin, default_plugins};

pub use deepdiff_value::{Value, ValueArena, ValueId, ValueKind};

/// Diff two values and render the result in one call, using the plugin
/// list configured in `options` for both passes.
pub fn diff_and_format(
    arena: &ValueArena,
    a: ValueId,
    b: ValueId,
    options: &FormatOptions,
) -> Result<String, DiffError> {
    let node = diff_with_plugins(arena, a, b, &options.plugins)?;
    format(arena, &node, options)
}
