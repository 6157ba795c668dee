//! The format engine.
//!
//! [`format`] renders a diff tree into the final annotated string by
//! recursive descent mirroring the tree: one-sided subtrees render as
//! single-color blocks, paired composites as neutral brackets around
//! children colored by their own kind, and leaves as serialized lines.

use deepdiff_value::{Value, ValueArena, ValueId, ValueKind};

use crate::error::DiffError;
use crate::line::{Line, LineContext, format_updated, paint, print_lines};
use crate::node::{ChildDiffs, DiffKind, DiffNode, DiffValue, PathSegment};
use crate::options::FormatOptions;

const NO_DIFF_MESSAGE: &str = "Compared values have no visual difference.";
const CIRCULAR_MARKER: &str = "[Circular]";

/// Render a diff tree.
pub fn format(
    arena: &ValueArena,
    node: &DiffNode,
    options: &FormatOptions,
) -> Result<String, DiffError> {
    log::trace!("formatting a {:?} root node", node.kind);
    if node.kind == DiffKind::Equal {
        return Ok(paint(NO_DIFF_MESSAGE, options.common_style));
    }

    if node.kind == DiffKind::UnequalType {
        let (Some(a), Some(b)) = (node.a.id(), node.b.id()) else {
            return Err(DiffError::Internal {
                detail: "type-mismatched root without values on both sides".to_owned(),
            });
        };
        let a_kind = ValueKind::of(arena.get(a)).to_string();
        let b_kind = ValueKind::of(arena.get(b)).to_string();
        return Ok(format!(
            "  Comparing two different types of values. Expected {} but received {}.",
            paint(&a_kind, options.a_style),
            paint(&b_kind, options.b_style),
        ));
    }

    let ctx = FormatCtx { arena, options };
    let lines = ctx.format_node(node, &LineContext::root())?;
    Ok(format!(
        "{}{}",
        annotation(options),
        print_lines(&lines, options)
    ))
}

fn annotation(options: &FormatOptions) -> String {
    if options.omit_annotation_lines {
        return String::new();
    }
    format!(
        "{}\n{}\n\n",
        paint(
            &format!("{} {}", options.a_indicator, options.a_annotation),
            options.a_style,
        ),
        paint(
            &format!("{} {}", options.b_indicator, options.b_annotation),
            options.b_style,
        ),
    )
}

/// Rendering state for one `format` invocation. Plugins receive this to
/// re-enter the default renderer for nested values.
pub struct FormatCtx<'a> {
    arena: &'a ValueArena,
    options: &'a FormatOptions,
}

impl<'a> FormatCtx<'a> {
    /// The arena the rendered values live in.
    pub fn arena(&self) -> &'a ValueArena {
        self.arena
    }

    /// Serialize a value, letting plugins override the configured
    /// serializer for values they own.
    pub fn serialize(&self, value: ValueId) -> String {
        for plugin in &self.options.plugins {
            if plugin.test(self.arena, value)
                && let Some(text) = plugin.serialize(self.arena, value)
            {
                return text;
            }
        }
        (self.options.serialize)(self.arena, value)
    }

    /// Render one node into lines.
    pub fn format_node(
        &self,
        node: &DiffNode,
        context: &LineContext,
    ) -> Result<Vec<Line>, DiffError> {
        for plugin in &self.options.plugins {
            let owned = [&node.a, &node.b]
                .into_iter()
                .filter_map(DiffValue::id)
                .any(|id| plugin.test(self.arena, id));
            if owned {
                return plugin.format(self, node, context);
            }
        }

        match node.kind {
            DiffKind::UnequalType => {
                let ChildDiffs::Split { a, b } = &node.children else {
                    return Err(DiffError::Internal {
                        detail: "type-mismatched node without split children".to_owned(),
                    });
                };
                let mut lines = Vec::new();
                for side in a.iter().chain(b.iter()) {
                    lines.extend(self.format_node(side, context)?);
                }
                Ok(lines)
            }
            DiffKind::Deleted => self.format_one_sided(node, &node.a, context),
            DiffKind::Inserted => self.format_one_sided(node, &node.b, context),
            DiffKind::Equal | DiffKind::Updated => self.format_pair(node, context),
        }
    }

    fn format_one_sided(
        &self,
        node: &DiffNode,
        side: &DiffValue,
        context: &LineContext,
    ) -> Result<Vec<Line>, DiffError> {
        let make = one_sided_line(node.kind);
        match side {
            DiffValue::Circular { .. } => {
                Ok(vec![make(CIRCULAR_MARKER.to_owned(), context).raw()])
            }
            DiffValue::Line(text) => Ok(vec![make(text.clone(), context).raw()]),
            DiffValue::Absent => Err(DiffError::Internal {
                detail: "one-sided node without a value".to_owned(),
            }),
            DiffValue::Value(id) => match self.arena.get(*id) {
                Value::Str(text) => {
                    // Root strings render raw; nested ones go through the
                    // serializer and pick up quotes.
                    if node.path.is_none() {
                        Ok(vec![make(text.clone(), context).raw()])
                    } else {
                        Ok(vec![make(self.serialize(*id), context)])
                    }
                }
                Value::Array(_) | Value::Object { .. } => match node.children.paired() {
                    Some(children) => self.format_block(*id, children, context, node.kind),
                    None => Ok(vec![make(self.serialize(*id), context)]),
                },
                _ => Ok(vec![make(self.serialize(*id), context)]),
            },
        }
    }

    fn format_pair(
        &self,
        node: &DiffNode,
        context: &LineContext,
    ) -> Result<Vec<Line>, DiffError> {
        if node.a.is_circular() || node.b.is_circular() {
            return self.format_circular(node, context);
        }

        if let (DiffValue::Line(a_line), DiffValue::Line(b_line)) = (&node.a, &node.b) {
            return Ok(match node.kind {
                DiffKind::Equal => vec![Line::common(a_line.clone(), context).raw()],
                _ => format_updated(a_line.clone(), b_line.clone(), context),
            });
        }

        let (Some(a), Some(b)) = (node.a.id(), node.b.id()) else {
            return Err(DiffError::Internal {
                detail: "paired node without values on both sides".to_owned(),
            });
        };

        match self.arena.get(a) {
            Value::Str(_) => self.format_string(node, a, b, context),
            Value::Array(_) | Value::Object { .. } => match node.children.paired() {
                Some(children) => self.format_block(a, children, context, DiffKind::Equal),
                // Identity-equal composites carry no children; serialize
                // the whole value as one (possibly multi-line) line.
                None if node.kind == DiffKind::Equal => {
                    Ok(vec![Line::common(self.serialize(a), context)])
                }
                None => Err(DiffError::Internal {
                    detail: "updated composite without children".to_owned(),
                }),
            },
            Value::Map(_) => match node.kind {
                DiffKind::Equal => Ok(vec![Line::common(self.serialize(a), context)]),
                _ => Err(DiffError::UnimplementedFormat {
                    what: "an updated map",
                }),
            },
            _ => Ok(match node.kind {
                DiffKind::Equal => vec![Line::common(self.serialize(a), context)],
                _ => format_updated(self.serialize(a), self.serialize(b), context),
            }),
        }
    }

    fn format_circular(
        &self,
        node: &DiffNode,
        context: &LineContext,
    ) -> Result<Vec<Line>, DiffError> {
        let render = |side: &DiffValue| match side {
            DiffValue::Circular { .. } => Ok(CIRCULAR_MARKER.to_owned()),
            DiffValue::Value(id) => Ok(self.serialize(*id)),
            _ => Err(DiffError::Internal {
                detail: "circular pair with a side that has no value".to_owned(),
            }),
        };
        if node.kind == DiffKind::Equal {
            return Ok(vec![Line::common(CIRCULAR_MARKER, context).raw()]);
        }
        Ok(format_updated(render(&node.a)?, render(&node.b)?, context))
    }

    /// Bracketed block for arrays and objects: open line, one rendering
    /// per child, close line. One-sided blocks pass their own kind so the
    /// brackets share the block color; paired blocks pass `Equal` for
    /// neutral brackets, and each child colors itself.
    fn format_block(
        &self,
        id: ValueId,
        children: &[DiffNode],
        context: &LineContext,
        kind: DiffKind,
    ) -> Result<Vec<Line>, DiffError> {
        let (open, close) = brackets(self.arena.get(id));
        let make = one_sided_line(kind);

        let mut lines = vec![make(
            open,
            &LineContext {
                indent: context.indent.clone(),
                prefix: context.prefix.clone(),
                suffix: String::new(),
            },
        )];
        for child in children {
            let child_context = LineContext {
                indent: format!("{}  ", context.indent),
                prefix: child
                    .path
                    .as_ref()
                    .and_then(PathSegment::key_prefix)
                    .unwrap_or_default(),
                suffix: ",".to_owned(),
            };
            lines.extend(self.format_node(child, &child_context)?);
        }
        lines.push(make(
            close,
            &LineContext {
                indent: context.indent.clone(),
                prefix: String::new(),
                suffix: context.suffix.clone(),
            },
        ));
        Ok(lines)
    }

    /// Strings: leaves render as one line (raw at the root, quoted when
    /// nested); multi-line strings render their line children, with the
    /// opening quote attached to the first line and the closing quote to
    /// the last when nested.
    fn format_string(
        &self,
        node: &DiffNode,
        a: ValueId,
        b: ValueId,
        context: &LineContext,
    ) -> Result<Vec<Line>, DiffError> {
        let Some(children) = node.children.paired() else {
            let nested = node.path.is_some();
            let render = |id: ValueId| {
                if nested {
                    self.serialize(id)
                } else {
                    match self.arena.get(id) {
                        Value::Str(text) => text.clone(),
                        _ => self.serialize(id),
                    }
                }
            };
            return Ok(match node.kind {
                DiffKind::Equal => vec![Line::common(render(a), context).raw()],
                _ => format_updated(render(a), render(b), context),
            });
        };

        let nested = node.path.is_some();
        let last = children.len().saturating_sub(1);
        let mut lines = Vec::with_capacity(children.len());
        for (i, child) in children.iter().enumerate() {
            let mut child_context = LineContext {
                indent: context.indent.clone(),
                prefix: String::new(),
                suffix: String::new(),
            };
            if nested {
                if i == 0 {
                    child_context.prefix = format!("{}\"", context.prefix);
                }
                if i == last {
                    child_context.suffix = format!("\"{}", context.suffix);
                }
            }
            lines.extend(self.format_node(child, &child_context)?);
        }
        Ok(lines)
    }
}

fn one_sided_line(kind: DiffKind) -> fn(String, &LineContext) -> Line {
    match kind {
        DiffKind::Deleted => |val, context| Line::deleted(val, context),
        DiffKind::Inserted => |val, context| Line::inserted(val, context),
        _ => |val, context| Line::common(val, context),
    }
}

fn brackets(value: &Value) -> (String, String) {
    match value {
        Value::Array(_) => ("Array [".to_owned(), "]".to_owned()),
        Value::Object { class, .. } => (
            format!("{} {{", class.as_deref().unwrap_or("Object")),
            "}".to_owned(),
        ),
        Value::Map(_) => ("Map {".to_owned(), "}".to_owned()),
        _ => ("{".to_owned(), "}".to_owned()),
    }
}
