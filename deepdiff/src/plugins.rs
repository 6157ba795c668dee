//! The plugin protocol and the default plugin set.
//!
//! A plugin owns every node whose side it recognizes: the orchestrator and
//! the format engine both consult the plugin list before their own
//! dispatch. Plugins re-enter the engine through the contexts they receive,
//! so nested ordinary values inside plugin-owned values still get the
//! default treatment.

use deepdiff_value::{PropKey, Value, ValueArena, ValueId};

use crate::diff::DiffCtx;
use crate::error::DiffError;
use crate::format::FormatCtx;
use crate::line::{Line, LineContext};
use crate::node::{DiffKind, DiffNode, DiffValue, PathSegment};

/// Extension contract for domain-specific value shapes.
pub trait DiffPlugin {
    /// Whether this plugin owns the given value.
    fn test(&self, arena: &ValueArena, value: ValueId) -> bool;

    /// Diff a node at least one of whose sides tests true. May recurse back
    /// into the orchestrator through `ctx` for nested values.
    fn diff(
        &self,
        ctx: &mut DiffCtx<'_>,
        a: ValueId,
        b: ValueId,
        path: Option<PathSegment>,
    ) -> Result<DiffNode, DiffError>;

    /// Render a node at least one of whose sides tests true.
    fn format(
        &self,
        ctx: &FormatCtx<'_>,
        node: &DiffNode,
        context: &LineContext,
    ) -> Result<Vec<Line>, DiffError>;

    /// Serialize an owned value, overriding the default serializer. `None`
    /// falls back to the configured one.
    fn serialize(&self, arena: &ValueArena, value: ValueId) -> Option<String> {
        let _ = (arena, value);
        None
    }
}

/// The default plugin list used by the facade.
pub fn default_plugins() -> Vec<Box<dyn DiffPlugin>> {
    vec![Box::new(UiElementPlugin)]
}

/// Symbol description marking an object as a UI element.
pub const UI_ELEMENT_MARKER: &str = "ui.element";

/// Diffs and renders UI element trees.
///
/// An element is an object carrying a non-enumerable `Symbol(ui.element)`
/// property plus `type`, `props`, and `children` fields. Elements of the
/// same type diff their props and children; anything else is a type
/// mismatch. Elements serialize as `<Type />`.
pub struct UiElementPlugin;

fn is_element(arena: &ValueArena, value: ValueId) -> bool {
    match arena.get(value) {
        Value::Object { props, .. } => props.iter().any(|prop| {
            !prop.enumerable && prop.key == PropKey::Symbol(UI_ELEMENT_MARKER.into())
        }),
        _ => false,
    }
}

fn element_field(arena: &ValueArena, value: ValueId, name: &str) -> Option<ValueId> {
    match arena.get(value) {
        Value::Object { props, .. } => props
            .iter()
            .find(|prop| prop.enumerable && prop.key == PropKey::Str(name.into()))
            .map(|prop| prop.value),
        _ => None,
    }
}

fn element_type_name(arena: &ValueArena, value: ValueId) -> String {
    element_field(arena, value, "type")
        .and_then(|id| match arena.get(id) {
            Value::Str(name) => Some(name.clone()),
            _ => None,
        })
        .unwrap_or_else(|| "Element".to_owned())
}

fn render_element(arena: &ValueArena, value: ValueId) -> String {
    format!("<{} />", element_type_name(arena, value))
}

impl DiffPlugin for UiElementPlugin {
    fn test(&self, arena: &ValueArena, value: ValueId) -> bool {
        is_element(arena, value)
    }

    fn diff(
        &self,
        ctx: &mut DiffCtx<'_>,
        a: ValueId,
        b: ValueId,
        path: Option<PathSegment>,
    ) -> Result<DiffNode, DiffError> {
        let arena = ctx.arena();
        let both_elements = is_element(arena, a) && is_element(arena, b);
        if !both_elements || element_type_name(arena, a) != element_type_name(arena, b) {
            return Ok(DiffNode::unequal_type(
                DiffValue::Value(a),
                DiffValue::Value(b),
                path.clone(),
                vec![ctx.mark_deleted(a, path.clone())],
                vec![ctx.mark_inserted(b, path)],
            ));
        }

        let mut children = Vec::with_capacity(2);
        for field in ["props", "children"] {
            let segment = Some(PathSegment::Key(field.to_owned()));
            match (
                element_field(ctx.arena(), a, field),
                element_field(ctx.arena(), b, field),
            ) {
                (Some(a_field), Some(b_field)) => {
                    children.push(ctx.diff(a_field, b_field, segment)?);
                }
                (Some(a_field), None) => children.push(ctx.mark_deleted(a_field, segment)),
                (None, Some(b_field)) => children.push(ctx.mark_inserted(b_field, segment)),
                (None, None) => {}
            }
        }

        Ok(DiffNode::composite(
            DiffValue::Value(a),
            DiffValue::Value(b),
            path,
            children,
        ))
    }

    fn format(
        &self,
        ctx: &FormatCtx<'_>,
        node: &DiffNode,
        context: &LineContext,
    ) -> Result<Vec<Line>, DiffError> {
        let arena = ctx.arena();
        match node.kind {
            DiffKind::Equal => {
                let id = node.a.id().ok_or_else(|| DiffError::Internal {
                    detail: "equal element node without a value".to_owned(),
                })?;
                Ok(vec![Line::common(render_element(arena, id), context).raw()])
            }
            DiffKind::Deleted => {
                let id = node.a.id().ok_or_else(|| DiffError::Internal {
                    detail: "deleted element node without a value".to_owned(),
                })?;
                Ok(vec![Line::deleted(render_element(arena, id), context).raw()])
            }
            DiffKind::Inserted => {
                let id = node.b.id().ok_or_else(|| DiffError::Internal {
                    detail: "inserted element node without a value".to_owned(),
                })?;
                Ok(vec![Line::inserted(render_element(arena, id), context).raw()])
            }
            DiffKind::UnequalType => {
                let crate::node::ChildDiffs::Split { a, b } = &node.children else {
                    return Err(DiffError::Internal {
                        detail: "type-mismatched element node without split children".to_owned(),
                    });
                };
                let mut lines = Vec::new();
                for side in a.iter().chain(b.iter()) {
                    lines.extend(ctx.format_node(side, context)?);
                }
                Ok(lines)
            }
            DiffKind::Updated => {
                let id = node.a.id().ok_or_else(|| DiffError::Internal {
                    detail: "updated element node without a value".to_owned(),
                })?;
                let children = node.children.paired().ok_or_else(|| DiffError::Internal {
                    detail: "updated element node without paired children".to_owned(),
                })?;
                let mut lines = vec![
                    Line::common(format!("<{}", element_type_name(arena, id)), context).raw(),
                ];
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
                    lines.extend(ctx.format_node(child, &child_context)?);
                }
                lines.push(
                    Line::common(
                        "/>",
                        &LineContext {
                            indent: context.indent.clone(),
                            prefix: String::new(),
                            suffix: context.suffix.clone(),
                        },
                    )
                    .raw(),
                );
                Ok(lines)
            }
        }
    }

    fn serialize(&self, arena: &ValueArena, value: ValueId) -> Option<String> {
        is_element(arena, value).then(|| render_element(arena, value))
    }
}
