//! Default structural serializer.
//!
//! Turns a value into the bracketed, two-space-indented textual form used
//! for leaf lines in diff output (`Object {`, `Array [`, `Map {`). Keeps a
//! visited set so cyclic graphs print `[Circular]` instead of recursing.

use std::collections::HashSet;

use crate::value::{PropKey, Value};
use crate::{ValueArena, ValueId};

/// Serialize a value to its structural textual form.
pub fn serialize(arena: &ValueArena, id: ValueId) -> String {
    let mut out = String::new();
    let mut visited = HashSet::new();
    write_value(arena, id, &mut out, 0, &mut visited);
    out
}

/// Format a number the way the host language displays it: integral values
/// without a decimal point, `-0` kept distinct from `0`, `NaN` and
/// `Infinity` spelled out.
pub(crate) fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_owned();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if n == 0.0 && n.is_sign_negative() {
        return "-0".to_owned();
    }
    // f64 Display prints integral values without a decimal point and never
    // in exponent form, at any magnitude.
    format!("{n}")
}

pub(crate) fn quote(s: &str) -> String {
    let escaped = s.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{escaped}\"")
}

fn write_value(
    arena: &ValueArena,
    id: ValueId,
    out: &mut String,
    indent: usize,
    visited: &mut HashSet<ValueId>,
) {
    match arena.get(id) {
        Value::Null => out.push_str("null"),
        Value::Undefined => out.push_str("undefined"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_number(*n)),
        Value::BigInt(n) => {
            out.push_str(&n.to_string());
            out.push('n');
        }
        Value::Str(s) => out.push_str(&quote(s)),
        Value::Symbol(desc) => {
            out.push_str("Symbol(");
            out.push_str(desc);
            out.push(')');
        }
        Value::Function(name) => {
            out.push_str("[Function ");
            out.push_str(if name.is_empty() { "anonymous" } else { name });
            out.push(']');
        }
        Value::Date(epoch_ms) => out.push_str(&format!("Date({epoch_ms})")),
        Value::RegExp { source, flags } => out.push_str(&format!("/{source}/{flags}")),
        Value::Error { message } => out.push_str(&format!("[Error: {message}]")),
        Value::BoxedNumber(n) => out.push_str(&format!("Number({})", format_number(*n))),
        Value::BoxedString(s) => out.push_str(&format!("String({})", quote(s))),
        Value::BoxedBool(b) => out.push_str(&format!("Boolean({b})")),
        Value::Array(items) => {
            if !visited.insert(id) {
                out.push_str("[Circular]");
                return;
            }
            if items.is_empty() {
                out.push_str("Array []");
            } else {
                out.push_str("Array [\n");
                for item in items {
                    push_indent(out, indent + 1);
                    write_value(arena, *item, out, indent + 1, visited);
                    out.push_str(",\n");
                }
                push_indent(out, indent);
                out.push(']');
            }
            visited.remove(&id);
        }
        Value::Object { class, props } => {
            if !visited.insert(id) {
                out.push_str("[Circular]");
                return;
            }
            let name = class.as_deref().unwrap_or("Object");
            let enumerable: Vec<_> = props.iter().filter(|p| p.enumerable).collect();
            if enumerable.is_empty() {
                out.push_str(name);
                out.push_str(" {}");
            } else {
                out.push_str(name);
                out.push_str(" {\n");
                for prop in enumerable {
                    push_indent(out, indent + 1);
                    match &prop.key {
                        PropKey::Str(k) => out.push_str(&quote(k)),
                        PropKey::Symbol(desc) => out.push_str(&format!("Symbol({desc})")),
                    }
                    out.push_str(": ");
                    write_value(arena, prop.value, out, indent + 1, visited);
                    out.push_str(",\n");
                }
                push_indent(out, indent);
                out.push('}');
            }
            visited.remove(&id);
        }
        Value::Map(entries) => {
            if !visited.insert(id) {
                out.push_str("[Circular]");
                return;
            }
            if entries.is_empty() {
                out.push_str("Map {}");
            } else {
                out.push_str("Map {\n");
                for (key, value) in entries {
                    push_indent(out, indent + 1);
                    write_value(arena, *key, out, indent + 1, visited);
                    out.push_str(" => ");
                    write_value(arena, *value, out, indent + 1, visited);
                    out.push_str(",\n");
                }
                push_indent(out, indent);
                out.push('}');
            }
            visited.remove(&id);
        }
        Value::Set(items) => {
            if !visited.insert(id) {
                out.push_str("[Circular]");
                return;
            }
            if items.is_empty() {
                out.push_str("Set {}");
            } else {
                out.push_str("Set {\n");
                for item in items {
                    push_indent(out, indent + 1);
                    write_value(arena, *item, out, indent + 1, visited);
                    out.push_str(",\n");
                }
                push_indent(out, indent);
                out.push('}');
            }
            visited.remove(&id);
        }
    }
}

fn push_indent(out: &mut String, level: usize) {
    for _ in 0..level {
        out.push_str("  ");
    }
}
