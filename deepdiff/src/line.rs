//! Rendered lines and the printer.
//!
//! A [`Line`] is the atomic unit of output: the format engine produces an
//! ordered sequence of them and [`print_lines`] joins, indents, and colors
//! them into the final string.

use owo_colors::{OwoColorize, Style};

use crate::options::FormatOptions;

/// How a rendered line is colored and prefixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineType {
    /// Present on both sides; neutral color, space indicator.
    Common,
    /// Present only on the `b` side.
    Inserted,
    /// Present only on the `a` side.
    Deleted,
}

/// One rendered output line.
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    /// How the line is colored and prefixed.
    pub line_type: LineType,
    /// Text before the value (a `"key": ` prefix, an opening quote).
    pub prefix: String,
    /// The rendered value. May contain embedded newlines; the printer
    /// re-indents continuation lines.
    pub val: String,
    /// Text after the value (a trailing comma, a closing quote).
    pub suffix: String,
    /// Two spaces per nesting level.
    pub indent: String,
    /// True when `val` is raw text (a string line, a pre-rendered plugin
    /// value) rather than serializer output.
    pub skip_serialize: bool,
}

/// Indentation/prefix/suffix context threaded through the renderer.
#[derive(Debug, Clone, Default)]
pub struct LineContext {
    /// Accumulated indentation, two spaces per level.
    pub indent: String,
    /// Prefix for the next emitted line.
    pub prefix: String,
    /// Suffix for the next emitted line.
    pub suffix: String,
}

impl LineContext {
    /// The root context: no indent, no prefix, no suffix.
    pub fn root() -> Self {
        Self::default()
    }

    /// A copy indented one more level.
    pub fn indented(&self) -> Self {
        Self {
            indent: format!("{}  ", self.indent),
            prefix: String::new(),
            suffix: String::new(),
        }
    }
}

impl Line {
    fn new(line_type: LineType, val: String, context: &LineContext) -> Self {
        Self {
            line_type,
            prefix: context.prefix.clone(),
            val,
            suffix: context.suffix.clone(),
            indent: context.indent.clone(),
            skip_serialize: false,
        }
    }

    /// A line present on both sides.
    pub fn common(val: impl Into<String>, context: &LineContext) -> Self {
        Self::new(LineType::Common, val.into(), context)
    }

    /// A line present only on the `b` side.
    pub fn inserted(val: impl Into<String>, context: &LineContext) -> Self {
        Self::new(LineType::Inserted, val.into(), context)
    }

    /// A line present only on the `a` side.
    pub fn deleted(val: impl Into<String>, context: &LineContext) -> Self {
        Self::new(LineType::Deleted, val.into(), context)
    }

    /// Mark `val` as raw text rather than serializer output.
    pub fn raw(mut self) -> Self {
        self.skip_serialize = true;
        self
    }
}

/// The deleted-then-inserted line pair an updated leaf renders as.
pub(crate) fn format_updated(a_val: String, b_val: String, context: &LineContext) -> Vec<Line> {
    vec![Line::deleted(a_val, context), Line::inserted(b_val, context)]
}

/// Apply a style unless it is plain (keeps test output byte-stable without
/// a strip-ansi pass when no colors are configured).
pub(crate) fn paint(text: &str, style: Style) -> String {
    if style.is_plain() {
        text.to_owned()
    } else {
        text.style(style).to_string()
    }
}

/// Re-indent a possibly multi-line value: every line gets the padding,
/// continuation lines get two extra spaces to clear the indicator column.
fn add_indentation(content: &str, padding: &str) -> String {
    content
        .split('\n')
        .enumerate()
        .map(|(i, line)| {
            let extra = if i != 0 { "  " } else { "" };
            format!("{extra}{padding}{line}")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join lines into the final string: indicator, space, indentation, then
/// the prefixed value, colored per line type.
pub fn print_lines(lines: &[Line], options: &FormatOptions) -> String {
    lines
        .iter()
        .map(|line| {
            let content = format!("{}{}{}", line.prefix, line.val, line.suffix);
            let body = format!(" {}", add_indentation(&content, &line.indent));
            match line.line_type {
                LineType::Common => {
                    paint(&format!("{}{body}", options.common_indicator), options.common_style)
                }
                LineType::Inserted => {
                    paint(&format!("{}{body}", options.b_indicator), options.b_style)
                }
                LineType::Deleted => {
                    paint(&format!("{}{body}", options.a_indicator), options.a_style)
                }
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
