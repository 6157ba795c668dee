//! Rendering options.

use deepdiff_value::{ValueArena, ValueId};
use owo_colors::Style;

use crate::plugins::{DiffPlugin, default_plugins};

/// Pluggable leaf serializer.
pub type SerializeFn = fn(&ValueArena, ValueId) -> String;

/// Options controlling how a diff tree renders.
///
/// `expand` and `context_lines` are accepted for option-surface
/// compatibility but windowed collapsing of long unchanged regions is not
/// implemented; every line always renders.
pub struct FormatOptions {
    /// Legend label for the `a` side.
    pub a_annotation: String,
    /// Legend label for the `b` side.
    pub b_annotation: String,
    /// Indicator prefixed to `a`-side lines.
    pub a_indicator: String,
    /// Indicator prefixed to `b`-side lines.
    pub b_indicator: String,
    /// Indicator prefixed to common lines.
    pub common_indicator: String,
    /// Style for `a`-side lines.
    pub a_style: Style,
    /// Style for `b`-side lines.
    pub b_style: Style,
    /// Style for common lines.
    pub common_style: Style,
    /// Skip the two-line annotation legend.
    pub omit_annotation_lines: bool,
    /// Accepted but inert; see the type docs.
    pub expand: bool,
    /// Accepted but inert; see the type docs.
    pub context_lines: usize,
    /// Leaf serializer. Plugins get first refusal through their own
    /// `serialize` hook.
    pub serialize: SerializeFn,
    /// Plugins consulted before default rendering, in order.
    pub plugins: Vec<Box<dyn DiffPlugin>>,
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self {
            a_annotation: "Expected".to_owned(),
            b_annotation: "Received".to_owned(),
            a_indicator: "-".to_owned(),
            b_indicator: "+".to_owned(),
            common_indicator: " ".to_owned(),
            a_style: Style::new().green(),
            b_style: Style::new().red(),
            common_style: Style::new().dimmed(),
            omit_annotation_lines: false,
            expand: false,
            context_lines: 5,
            serialize: deepdiff_value::serialize,
            plugins: default_plugins(),
        }
    }
}

impl FormatOptions {
    /// Defaults with all styles disabled. Output carries no escape codes,
    /// which keeps assertions on it readable.
    pub fn plain() -> Self {
        Self {
            a_style: Style::new(),
            b_style: Style::new(),
            common_style: Style::new(),
            ..Self::default()
        }
    }

    /// Toggle the annotation legend.
    pub fn with_omit_annotation_lines(mut self, omit: bool) -> Self {
        self.omit_annotation_lines = omit;
        self
    }

    /// Replace the annotation labels.
    pub fn with_annotations(mut self, a: impl Into<String>, b: impl Into<String>) -> Self {
        self.a_annotation = a.into();
        self.b_annotation = b.into();
        self
    }

    /// Replace the leaf serializer.
    pub fn with_serialize(mut self, serialize: SerializeFn) -> Self {
        self.serialize = serialize;
        self
    }

    /// Replace the plugin list.
    pub fn with_plugins(mut self, plugins: Vec<Box<dyn DiffPlugin>>) -> Self {
        self.plugins = plugins;
        self
    }
}
