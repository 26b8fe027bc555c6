//! Control-syntax templating engine.
//!
//! Prompt text can declare interactive parameters inline using a small
//! directive syntax. This module turns that text into a list of
//! [`ControlDeclaration`]s and renders the text back out against a set of
//! runtime values.
//!
//! # Syntax
//!
//! ```text
//! {{text:Name:John}}                          free-form text, default "John"
//! {{select:Genre:Fantasy|Sci-Fi|Mystery}}     dropdown, default is the first option
//! {{slider:Creativity:75}}                    slider 0..100, default 75
//! {{slider:Temperature:7:0:10}}               slider 0..10, default 7
//! {{toggle:Details}}...{{/toggle:Details}}    optional block, removed unless enabled
//! ```
//!
//! Controls may appear inside toggle blocks. Toggle blocks do not nest.
//!
//! # Pipeline
//!
//! ```rust,no_run
//! use promptctl_cli::controls::{parse, render, ValueMap};
//!
//! let text = "Hello {{text:Name:John}}!";
//! let declarations = parse(text);
//!
//! let mut values = ValueMap::new();
//! values.insert("Name", "Alice");
//! assert_eq!(render(text, &declarations, &values), "Hello Alice!");
//! ```
//!
//! Both operations are pure. Malformed directives never produce an error; they
//! are left in the text untouched.

pub mod lint;
pub mod parser;
pub mod renderer;
mod scanner;
pub mod value;


pub use lint::{Diagnostic, DiagnosticKind, check};
pub use parser::{controls, parse};
pub use renderer::render;
pub use value::{ControlValue, ValueMap};

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The kind of a control directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ControlKind {
    /// Free-form text input.
    Text,
    /// Dropdown over a fixed list of options.
    Select,
    /// Integer slider with an inclusive range.
    Slider,
    /// Block of text that is kept or removed as a whole.
    Toggle,
}

impl ControlKind {
    /// Resolve a directive keyword (already trimmed) to a kind.
    ///
    /// Keywords are case-sensitive: `Text` is not a kind.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "text" => Some(Self::Text),
            "select" => Some(Self::Select),
            "slider" => Some(Self::Slider),
            "toggle" => Some(Self::Toggle),
            _ => None,
        }
    }

    /// The keyword used for this kind in directive syntax.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Select => "select",
            Self::Slider => "slider",
            Self::Toggle => "toggle",
        }
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Half-open byte range `[start, end)` into the source text.
///
/// Offsets are byte offsets into the UTF-8 source and always fall on char
/// boundaries when produced by the parser.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
        }
    }

    pub const fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub const fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether `other` lies entirely within this span.
    pub const fn contains(&self, other: &Span) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether the two spans share at least one byte.
    pub const fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Shift both ends right by `offset`.
    pub const fn offset(self, offset: usize) -> Self {
        Self::new(self.start + offset, self.end + offset)
    }

    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Inclusive bounds of a slider control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SliderRange {
    pub min: i64,
    pub max: i64,
}

impl Default for SliderRange {
    fn default() -> Self {
        Self {
            min: 0,
            max: 100,
        }
    }
}

/// One dynamic placeholder discovered in prompt text.
///
/// A declaration is the representative of every occurrence of the same
/// `(kind, name)` pair: `span` is where it first appears, `occurrences` lists
/// every place the renderer has to rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlDeclaration {
    pub kind: ControlKind,

    /// Identifier with surrounding whitespace trimmed.
    pub name: String,

    /// Initial text, initial option, or initial slider position.
    #[serde(default)]
    pub default_value: String,

    /// Dropdown options in declaration order (select only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,

    /// Slider bounds (slider only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<SliderRange>,

    /// Raw text between the opening and closing tag (toggle only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<String>,

    /// Surface syntax of the first occurrence.
    pub span: Span,

    /// Every occurrence of this control, in source order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub occurrences: Vec<Span>,

    /// Controls declared inside the toggle body (toggle only).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nested: Vec<ControlDeclaration>,
}

impl ControlDeclaration {
    pub(crate) fn new(kind: ControlKind, name: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            name: name.into(),
            default_value: String::new(),
            options: Vec::new(),
            range: None,
            inner_text: None,
            span,
            occurrences: vec![span],
            nested: Vec::new(),
        }
    }

    /// Identity of the control across a document.
    pub fn key(&self) -> (ControlKind, &str) {
        (self.kind, self.name.as_str())
    }

    pub fn is_toggle(&self) -> bool {
        self.kind == ControlKind::Toggle
    }

    pub fn min(&self) -> Option<i64> {
        self.range.map(|r| r.min)
    }

    pub fn max(&self) -> Option<i64> {
        self.range.map(|r| r.max)
    }

    /// Spans to rewrite when rendering.
    ///
    /// Falls back to `span` for hand-built declarations without occurrences.
    pub fn spans(&self) -> &[Span] {
        if self.occurrences.is_empty() {
            std::slice::from_ref(&self.span)
        } else {
            &self.occurrences
        }
    }
}
