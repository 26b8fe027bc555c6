//! Syntactic diagnostics for control templates.
//!
//! Parsing never fails: anything malformed is simply left as literal text.
//! That is the right behaviour for a live editor but it hides typos, so this
//! module reports the fragments that look like directives yet do not take
//! effect. Checking has no influence on parsing or rendering.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use super::parser::Scan;
use super::scanner;
use super::{ControlDeclaration, ControlKind, Span};

/// What a [`Diagnostic`] is about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// `{{toggle:X}}` without a matching `{{/toggle:X}}`.
    UnclosedToggle { name: String },
    /// `{{/toggle:X}}` without a matching opener.
    OrphanToggleClose { name: String },
    /// A toggle opened inside another toggle's body.
    NestedToggle { name: String, parent: String },
    /// A directive whose keyword is not a control kind.
    UnknownKind { keyword: String, name: String },
    /// A control declared again with a different default or range.
    ConflictingDefaults {
        control: ControlKind,
        name: String,
        first: String,
        conflicting: String,
    },
}

/// One finding, located in the checked text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    #[serde(flatten)]
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::UnclosedToggle {
                name,
            } => write!(f, "toggle '{name}' is never closed with {{{{/toggle:{name}}}}}"),
            DiagnosticKind::OrphanToggleClose {
                name,
            } => write!(f, "closing tag for toggle '{name}' has no matching opener"),
            DiagnosticKind::NestedToggle {
                name,
                parent,
            } => write!(
                f,
                "toggle '{name}' is nested inside toggle '{parent}'; nested toggles are not supported"
            ),
            DiagnosticKind::UnknownKind {
                keyword,
                name,
            } => write!(
                f,
                "unknown control kind '{keyword}' for '{name}' (expected text, select, slider or toggle)"
            ),
            DiagnosticKind::ConflictingDefaults {
                control,
                name,
                first,
                conflicting,
            } => write!(
                f,
                "{control} control '{name}' is redeclared as '{conflicting}'; the first declaration '{first}' takes effect"
            ),
        }
    }
}

/// Check `text` for directives that will not behave as written.
///
/// Diagnostics are returned in source order.
pub fn check(text: &str) -> Vec<Diagnostic> {
    let scan = Scan::new(text);
    let mut diagnostics = Vec::new();

    check_toggle_tags(text, &scan, &mut diagnostics);
    check_keywords(text, &mut diagnostics);
    check_redeclarations(&scan, &mut diagnostics);

    diagnostics.sort_by_key(|d| d.span.start);
    tracing::debug!("Found {} diagnostic(s)", diagnostics.len());
    diagnostics
}

fn check_toggle_tags(text: &str, scan: &Scan<'_>, diagnostics: &mut Vec<Diagnostic>) {
    for opener in scanner::toggle_openers(text) {
        if scan.blocks.iter().any(|b| b.span.start == opener.span.start) {
            continue;
        }
        let kind = match scan.blocks.iter().find(|b| b.body_span.contains(&opener.span)) {
            Some(parent) => DiagnosticKind::NestedToggle {
                name: opener.name.to_string(),
                parent: parent.name.to_string(),
            },
            None => DiagnosticKind::UnclosedToggle {
                name: opener.name.to_string(),
            },
        };
        diagnostics.push(Diagnostic {
            kind,
            span: opener.span,
        });
    }

    for closer in scanner::toggle_closers(text) {
        if scan.blocks.iter().any(|b| b.span.contains(&closer.span)) {
            continue;
        }
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::OrphanToggleClose {
                name: closer.name.to_string(),
            },
            span: closer.span,
        });
    }
}

fn check_keywords(text: &str, diagnostics: &mut Vec<Diagnostic>) {
    for directive in scanner::keyword_directives(text) {
        if directive.kind().is_some() {
            continue;
        }
        diagnostics.push(Diagnostic {
            kind: DiagnosticKind::UnknownKind {
                keyword: directive.keyword.to_string(),
                name: directive.name.to_string(),
            },
            span: directive.span,
        });
    }
}

fn check_redeclarations(scan: &Scan<'_>, diagnostics: &mut Vec<Diagnostic>) {
    let mut all: Vec<&ControlDeclaration> =
        scan.top_level.iter().chain(scan.nested.iter().flatten()).collect();
    all.sort_by_key(|d| d.span.start);

    let mut first_seen: HashMap<(ControlKind, &str), String> = HashMap::new();
    for declaration in all {
        let signature = signature(declaration);
        match first_seen.get(&(declaration.kind, declaration.name.as_str())) {
            Some(first) if *first != signature => diagnostics.push(Diagnostic {
                kind: DiagnosticKind::ConflictingDefaults {
                    control: declaration.kind,
                    name: declaration.name.clone(),
                    first: first.clone(),
                    conflicting: signature,
                },
                span: declaration.span,
            }),
            Some(_) => {}
            None => {
                first_seen.insert((declaration.kind, declaration.name.as_str()), signature);
            }
        }
    }
}

/// What a declaration contributes besides its name, in surface form.
fn signature(declaration: &ControlDeclaration) -> String {
    match (declaration.kind, declaration.range) {
        (ControlKind::Select, _) => declaration.options.join("|"),
        (ControlKind::Slider, Some(range)) => {
            format!("{}:{}:{}", declaration.default_value, range.min, range.max)
        }
        _ => declaration.default_value.clone(),
    }
}

/// 1-based line and column (in chars) of a byte offset.
pub fn line_col(text: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut column = 1;
    for (index, c) in text.char_indices() {
        if index >= offset {
            break;
        }
        if c == '\n' {
            line += 1;
            column = 1;
        } else {
            column += 1;
        }
    }
    (line, column)
}
